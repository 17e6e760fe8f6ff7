//! Scroll window that keeps the tree selection on screen.

use std::ops::Range;

/// A fixed-height window over a scrollable list of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the first visible row.
    pub offset: usize,
    pub visible_rows: usize,
}

impl Viewport {
    pub fn new(visible_rows: usize) -> Self {
        Self {
            offset: 0,
            visible_rows,
        }
    }

    /// Scroll by the minimum amount that keeps `selected` visible.
    pub fn follow(&mut self, selected: usize, total: usize) {
        if self.visible_rows == 0 {
            self.offset = selected;
            return;
        }
        if selected < self.offset {
            self.offset = selected;
        } else if selected >= self.offset + self.visible_rows {
            self.offset = selected + 1 - self.visible_rows;
        }
        self.offset = self.offset.min(total.saturating_sub(self.visible_rows));
    }

    /// Change the window height, then re-follow the selection.
    pub fn resize(&mut self, visible_rows: usize, selected: usize, total: usize) {
        self.visible_rows = visible_rows;
        self.follow(selected, total);
    }

    /// Row indices currently visible.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.offset.min(total);
        start..(start + self.visible_rows).min(total)
    }
}
