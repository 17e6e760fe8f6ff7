//! Aggregate statistics over a built [`Forest`].

use crate::entity::ModifierClass;
use crate::hierarchy::{Forest, NodeId};

/// Nodes at or beyond this inheritance depth count as deep inheritance.
pub const DEEP_INHERITANCE_THRESHOLD: usize = 3;

/// Snapshot of forest-wide counts, produced by a single walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub total: usize,
    pub nested: usize,
    pub normal: usize,
    pub abstract_count: usize,
    pub sealed: usize,
    pub static_count: usize,
    pub max_depth: usize,
    /// Entity with the highest line count (first seen on ties).
    pub largest: Option<NodeId>,
    /// Inheritance-tree nodes at depth >= [`DEEP_INHERITANCE_THRESHOLD`].
    pub deep: Vec<NodeId>,
    /// Every maximal-length inheritance chain, top to bottom.
    pub deepest_chains: Vec<Vec<NodeId>>,
}

impl TreeStats {
    /// Walk the forest depth-first over both edge kinds.
    ///
    /// Totals and modifier counts include nested classes; depth tracking and
    /// the deepest chains follow inheritance edges only.
    pub fn aggregate(forest: &Forest) -> Self {
        let mut stats = Self::default();
        let mut best_chain_len: Option<usize> = None;
        let mut visited = vec![false; forest.len()];

        let mut stack: Vec<NodeId> = forest.roots().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if std::mem::replace(&mut visited[id.0], true) {
                continue;
            }
            let node = forest.node(id);
            let entity = &node.entity;

            stats.total += 1;
            if entity.is_nested() {
                stats.nested += 1;
            }
            match entity.modifier() {
                ModifierClass::Normal => stats.normal += 1,
                ModifierClass::Abstract => stats.abstract_count += 1,
                ModifierClass::Sealed => stats.sealed += 1,
                ModifierClass::Static => stats.static_count += 1,
            }

            let largest_lines = stats
                .largest
                .map(|l| forest.node(l).entity.line_count);
            if largest_lines.is_none_or(|lines| entity.line_count > lines) {
                stats.largest = Some(id);
            }

            // Nested classes whose container was found stay outside the inheritance tree.
            if node.container.is_none() {
                stats.max_depth = stats.max_depth.max(node.depth);
                if node.depth >= DEEP_INHERITANCE_THRESHOLD {
                    stats.deep.push(id);
                }
                // A chain is maximal when it ends at an inheritance leaf.
                if node.children.is_empty() {
                    let len = node.depth;
                    match best_chain_len {
                        Some(best) if len < best => {}
                        Some(best) if len == best => {
                            stats.deepest_chains.push(forest.inheritance_path(id));
                        }
                        _ => {
                            best_chain_len = Some(len);
                            stats.deepest_chains = vec![forest.inheritance_path(id)];
                        }
                    }
                }
            }

            // Children are emitted before nested children in display order.
            for &nested in node.nested_children.iter().rev() {
                stack.push(nested);
            }
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }

        stats
    }

    pub fn count_for(&self, modifier: ModifierClass) -> usize {
        match modifier {
            ModifierClass::Normal => self.normal,
            ModifierClass::Abstract => self.abstract_count,
            ModifierClass::Sealed => self.sealed,
            ModifierClass::Static => self.static_count,
        }
    }

    /// Length (edge count) of the deepest inheritance chain.
    pub fn deepest_chain_len(&self) -> usize {
        self.deepest_chains
            .first()
            .map_or(0, |chain| chain.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ClassEntity;

    fn class(name: &str, base: Option<&str>, lines: usize) -> ClassEntity {
        let mut e = ClassEntity::new(name, format!("{}.cs", name));
        e.base_class = base.map(String::from);
        e.line_count = lines;
        e
    }

    #[test]
    fn test_empty_forest() {
        let stats = TreeStats::aggregate(&Forest::build(Vec::new()));
        assert_eq!(stats, TreeStats::default());
        assert_eq!(stats.deepest_chain_len(), 0);
    }

    #[test]
    fn test_largest_first_on_tie() {
        let forest = Forest::build(vec![class("B", None, 40), class("A", None, 40)]);
        let stats = TreeStats::aggregate(&forest);
        // Roots are walked in name order, so A is seen first.
        assert_eq!(forest.node(stats.largest.unwrap()).name(), "A");
    }

    #[test]
    fn test_tied_chains_are_all_kept() {
        let forest = Forest::build(vec![
            class("Root", None, 1),
            class("Left", Some("Root"), 1),
            class("Right", Some("Root"), 1),
        ]);
        let stats = TreeStats::aggregate(&forest);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.deepest_chains.len(), 2);
        assert_eq!(stats.deepest_chain_len(), 1);
    }

    #[test]
    fn test_deep_threshold() {
        let forest = Forest::build(vec![
            class("A", None, 1),
            class("B", Some("A"), 1),
            class("C", Some("B"), 1),
            class("D", Some("C"), 1),
        ]);
        let stats = TreeStats::aggregate(&forest);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.deep.len(), 1);
        assert_eq!(forest.node(stats.deep[0]).name(), "D");
    }
}
