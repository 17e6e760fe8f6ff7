//! Terminal session and blocking event loop.

use crate::app::{Action, App};
use crate::export::TreeExporter;
use crate::ui;
use anyhow::Context;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};

/// Raw-mode alternate screen, restored when dropped.
struct Session {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Session {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("failed to enter alternate screen");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")?;
        Ok(Self { terminal })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Run the navigator until the user quits. Export requests go to `exporter`.
pub fn run(app: &mut App, exporter: &dyn TreeExporter) -> anyhow::Result<()> {
    let mut session = Session::enter()?;
    event_loop(&mut session.terminal, app, exporter)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    exporter: &dyn TreeExporter,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app)).context("failed to draw")?;

        // Resize and other events just trigger a redraw.
        let Event::Key(key) = event::read().context("failed to read terminal event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.handle_key_event(key) {
            Action::Continue => {}
            Action::Quit => return Ok(()),
            Action::Export => {
                let result = exporter.export(app.forest(), app.lines(), app.stats(), app.language());
                match result {
                    Ok(path) => app.set_status(format!("exported to {}", path.display())),
                    Err(e) => {
                        // stderr would draw over the alternate screen.
                        tracing::debug!("export failed: {e:#}");
                        app.set_status(format!("export failed: {e}"));
                    }
                }
            }
        }
    }
}
