//! Terminal browser using ratatui
//!
//! Two tabs mirror the catalog views:
//! - Idol Skills: four filter lists and the grouped result
//! - Ideal Teams: a song list and the resolved presets

mod components;
pub mod state;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

use crate::catalog::Catalog;
use crate::images::ImageStore;
use components::{FilterPanel, ResultPane, StatusBar, TabBar};
pub use state::{BrowserState, ChoiceList, Dimension, Tab};

/// Terminal session for the browser
pub struct UiApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: BrowserState,
}

impl UiApp {
    /// Enter the alternate screen
    pub fn new(state: BrowserState) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, state })
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;

        self.terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Tabs
                    Constraint::Min(5),    // Filters and results
                    Constraint::Length(1), // Key help
                ])
                .split(frame.area());

            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(34), Constraint::Min(20)])
                .split(chunks[1]);

            TabBar { current: state.tab }.render(frame, chunks[0]);

            match state.tab {
                Tab::Skills => {
                    let panels = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Ratio(1, 4); 4])
                        .split(body[0]);
                    for (dimension, area) in Dimension::ALL.iter().zip(panels.iter()) {
                        FilterPanel {
                            title: dimension.title(),
                            list: state.filter(*dimension),
                            focused: state.focus == *dimension,
                        }
                        .render(frame, *area);
                    }
                }
                Tab::Teams => FilterPanel {
                    title: "Song",
                    list: state.songs(),
                    focused: true,
                }
                .render(frame, body[0]),
            }

            ResultPane {
                lines: state.lines(),
                scroll: state.scroll(),
            }
            .render(frame, body[1]);
            StatusBar { tab: state.tab }.render(frame, chunks[2]);
        })?;

        Ok(())
    }

    /// Restore terminal
    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for UiApp {
    fn drop(&mut self) {
        // Best effort cleanup
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

/// Run the browser until the user quits
pub fn run(catalog: &Catalog, images: &dyn ImageStore) -> Result<()> {
    let mut app = UiApp::new(BrowserState::new(catalog))?;
    tracing::info!("Browser started");

    loop {
        if app.state.take_dirty() {
            app.state.refresh(catalog, images);
        }
        app.draw()?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let CrosstermEvent::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let interrupt =
                key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            if interrupt || app.state.handle_key(key.code) {
                break;
            }
        }
    }

    app.restore()
}
