//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::{info, warn};

use crate::controller::InteractionController;
use crate::gateway::RecordGateway;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key, handle_mouse};
use super::render::render;
use super::state::UiState;

/// Main TUI application.
pub struct App {
    ctl: InteractionController<Box<dyn RecordGateway>>,
    state: UiState,
    should_quit: bool,
}

impl App {
    /// Creates a new App over the given backend gateway.
    pub fn new(gateway: Box<dyn RecordGateway>) -> Self {
        Self {
            ctl: InteractionController::new(gateway),
            state: UiState::new(),
            should_quit: false,
        }
    }

    /// Runs the TUI application.
    pub fn run(mut self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);

        let result = self.main_loop(&mut terminal, &events);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &EventHandler,
    ) -> io::Result<()> {
        // Initial fetch
        self.reload(terminal)?;

        loop {
            terminal.draw(|frame| render(frame, &mut self.state, &self.ctl))?;

            match events.next() {
                Ok(Event::Tick) => self.state.tick(),
                Ok(Event::Key(key)) => match handle_key(&mut self.state, &mut self.ctl, key) {
                    KeyAction::Quit => self.should_quit = true,
                    KeyAction::Reload => self.reload(terminal)?,
                    KeyAction::None => {}
                },
                Ok(Event::Mouse(mouse)) => handle_mouse(&mut self.state, &mut self.ctl, mouse),
                Ok(Event::FocusLost) => {
                    self.ctl.pointer_cancel();
                }
                Ok(Event::Resize) => {}
                Err(_) => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("quit requested");
                break;
            }
        }
        Ok(())
    }

    /// Draws a loading frame, then fetches the collection.
    fn reload<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        self.state.set_status("Loading...");
        terminal.draw(|frame| render(frame, &mut self.state, &self.ctl))?;

        match self.ctl.refresh() {
            Ok(count) => self.state.set_status(format!("Loaded {} records", count)),
            Err(e) => {
                warn!(error = %e, "reload failed");
                self.state.set_status(e.to_string());
            }
        }
        self.state.clamp_cursor(self.ctl.store().display_len());
        Ok(())
    }
}
