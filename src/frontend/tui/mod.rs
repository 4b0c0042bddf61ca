use crate::app::App;
use crate::contacts::ContactApi;
use crate::error::{PhonebookError, Result, UiError};
use crate::input::InputHandler;
use crate::mask::CaretSettle;
use crate::ui::Renderer;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::Duration;

pub struct TuiApplication<S: ContactApi> {
    app: App<S>,
    renderer: Renderer,
    input: InputHandler,
}

impl<S: ContactApi> TuiApplication<S> {
    pub fn new(api: S, settle: CaretSettle, poll_interval: Duration) -> Self {
        Self {
            app: App::new(api, settle),
            renderer: Renderer::new(),
            input: InputHandler::with_timeout(poll_interval),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        info!("terminal session finished after {} frames", self.renderer.frame_count());
        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.app.is_running() {
            self.app.tick();
            self.renderer
                .render(terminal, &self.app)
                .map_err(|err| terminal_error("render", err))?;

            let event = self.input.next_event()?;
            self.app.handle_event(event);
        }

        Ok(())
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableBracketedPaste)
        .map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, DisableBracketedPaste, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> PhonebookError {
    PhonebookError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
