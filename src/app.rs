use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use registrar::config::Config;
use registrar::model::RegistrationSummary;
use registrar::wizard::{LogFinish, WizardController};

use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::ui::wizard_screen::{ScreenResult, WizardScreen};

/// How the session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppOutcome {
    /// The registration was handed off
    Finished(RegistrationSummary),
    /// The user quit before finishing
    Aborted,
}

pub struct App {
    config: Config,
    screen: WizardScreen,
    finish_handler: LogFinish,
    outcome: Option<AppOutcome>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let steps = config
            .step_sequence()
            .context("Invalid wizard.steps configuration")?;
        let screen = WizardScreen::new(
            WizardController::with_sequence(steps),
            config.ui.show_optional_badge,
        );

        Ok(Self {
            config,
            screen,
            finish_handler: LogFinish::new(),
            outcome: None,
        })
    }

    pub fn run(&mut self) -> Result<AppOutcome> {
        install_panic_hook();
        let _guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        tracing::info!(steps = self.screen.controller().steps().len(), "wizard started");

        while self.outcome.is_none() {
            terminal.draw(|f| self.screen.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key)?;
                    }
                }
            }
        }

        terminal.show_cursor()?;
        Ok(self.outcome.clone().unwrap_or(AppOutcome::Aborted))
    }

    /// Route a key to the screen and act on its result
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.screen.handle_key(key) {
            ScreenResult::Continue => {}
            ScreenResult::Quit => {
                tracing::info!(
                    step = self.screen.controller().current_step_index(),
                    "wizard aborted"
                );
                self.outcome = Some(AppOutcome::Aborted);
            }
            ScreenResult::Finish => {
                self.screen
                    .finish(&mut self.finish_handler)
                    .context("Failed to finish registration")?;
                let summary =
                    RegistrationSummary::from_aggregate(self.screen.controller().aggregate());
                self.outcome = Some(AppOutcome::Finished(summary));
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn outcome(&self) -> Option<&AppOutcome> {
        self.outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use registrar::wizard::{StepDescriptor, StepKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn two_step_config() -> Config {
        let mut config = Config::default();
        config.wizard.steps = vec![
            StepDescriptor::new(1, StepKind::Company, true),
            StepDescriptor::new(2, StepKind::Teams, false),
        ];
        config
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_invalid_step_config_rejected() {
        let mut config = Config::default();
        config.wizard.steps.clear();
        assert!(App::new(config).is_err());
    }

    #[test]
    fn test_quit_aborts() {
        let mut app = App::new(Config::default()).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(app.outcome(), Some(&AppOutcome::Aborted));
    }

    #[test]
    fn test_full_session_finishes_with_summary() {
        let mut app = App::new(two_step_config()).unwrap();

        type_text(&mut app, "Acme");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "12345678000195");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "contact@acme.com");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "secret1");
        app.handle_key(key(KeyCode::Enter)).unwrap();

        type_text(&mut app, "Platform");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.outcome().is_none());

        app.handle_key(key(KeyCode::Enter)).unwrap();
        let Some(AppOutcome::Finished(summary)) = app.outcome() else {
            panic!("expected a finished session, got {:?}", app.outcome());
        };
        assert_eq!(summary.company_name, "Acme");
        assert_eq!(summary.teams, 1);
        assert!(app.finish_handler.received().is_some());
    }
}
