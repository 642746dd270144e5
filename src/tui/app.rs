//! Application state and logic.

use crate::selection::{Command, Selection, SelectionStep};
use crate::settings::Settings;
use crate::tutorial::Tutorial;
use crossterm::event::KeyCode;
use derive_getters::Getters;
use quantum_tictactoe::{CollapseSource, MoveRejection, Position, QuantumGame};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::input::{digit_position, move_cursor};

/// How long a reversed box stays highlighted.
pub const FLASH_DURATION: Duration = Duration::from_millis(500);

/// Shown when a move key is pressed after the game ended.
pub const GAME_OVER_HINT: &str = "Game over. Press 'r' to play again or 'q' to quit.";

/// Engine driven by whichever collapse source the player configured.
pub type Game = QuantumGame<Box<dyn CollapseSource>>;

/// Main application state.
#[derive(Debug, Getters)]
pub struct App {
    game: Game,
    selection: Selection,
    cursor: Position,
    status: String,
    flashes: Vec<(Position, Instant)>,
    tutorial: Option<Tutorial>,
    show_rules: bool,
    settings: Settings,
    settings_path: Option<PathBuf>,
    should_quit: bool,
}

impl App {
    /// Creates a new application around `game`.
    ///
    /// The tutorial opens when the player has not completed onboarding or
    /// when `force_tutorial` is set. Settings are written back to
    /// `settings_path` once the tutorial is finished.
    #[instrument(skip(game, settings))]
    pub fn new(
        game: Game,
        settings: Settings,
        settings_path: Option<PathBuf>,
        force_tutorial: bool,
    ) -> Self {
        let tutorial = (force_tutorial || !settings.onboarding_complete()).then(Tutorial::new);
        debug!(tutorial = tutorial.is_some(), "Initializing app");
        Self {
            status: game.last_message().to_string(),
            game,
            selection: Selection::Idle,
            cursor: Position::Center,
            flashes: Vec::new(),
            tutorial,
            show_rules: false,
            settings,
            settings_path,
            should_quit: false,
        }
    }

    /// Whether `pos` is highlighted after a reversal.
    pub fn is_flashing(&self, pos: Position) -> bool {
        self.flashes.iter().any(|(p, _)| *p == pos)
    }

    /// Drops highlights older than [`FLASH_DURATION`].
    pub fn tick(&mut self, now: Instant) {
        self.flashes
            .retain(|(_, since)| now.saturating_duration_since(*since) < FLASH_DURATION);
    }

    /// Handles a key press.
    #[instrument(skip(self, now))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        if self.tutorial.is_some() {
            self.handle_tutorial_key(key);
            return;
        }
        if self.show_rules {
            if matches!(key, KeyCode::Char('q')) {
                self.should_quit = true;
            }
            self.show_rules = false;
            return;
        }

        match key {
            KeyCode::Char('q') => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('?') => self.show_rules = true,
            KeyCode::Char('t') => {
                self.selection.cancel();
                self.tutorial = Some(Tutorial::new());
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            _ if self.game.is_over() => {
                self.status = GAME_OVER_HINT.to_string();
            }
            KeyCode::Char('c') => self.status = self.selection.begin_classical().to_string(),
            KeyCode::Char('e') => self.status = self.selection.begin_quantum().to_string(),
            KeyCode::Esc => {
                self.selection.cancel();
                self.status = self.game.last_message().to_string();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.pick(self.cursor, now),
            other => {
                if let Some(pos) = digit_position(other) {
                    self.cursor = pos;
                    self.pick(pos, now);
                }
            }
        }
    }

    /// Restarts the game.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.game.reset();
        self.selection.cancel();
        self.flashes.clear();
        self.status = self.game.last_message().to_string();
    }

    fn pick(&mut self, pos: Position, now: Instant) {
        match self.selection.pick(pos, self.game.board()) {
            SelectionStep::Prompt(prompt) => self.status = prompt,
            SelectionStep::Submit(command) => self.submit(command, now),
        }
    }

    fn submit(&mut self, command: Command, now: Instant) {
        debug!(?command, "Submitting move");
        let result = match command {
            Command::Classical(pos) => self
                .game
                .apply_classical_move(pos.to_index())
                .map(|outcome| {
                    self.flashes
                        .extend(outcome.reversed().map(|reversed| (reversed, now)));
                }),
            Command::Quantum { control, target } => self
                .game
                .apply_quantum_move(control.to_index(), target.to_index())
                .map(|_| ()),
        };

        match result {
            Ok(()) => self.status = self.game.last_message().to_string(),
            Err(rejection) => {
                warn!(%rejection, "Move rejected");
                self.status = rejection.to_string();
                // A bad target keeps the control so the player can pick again.
                if let (
                    Command::Quantum { control, .. },
                    MoveRejection::TargetNotClassical(_) | MoveRejection::SameCell(_),
                ) = (command, rejection)
                {
                    self.selection = Selection::AwaitingTarget(control);
                }
            }
        }
    }

    fn handle_tutorial_key(&mut self, key: KeyCode) {
        let Some(tutorial) = self.tutorial.as_mut() else {
            return;
        };
        let finished = match key {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Right | KeyCode::Char('n') => {
                !tutorial.advance()
            }
            KeyCode::Esc | KeyCode::Char('q') => true,
            _ => false,
        };
        if finished {
            self.finish_tutorial();
        }
    }

    fn finish_tutorial(&mut self) {
        info!("Tutorial completed");
        self.tutorial = None;
        self.settings.complete_onboarding();
        if let Some(path) = &self.settings_path
            && let Err(e) = self.settings.save(path)
        {
            warn!(error = %e, "Failed to save settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_tictactoe::{Bit, Player, ScriptedCollapse};

    fn app_with(bits: &[Bit]) -> App {
        let source: Box<dyn CollapseSource> = Box::new(ScriptedCollapse::new(bits.iter().copied()));
        let mut settings = Settings::default();
        settings.complete_onboarding();
        App::new(QuantumGame::new(source), settings, None, false)
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        let now = Instant::now();
        for key in keys {
            app.handle_key(*key, now);
        }
    }

    #[test]
    fn test_tutorial_opens_for_new_players() {
        let source: Box<dyn CollapseSource> = Box::new(ScriptedCollapse::default());
        let mut app = App::new(QuantumGame::new(source), Settings::default(), None, false);
        assert!(app.tutorial().is_some());

        // Moves are ignored while the tutorial is open.
        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('5')]);
        assert!(app.game().board().get(Position::Center).is_quantum());

        press(&mut app, &[KeyCode::Esc]);
        assert!(app.tutorial().is_none());
        assert!(*app.settings().onboarding_complete());
    }

    #[test]
    fn test_classical_move_by_number() {
        let mut app = app_with(&[Bit::One]);
        assert!(app.tutorial().is_none());
        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('5')]);

        assert_eq!(app.game().board().get(Position::Center).value(), Some(Player::X));
        assert_eq!(app.game().current_player(), Player::O);
        assert_eq!(app.cursor(), &Position::Center);
        assert_eq!(app.selection(), &Selection::Idle);
    }

    #[test]
    fn test_quantum_move_and_reversal_flash() {
        let mut app = app_with(&[Bit::Zero, Bit::One]);
        press(&mut app, &[KeyCode::Char('c'), KeyCode::Char('2')]);
        press(&mut app, &[KeyCode::Char('e'), KeyCode::Char('1')]);
        assert_eq!(app.selection().pending_control(), Some(Position::TopLeft));
        press(&mut app, &[KeyCode::Char('2')]);
        assert!(app.status().contains("entangled box 1 with box 2"));

        let now = Instant::now();
        app.handle_key(KeyCode::Char('c'), now);
        app.handle_key(KeyCode::Char('1'), now);
        assert!(app.is_flashing(Position::TopCenter));
        assert!(app.status().contains("REVERSAL"));

        app.tick(now + FLASH_DURATION);
        assert!(!app.is_flashing(Position::TopCenter));
    }

    #[test]
    fn test_bad_target_keeps_control() {
        let mut app = app_with(&[]);
        press(&mut app, &[KeyCode::Char('e'), KeyCode::Char('1'), KeyCode::Char('2')]);
        assert_eq!(app.selection(), &Selection::AwaitingTarget(Position::TopLeft));
        assert!(app.status().starts_with("Target box must be in a classical state"));
        assert_eq!(app.game().current_player(), Player::X);
    }

    #[test]
    fn test_moves_blocked_after_game_over_until_reset() {
        let mut app = app_with(&[Bit::One, Bit::Zero, Bit::One, Bit::Zero, Bit::One]);
        // X: 1, O: 4, X: 2, O: 5, X: 3 -> top row of X.
        for digit in ['1', '4', '2', '5', '3'] {
            press(&mut app, &[KeyCode::Char('c'), KeyCode::Char(digit)]);
        }
        assert!(app.game().is_over());
        assert_eq!(app.status(), "Player X wins!");

        press(&mut app, &[KeyCode::Char('c')]);
        assert_eq!(app.status(), GAME_OVER_HINT);

        press(&mut app, &[KeyCode::Char('r')]);
        assert!(!app.game().is_over());
        assert_eq!(app.status(), "Welcome to the game!");
    }

    #[test]
    fn test_rules_overlay_and_quit() {
        let mut app = app_with(&[]);
        press(&mut app, &[KeyCode::Char('?')]);
        assert!(*app.show_rules());
        press(&mut app, &[KeyCode::Esc]);
        assert!(!*app.show_rules());
        assert!(!*app.should_quit());
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(*app.should_quit());
    }
}
