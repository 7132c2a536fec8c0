//! Per-connection session state and the input dispatcher.

use std::time::SystemTime;

use tracing::{debug, trace};

use crate::core::{GameState, SubmitOutcome, ToggleOutcome};
use crate::input::action_for_key;
use crate::term::{Frame, GameView, ViewState, Viewport};
use crate::types::{InputEvent, Key, NimAction};

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything one connected player pair owns.
///
/// Sessions never share state. The event loop holds the only `&mut`.
#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    view: ViewState,
    viewport: Viewport,
    term: String,
    clock: SystemTime,
}

impl Session {
    pub fn new(term: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            game: GameState::new(),
            view: ViewState::new(width),
            viewport: Viewport::new(width, height),
            term: term.into(),
            clock: SystemTime::now(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Terminal type reported at connect time. Stored, never interpreted.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Time of the last tick. Not shown anywhere.
    pub fn clock(&self) -> SystemTime {
        self.clock
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Resize { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.view.help_width = width;
                Flow::Continue
            }
            InputEvent::Tick(now) => {
                self.clock = now;
                Flow::Continue
            }
        }
    }

    fn handle_key(&mut self, key: Key) -> Flow {
        let Some(action) = action_for_key(key) else {
            return Flow::Continue;
        };
        trace!(action = action.as_str(), "dispatch");

        match action {
            NimAction::Quit => return Flow::Quit,
            NimAction::ToggleHelp => {
                self.view.help_expanded = !self.view.help_expanded;
            }
            NimAction::Move(dir) => self.game.move_cursor(dir),
            NimAction::Select => {
                let cursor = self.game.cursor();
                let outcome = self.game.toggle_at_cursor();
                if outcome == ToggleOutcome::Ignored {
                    debug!(row = cursor.row, col = cursor.col, "toggle on empty cell ignored");
                } else {
                    debug!(row = cursor.row, col = cursor.col, ?outcome, "toggle");
                }
            }
            NimAction::Submit => {
                let player = self.game.player().number();
                match self.game.submit() {
                    SubmitOutcome::Applied { removed } => debug!(
                        player,
                        removed,
                        remaining = self.game.available_count(),
                        "move applied"
                    ),
                    SubmitOutcome::Rejected => debug!(player, "move rejected, would empty the board"),
                    SubmitOutcome::NoSelection => debug!(player, "submit without selection"),
                }
            }
        }
        Flow::Continue
    }

    pub fn render(&self) -> Frame {
        GameView::new().render(&self.game, &self.view, self.viewport)
    }
}
