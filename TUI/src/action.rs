use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::catalog::TopicCatalog;
use crate::error::LoadError;
use crate::ticker::SpinId;

/// User actions that can be triggered by UI events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start when at rest, stop when spinning
    Toggle,
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
    /// Quit application
    Quit,
}

impl Action {
    /// Maps a key press to an action. Release and repeat events are ignored.
    pub fn from_key(key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Events produced off the input path and delivered on the app channel.
#[derive(Debug)]
pub enum AppEvent {
    /// The one-shot catalog load finished
    CatalogLoaded(Result<TopicCatalog, LoadError>),
    /// A repeating tick fired for the given spin
    Tick(SpinId),
}
