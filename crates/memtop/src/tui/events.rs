use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::tui::state::AppEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    ResetBaseline,
    Resize,
    Ignore,
}

pub fn classify(evt: &AppEvent) -> Action {
    match evt {
        AppEvent::Interrupt => Action::Quit,
        AppEvent::Input(Event::Key(key)) if key.kind != KeyEventKind::Release => classify_key(key),
        AppEvent::Input(Event::Resize(_, _)) => Action::Resize,
        AppEvent::Input(_) => Action::Ignore,
    }
}

fn classify_key(key: &KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) | (KeyCode::Char('q' | 'Q'), _) => Action::Quit,
        (KeyCode::Char('r' | 'R'), _) => Action::ResetBaseline,
        _ => Action::Ignore,
    }
}
