use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::AppState;

#[derive(Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Paste(String),
    Backspace,
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) => handle_key(key_event, state, bindings),
        Event::Paste(text) if !state.modal.is_help() => InputResult::Paste(text),
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Release events are only reported by some terminals
    if key.kind == KeyEventKind::Release {
        return InputResult::Continue;
    }

    // Check if we're in help mode
    if state.modal.is_help() {
        return handle_help_input(key, bindings);
    }

    // Check for mapped action
    if let Some(action) = bindings.get(&key) {
        if action == Action::Quit {
            return InputResult::Quit;
        }
        return InputResult::Action(action);
    }

    handle_text_input(key)
}

fn handle_help_input(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    // In help modal: Esc, F1 or q closes; quit still works
    match bindings.get(&key) {
        Some(Action::Quit) => return InputResult::Quit,
        Some(Action::Help) | Some(Action::DismissError) => {
            return InputResult::Action(Action::Help);
        }
        _ => {}
    }

    match key.code {
        KeyCode::Char('q') => InputResult::Action(Action::Help),
        _ => InputResult::Continue,
    }
}

fn handle_text_input(key: KeyEvent) -> InputResult {
    // Unbound shortcuts must not leak into the text. AltGr arrives as Ctrl+Alt.
    let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
    if key.modifiers.intersects(altgr) && !key.modifiers.contains(altgr) {
        return InputResult::Continue;
    }

    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Enter => InputResult::Char('\n'),
        KeyCode::Backspace => InputResult::Backspace,
        _ => InputResult::Continue,
    }
}
