use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Transcript
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,

    // Input
    Submit,
    ClearInput,

    // General
    DismissError,
    Help,
    Quit,
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

/// A displayable keybinding entry
#[derive(Debug, Clone)]
pub struct KeybindingEntry {
    pub key: String,
    pub description: String,
    pub category: &'static str,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            bindings: Self::default_bindings(),
        }
    }

    /// Look up by code and modifiers only; kind and state vary by terminal.
    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings
            .get(&KeyEvent::new(event.code, event.modifiers))
            .copied()
    }

    /// Get all keybindings as displayable entries grouped by category
    pub fn all_bindings(&self) -> Vec<KeybindingEntry> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(event, action)| KeybindingEntry {
                key: format_key_event(event),
                description: action_description(action).to_string(),
                category: action_category(action),
            })
            .collect();

        // Sort by category first, then by description, then by key
        entries.sort_by(|a, b| {
            category_order(a.category)
                .cmp(&category_order(b.category))
                .then_with(|| a.description.cmp(&b.description))
                .then_with(|| a.key.cmp(&b.key))
        });
        entries
    }

    fn default_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Submit (Ctrl+Enter / Alt+Enter only where the terminal reports them)
        map.insert(ctrl_key('s'), Action::Submit);
        map.insert(ctrl_key_code(KeyCode::Enter), Action::Submit);
        map.insert(alt_key_code(KeyCode::Enter), Action::Submit);
        map.insert(ctrl_key('u'), Action::ClearInput);

        // Transcript
        map.insert(key_code(KeyCode::Up), Action::ScrollUp);
        map.insert(key_code(KeyCode::Down), Action::ScrollDown);
        map.insert(key_code(KeyCode::PageUp), Action::PageUp);
        map.insert(key_code(KeyCode::PageDown), Action::PageDown);
        map.insert(ctrl_key_code(KeyCode::Home), Action::Top);
        map.insert(ctrl_key_code(KeyCode::End), Action::Bottom);

        // General
        map.insert(key_code(KeyCode::Esc), Action::DismissError);
        map.insert(key_code(KeyCode::F(1)), Action::Help);
        map.insert(ctrl_key('c'), Action::Quit);
        map.insert(ctrl_key('q'), Action::Quit);

        map
    }
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

fn alt_key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::ALT)
}

/// Format a KeyEvent for display
fn format_key_event(event: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl+");
    }
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift+");
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt+");
    }

    let key_str = match event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", event.code),
    };

    format!("{}{}", parts.join(""), key_str)
}

/// Get a human-readable description for an action
fn action_description(action: &Action) -> &'static str {
    match action {
        Action::ScrollUp => "Scroll up",
        Action::ScrollDown => "Scroll down",
        Action::PageUp => "Page up",
        Action::PageDown => "Page down",
        Action::Top => "Oldest message",
        Action::Bottom => "Latest message",
        Action::Submit => "Analyze email",
        Action::ClearInput => "Clear input",
        Action::DismissError => "Dismiss error",
        Action::Help => "Toggle help",
        Action::Quit => "Quit",
    }
}

/// Get the category for an action
fn action_category(action: &Action) -> &'static str {
    match action {
        Action::ScrollUp
        | Action::ScrollDown
        | Action::PageUp
        | Action::PageDown
        | Action::Top
        | Action::Bottom => "Transcript",

        Action::Submit | Action::ClearInput => "Input",

        Action::DismissError | Action::Help | Action::Quit => "General",
    }
}

/// Get sort order for categories
fn category_order(category: &str) -> u8 {
    match category {
        "Input" => 0,
        "Transcript" => 1,
        "General" => 2,
        _ => 99,
    }
}
