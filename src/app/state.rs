//! Application state types
//!
//! All state types live here to maintain clean dependency:
//! UI layer imports from app layer, not vice versa.

use std::time::Instant;

use crate::conversation::Conversation;
use crate::input::KeybindingEntry;

/// Text being composed in the input box. The cursor is always at the end.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub text: String,
}

impl InputState {
    pub fn insert_char(&mut self, c: char) {
        self.text.push(c);
    }

    /// Insert pasted text with line endings normalized to `\n`
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        self.text.push_str(&normalized);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Transcript scroll position, counted in lines up from the newest line
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptState {
    pub scroll_from_bottom: usize,
}

impl TranscriptState {
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    /// Jump to the oldest message; clamped against the rendered height later
    pub fn scroll_to_top(&mut self) {
        self.scroll_from_bottom = usize::MAX;
    }

    pub fn snap_to_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    pub fn clamp(&mut self, max: usize) {
        self.scroll_from_bottom = self.scroll_from_bottom.min(max);
    }
}

/// Modal overlay state - only one can be active at a time
#[derive(Debug, Clone, Default)]
pub enum ModalState {
    #[default]
    None,
    Help {
        keybindings: Vec<KeybindingEntry>,
    },
}

impl ModalState {
    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help { .. })
    }
}

/// Status bar state
#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    /// Set while a turn is in flight; drives the spinner
    pub analyzing_since: Option<Instant>,
    /// Model name shown in the status bar
    pub model: String,
}

impl StatusState {
    pub fn set_message(&mut self, msg: impl ToString) {
        self.message = msg.to_string();
    }

    /// Spinner frame index for the elapsed analysis time
    pub fn spinner_frame(&self, frame_ms: u64, frames: usize) -> usize {
        let Some(since) = self.analyzing_since else {
            return 0;
        };
        let ticks = since.elapsed().as_millis() / u128::from(frame_ms.max(1));
        (ticks % frames.max(1) as u128) as usize
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub conversation: Conversation,
    pub input: InputState,
    pub transcript: TranscriptState,
    pub modal: ModalState,
    pub status: StatusState,
    /// chrono format string for message timestamps
    pub time_format: String,
}

impl AppState {
    pub fn new(model: &str, time_format: &str) -> Self {
        Self {
            status: StatusState {
                message: "Ready".to_string(),
                model: model.to_string(),
                ..Default::default()
            },
            time_format: time_format.to_string(),
            ..Default::default()
        }
    }

    /// Whether the submit action would start a turn right now
    pub fn can_submit(&self) -> bool {
        self.conversation.can_submit(&self.input.text)
    }
}
