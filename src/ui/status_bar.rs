//! Status bar rendering with the analysis spinner and model badge

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{Theme, symbols};
use super::widgets::truncate_to_width;
use crate::app::state::AppState;
use crate::constants::SPINNER_FRAME_MS;

/// Left-hand status text: spinner while analyzing, last message otherwise
fn left_text(state: &AppState) -> (Option<&'static str>, String) {
    if state.conversation.is_analyzing() {
        let frame = state
            .status
            .spinner_frame(SPINNER_FRAME_MS, symbols::SPINNER.len());
        (Some(symbols::SPINNER[frame]), "Analyzing...".to_string())
    } else {
        (None, state.status.message.clone())
    }
}

/// Messages in the transcript, excluding the welcome message
fn turn_count(state: &AppState) -> usize {
    state.conversation.messages().len().saturating_sub(1)
}

pub fn status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let style = Theme::status_bar();
    let (spinner, message) = left_text(state);

    let right = format!(
        " {} msgs │ {} │ F1 help ",
        turn_count(state),
        state.status.model
    );
    let right_width = right.width();

    let mut spans = Vec::new();
    let mut used = 0;
    if let Some(spinner) = spinner {
        spans.push(Span::styled(format!(" {}", spinner), Theme::status_spinner()));
        used += 1 + spinner.width();
    }

    // Right side is dropped on narrow terminals
    let full_width = area.width as usize;
    let show_right = used + message.width() + 2 + right_width <= full_width;
    let reserved = if show_right { right_width } else { 0 };

    let available = full_width.saturating_sub(used + reserved + 2);
    let message = truncate_to_width(&message, available);
    used += message.width() + 2;
    spans.push(Span::styled(format!(" {} ", message), style));

    if show_right {
        let padding = full_width.saturating_sub(used + right_width);
        spans.push(Span::styled(" ".repeat(padding), style));
        spans.push(Span::styled(right, Theme::status_muted()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(style);
    frame.render_widget(paragraph, area);
}
