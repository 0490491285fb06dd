//! Top-level screen: header, transcript, input box, hints and overlays

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::components::centered_rect_constrained;
use super::status_bar::status_bar;
use super::theme::{Theme, borders};
use super::transcript::transcript_lines;
use super::widgets::{error_bar, help_bar, sanitize_text, wrap_text};
use crate::app::state::{AppState, ModalState};
use crate::constants::{CONTENT_PADDING_H, INPUT_MAX_HEIGHT, INPUT_MIN_HEIGHT};
use crate::input::KeybindingEntry;

const PLACEHOLDER: &str = "Paste email content here (Ctrl+S or Ctrl+Enter to send)...";
const TIP: &str = " TIP: Including the email headers helps with more accurate detection. ";

/// Screen regions, shared by rendering and scroll clamping
struct ScreenLayout {
    header: Rect,
    transcript: Rect,
    input: Rect,
    hints: Rect,
    status: Rect,
}

/// Wrapped rows of the input text at the given inner width
fn input_rows(state: &AppState, inner_width: usize) -> Vec<String> {
    wrap_text(&sanitize_text(&state.input.text), inner_width)
}

fn screen_layout(area: Rect, state: &AppState) -> ScreenLayout {
    let rows = input_rows(state, area.width.saturating_sub(2) as usize).len() as u16;
    let input_height = rows
        .saturating_add(2)
        .clamp(INPUT_MIN_HEIGHT, INPUT_MAX_HEIGHT)
        .min(area.height.saturating_sub(4));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Header
            Constraint::Min(1),               // Transcript
            Constraint::Length(input_height), // Input box
            Constraint::Length(1),            // Help bar or error
            Constraint::Length(1),            // Status bar
        ])
        .split(area);

    let transcript = Rect {
        x: chunks[1].x + CONTENT_PADDING_H,
        width: chunks[1].width.saturating_sub(CONTENT_PADDING_H * 2),
        ..chunks[1]
    };

    ScreenLayout {
        header: chunks[0],
        transcript,
        input: chunks[2],
        hints: chunks[3],
        status: chunks[4],
    }
}

/// Largest valid `scroll_from_bottom` for a terminal of the given size
pub fn max_transcript_scroll(state: &AppState, width: u16, height: u16) -> usize {
    let layout = screen_layout(Rect::new(0, 0, width, height), state);
    let total = transcript_lines(state, layout.transcript.width as usize).len();
    total.saturating_sub(layout.transcript.height as usize)
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Theme::main_bg()), area);

    let layout = screen_layout(area, state);

    render_header(frame, layout.header);
    render_transcript(frame, layout.transcript, state);
    render_input(frame, layout.input, state);

    if let Some(error) = state.conversation.error() {
        error_bar(frame, layout.hints, error);
    } else if state.modal.is_help() {
        help_bar(frame, layout.hints, &[("F1/Esc", "close")]);
    } else if state.can_submit() {
        help_bar(
            frame,
            layout.hints,
            &[
                ("Ctrl+S", "scan"),
                ("PgUp/PgDn", "scroll"),
                ("F1", "help"),
                ("Ctrl+C", "quit"),
            ],
        );
    } else {
        // Nothing to scan: blank input or a turn in flight
        help_bar(
            frame,
            layout.hints,
            &[("PgUp/PgDn", "scroll"), ("F1", "help"), ("Ctrl+C", "quit")],
        );
    }

    status_bar(frame, layout.status, state);

    // Help popup (rendered last so it appears on top)
    if let ModalState::Help { ref keybindings } = state.modal {
        render_help_popup(frame, area, keybindings);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" PhishGuard AI", Theme::assistant_header()),
        Span::styled(" · Email Threat Intelligence", Theme::text_muted()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::main_bg()), area);
}

fn render_transcript(frame: &mut Frame, area: Rect, state: &AppState) {
    let lines = transcript_lines(state, area.width as usize);
    let height = area.height as usize;

    // Offset is counted from the newest line
    let end = lines
        .len()
        .saturating_sub(state.transcript.scroll_from_bottom)
        .max(height.min(lines.len()));
    let start = end.saturating_sub(height);
    let visible: Vec<Line> = lines[start..end].to_vec();

    frame.render_widget(Paragraph::new(visible).style(Theme::main_bg()), area);
}

fn render_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let analyzing = state.conversation.is_analyzing();
    let border_style = if analyzing || state.modal.is_help() {
        Theme::border()
    } else {
        Theme::border_focused()
    };
    let title = if analyzing { " Analyzing... " } else { " Email " };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(borders::popup())
        .border_style(border_style)
        .title(Span::styled(title, Theme::text_secondary()))
        .title_bottom(Span::styled(TIP, Theme::text_muted()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.input.text.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            PLACEHOLDER,
            Theme::text_muted().add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(placeholder, inner);
        if !analyzing && !state.modal.is_help() {
            frame.set_cursor_position(Position::new(inner.x, inner.y));
        }
        return;
    }

    // Keep the end of the text (where the cursor is) in view
    let rows = input_rows(state, inner.width as usize);
    let start = rows.len().saturating_sub(inner.height as usize);
    let visible: Vec<Line> = rows[start..]
        .iter()
        .map(|row| Line::from(Span::styled(row.clone(), Theme::text())))
        .collect();
    frame.render_widget(Paragraph::new(visible).style(Theme::main_bg()), inner);

    if !analyzing && !state.modal.is_help() && inner.width > 0 {
        let last = rows.last().map(|r| r.width()).unwrap_or(0) as u16;
        let row = (rows.len() - start).saturating_sub(1) as u16;
        frame.set_cursor_position(Position::new(
            inner.x + last.min(inner.width - 1),
            inner.y + row,
        ));
    }
}

fn render_help_popup(frame: &mut Frame, area: Rect, keys: &[KeybindingEntry]) {
    let mut categories: Vec<&str> = Vec::new();
    for key in keys {
        if categories.last() != Some(&key.category) {
            categories.push(key.category);
        }
    }
    let content_height = keys.len() + categories.len() * 2;

    let popup_area = centered_rect_constrained(area, 36, 56, 10, content_height as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .title_bottom(" F1 or Esc close ")
        .borders(Borders::ALL)
        .border_type(borders::popup())
        .border_style(Theme::border_focused())
        .style(Theme::main_bg());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut items: Vec<ListItem> = Vec::new();
    let mut current_category: Option<&str> = None;
    let key_width = 16;

    for entry in keys {
        if current_category != Some(entry.category) {
            if current_category.is_some() {
                items.push(ListItem::new(Line::from("")));
            }
            let header_line = Line::from(vec![
                Span::styled(
                    format!("── {} ", entry.category),
                    Theme::text_secondary().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "─".repeat(inner.width.saturating_sub(entry.category.len() as u16 + 4) as usize),
                    Theme::border(),
                ),
            ]);
            items.push(ListItem::new(header_line));
            current_category = Some(entry.category);
        }

        let line = Line::from(vec![
            Span::styled("  ", Theme::text()),
            Span::styled(
                format!("{:width$}", entry.key, width = key_width),
                Theme::text_accent(),
            ),
            Span::styled(entry.description.clone(), Theme::text()),
        ]);
        items.push(ListItem::new(line));
    }

    frame.render_widget(List::new(items), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyBindings;
    use ratatui::{Terminal, backend::TestBackend};

    fn render_to_string(state: &AppState, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_initial_screen() {
        let state = AppState::new("gemini-3-pro-preview", "%H:%M");
        let screen = render_to_string(&state, 100, 30);
        assert!(screen.contains("PhishGuard AI · Email Threat Intelligence"));
        assert!(screen.contains("Hello! I am PhishGuard AI."));
        assert!(screen.contains("Paste email content here"));
        assert!(screen.contains("TIP: Including the email headers"));
        assert!(screen.contains("Ready"));
    }

    #[test]
    fn test_error_replaces_hints() {
        let mut state = AppState::new("m", "%H:%M");
        let turn = state.conversation.submit("email").unwrap();
        state.conversation.resolve_failure(turn.id);
        let screen = render_to_string(&state, 120, 30);
        assert!(screen.contains("Failed to analyze email."));
        assert!(!screen.contains("Ctrl+S scan"));
    }

    #[test]
    fn test_help_popup() {
        let mut state = AppState::new("m", "%H:%M");
        state.modal = ModalState::Help {
            keybindings: KeyBindings::new().all_bindings(),
        };
        let screen = render_to_string(&state, 100, 40);
        assert!(screen.contains(" Help "));
        assert!(screen.contains("Ctrl+S"));
        assert!(screen.contains("F1 or Esc close"));
    }

    #[test]
    fn test_scan_hint_follows_submit_availability() {
        let mut state = AppState::new("m", "%H:%M");
        assert!(!render_to_string(&state, 120, 30).contains("Ctrl+S scan"));

        state.input.insert_str("   \n ");
        assert!(!render_to_string(&state, 120, 30).contains("Ctrl+S scan"));

        state.input.insert_str("Your parcel is held");
        assert!(render_to_string(&state, 120, 30).contains("Ctrl+S scan"));

        state.conversation.submit("first email").unwrap();
        assert!(!render_to_string(&state, 120, 30).contains("Ctrl+S scan"));
    }

    #[test]
    fn test_typed_input_is_shown() {
        let mut state = AppState::new("m", "%H:%M");
        state.input.insert_str("From: support@paypa1.com\nVerify your account");
        let screen = render_to_string(&state, 80, 24);
        assert!(screen.contains("From: support@paypa1.com"));
        assert!(screen.contains("Verify your account"));
        assert!(!screen.contains("Paste email content here"));
    }

    #[test]
    fn test_max_scroll_tracks_content() {
        let mut state = AppState::new("m", "%H:%M");
        assert_eq!(max_transcript_scroll(&state, 120, 60), 0);

        for _ in 0..3 {
            let turn = state.conversation.submit(&"line\n".repeat(20)).unwrap();
            state.conversation.resolve_failure(turn.id);
        }
        let max = max_transcript_scroll(&state, 80, 24);
        assert!(max > 0);
        assert!(max_transcript_scroll(&state, 80, 48) < max);
    }

    #[test]
    fn test_scrolled_transcript_shows_older_lines() {
        let mut state = AppState::new("m", "%H:%M");
        let turn = state
            .conversation
            .submit(&(1..=40).map(|i| format!("row{i}\n")).collect::<String>())
            .unwrap();
        state.conversation.resolve_failure(turn.id);
        state.conversation.dismiss_error();

        let bottom = render_to_string(&state, 80, 24);
        assert!(bottom.contains("row40"));
        assert!(!bottom.contains("Hello! I am"));

        state.transcript.scroll_from_bottom = max_transcript_scroll(&state, 80, 24);
        let top = render_to_string(&state, 80, 24);
        assert!(top.contains("Hello! I am"));
        assert!(!top.contains("row40"));
    }
}
