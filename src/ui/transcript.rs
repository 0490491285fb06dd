//! Conversation transcript: message headers, bodies and the analyzing indicator

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::analysis::analysis_lines;
use super::theme::{Theme, symbols};
use super::widgets::{format_time, sanitize_text, wrap_text};
use crate::app::state::AppState;
use crate::constants::{EXCERPT_CHARS, SPINNER_FRAME_MS};
use crate::conversation::{Message, Role};

const BODY_INDENT: &str = "  ";

fn header_line(message: &Message, time_format: &str) -> Line<'static> {
    let (symbol, label, style) = match message.role {
        Role::User => (symbols::USER, "You", Theme::user_header()),
        Role::Assistant => (symbols::ASSISTANT, "PhishGuard AI", Theme::assistant_header()),
    };
    Line::from(vec![
        Span::styled(format!("{} {}", symbol, label), style),
        Span::styled(
            format!("  {}", format_time(&message.timestamp, time_format)),
            Theme::text_muted(),
        ),
    ])
}

/// Indent every line of `body` by the body indent
fn indented(lines: &mut Vec<Line<'static>>, body: Vec<Line<'static>>) {
    for mut line in body {
        line.spans.insert(0, Span::styled(BODY_INDENT, Theme::text()));
        lines.push(line);
    }
}

fn plain_body(text: &str, width: usize, style: Style) -> Vec<Line<'static>> {
    wrap_text(&sanitize_text(text), width)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect()
}

/// First characters of the analyzed email on a single line
fn excerpt(content: &str) -> String {
    let flat: String = sanitize_text(content)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let head: String = flat.chars().take(EXCERPT_CHARS).collect();
    format!("\"{}...\"", head)
}

fn message_lines(message: &Message, width: usize, time_format: &str) -> Vec<Line<'static>> {
    let mut lines = vec![header_line(message, time_format)];
    let body_width = width.saturating_sub(BODY_INDENT.len());

    let body = match (&message.role, &message.analysis) {
        (Role::Assistant, Some(result)) => {
            let mut body = plain_body(
                "Assessment complete for the provided content:",
                body_width,
                Theme::text_secondary(),
            );
            body.extend(plain_body(
                &excerpt(&message.content),
                body_width,
                Theme::text_muted().add_modifier(Modifier::ITALIC),
            ));
            body.push(Line::from(""));
            body.extend(analysis_lines(result, body_width));
            body
        }
        _ => plain_body(&message.content, body_width, Theme::text()),
    };
    indented(&mut lines, body);
    lines
}

fn analyzing_lines(state: &AppState, width: usize) -> Vec<Line<'static>> {
    let frame = state
        .status
        .spinner_frame(SPINNER_FRAME_MS, symbols::SPINNER.len());
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", symbols::SPINNER[frame]), Theme::status_spinner()),
        Span::styled("Analyzing Content...", Theme::assistant_header()),
    ])];
    indented(
        &mut lines,
        plain_body(
            "Checking for social engineering tactics and malicious patterns.",
            width.saturating_sub(BODY_INDENT.len()),
            Theme::text_muted(),
        ),
    );
    lines
}

/// All transcript lines, wrapped to `width`, oldest first
pub fn transcript_lines(state: &AppState, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, message) in state.conversation.messages().iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.extend(message_lines(message, width, &state.time_format));
    }
    if state.conversation.is_analyzing() {
        lines.push(Line::from(""));
        lines.extend(analyzing_lines(state, width));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisResult, RiskLevel};

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn result() -> AnalysisResult {
        AnalysisResult {
            risk_score: 12,
            risk_level: RiskLevel::Low,
            summary: "Routine newsletter.".to_string(),
            red_flags: vec![],
            sender_analysis: "Known sender.".to_string(),
            link_analysis: "No links.".to_string(),
            tone_analysis: "Neutral.".to_string(),
            recommendations: vec!["No action needed.".to_string()],
        }
    }

    #[test]
    fn test_welcome_transcript() {
        let state = AppState::new("m", "%H:%M");
        let text = text_of(&transcript_lines(&state, 80));
        assert!(text.starts_with("◆ PhishGuard AI"));
        assert!(text.contains("Hello! I am PhishGuard AI."));
        assert!(!text.contains("Analyzing Content..."));
    }

    #[test]
    fn test_analyzing_indicator() {
        let mut state = AppState::new("m", "%H:%M");
        let turn = state.conversation.submit("Dear user, verify now").unwrap();
        let text = text_of(&transcript_lines(&state, 80));
        assert!(text.contains("● You"));
        assert!(text.contains("  Dear user, verify now"));
        assert!(text.contains("Analyzing Content..."));
        assert!(text.contains("Checking for social engineering tactics"));

        state.conversation.resolve_success(turn.id, result());
        let text = text_of(&transcript_lines(&state, 80));
        assert!(!text.contains("Analyzing Content..."));
        assert!(text.contains("Assessment complete for the provided content:"));
        assert!(text.contains("\"Dear user, verify now...\""));
        assert!(text.contains("OVERALL RISK LEVEL LOW"));
    }

    #[test]
    fn test_excerpt_is_truncated_and_flattened() {
        let long = format!("Subject: hi\n\n{}", "x".repeat(200));
        let quoted = excerpt(&long);
        assert!(quoted.starts_with("\"Subject: hi xxx"));
        assert_eq!(quoted.chars().count(), EXCERPT_CHARS + 5);
    }

    #[test]
    fn test_long_user_message_wraps() {
        let mut state = AppState::new("m", "%H:%M");
        state.conversation.submit(&"word ".repeat(30)).unwrap();
        let narrow = transcript_lines(&state, 30).len();
        let wide = transcript_lines(&state, 200).len();
        assert!(narrow > wide);
    }
}
