//! Risk assessment card shown under each analyzed email

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use super::theme::{Theme, symbols};
use super::widgets::{sanitize_text, wrap_text};
use crate::analysis::{AnalysisResult, RedFlag, RiskLevel};
use crate::constants::GAUGE_MAX_WIDTH;

const SECTION_INDENT: &str = "  ";

/// Gauge color band for a score, independent of the reported level
fn score_band(score: u32) -> RiskLevel {
    match score {
        0..30 => RiskLevel::Low,
        30..60 => RiskLevel::Medium,
        60..85 => RiskLevel::High,
        _ => RiskLevel::Critical,
    }
}

/// Number of filled gauge cells for a score. Scores above 100 fill the gauge.
fn gauge_filled(score: u32, gauge_width: usize) -> usize {
    let score = score.min(100) as usize;
    (score * gauge_width + 50) / 100
}

fn gauge_line(score: u32, width: usize) -> Line<'static> {
    let label = format!(" {}/100", score);
    let gauge_width = width.saturating_sub(label.width()).min(GAUGE_MAX_WIDTH);
    let filled = gauge_filled(score, gauge_width);

    Line::from(vec![
        Span::styled(
            symbols::GAUGE_FILLED.repeat(filled),
            Theme::risk(score_band(score)),
        ),
        Span::styled(
            symbols::GAUGE_EMPTY.repeat(gauge_width - filled),
            Theme::gauge_track(),
        ),
        Span::styled(label, Theme::text_secondary()),
    ])
}

/// Wrap `text` with a fixed prefix on the first line and a hanging indent after
fn prefixed_lines(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    width: usize,
    first: Vec<Span<'static>>,
    style: Style,
) {
    let prefix_width: usize = first.iter().map(|s| s.content.width()).sum();
    let hanging = " ".repeat(prefix_width);
    let wrapped = wrap_text(&sanitize_text(text), width.saturating_sub(prefix_width));

    let mut first = Some(first);
    for row in wrapped {
        let mut spans = first
            .take()
            .unwrap_or_else(|| vec![Span::styled(hanging.clone(), Theme::text())]);
        spans.push(Span::styled(row, style));
        lines.push(Line::from(spans));
    }
}

fn section(lines: &mut Vec<Line<'static>>, title: &str, body: &str, width: usize) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(title.to_string(), Theme::label())));
    prefixed_lines(
        lines,
        body,
        width,
        vec![Span::styled(SECTION_INDENT, Theme::text())],
        Theme::text(),
    );
}

fn red_flag(lines: &mut Vec<Line<'static>>, flag: &RedFlag, width: usize) {
    let badge = format!(
        "{} [{}] ",
        symbols::RED_FLAG,
        flag.severity.as_str().to_uppercase()
    );
    let category = sanitize_text(&flag.category).to_uppercase();
    lines.push(Line::from(vec![
        Span::styled(SECTION_INDENT, Theme::text()),
        Span::styled(badge, Theme::severity(flag.severity)),
        Span::styled(category, Theme::label()),
    ]));
    prefixed_lines(
        lines,
        &flag.description,
        width,
        vec![Span::styled("    ", Theme::text())],
        Theme::text_secondary(),
    );
}

/// Render the full assessment card at the given width
pub fn analysis_lines(result: &AnalysisResult, width: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("OVERALL RISK LEVEL ", Theme::label()),
            Span::styled(
                result.risk_level.as_str(),
                Theme::risk(result.risk_level),
            ),
        ]),
        gauge_line(result.risk_score, width),
    ];

    section(&mut lines, "Expert Summary", &result.summary, width);
    section(&mut lines, "Sender Integrity", &result.sender_analysis, width);
    section(
        &mut lines,
        "Link/Attachment Analysis",
        &result.link_analysis,
        width,
    );
    section(&mut lines, "Psychological Tactics", &result.tone_analysis, width);

    if !result.red_flags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Red Flags Detected ({})", result.red_flags.len()),
            Theme::label(),
        )));
        for flag in &result.red_flags {
            red_flag(&mut lines, flag, width);
        }
    }

    if !result.recommendations.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Recommended Actions", Theme::label())));
        for (i, rec) in result.recommendations.iter().enumerate() {
            let number = format!("{}{}. ", SECTION_INDENT, i + 1);
            prefixed_lines(
                &mut lines,
                rec,
                width,
                vec![Span::styled(number, Theme::text_accent())],
                Theme::text(),
            );
        }
    }

    lines
}
