//! Centralized theming for the phishguard TUI
//!
//! This module provides a single source of truth for all colors and styles
//! used throughout the application.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use std::sync::RwLock;

use crate::analysis::{RiskLevel, Severity};
use crate::config::ThemeVariant;

/// Global theme variant storage
static THEME_VARIANT: RwLock<ThemeVariant> = RwLock::new(ThemeVariant::Modern);

/// Initialize the theme variant (call once at startup)
pub fn init_theme(variant: ThemeVariant) {
    if let Ok(mut guard) = THEME_VARIANT.write() {
        *guard = variant;
    }
}

/// Get the current theme variant
pub fn current_theme() -> ThemeVariant {
    THEME_VARIANT.read().map(|g| *g).unwrap_or_default()
}

/// Catppuccin Mocha color palette for the Modern theme
mod catppuccin {
    use super::Color;

    // Background layers (darkest to lightest)
    pub const BASE: Color = Color::Rgb(30, 30, 46); // #1e1e2e - main background
    pub const MANTLE: Color = Color::Rgb(24, 24, 37); // #181825 - status bar, panels
    pub const SURFACE0: Color = Color::Rgb(49, 50, 68); // #313244 - borders
    pub const SURFACE2: Color = Color::Rgb(88, 91, 112); // #585b70 - gauge track

    // Text colors
    pub const TEXT: Color = Color::Rgb(205, 214, 244); // #cdd6f4 - primary
    pub const SUBTEXT1: Color = Color::Rgb(186, 194, 222); // #bac2de - secondary
    pub const OVERLAY0: Color = Color::Rgb(108, 112, 134); // #6c7086 - muted/disabled

    // Accent colors
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254); // #b4befe - focused borders
    pub const BLUE: Color = Color::Rgb(137, 180, 250); // #89b4fa - assistant, accent
    pub const GREEN: Color = Color::Rgb(166, 227, 161); // #a6e3a1 - low risk
    pub const YELLOW: Color = Color::Rgb(249, 226, 175); // #f9e2af - medium risk, keys
    pub const PEACH: Color = Color::Rgb(250, 179, 135); // #fab387 - high risk
    pub const RED: Color = Color::Rgb(243, 139, 168); // #f38ba8 - critical, errors
    pub const MAUVE: Color = Color::Rgb(203, 166, 247); // #cba6f7 - user messages
}

/// Border types - vary by theme
pub mod borders {
    use super::*;

    /// Border type for popups and the input box (rounded for RGB themes)
    pub fn popup() -> BorderType {
        match current_theme() {
            ThemeVariant::Modern => BorderType::Rounded,
            _ => BorderType::Plain,
        }
    }
}

/// Color palette - colors that vary by theme
pub mod colors {
    use super::*;

    pub fn bg_main() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::BASE,
            _ => Color::Reset,
        }
    }

    pub fn bg_status() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::MANTLE,
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::Black,
        }
    }

    pub fn bg_error() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::RED,
            _ => Color::Red,
        }
    }

    pub fn bg_help() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::MANTLE,
            _ => Color::Reset,
        }
    }

    pub fn fg_primary() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::TEXT,
            _ => Color::White,
        }
    }

    /// Text on the error banner
    pub fn fg_on_error() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::BASE,
            _ => Color::White,
        }
    }

    pub fn fg_secondary() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::SUBTEXT1,
            ThemeVariant::Dark => Color::Gray,
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn fg_muted() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::OVERLAY0,
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::Gray,
        }
    }

    pub fn fg_accent() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::BLUE,
            ThemeVariant::Dark => Color::Cyan,
            ThemeVariant::HighContrast => Color::LightCyan,
        }
    }

    pub fn fg_user() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::MAUVE,
            ThemeVariant::Dark => Color::Magenta,
            ThemeVariant::HighContrast => Color::LightMagenta,
        }
    }

    pub fn fg_warning() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::YELLOW,
            ThemeVariant::Dark => Color::Yellow,
            ThemeVariant::HighContrast => Color::LightYellow,
        }
    }

    pub fn border() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::SURFACE0,
            ThemeVariant::Dark => Color::DarkGray,
            ThemeVariant::HighContrast => Color::White,
        }
    }

    pub fn border_focused() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::LAVENDER,
            ThemeVariant::Dark => Color::Cyan,
            ThemeVariant::HighContrast => Color::LightCyan,
        }
    }

    /// Unfilled part of the risk gauge
    pub fn gauge_track() -> Color {
        match current_theme() {
            ThemeVariant::Modern => catppuccin::SURFACE2,
            _ => Color::DarkGray,
        }
    }

    pub fn risk(level: RiskLevel) -> Color {
        let modern = matches!(current_theme(), ThemeVariant::Modern);
        match level {
            RiskLevel::Low if modern => catppuccin::GREEN,
            RiskLevel::Low => Color::Green,
            RiskLevel::Medium if modern => catppuccin::YELLOW,
            RiskLevel::Medium => Color::Yellow,
            RiskLevel::High if modern => catppuccin::PEACH,
            RiskLevel::High => Color::LightRed,
            RiskLevel::Critical if modern => catppuccin::RED,
            RiskLevel::Critical => Color::Red,
        }
    }

    pub fn severity(severity: Severity) -> Color {
        match severity {
            Severity::Low => risk(RiskLevel::Medium),
            Severity::Medium => risk(RiskLevel::High),
            Severity::High => risk(RiskLevel::Critical),
        }
    }
}

/// UI symbols - centralized for consistency
pub mod symbols {
    pub const USER: &str = "●";
    pub const ASSISTANT: &str = "◆";
    pub const RED_FLAG: &str = "▲";
    pub const GAUGE_FILLED: &str = "█";
    pub const GAUGE_EMPTY: &str = "░";
    pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
}

/// Pre-composed styles for common UI elements
pub struct Theme;

impl Theme {
    // === Text Styles ===

    pub fn text() -> Style {
        Style::default()
            .fg(colors::fg_primary())
            .bg(colors::bg_main())
    }

    pub fn text_secondary() -> Style {
        Style::default()
            .fg(colors::fg_secondary())
            .bg(colors::bg_main())
    }

    pub fn text_muted() -> Style {
        Style::default()
            .fg(colors::fg_muted())
            .bg(colors::bg_main())
    }

    pub fn text_accent() -> Style {
        Style::default()
            .fg(colors::fg_accent())
            .bg(colors::bg_main())
    }

    /// Section label inside an analysis card
    pub fn label() -> Style {
        Style::default()
            .fg(colors::fg_secondary())
            .bg(colors::bg_main())
            .add_modifier(Modifier::BOLD)
    }

    // === Messages ===

    pub fn user_header() -> Style {
        Style::default()
            .fg(colors::fg_user())
            .bg(colors::bg_main())
            .add_modifier(Modifier::BOLD)
    }

    pub fn assistant_header() -> Style {
        Style::default()
            .fg(colors::fg_accent())
            .bg(colors::bg_main())
            .add_modifier(Modifier::BOLD)
    }

    pub fn risk(level: RiskLevel) -> Style {
        Style::default()
            .fg(colors::risk(level))
            .bg(colors::bg_main())
            .add_modifier(Modifier::BOLD)
    }

    pub fn severity(severity: Severity) -> Style {
        Style::default()
            .fg(colors::severity(severity))
            .bg(colors::bg_main())
    }

    pub fn gauge_track() -> Style {
        Style::default()
            .fg(colors::gauge_track())
            .bg(colors::bg_main())
    }

    // === Status Bar ===

    pub fn status_bar() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_primary())
    }

    pub fn status_muted() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_muted())
    }

    pub fn status_spinner() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_warning())
    }

    pub fn error_bar() -> Style {
        Style::default()
            .bg(colors::bg_error())
            .fg(colors::fg_on_error())
            .add_modifier(Modifier::BOLD)
    }

    // === Help ===

    pub fn help_bar() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_primary())
    }

    pub fn help_key() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_warning())
    }

    pub fn help_desc() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_muted())
    }

    // === Borders ===

    pub fn border() -> Style {
        Style::default().fg(colors::border()).bg(colors::bg_main())
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(colors::border_focused())
            .bg(colors::bg_main())
    }

    /// Main background style - use to fill the entire frame
    pub fn main_bg() -> Style {
        Style::default().bg(colors::bg_main())
    }
}
