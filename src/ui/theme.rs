//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::Badge;
use crate::notify::Severity;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for the `ok` badge and success notices.
    pub ok: Color,
    /// Color for the `warning` badge.
    pub warning: Color,
    /// Color for the `danger` badge and error notices.
    pub danger: Color,
    /// Color of the traffic series.
    pub series: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            ok: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            series: Color::LightBlue,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            ok: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
            series: Color::Blue,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for a row badge; rows without a badge class stay unstyled.
    pub fn badge_style(&self, badge: Option<Badge>) -> Style {
        match badge {
            Some(Badge::Ok) => Style::default().fg(self.ok),
            Some(Badge::Warning) => Style::default().fg(self.warning),
            Some(Badge::Danger) => Style::default().fg(self.danger).add_modifier(Modifier::BOLD),
            None => Style::default(),
        }
    }

    /// Style for a notice of the given severity.
    pub fn notice_style(&self, severity: Severity) -> Style {
        let color = match severity {
            Severity::Success => self.ok,
            Severity::Error => self.danger,
        };
        Style::default().fg(Color::Black).bg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_styles_follow_classes() {
        let theme = Theme::dark();
        assert_eq!(theme.badge_style(Some(Badge::Ok)).fg, Some(Color::Green));
        assert_eq!(theme.badge_style(Some(Badge::Warning)).fg, Some(Color::Yellow));
        assert_eq!(theme.badge_style(Some(Badge::Danger)).fg, Some(Color::Red));
        assert_eq!(theme.badge_style(None), Style::default());
    }

    #[test]
    fn test_notice_colors() {
        let theme = Theme::light();
        assert_eq!(theme.notice_style(Severity::Success).bg, Some(Color::Green));
        assert_eq!(theme.notice_style(Severity::Error).bg, Some(Color::Red));
    }
}
