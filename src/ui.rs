use ratatui::{prelude::*, widgets::*};

use crate::constants::AVATAR_PLACEHOLDER;
use crate::picture::PictureSummary;

/// Border style for a focusable element
pub fn focus_style(is_focused: bool, is_editing: bool) -> Style {
    if is_focused && is_editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Renders a text input field; empty content shows the placeholder dimmed
pub fn render_input<'a>(
    content: &'a str,
    placeholder: &'a str,
    title: String,
    is_focused: bool,
    is_editing: bool,
) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, is_editing))
        .title(title);

    if content.is_empty() && !is_editing {
        Paragraph::new(Span::styled(placeholder, Style::default().fg(Color::DarkGray))).block(block)
    } else {
        Paragraph::new(content).block(block)
    }
}

/// Renders a button-like affordance
pub fn render_button<'a>(label: &'a str, is_focused: bool) -> Paragraph<'a> {
    let style = if is_focused {
        Style::default().fg(Color::Black).bg(Color::Cyan).bold()
    } else {
        Style::default().fg(Color::White).bg(Color::Blue)
    };
    Paragraph::new(label)
        .style(style)
        .alignment(Alignment::Center)
}

/// Level progress bar
pub fn render_progress<'a>(ratio: f64) -> Gauge<'a> {
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{:.0}%", ratio.clamp(0.0, 1.0) * 100.0))
}

/// `value`, or `fallback` when it is empty
pub fn or_placeholder<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Text stand-in for the avatar image
pub fn avatar_label(picture: Option<&PictureSummary>) -> String {
    match picture {
        Some(p) => format!("[{}]", p.file_name),
        None => format!("[{}]", AVATAR_PLACEHOLDER),
    }
}

/// Initials shown in the small avatars of the app bars
pub fn initials(full_name: &str) -> String {
    let letters: String = full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if letters.is_empty() {
        String::from("?")
    } else {
        letters
    }
}

/// Centered popup area
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
