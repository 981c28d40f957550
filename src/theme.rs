use ratatui::style::{Color, Modifier, Style};

// Centralized cell styles. Theme parsing is not supported; these are the
// fixed defaults every widget and the window manager paint with.

pub fn normal() -> Style {
    Style::default().fg(Color::Gray).bg(Color::Black)
}

pub fn border() -> Style {
    Style::default().fg(Color::DarkGray).bg(Color::Black)
}

pub fn title() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD)
}

pub fn title_dim() -> Style {
    Style::default().fg(Color::Gray).bg(Color::DarkGray)
}

pub fn highlight() -> Style {
    Style::default().fg(Color::Black).bg(Color::Gray)
}

pub fn shadow() -> Style {
    Style::default().bg(Color::DarkGray)
}

pub fn urgent() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

// Taskbar
pub fn taskbar() -> Style {
    Style::default().fg(Color::Black).bg(Color::DarkGray)
}

pub fn taskbar_focused() -> Style {
    Style::default().fg(Color::Black).bg(Color::Gray)
}

pub fn taskbar_separator() -> Style {
    Style::default()
        .fg(Color::White)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::REVERSED)
}
