use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_primary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for the content area and the top bar.
pub fn base_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { background, text, .. } = *theme.roles();
    Style::default().bg(background).fg(text)
}

/// Row style in the menu panel.
///
/// `active` marks the row on the current selection path, `cursor` the
/// keyboard cursor of a focused panel.
pub fn menu_row_style<T: Theme + ?Sized>(theme: &T, active: bool, cursor: bool) -> Style {
    let mut style = if active {
        theme.accent_emphasis_style()
    } else {
        theme.text_secondary_style()
    };
    if cursor {
        style = style.bg(theme.roles().selection_bg);
    }
    style
}

/// Key hint spans: each pair renders as a highlighted key and its muted label.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(*key, theme.accent_secondary_style().add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(*label, theme.text_muted_style()));
    }
    spans
}

/// Renders a one-line icon button.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, theme: &T, is_focused: bool, is_active: bool) {
    let mut style = if is_active {
        theme.accent_emphasis_style()
    } else {
        theme.text_primary_style()
    };
    if is_focused {
        style = style.bg(theme.roles().selection_bg).add_modifier(Modifier::BOLD);
    }
    frame.render_widget(Paragraph::new(label).centered().style(style), area);
}
