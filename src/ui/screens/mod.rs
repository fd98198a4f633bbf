//! Per-screen content rendering.
//!
//! One module per screen: sign-in, sign-up, home (analysis),
//! analysis detail, and the sidebar overlay.

pub mod detail;
pub mod home;
pub mod sidebar;
pub mod sign_in;
pub mod sign_up;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::styles;

/// Render a one-line labelled input field with a focus-dependent border.
/// Password fields are masked with bullets.
pub fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
) {
    let shown = if masked {
        "\u{2022}".repeat(value.chars().count())
    } else {
        value.to_string()
    };

    let mut spans = vec![Span::raw(shown)];
    if focused {
        spans.push(Span::styled("_", styles::highlight_style()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(label.to_string())
        .border_style(styles::border_style(focused));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

/// Render a centered button-like line
pub fn render_button(frame: &mut Frame, area: Rect, label: &str, focused: bool) {
    let text = format!("[ {} ]", label);
    let pad = (area.width as usize).saturating_sub(text.len()) / 2;
    let line = Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(text, styles::button_style(focused)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
