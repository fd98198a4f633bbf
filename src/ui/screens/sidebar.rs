use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::truncate_string;

/// Sidebar width in columns
const SIDEBAR_WIDTH: u16 = 34;

/// Maximum title length shown per history row
const MAX_TITLE_LEN: usize = 28;

pub fn render(frame: &mut Frame, app: &App) {
    let full = frame.area();
    let area = Rect {
        x: full.x,
        y: full.y,
        width: SIDEBAR_WIDTH.min(full.width),
        height: full.height,
    };

    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("Calorie AI", styles::title_style())),
        Line::from(Span::styled("Food Analysis", styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled("Analysis History", styles::highlight_style())),
        Line::from(""),
    ];

    if app.history.is_empty() {
        lines.push(Line::from(Span::styled(
            "No analyses found.",
            styles::muted_style(),
        )));
    } else {
        for (i, analysis) in app.history.iter().enumerate() {
            let selected = i == app.sidebar_selection;
            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                styles::selected_style()
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}", marker, truncate_string(&analysis.title, MAX_TITLE_LEN)),
                style,
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] open  [d] delete",
        styles::muted_style(),
    )));
    lines.push(Line::from(Span::styled("[Esc] close", styles::muted_style())));

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
