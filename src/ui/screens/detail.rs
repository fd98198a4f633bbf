use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;
use crate::utils::format_timestamp;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Analysis Details")
        .border_style(styles::border_style(true));

    let lines = if app.detail_loading {
        vec![
            Line::from(""),
            Line::from(Span::styled("Loading...", styles::highlight_style())).centered(),
        ]
    } else if let Some(ref detail) = app.detail {
        let mut lines = vec![
            Line::from(Span::styled(detail.result.title.clone(), styles::title_style())),
            Line::from(""),
        ];

        for item in &detail.result.items {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(item.name.clone(), styles::highlight_style()),
                Span::styled(
                    format!(" - {}, {}", item.weight, item.calories),
                    styles::muted_style(),
                ),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Total Calories: {}", detail.result.total_calories),
            styles::error_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!("Created At: {}", format_timestamp(&detail.created_at)),
            styles::muted_style(),
        )));

        if detail.image_url.is_some() {
            lines.push(Line::from(Span::styled(
                "(original image stored on the server)",
                styles::muted_style(),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Esc] Back   [q] Quit",
            styles::muted_style(),
        )));
        lines
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled("Analysis not found.", styles::error_style())).centered(),
            Line::from(""),
            Line::from(Span::styled("[Esc] Back", styles::muted_style())).centered(),
        ]
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
