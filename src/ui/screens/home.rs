use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, HomeMode};
use crate::ui::styles;

use super::render_field;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // image path field
            Constraint::Min(5),    // result / placeholder
        ])
        .split(area);

    render_field(
        frame,
        chunks[0],
        "Food image path",
        &app.image_path,
        app.home_mode == HomeMode::EditingPath,
        false,
    );

    if app.analyzing {
        render_analyzing(frame, chunks[1]);
    } else if let Some(ref result) = app.analysis_result {
        render_result(frame, app, chunks[1], result);
    } else {
        render_placeholder(frame, app, chunks[1]);
    }
}

fn render_analyzing(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Analyzing...", styles::highlight_style())).centered(),
        Line::from(""),
        Line::from(Span::styled(
            "The server is inspecting your food image.",
            styles::muted_style(),
        ))
        .centered(),
    ];
    let block = Block::default().borders(Borders::ALL).border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_result(frame: &mut Frame, _app: &App, area: Rect, result: &crate::models::AnalysisResult) {
    let mut lines = vec![
        Line::from(Span::styled(result.title.clone(), styles::title_style())),
        Line::from(""),
    ];

    for item in &result.items {
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
        format!("Total Calories: {}", result.total_calories),
        styles::error_style(),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[n] New Analysis",
        styles::muted_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Result")
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let hint = if app.image_path.trim().is_empty() {
        "Press [i] and type the path of a food image"
    } else {
        "Press [a] to analyze the selected image"
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(hint, styles::muted_style())).centered(),
        Line::from(""),
        Line::from(Span::styled(
            "[s] history sidebar   [p] profile   [q] quit",
            styles::muted_style(),
        ))
        .centered(),
    ];
    let block = Block::default().borders(Borders::ALL).border_style(styles::muted_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
