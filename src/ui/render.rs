use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, Screen};
use crate::auth::Gate;

use super::screens::{detail, home, sidebar, sign_in, sign_up};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    // The gate drives the top-level split; screens only refine it.
    match Gate::of(&app.session.state()) {
        Gate::Loading => {
            render_loading(frame);
            return;
        }
        Gate::SignIn => {
            match app.screen {
                Screen::SignUp => sign_up::render(frame, app),
                _ => sign_in::render(frame, app),
            }
        }
        Gate::Main => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3), // Title bar
                    Constraint::Min(10),   // Main content
                    Constraint::Length(2), // Status bar
                ])
                .split(frame.area());

            render_title_bar(frame, app, chunks[0]);

            match app.screen {
                Screen::Detail => detail::render(frame, app, chunks[1]),
                _ => home::render(frame, app, chunks[1]),
            }

            render_status_bar(frame, app, chunks[2]);

            if app.sidebar_visible {
                sidebar::render(frame, app);
            }
            if app.profile_menu_visible {
                render_profile_menu(frame, app);
            }
        }
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_loading(frame: &mut Frame) {
    let area = centered_rect_fixed(40, 3, frame.area());
    let line = Line::from(Span::styled(
        "Checking your session...",
        styles::highlight_style(),
    ))
    .centered();
    frame.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Calorie AI";
    let user_hint = app
        .session
        .user()
        .map(|u| format!("@{} ", u.username))
        .unwrap_or_default();

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + user_hint.len() + 2),
        )),
        Span::styled(user_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else if app.analyzing {
        " Analyzing... ".to_string()
    } else {
        " Ready ".to_string()
    };

    let right_text = " [s]idebar | [p]rofile | [q]uit ";
    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

fn render_profile_menu(frame: &mut Frame, app: &App) {
    let full = frame.area();
    let width = 28u16.min(full.width);
    let area = Rect {
        x: full.width.saturating_sub(width + 1),
        y: full.y + 3,
        width,
        height: 7u16.min(full.height),
    };

    frame.render_widget(Clear, area);

    let (name, username) = match app.session.user() {
        Some(user) => (user.display_name(), format!("@{}", user.username)),
        None => ("".to_string(), "@user".to_string()),
    };

    let lines = vec![
        Line::from(Span::styled(name, styles::title_style())),
        Line::from(Span::styled(username, styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled("[o] Sign Out", styles::error_style())),
        Line::from(Span::styled("[Esc] close", styles::muted_style())),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(30, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Quit Calorie AI? [y/n]", styles::title_style())).centered(),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rect of fixed size within the given area
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
