use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, SignInFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{render_button, render_field};

pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(52, 18, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // subtitle
            Constraint::Length(1),
            Constraint::Length(3), // identifier
            Constraint::Length(3), // password
            Constraint::Length(1), // button
            Constraint::Length(1),
            Constraint::Length(1), // sign-up link
            Constraint::Length(1), // notice / error
            Constraint::Min(0),
        ])
        .split(area);

    let title = Line::from(Span::styled("Welcome To Calorie AI", styles::title_style()))
        .centered();
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let subtitle = Line::from(Span::styled("Sign in to continue", styles::muted_style()))
        .centered();
    frame.render_widget(Paragraph::new(subtitle), chunks[1]);

    render_field(
        frame,
        chunks[3],
        "Email or Username",
        &app.signin_identifier,
        app.signin_focus == SignInFocus::Identifier,
        false,
    );
    render_field(
        frame,
        chunks[4],
        "Password",
        &app.signin_password,
        app.signin_focus == SignInFocus::Password,
        true,
    );

    let button_label = if app.signin_busy { "Signing in..." } else { "Sign In" };
    render_button(
        frame,
        chunks[5],
        button_label,
        app.signin_focus == SignInFocus::Button,
    );

    let link_focused = app.signin_focus == SignInFocus::SignUpLink;
    let link = Line::from(vec![
        Span::styled("Don't have an account? ", styles::muted_style()),
        Span::styled("Sign Up", styles::button_style(link_focused)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(link), chunks[7]);

    if let Some(ref error) = app.signin_error {
        let line = Line::from(Span::styled(error.as_str(), styles::error_style())).centered();
        frame.render_widget(Paragraph::new(line), chunks[8]);
    } else if let Some(ref notice) = app.signin_notice {
        let line = Line::from(Span::styled(notice.as_str(), styles::success_style())).centered();
        frame.render_widget(Paragraph::new(line), chunks[8]);
    }
}
