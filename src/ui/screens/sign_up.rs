use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, SignUpFocus};
use crate::ui::render::centered_rect_fixed;
use crate::ui::styles;

use super::{render_button, render_field};

pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(52, 26, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // subtitle
            Constraint::Length(1),
            Constraint::Length(3), // email
            Constraint::Length(3), // username
            Constraint::Length(3), // password
            Constraint::Length(3), // first name
            Constraint::Length(3), // last name
            Constraint::Length(1), // button
            Constraint::Length(1),
            Constraint::Length(1), // error / hint
            Constraint::Min(0),
        ])
        .split(area);

    let title = Line::from(Span::styled("Create Your Account", styles::title_style()))
        .centered();
    frame.render_widget(Paragraph::new(title), chunks[0]);

    let subtitle = Line::from(Span::styled("Sign up to get started", styles::muted_style()))
        .centered();
    frame.render_widget(Paragraph::new(subtitle), chunks[1]);

    render_field(
        frame,
        chunks[3],
        "Email",
        &app.signup_email,
        app.signup_focus == SignUpFocus::Email,
        false,
    );
    render_field(
        frame,
        chunks[4],
        "Username",
        &app.signup_username,
        app.signup_focus == SignUpFocus::Username,
        false,
    );
    render_field(
        frame,
        chunks[5],
        "Password",
        &app.signup_password,
        app.signup_focus == SignUpFocus::Password,
        true,
    );
    render_field(
        frame,
        chunks[6],
        "First Name (optional)",
        &app.signup_first_name,
        app.signup_focus == SignUpFocus::FirstName,
        false,
    );
    render_field(
        frame,
        chunks[7],
        "Last Name (optional)",
        &app.signup_last_name,
        app.signup_focus == SignUpFocus::LastName,
        false,
    );

    let button_label = if app.signup_busy { "Signing up..." } else { "Sign Up" };
    render_button(
        frame,
        chunks[8],
        button_label,
        app.signup_focus == SignUpFocus::Button,
    );

    if let Some(ref error) = app.signup_error {
        let line = Line::from(Span::styled(error.as_str(), styles::error_style())).centered();
        frame.render_widget(Paragraph::new(line), chunks[10]);
    } else {
        let hint = Line::from(Span::styled("[Esc] Back to sign in", styles::muted_style()))
            .centered();
        frame.render_widget(Paragraph::new(hint), chunks[10]);
    }
}
