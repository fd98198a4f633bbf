//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    App, AppState, HomeMode, Screen, SignInFocus, SignUpFocus, MAX_INPUT_LENGTH, MAX_PATH_LENGTH,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.screen {
        Screen::SignIn => handle_sign_in_input(app, key).await,
        Screen::SignUp => handle_sign_up_input(app, key).await,
        Screen::Home => handle_home_input(app, key).await,
        Screen::Detail => handle_detail_input(app, key),
    }
}

async fn handle_sign_in_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if app.signin_busy {
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.signin_focus = match app.signin_focus {
                SignInFocus::Identifier => SignInFocus::Password,
                SignInFocus::Password => SignInFocus::Button,
                SignInFocus::Button => SignInFocus::SignUpLink,
                SignInFocus::SignUpLink => SignInFocus::Identifier,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.signin_focus = match app.signin_focus {
                SignInFocus::Identifier => SignInFocus::SignUpLink,
                SignInFocus::Password => SignInFocus::Identifier,
                SignInFocus::Button => SignInFocus::Password,
                SignInFocus::SignUpLink => SignInFocus::Button,
            };
        }
        KeyCode::Enter => match app.signin_focus {
            SignInFocus::Identifier => {
                app.signin_focus = SignInFocus::Password;
            }
            SignInFocus::Password | SignInFocus::Button => {
                app.attempt_sign_in().await;
            }
            SignInFocus::SignUpLink => {
                app.signup_error = None;
                app.screen = Screen::SignUp;
                app.signup_focus = SignUpFocus::Email;
            }
        },
        KeyCode::Backspace => match app.signin_focus {
            SignInFocus::Identifier => {
                app.signin_identifier.pop();
            }
            SignInFocus::Password => {
                app.signin_password.pop();
            }
            _ => {}
        },
        KeyCode::Char(c) => match app.signin_focus {
            SignInFocus::Identifier => {
                if app.signin_identifier.len() < MAX_INPUT_LENGTH {
                    app.signin_identifier.push(c);
                }
            }
            SignInFocus::Password => {
                if app.signin_password.len() < MAX_INPUT_LENGTH {
                    app.signin_password.push(c);
                }
            }
            _ => {}
        },
        _ => {}
    }
    Ok(false)
}

async fn handle_sign_up_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if app.signup_busy {
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => {
            app.screen = Screen::SignIn;
        }
        KeyCode::Down | KeyCode::Tab => {
            app.signup_focus = app.signup_focus.next();
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.signup_focus = app.signup_focus.prev();
        }
        KeyCode::Enter => {
            if app.signup_focus == SignUpFocus::Button {
                app.attempt_sign_up().await;
            } else {
                app.signup_focus = app.signup_focus.next();
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = signup_field_mut(app) {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(field) = signup_field_mut(app) {
                if field.len() < MAX_INPUT_LENGTH {
                    field.push(c);
                }
            }
        }
        _ => {}
    }
    Ok(false)
}

fn signup_field_mut(app: &mut App) -> Option<&mut String> {
    match app.signup_focus {
        SignUpFocus::Email => Some(&mut app.signup_email),
        SignUpFocus::Username => Some(&mut app.signup_username),
        SignUpFocus::Password => Some(&mut app.signup_password),
        SignUpFocus::FirstName => Some(&mut app.signup_first_name),
        SignUpFocus::LastName => Some(&mut app.signup_last_name),
        SignUpFocus::Button => None,
    }
}

async fn handle_home_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Overlays take the keys first
    if app.profile_menu_visible {
        match key.code {
            KeyCode::Char('o') | KeyCode::Char('O') | KeyCode::Enter => {
                app.sign_out();
            }
            KeyCode::Esc | KeyCode::Char('p') => {
                app.profile_menu_visible = false;
            }
            _ => {}
        }
        return Ok(false);
    }

    if app.sidebar_visible {
        return handle_sidebar_input(app, key).await;
    }

    if app.home_mode == HomeMode::EditingPath {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                app.home_mode = HomeMode::Browse;
            }
            KeyCode::Backspace => {
                app.image_path.pop();
            }
            KeyCode::Char(c) => {
                if app.image_path.len() < MAX_PATH_LENGTH {
                    app.image_path.push(c);
                }
            }
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Char('i') => {
            app.home_mode = HomeMode::EditingPath;
        }
        KeyCode::Char('a') => {
            app.start_analysis();
        }
        KeyCode::Char('n') => {
            app.reset_home();
        }
        KeyCode::Char('s') => {
            app.sidebar_visible = true;
            app.sidebar_selection = 0;
            app.refresh_history();
        }
        KeyCode::Char('p') => {
            app.profile_menu_visible = true;
        }
        _ => {}
    }
    Ok(false)
}

async fn handle_sidebar_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('s') => {
            app.sidebar_visible = false;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.sidebar_selection = app.sidebar_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.sidebar_selection + 1 < app.history.len() {
                app.sidebar_selection += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(analysis) = app.history.get(app.sidebar_selection) {
                let id = analysis.id.clone();
                app.sidebar_visible = false;
                app.open_detail(id).await;
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(analysis) = app.history.get(app.sidebar_selection) {
                let id = analysis.id.clone();
                app.delete_analysis(id).await;
            }
        }
        _ => {}
    }
    Ok(false)
}

fn handle_detail_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') => {
            app.screen = Screen::Home;
            app.detail = None;
        }
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
        }
        _ => {}
    }
    Ok(false)
}
