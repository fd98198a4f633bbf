//! Application state management for the Calorie AI terminal client.
//!
//! This module contains the core `App` struct that owns the session,
//! the API client, per-screen UI state, and background task coordination.

use anyhow::Result;
use base64::Engine;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::api::{ApiClient, ApiError, LoginRequest, SignupRequest};
use crate::auth::{self, Gate, KeyringStore, Session, TokenStore};
use crate::config::Config;
use crate::models::{AnalysisDetail, AnalysisResult, AnalysisSummary};
use crate::utils::is_supported_image;

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// One analysis and one history refresh can be in flight at a time,
/// so a small buffer is plenty.
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Maximum length for text field input.
/// 128 chars accommodates long email addresses and passphrases.
pub const MAX_INPUT_LENGTH: usize = 128;

/// Maximum length for the image path field.
pub const MAX_PATH_LENGTH: usize = 512;

// ============================================================================
// UI State Types
// ============================================================================

/// Which screen the signed-in tree is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SignIn,
    SignUp,
    Home,
    Detail,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ConfirmingQuit,
    Quitting,
}

/// Sign-in form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInFocus {
    Identifier,
    Password,
    Button,
    SignUpLink,
}

/// Sign-up form focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpFocus {
    Email,
    Username,
    Password,
    FirstName,
    LastName,
    Button,
}

impl SignUpFocus {
    pub fn next(&self) -> Self {
        match self {
            SignUpFocus::Email => SignUpFocus::Username,
            SignUpFocus::Username => SignUpFocus::Password,
            SignUpFocus::Password => SignUpFocus::FirstName,
            SignUpFocus::FirstName => SignUpFocus::LastName,
            SignUpFocus::LastName => SignUpFocus::Button,
            SignUpFocus::Button => SignUpFocus::Email,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            SignUpFocus::Email => SignUpFocus::Button,
            SignUpFocus::Username => SignUpFocus::Email,
            SignUpFocus::Password => SignUpFocus::Username,
            SignUpFocus::FirstName => SignUpFocus::Password,
            SignUpFocus::LastName => SignUpFocus::FirstName,
            SignUpFocus::Button => SignUpFocus::LastName,
        }
    }
}

/// Home screen interaction mode: browsing with hotkeys, or editing the
/// image path field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeMode {
    Browse,
    EditingPath,
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Results sent from spawned tasks back to the event loop.
enum TaskResult {
    /// Image analysis finished
    Analysis(Result<AnalysisResult>),
    /// Analysis history fetched
    History(Result<Vec<AnalysisSummary>>),
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub config: Config,
    pub api: ApiClient,
    pub session: Session,
    store: KeyringStore,

    pub state: AppState,
    pub screen: Screen,

    // Sign-in form state
    pub signin_identifier: String,
    pub signin_password: String,
    pub signin_focus: SignInFocus,
    pub signin_error: Option<String>,
    pub signin_notice: Option<String>,
    pub signin_busy: bool,

    // Sign-up form state
    pub signup_email: String,
    pub signup_username: String,
    pub signup_password: String,
    pub signup_first_name: String,
    pub signup_last_name: String,
    pub signup_focus: SignUpFocus,
    pub signup_error: Option<String>,
    pub signup_busy: bool,

    // Home screen state
    pub home_mode: HomeMode,
    pub image_path: String,
    pub analyzing: bool,
    pub analysis_result: Option<AnalysisResult>,
    pub history: Vec<AnalysisSummary>,
    pub sidebar_visible: bool,
    pub sidebar_selection: usize,
    pub profile_menu_visible: bool,

    // Detail screen state
    pub detail: Option<AnalysisDetail>,
    pub detail_loading: bool,

    pub status_message: Option<String>,

    task_rx: mpsc::Receiver<TaskResult>,
    task_tx: mpsc::Sender<TaskResult>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let api = ApiClient::new(config.server_url())?;
        debug!(server_url = %config.server_url(), "API client configured");

        let signin_identifier = config.last_identifier.clone().unwrap_or_default();

        let (task_tx, task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Ok(Self {
            config,
            api,
            session: Session::new(),
            store: KeyringStore,

            state: AppState::Normal,
            screen: Screen::SignIn,

            signin_identifier,
            signin_password: String::new(),
            signin_focus: SignInFocus::Identifier,
            signin_error: None,
            signin_notice: None,
            signin_busy: false,

            signup_email: String::new(),
            signup_username: String::new(),
            signup_password: String::new(),
            signup_first_name: String::new(),
            signup_last_name: String::new(),
            signup_focus: SignUpFocus::Email,
            signup_error: None,
            signup_busy: false,

            home_mode: HomeMode::Browse,
            image_path: String::new(),
            analyzing: false,
            analysis_result: None,
            history: Vec::new(),
            sidebar_visible: false,
            sidebar_selection: 0,
            profile_menu_visible: false,

            detail: None,
            detail_loading: false,

            status_message: None,

            task_rx,
            task_tx,
        })
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Run the startup reconciliation and land on the screen the gate
    /// selects. Called exactly once, before the first interactive frame.
    pub async fn initialize_session(&mut self) {
        let api = self.api.clone();
        let validated_token = std::cell::RefCell::new(None);
        self.session
            .initialize(&self.store, |token| {
                *validated_token.borrow_mut() = Some(token.clone());
                async move { api.with_token(token).fetch_profile().await }
            })
            .await;

        let state = self.session.state();
        match Gate::of(&state) {
            Gate::Main => {
                // Arm the client with the token the server just accepted
                if let Some(token) = validated_token.into_inner() {
                    self.api.set_token(token);
                }
                self.screen = Screen::Home;
                self.refresh_history();
                info!(user = %state.user.as_ref().map(|u| u.username.as_str()).unwrap_or(""), "Session restored");
            }
            Gate::SignIn => {
                self.screen = Screen::SignIn;
                self.signin_focus = if self.signin_identifier.is_empty() {
                    SignInFocus::Identifier
                } else {
                    SignInFocus::Password
                };
            }
            Gate::Loading => unreachable!("initialize resolves the loading state"),
        }
    }

    /// Attempt sign-in with the form contents: login, persist the token,
    /// fetch the profile, then record the session transition.
    pub async fn attempt_sign_in(&mut self) {
        if self.signin_identifier.is_empty() || self.signin_password.is_empty() {
            self.signin_error = Some("Identifier and password are required".to_string());
            return;
        }

        self.signin_error = None;
        self.signin_notice = None;
        self.signin_busy = true;

        let request = LoginRequest::from_identifier(&self.signin_identifier, &self.signin_password);

        let outcome = async {
            let token = self.api.login(&request).await?;

            if let Err(e) = self.store.set(&token) {
                // Not fatal for this process: the session still works,
                // but the next launch will start signed out.
                warn!(error = %e, "Failed to persist token");
            }

            let profile = self.api.with_token(token.clone()).fetch_profile().await?;
            Ok::<_, anyhow::Error>((token, profile))
        }
        .await;

        self.signin_busy = false;

        match outcome {
            Ok((token, profile)) => {
                self.api.set_token(token);
                self.session.record_sign_in(profile);

                self.config.last_identifier = Some(self.signin_identifier.clone());
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }

                self.signin_password.clear();
                self.screen = Screen::Home;
                self.refresh_history();
                info!("Sign-in successful");
            }
            Err(e) => {
                error!(error = %e, "Sign-in failed");
                self.signin_error = Some(sign_in_error_message(&e));
            }
        }
    }

    /// Attempt account creation with the sign-up form contents. On
    /// success the user is returned to the sign-in screen with a notice.
    pub async fn attempt_sign_up(&mut self) {
        if self.signup_email.is_empty()
            || self.signup_username.is_empty()
            || self.signup_password.is_empty()
        {
            self.signup_error = Some("Email, username and password are required".to_string());
            return;
        }

        self.signup_error = None;
        self.signup_busy = true;

        let request = SignupRequest {
            email: self.signup_email.clone(),
            username: self.signup_username.clone(),
            password: self.signup_password.clone(),
            first_name: non_empty(&self.signup_first_name),
            last_name: non_empty(&self.signup_last_name),
        };

        let result = self.api.signup(&request).await;
        self.signup_busy = false;

        match result {
            Ok(()) => {
                info!(username = %request.username, "Sign-up successful");
                self.signin_identifier = self.signup_email.clone();
                self.clear_signup_form();
                self.signin_notice = Some("Account created. Please sign in.".to_string());
                self.screen = Screen::SignIn;
                self.signin_focus = SignInFocus::Password;
            }
            Err(e) => {
                error!(error = %e, "Sign-up failed");
                self.signup_error = Some(format!("Sign-up failed: {}", e));
            }
        }
    }

    /// Sign out: clear the session (always) and delete the stored token.
    /// A deletion failure is reported in the status line but does not
    /// keep the user signed in.
    pub fn sign_out(&mut self) {
        let delete_result = auth::sign_out(&mut self.session, &self.store);

        self.api.clear_token();
        self.reset_home();
        self.profile_menu_visible = false;
        self.sidebar_visible = false;
        self.history.clear();
        self.screen = Screen::SignIn;
        self.signin_password.clear();
        self.signin_focus = SignInFocus::Password;

        match delete_result {
            Ok(()) => info!("Signed out"),
            Err(e) => {
                error!(error = %e, "Failed to delete stored token during sign-out");
                self.signin_notice = Some("Signed out, but the stored token could not be removed.".to_string());
            }
        }
    }

    // =========================================================================
    // Analysis
    // =========================================================================

    /// Kick off an image analysis for the path in the image field.
    /// The request runs in a spawned task so the UI keeps drawing.
    pub fn start_analysis(&mut self) {
        if self.analyzing {
            return;
        }

        let path = self.image_path.trim().to_string();
        if path.is_empty() {
            self.status_message = Some("Enter the path of a food image first".to_string());
            return;
        }

        if !is_supported_image(&path) {
            self.status_message =
                Some("Unsupported format. Choose a JPEG, PNG, WEBP or GIF image.".to_string());
            return;
        }

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.status_message = Some(format!("Could not read {}: {}", path, e));
                return;
            }
        };

        let image_base64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
        debug!(path = %path, image_len = image_base64.len(), "Starting analysis");

        self.analyzing = true;
        self.analysis_result = None;
        self.status_message = None;

        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.analyze(&image_base64).await;
            let _ = tx.send(TaskResult::Analysis(result)).await;
        });
    }

    /// Refresh the analysis history list in the background
    pub fn refresh_history(&mut self) {
        let api = self.api.clone();
        let tx = self.task_tx.clone();
        tokio::spawn(async move {
            let result = api.list_analyses().await;
            let _ = tx.send(TaskResult::History(result)).await;
        });
    }

    /// Drain completed background tasks and fold them into UI state
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.task_rx.try_recv() {
            match result {
                TaskResult::Analysis(Ok(result)) => {
                    info!(title = %result.title, "Analysis complete");
                    self.analyzing = false;
                    self.analysis_result = Some(result);
                    self.refresh_history();
                }
                TaskResult::Analysis(Err(e)) => {
                    error!(error = %e, "Analysis failed");
                    self.analyzing = false;
                    self.status_message = Some(analyze_error_message(&e));
                }
                TaskResult::History(Ok(history)) => {
                    debug!(count = history.len(), "History refreshed");
                    self.history = history;
                    if self.sidebar_selection >= self.history.len() {
                        self.sidebar_selection = self.history.len().saturating_sub(1);
                    }
                }
                TaskResult::History(Err(e)) => {
                    warn!(error = %e, "Failed to fetch analyses");
                    self.status_message =
                        Some("Failed to fetch analyses. Please try again.".to_string());
                }
            }
        }
    }

    /// Open the detail screen for a stored analysis
    pub async fn open_detail(&mut self, id: String) {
        self.screen = Screen::Detail;
        self.detail = None;
        self.detail_loading = true;

        match self.api.fetch_analysis(&id).await {
            Ok(detail) => {
                self.detail = Some(detail);
            }
            Err(e) => {
                error!(error = %e, id = %id, "Failed to load analysis");
                self.status_message = Some(format!("Failed to load analysis: {}", e));
            }
        }
        self.detail_loading = false;
    }

    /// Delete a stored analysis, then refresh the history list
    pub async fn delete_analysis(&mut self, id: String) {
        match self.api.delete_analysis(&id).await {
            Ok(()) => {
                info!(id = %id, "Analysis deleted");
                self.refresh_history();
            }
            Err(e) => {
                error!(error = %e, id = %id, "Failed to delete analysis");
                self.status_message = Some("Failed to delete analysis.".to_string());
            }
        }
    }

    /// Clear the selected image and result for a new analysis
    pub fn reset_home(&mut self) {
        self.image_path.clear();
        self.analysis_result = None;
        self.analyzing = false;
        self.home_mode = HomeMode::Browse;
        self.status_message = None;
    }

    fn clear_signup_form(&mut self) {
        self.signup_email.clear();
        self.signup_username.clear();
        self.signup_password.clear();
        self.signup_first_name.clear();
        self.signup_last_name.clear();
        self.signup_focus = SignUpFocus::Email;
        self.signup_error = None;
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// User-facing message for a failed sign-in
fn sign_in_error_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ApiError>() {
        Some(ApiError::Unauthorized) | Some(ApiError::BadRequest(_)) => {
            "Invalid identifier or password".to_string()
        }
        Some(ApiError::NetworkError(_)) => {
            "Unable to connect to the server. Check that it is running.".to_string()
        }
        _ => format!("Sign-in failed: {}", e),
    }
}

/// User-facing message for a failed analysis. 400 and 401 get
/// status-specific wording.
fn analyze_error_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ApiError>() {
        Some(ApiError::BadRequest(_)) => {
            "There was a problem with the image. It might be too large or in an unsupported format."
                .to_string()
        }
        Some(ApiError::Unauthorized) => "Please log in again to continue".to_string(),
        Some(ApiError::NetworkError(_)) => "Could not connect to the server".to_string(),
        _ => format!("An error occurred during analysis: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("   "), None);
        assert_eq!(non_empty(" Jane "), Some("Jane".to_string()));
    }

    #[test]
    fn test_analyze_error_messages() {
        let bad_request: anyhow::Error = ApiError::BadRequest("too large".to_string()).into();
        assert!(analyze_error_message(&bad_request).contains("problem with the image"));

        let unauthorized: anyhow::Error = ApiError::Unauthorized.into();
        assert_eq!(
            analyze_error_message(&unauthorized),
            "Please log in again to continue"
        );

        let other: anyhow::Error = anyhow::anyhow!("weird");
        assert!(analyze_error_message(&other).contains("weird"));
    }

    #[test]
    fn test_sign_in_error_messages() {
        let unauthorized: anyhow::Error = ApiError::Unauthorized.into();
        assert_eq!(
            sign_in_error_message(&unauthorized),
            "Invalid identifier or password"
        );

        let server: anyhow::Error = ApiError::ServerError("boom".to_string()).into();
        assert!(sign_in_error_message(&server).contains("Sign-in failed"));
    }

    #[tokio::test]
    async fn test_network_failure_messages() {
        // Port 9 (discard) refuses connections on any sane host
        let api = ApiClient::new("http://127.0.0.1:9".to_string()).expect("client builds");
        let err = api
            .login(&LoginRequest::from_identifier("jdoe", "x"))
            .await
            .expect_err("connection should be refused");

        assert_eq!(
            sign_in_error_message(&err),
            "Unable to connect to the server. Check that it is running."
        );
        assert_eq!(
            analyze_error_message(&err),
            "Could not connect to the server"
        );
    }

    #[test]
    fn test_signup_focus_cycle() {
        let mut focus = SignUpFocus::Email;
        for _ in 0..6 {
            focus = focus.next();
        }
        assert_eq!(focus, SignUpFocus::Email);
        assert_eq!(SignUpFocus::Email.prev(), SignUpFocus::Button);
    }
}
