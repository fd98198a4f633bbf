use std::future::Future;

use anyhow::Result;
use tracing::{debug, warn};

use crate::models::UserProfile;

use super::TokenStore;

/// Process-wide authentication state.
///
/// Three states, linear lifecycle: initializing (loading), authenticated,
/// unauthenticated. `initialize` runs the single startup reconciliation
/// pass; after that, state changes only through `record_sign_in` and
/// `clear`. There is no path back to the loading state.
///
/// Logged-in and the loaded profile are one field: `user` present means
/// logged in. A consumer can never observe one without the other.
pub struct Session {
    loading: bool,
    user: Option<UserProfile>,
}

/// Snapshot of the session handed to consumers.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub loading: bool,
    pub user: Option<UserProfile>,
}

impl SessionState {
    pub fn logged_in(&self) -> bool {
        self.user.is_some()
    }
}

/// What the screen tree should show for a given session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Startup reconciliation still running
    Loading,
    /// Not logged in: show the sign-in flow
    SignIn,
    /// Logged in: show the main screen tree
    Main,
}

impl Gate {
    /// Pure function of the session snapshot. The three arms are mutually
    /// exclusive and cover every reachable state.
    pub fn of(state: &SessionState) -> Self {
        if state.loading {
            Gate::Loading
        } else if state.logged_in() {
            Gate::Main
        } else {
            Gate::SignIn
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            loading: true,
            user: None,
        }
    }

    /// Startup reconciliation: load the persisted token and validate it
    /// against the server by fetching the profile.
    ///
    /// Runs at most once per process; a second call is a no-op. The store
    /// read strictly precedes the profile fetch, and `loading` drops to
    /// false only after both have resolved. Every failure mode — no token,
    /// store error, network error, rejected token, unparseable profile —
    /// resolves to signed-out. Errors are not propagated, and a rejected
    /// token is left in the store (sign-out is the only deletion path).
    pub async fn initialize<S, F, Fut>(&mut self, store: &S, fetch_profile: F)
    where
        S: TokenStore + ?Sized,
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<UserProfile>>,
    {
        if !self.loading {
            warn!("Session already initialized, ignoring");
            return;
        }

        let token = match store.get() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        };

        match token {
            Some(token) => match fetch_profile(token).await {
                Ok(profile) => {
                    debug!(username = %profile.username, "Stored token accepted");
                    self.user = Some(profile);
                }
                Err(e) => {
                    // Expired token and unreachable server both land here;
                    // with no refresh protocol the distinction buys nothing.
                    debug!(error = %e, "Stored token not validated, starting signed out");
                }
            },
            None => {
                debug!("No stored token, starting signed out");
            }
        }

        self.loading = false;
    }

    /// Record a completed sign-in. The caller has already obtained and
    /// persisted the token and fetched this profile.
    pub fn record_sign_in(&mut self, profile: UserProfile) {
        self.user = Some(profile);
    }

    /// Drop to signed-out. Idempotent; does not touch the token store.
    pub fn clear(&mut self) {
        self.user = None;
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            loading: self.loading,
            user: self.user.clone(),
        }
    }

    pub fn logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Explicit sign-out: clear the session, then delete the stored token.
///
/// The session always ends signed out; a failed deletion is returned to
/// the caller for display but does not undo the state change.
pub fn sign_out<S>(session: &mut Session, store: &S) -> Result<()>
where
    S: TokenStore + ?Sized,
{
    session.clear();
    store.delete()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::testing::{FailingDeleteStore, MemoryStore};

    fn profile(username: &str) -> UserProfile {
        UserProfile {
            id: "1".to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            first_name: None,
            last_name: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_initialize_without_token() {
        let store = MemoryStore::new(None);
        let mut session = Session::new();

        session
            .initialize(&store, |_token| async { Ok(profile("jdoe")) })
            .await;

        let state = session.state();
        assert!(!state.loading);
        assert!(!state.logged_in());
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_initialize_with_valid_token() {
        let store = MemoryStore::new(Some("abc"));
        let mut session = Session::new();

        session
            .initialize(&store, |token| async move {
                assert_eq!(token, "abc");
                Ok(profile("jdoe"))
            })
            .await;

        let state = session.state();
        assert!(!state.loading);
        assert!(state.logged_in());
        assert_eq!(state.user.unwrap().username, "jdoe");
    }

    #[tokio::test]
    async fn test_validated_token_available_to_caller() {
        // The fetch closure sees the stored token before the network call,
        // so a caller can keep it for later requests without a second
        // store read.
        let store = MemoryStore::new(Some("abc"));
        let mut session = Session::new();
        let seen = std::cell::RefCell::new(None);

        session
            .initialize(&store, |token| {
                *seen.borrow_mut() = Some(token);
                async { Ok(profile("jdoe")) }
            })
            .await;

        assert!(session.logged_in());
        assert_eq!(seen.into_inner().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_initialize_with_rejected_token() {
        let store = MemoryStore::new(Some("expired"));
        let mut session = Session::new();

        session
            .initialize(&store, |_token| async {
                Err(anyhow::anyhow!("401 Unauthorized"))
            })
            .await;

        let state = session.state();
        assert!(!state.loading);
        assert!(!state.logged_in());
        // A rejected token stays in the store until explicit sign-out
        assert_eq!(store.stored().as_deref(), Some("expired"));
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let store = MemoryStore::new(Some("abc"));
        let mut session = Session::new();

        session
            .initialize(&store, |_token| async { Ok(profile("first")) })
            .await;
        session
            .initialize(&store, |_token| async { Ok(profile("second")) })
            .await;

        assert_eq!(session.user().unwrap().username, "first");
    }

    #[tokio::test]
    async fn test_store_read_error_degrades_to_signed_out() {
        struct BrokenStore;
        impl TokenStore for BrokenStore {
            fn get(&self) -> Result<Option<String>> {
                Err(anyhow::anyhow!("keychain locked"))
            }
            fn set(&self, _token: &str) -> Result<()> {
                Ok(())
            }
            fn delete(&self) -> Result<()> {
                Ok(())
            }
        }

        let mut session = Session::new();
        session
            .initialize(&BrokenStore, |_token| async { Ok(profile("jdoe")) })
            .await;

        assert!(!session.state().loading);
        assert!(!session.logged_in());
    }

    #[test]
    fn test_sign_in_and_clear() {
        let mut session = Session::new();
        session.record_sign_in(profile("ab"));
        assert!(session.logged_in());
        assert_eq!(session.user().unwrap().username, "ab");

        session.clear();
        assert!(!session.logged_in());
        assert!(session.user().is_none());

        // Clearing when already signed out leaves state unchanged
        session.clear();
        assert!(!session.logged_in());
    }

    #[test]
    fn test_sign_out_clears_even_when_delete_fails() {
        let store = FailingDeleteStore(MemoryStore::new(Some("tok1")));
        let mut session = Session::new();
        session.record_sign_in(profile("jdoe"));

        let result = sign_out(&mut session, &store);

        assert!(result.is_err());
        assert!(!session.logged_in());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_sign_out_deletes_token() {
        let store = MemoryStore::new(Some("tok1"));
        let mut session = Session::new();
        session.record_sign_in(profile("jdoe"));

        sign_out(&mut session, &store).expect("sign out should succeed");

        assert!(store.stored().is_none());
        assert!(!session.logged_in());
    }

    #[test]
    fn test_gate_covers_all_states() {
        let loading = SessionState {
            loading: true,
            user: None,
        };
        assert_eq!(Gate::of(&loading), Gate::Loading);

        let signed_out = SessionState {
            loading: false,
            user: None,
        };
        assert_eq!(Gate::of(&signed_out), Gate::SignIn);

        let signed_in = SessionState {
            loading: false,
            user: Some(profile("jdoe")),
        };
        assert_eq!(Gate::of(&signed_in), Gate::Main);
    }
}
