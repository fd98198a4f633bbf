//! Authentication module for managing the user session and credential.
//!
//! This module provides:
//! - `Session`: the process-wide authentication state and its single
//!   startup reconciliation pass
//! - `Gate`: pure mapping from session state to what the UI should show
//! - `TokenStore` / `KeyringStore`: secure storage for the bearer token
//!
//! Exactly one credential is persisted, under the OS keychain.

pub mod credentials;
pub mod session;

pub use credentials::{KeyringStore, TokenStore};
pub use session::{sign_out, Gate, Session, SessionState};
