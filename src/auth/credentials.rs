use anyhow::{Context, Result};
use keyring::Entry;

/// Keychain service name
const SERVICE_NAME: &str = "calorie-tui";

/// Keychain entry name. Exactly one credential is ever stored: the
/// bearer token for the current account.
const TOKEN_KEY: &str = "token";

/// Storage for the persisted bearer token.
///
/// The token is opaque to the client; it is only ever read back and sent
/// in an `Authorization` header. The trait exists so the session lifecycle
/// can be exercised in tests without touching the OS keychain.
pub trait TokenStore {
    /// Read the stored token, if any. `Ok(None)` when no token is stored.
    fn get(&self) -> Result<Option<String>>;

    /// Persist a token, replacing any previous one.
    fn set(&self, token: &str) -> Result<()>;

    /// Delete the stored token. Deleting an absent token is not an error.
    fn delete(&self) -> Result<()>;
}

/// `TokenStore` backed by the OS keychain.
pub struct KeyringStore;

impl KeyringStore {
    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, TOKEN_KEY).context("Failed to create keyring entry")
    }
}

impl TokenStore for KeyringStore {
    fn get(&self) -> Result<Option<String>> {
        let entry = Self::entry()?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read token from keychain"),
        }
    }

    fn set(&self, token: &str) -> Result<()> {
        let entry = Self::entry()?;
        entry
            .set_password(token)
            .context("Failed to store token in keychain")?;
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        let entry = Self::entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory `TokenStore` implementations for session tests.

    use std::cell::RefCell;

    use super::*;

    /// Store holding an optional token in memory.
    pub struct MemoryStore {
        token: RefCell<Option<String>>,
    }

    impl MemoryStore {
        pub fn new(token: Option<&str>) -> Self {
            Self {
                token: RefCell::new(token.map(String::from)),
            }
        }

        pub fn stored(&self) -> Option<String> {
            self.token.borrow().clone()
        }
    }

    impl TokenStore for MemoryStore {
        fn get(&self) -> Result<Option<String>> {
            Ok(self.token.borrow().clone())
        }

        fn set(&self, token: &str) -> Result<()> {
            *self.token.borrow_mut() = Some(token.to_string());
            Ok(())
        }

        fn delete(&self) -> Result<()> {
            *self.token.borrow_mut() = None;
            Ok(())
        }
    }

    /// Store whose delete always fails; get/set behave like `MemoryStore`.
    pub struct FailingDeleteStore(pub MemoryStore);

    impl TokenStore for FailingDeleteStore {
        fn get(&self) -> Result<Option<String>> {
            self.0.get()
        }

        fn set(&self, token: &str) -> Result<()> {
            self.0.set(token)
        }

        fn delete(&self) -> Result<()> {
            Err(anyhow::anyhow!("keychain unavailable"))
        }
    }
}
