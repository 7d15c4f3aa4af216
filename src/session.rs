//! Session lifecycle: token reconciliation, login, register, logout.
//!
//! The controller owns the current user snapshot and the loading flag and
//! is the only writer of both. Mutating operations are serialized through
//! an async mutex so concurrent `init` and `login` calls cannot interleave
//! their token writes.

use crate::{
    auth::AuthApi,
    error::Result,
    models::{TokenPair, User},
    token_store::{TokenKey, TokenStore},
};
use log::{debug, warn};
use std::sync::{Arc, Mutex};

/// Lifecycle state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// `init` has not run yet
    Uninitialized,
    /// An operation is reconciling or establishing the session
    Loading,
    /// A user profile is held and the access token was validated
    Authenticated,
    /// No session; stored tokens were absent or rejected
    Anonymous,
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    loading: bool,
    initialized: bool,
}

/// Owns the current user identity and loading state.
///
/// Invariant: `current_user()` is `Some` only if the access token was
/// successfully used to fetch a profile during this controller's lifetime.
pub struct SessionController {
    store: Arc<dyn TokenStore>,
    auth: AuthApi,
    state: Mutex<SessionState>,
    // Serializes init/login/register so their token writes cannot interleave
    op_lock: tokio::sync::Mutex<()>,
}

impl SessionController {
    pub(crate) fn new(store: Arc<dyn TokenStore>, auth: AuthApi) -> Self {
        Self {
            store,
            auth,
            state: Mutex::new(SessionState::default()),
            op_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Reconcile stored tokens with the backend. Runs once per process
    /// start; failures are swallowed into an anonymous session rather than
    /// surfaced, so a stale token can never block startup.
    ///
    /// Terminates in a non-loading state on every path.
    pub async fn init(&self) -> SessionStatus {
        let _guard = self.op_lock.lock().await;
        self.set_loading(true);

        let access = self.store.get(TokenKey::Access).unwrap_or_default();
        let refresh = self.store.get(TokenKey::Refresh).unwrap_or_default();

        let restored = match (access, refresh) {
            (None, None) => {
                debug!("[SESSION] No stored tokens, starting anonymous");
                None
            }
            (Some(access), refresh) => match self.auth.get_profile(&access).await {
                Ok(user) => {
                    debug!("[SESSION] Restored session for '{}'", user.email);
                    Some(user)
                }
                Err(err) => {
                    debug!("[SESSION] Stored access token rejected: {}", err);
                    match refresh {
                        Some(refresh) => self.refresh_then_profile(&refresh).await,
                        None => {
                            self.clear_tokens();
                            None
                        }
                    }
                }
            },
            (None, Some(refresh)) => self.refresh_then_profile(&refresh).await,
        };

        self.finish_operation(restored)
    }

    /// Establish a session with email and password.
    ///
    /// On failure the error propagates and the prior session, if any, is
    /// left untouched; only the loading flag is cleared.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let _guard = self.op_lock.lock().await;
        self.set_loading(true);

        let result = self.establish(email, password).await;

        match result {
            Ok(user) => {
                self.finish_operation(Some(user.clone()));
                Ok(user)
            }
            Err(err) => {
                // Prior session untouched, known asymmetry with init
                self.set_loading(false);
                Err(err)
            }
        }
    }

    /// Register a new account, then log in with the same credentials.
    pub async fn register(&self, email: &str, password: &str, display_name: &str) -> Result<User> {
        let _guard = self.op_lock.lock().await;
        self.set_loading(true);

        let result = async {
            self.auth.register(email, password, display_name).await?;
            self.establish(email, password).await
        }
        .await;

        match result {
            Ok(user) => {
                self.finish_operation(Some(user.clone()));
                Ok(user)
            }
            Err(err) => {
                self.set_loading(false);
                Err(err)
            }
        }
    }

    /// Clear both tokens and the user snapshot. Synchronous, no network
    /// call, succeeds regardless of prior state.
    pub fn logout(&self) {
        self.clear_tokens();
        let mut state = self.state.lock().expect("session state lock poisoned");
        state.user = None;
        state.loading = false;
        state.initialized = true;
        debug!("[SESSION] Logged out");
    }

    /// The current user snapshot, if authenticated
    pub fn current_user(&self) -> Option<User> {
        self.state
            .lock()
            .expect("session state lock poisoned")
            .user
            .clone()
    }

    /// Whether an operation is in flight
    pub fn is_loading(&self) -> bool {
        self.state
            .lock()
            .expect("session state lock poisoned")
            .loading
    }

    /// Current lifecycle state
    pub fn status(&self) -> SessionStatus {
        let state = self.state.lock().expect("session state lock poisoned");
        if state.loading {
            SessionStatus::Loading
        } else if state.user.is_some() {
            SessionStatus::Authenticated
        } else if state.initialized {
            SessionStatus::Anonymous
        } else {
            SessionStatus::Uninitialized
        }
    }

    /// login -> persist tokens -> fetch profile
    async fn establish(&self, email: &str, password: &str) -> Result<User> {
        let pair = self.auth.login(email, password).await?;
        self.persist_pair(&pair)?;
        self.auth.get_profile(&pair.access_token).await
    }

    /// refresh -> persist -> fetch profile; clears tokens on any failure
    async fn refresh_then_profile(&self, refresh: &str) -> Option<User> {
        let pair = match self.auth.refresh(refresh).await {
            Ok(pair) => pair,
            Err(err) => {
                debug!("[SESSION] Refresh token rejected: {}", err);
                self.clear_tokens();
                return None;
            }
        };

        if let Err(err) = self.persist_pair(&pair) {
            warn!("[SESSION] Failed to persist refreshed tokens: {}", err);
        }

        match self.auth.get_profile(&pair.access_token).await {
            Ok(user) => {
                debug!("[SESSION] Restored session for '{}' after refresh", user.email);
                Some(user)
            }
            Err(err) => {
                debug!("[SESSION] Profile fetch failed after refresh: {}", err);
                self.clear_tokens();
                None
            }
        }
    }

    fn persist_pair(&self, pair: &TokenPair) -> Result<()> {
        self.store.set(TokenKey::Access, &pair.access_token)?;
        self.store.set(TokenKey::Refresh, &pair.refresh_token)
    }

    fn clear_tokens(&self) {
        if let Err(err) = self.store.clear() {
            warn!("[SESSION] Failed to clear tokens: {}", err);
        }
    }

    fn set_loading(&self, loading: bool) {
        let mut state = self.state.lock().expect("session state lock poisoned");
        state.loading = loading;
    }

    /// Store the outcome of a mutating operation and clear the loading flag
    fn finish_operation(&self, user: Option<User>) -> SessionStatus {
        let mut state = self.state.lock().expect("session state lock poisoned");
        let status = if user.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        };
        state.user = user;
        state.loading = false;
        state.initialized = true;
        status
    }
}
