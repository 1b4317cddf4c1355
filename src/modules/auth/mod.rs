//! Auth provider port.
//!
//! The core only consumes the current user id (to scope storage paths) and a
//! change stream for the sign-in/sign-out lifecycle; the actual auth protocol
//! lives behind this boundary.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait AuthProvider: Send + Sync {
    /// Currently signed-in user, if any
    fn current_user(&self) -> Option<UserId>;

    /// Change stream; yields the new value on every sign-in/sign-out
    fn watch(&self) -> watch::Receiver<Option<UserId>>;
}

/// Reference implementation backed by a watch channel, used by tests and by
/// embedders that manage sessions themselves.
pub struct LocalAuthGateway {
    state: watch::Sender<Option<UserId>>,
}

impl LocalAuthGateway {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    pub fn sign_in(&self, user_id: UserId) {
        log::info!("Auth: user {} signed in", user_id);
        self.state.send_replace(Some(user_id));
    }

    pub fn sign_out(&self) {
        log::info!("Auth: signed out");
        self.state.send_replace(None);
    }
}

impl Default for LocalAuthGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for LocalAuthGateway {
    fn current_user(&self) -> Option<UserId> {
        self.state.borrow().clone()
    }

    fn watch(&self) -> watch::Receiver<Option<UserId>> {
        self.state.subscribe()
    }
}
