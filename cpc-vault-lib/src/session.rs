//! Admin session gate.
//!
//! Writes to the catalog are only reachable with an admin session. How a
//! session is established (login forms, cookies, tokens) lives outside this
//! crate; the service only asks whether one exists right now.

/// Environment variable holding the signed-in admin identity.
pub const ADMIN_ENV_VAR: &str = "CPC_VAULT_ADMIN";

/// An authenticated admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Who is signed in, typically an email address.
    pub identity: String,
}

impl Session {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

/// Source of the current admin session.
pub trait SessionGate {
    /// The active session, or `None` when nobody is signed in.
    fn current_session(&self) -> Option<Session>;
}

impl<G: SessionGate + ?Sized> SessionGate for &G {
    fn current_session(&self) -> Option<Session> {
        (**self).current_session()
    }
}

/// A gate that always answers the same way.
#[derive(Debug, Clone, Default)]
pub struct FixedSession(pub Option<Session>);

impl FixedSession {
    pub fn signed_in(identity: impl Into<String>) -> Self {
        Self(Some(Session::new(identity)))
    }

    pub fn signed_out() -> Self {
        Self(None)
    }
}

impl SessionGate for FixedSession {
    fn current_session(&self) -> Option<Session> {
        self.0.clone()
    }
}

/// A gate backed by an environment variable, read on every check.
///
/// A session exists while the variable holds a non-blank identity.
#[derive(Debug, Clone)]
pub struct EnvSessionGate {
    var: String,
}

impl EnvSessionGate {
    pub fn new() -> Self {
        Self::with_var(ADMIN_ENV_VAR)
    }

    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSessionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate for EnvSessionGate {
    fn current_session(&self) -> Option<Session> {
        let identity = std::env::var(&self.var).ok()?;
        let identity = identity.trim();
        if identity.is_empty() {
            None
        } else {
            Some(Session::new(identity))
        }
    }
}
