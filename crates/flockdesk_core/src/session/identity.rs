//! Session-backed actor resolution.

use crate::model::actor::{Actor, PrivilegeTier};
use log::{info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Session key holding the tier wire code.
pub const SESSION_KEY_PRIVILEGE: &str = "priv";
/// Session key holding the actor's tenant id.
pub const SESSION_KEY_TENANT: &str = "church";
/// Session key holding the actor id.
pub const SESSION_KEY_ACTOR: &str = "user-id";
/// Session key holding the login e-mail.
pub const SESSION_KEY_USER: &str = "user";

/// Read/write view over session state owned by an external collaborator
/// (cookie jar, keychain, test fixture).
pub trait SessionStore {
    fn get_session_value(&self, key: &str) -> Option<String>;
    fn set_session_value(&mut self, key: &str, value: &str);
}

/// Process-local session store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    values: HashMap<String, String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from `(key, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Parses a flat JSON object of string values, e.g. a saved session file.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let values: HashMap<String, String> = serde_json::from_str(text)?;
        Ok(Self { values })
    }
}

impl SessionStore for InMemorySessionStore {
    fn get_session_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_session_value(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Identity resolution failure. Callers must force re-authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// A required session key is missing or blank.
    Unauthenticated { missing: &'static str },
    /// Session carries a tier code outside the known set.
    UnknownTier(String),
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated { missing } => {
                write!(f, "no authenticated session: `{missing}` is not set")
            }
            Self::UnknownTier(code) => write!(f, "unrecognized privilege tier `{code}`"),
        }
    }
}

impl Error for IdentityError {}

/// Resolves the current actor from session state.
///
/// # Errors
/// - `Unauthenticated` when tier or actor id is missing/blank, or when an
///   Admin/Leader session has no tenant id.
/// - `UnknownTier` when the tier code is not `1|2|3`.
pub fn current_actor(store: &dyn SessionStore) -> Result<Actor, IdentityError> {
    let result = resolve_actor(store);
    match &result {
        Ok(actor) => info!(
            "event=identity_resolve module=session status=ok tier={} actor_id={}",
            actor.tier().code(),
            actor.actor_id()
        ),
        Err(err) => warn!(
            "event=identity_resolve module=session status=error error_code={}",
            identity_error_code(err)
        ),
    }
    result
}

/// Writes the session keys for a freshly authenticated actor.
pub fn record_login(store: &mut dyn SessionStore, actor: &Actor, email: &str) {
    store.set_session_value(SESSION_KEY_USER, email);
    store.set_session_value(SESSION_KEY_PRIVILEGE, actor.tier().code());
    store.set_session_value(SESSION_KEY_ACTOR, actor.actor_id());
    store.set_session_value(SESSION_KEY_TENANT, actor.tenant_id().unwrap_or_default());
    info!(
        "event=session_login module=session status=ok tier={} actor_id={}",
        actor.tier().code(),
        actor.actor_id()
    );
}

/// Blanks the login keys; subsequent `current_actor` calls fail.
pub fn clear_session(store: &mut dyn SessionStore) {
    store.set_session_value(SESSION_KEY_USER, "");
    store.set_session_value(SESSION_KEY_PRIVILEGE, "");
    info!("event=session_logout module=session status=ok");
}

fn resolve_actor(store: &dyn SessionStore) -> Result<Actor, IdentityError> {
    let code = read_non_blank(store, SESSION_KEY_PRIVILEGE)?;
    let tier =
        PrivilegeTier::from_code(&code).ok_or_else(|| IdentityError::UnknownTier(code.clone()))?;
    let actor_id = read_non_blank(store, SESSION_KEY_ACTOR)?;

    match tier {
        PrivilegeTier::Owner => {
            let actor = Actor::owner(actor_id);
            Ok(match read_non_blank(store, SESSION_KEY_TENANT) {
                Ok(tenant_id) => actor.with_home_tenant(tenant_id),
                Err(_) => actor,
            })
        }
        PrivilegeTier::Admin => Ok(Actor::admin(
            actor_id,
            read_non_blank(store, SESSION_KEY_TENANT)?,
        )),
        PrivilegeTier::Leader => Ok(Actor::leader(
            actor_id,
            read_non_blank(store, SESSION_KEY_TENANT)?,
        )),
    }
}

fn read_non_blank(store: &dyn SessionStore, key: &'static str) -> Result<String, IdentityError> {
    store
        .get_session_value(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(IdentityError::Unauthenticated { missing: key })
}

fn identity_error_code(err: &IdentityError) -> &'static str {
    match err {
        IdentityError::Unauthenticated { .. } => "unauthenticated",
        IdentityError::UnknownTier(_) => "unknown_tier",
    }
}
