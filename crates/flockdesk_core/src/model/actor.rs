//! Authenticated actor and privilege tiers.
//!
//! # Responsibility
//! - Model the closed set of privilege tiers and their wire codes.
//! - Carry the immutable identity every core operation is evaluated against.
//!
//! # Invariants
//! - Tier codes outside `"1" | "2" | "3"` never map to a tier.
//! - Admin and Leader actors always carry a tenant id.

use crate::model::id::{ActorId, TenantId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Privilege tier of an authenticated actor.
///
/// Serialized as its wire code so session and API payloads round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivilegeTier {
    /// Cross-tenant operator; sees records only after choosing a scope.
    Owner,
    /// Sees every record of their own tenant.
    Admin,
    /// Sees only records they authored.
    Leader,
}

impl PrivilegeTier {
    /// Parses the session/API wire code (`"1"`, `"2"`, `"3"`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1" => Some(Self::Owner),
            "2" => Some(Self::Admin),
            "3" => Some(Self::Leader),
            _ => None,
        }
    }

    /// Stable wire code written to session state.
    pub fn code(self) -> &'static str {
        match self {
            Self::Owner => "1",
            Self::Admin => "2",
            Self::Leader => "3",
        }
    }

    /// Label shown in user listings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Owner => "Super-user",
            Self::Admin => "Admin",
            Self::Leader => "Leader",
        }
    }
}

impl Serialize for PrivilegeTier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for PrivilegeTier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = crate::model::id::deserialize_id(deserializer)?;
        Self::from_code(&code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown privilege tier `{code}`")))
    }
}

/// The authenticated actor a request is evaluated for.
///
/// Fields are private so an actor cannot be widened in place after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    tier: PrivilegeTier,
    tenant_id: Option<TenantId>,
    actor_id: ActorId,
}

impl Actor {
    /// Creates an Owner-tier actor. Owners may be bound to no tenant.
    pub fn owner(actor_id: impl Into<ActorId>) -> Self {
        Self {
            tier: PrivilegeTier::Owner,
            tenant_id: None,
            actor_id: actor_id.into(),
        }
    }

    /// Creates an Admin-tier actor bound to `tenant_id`.
    pub fn admin(actor_id: impl Into<ActorId>, tenant_id: impl Into<TenantId>) -> Self {
        Self {
            tier: PrivilegeTier::Admin,
            tenant_id: Some(tenant_id.into()),
            actor_id: actor_id.into(),
        }
    }

    /// Creates a Leader-tier actor bound to `tenant_id`.
    pub fn leader(actor_id: impl Into<ActorId>, tenant_id: impl Into<TenantId>) -> Self {
        Self {
            tier: PrivilegeTier::Leader,
            tenant_id: Some(tenant_id.into()),
            actor_id: actor_id.into(),
        }
    }

    /// Returns a copy of this owner carrying a home tenant.
    ///
    /// The home tenant never acts as a scope; Owner visibility still requires
    /// an explicit selection.
    pub fn with_home_tenant(mut self, tenant_id: impl Into<TenantId>) -> Self {
        if self.tier == PrivilegeTier::Owner {
            self.tenant_id = Some(tenant_id.into());
        }
        self
    }

    pub fn tier(&self) -> PrivilegeTier {
        self.tier
    }

    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    pub fn is_owner(&self) -> bool {
        self.tier == PrivilegeTier::Owner
    }
}
