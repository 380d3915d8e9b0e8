//! Tenant scope state and generation-checked reference rebuilds.

use crate::api::ChurchApi;
use crate::model::actor::Actor;
use crate::model::id::TenantId;
use crate::model::tenant::Tenant;
use crate::reference::resolver::ReferenceMaps;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// One selectable tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeOption {
    pub tenant_id: TenantId,
    pub label: String,
}

/// Lists the tenants `actor` may scope to; empty for non-Owner actors.
pub fn available_scopes(actor: &Actor, tenants: &[Tenant]) -> Vec<ScopeOption> {
    if !actor.is_owner() {
        return Vec::new();
    }
    tenants
        .iter()
        .map(|tenant| ScopeOption {
            tenant_id: tenant.id.clone(),
            label: tenant.name.clone(),
        })
        .collect()
}

/// Handle for one pending reference rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeTicket {
    generation: u64,
    tenant_id: TenantId,
}

impl ScopeTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

/// Result of handing rebuilt maps back to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Applied,
    /// A newer selection was issued, or the maps belong to another tenant.
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// Only Owner-tier actors may choose a scope.
    NotPermitted,
    /// Tenant id is blank after trim.
    BlankTenant,
}

impl Display for ScopeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPermitted => write!(f, "tenant scope selection requires owner privileges"),
            Self::BlankTenant => write!(f, "tenant scope must not be blank"),
        }
    }
}

impl Error for ScopeError {}

/// Current tenant scope of one session.
#[derive(Debug, Clone)]
pub struct TenantScopeSelector {
    actor: Actor,
    selected: Option<TenantId>,
    generation: u64,
    maps: Arc<ReferenceMaps>,
}

impl TenantScopeSelector {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            selected: None,
            generation: 0,
            maps: Arc::new(ReferenceMaps::default()),
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Whether this session may see and use the selector at all.
    pub fn is_enabled(&self) -> bool {
        self.actor.is_owner()
    }

    /// Scope override passed to the visibility filter.
    pub fn scope(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Tenant whose people/tasks label references: the selected scope for
    /// owners, the actor's own tenant otherwise.
    pub fn reference_tenant(&self) -> Option<&str> {
        if self.actor.is_owner() {
            self.scope()
        } else {
            self.actor.tenant_id()
        }
    }

    /// Snapshot of the reference maps for the current scope.
    pub fn reference_maps(&self) -> Arc<ReferenceMaps> {
        Arc::clone(&self.maps)
    }

    /// Selects `tenant_id` as the Owner's scope.
    ///
    /// Current maps are dropped immediately so no label of the previous
    /// tenant survives the switch; the returned ticket must be completed with
    /// freshly built maps.
    pub fn select_scope(&mut self, tenant_id: &str) -> Result<ScopeTicket, ScopeError> {
        if !self.actor.is_owner() {
            warn!(
                "event=scope_select module=scope status=denied tier={} actor_id={}",
                self.actor.tier().code(),
                self.actor.actor_id()
            );
            return Err(ScopeError::NotPermitted);
        }
        let tenant_id = tenant_id.trim();
        if tenant_id.is_empty() {
            return Err(ScopeError::BlankTenant);
        }

        self.selected = Some(tenant_id.to_string());
        let ticket = self.issue_ticket(tenant_id);
        info!(
            "event=scope_select module=scope status=ok tenant_id={} generation={}",
            tenant_id, ticket.generation
        );
        Ok(ticket)
    }

    /// Clears the Owner's scope; every record becomes invisible again.
    ///
    /// Non-Owner selectors are left untouched and get `NotPermitted`.
    pub fn clear_scope(&mut self) -> Result<(), ScopeError> {
        if !self.actor.is_owner() {
            return Err(ScopeError::NotPermitted);
        }
        self.selected = None;
        self.generation += 1;
        self.maps = Arc::new(ReferenceMaps::default());
        info!("event=scope_clear module=scope status=ok generation={}", self.generation);
        Ok(())
    }

    /// Starts a rebuild for the current reference tenant, if any.
    pub fn begin_refresh(&mut self) -> Option<ScopeTicket> {
        let tenant_id = self.reference_tenant()?.to_string();
        Some(self.issue_ticket(&tenant_id))
    }

    /// Applies rebuilt maps if `ticket` is still the latest request.
    pub fn complete_rebuild(
        &mut self,
        ticket: &ScopeTicket,
        maps: ReferenceMaps,
    ) -> RebuildOutcome {
        let current = ticket.generation == self.generation;
        let same_tenant = maps.tenant_id() == Some(ticket.tenant_id.as_str());
        if !current || !same_tenant {
            info!(
                "event=reference_apply module=scope status=discarded tenant_id={} generation={} latest={}",
                ticket.tenant_id, ticket.generation, self.generation
            );
            return RebuildOutcome::Discarded;
        }

        self.maps = Arc::new(maps);
        RebuildOutcome::Applied
    }

    /// Selects a scope and rebuilds its reference maps synchronously.
    pub fn select_and_rebuild<A: ChurchApi + ?Sized>(
        &mut self,
        api: &A,
        tenant_id: &str,
    ) -> Result<RebuildOutcome, ScopeError> {
        let ticket = self.select_scope(tenant_id)?;
        let maps = ReferenceMaps::load(api, ticket.tenant_id());
        Ok(self.complete_rebuild(&ticket, maps))
    }

    /// Rebuilds maps for the current reference tenant synchronously.
    ///
    /// Returns `None` for an Owner with no scope selected.
    pub fn refresh<A: ChurchApi + ?Sized>(&mut self, api: &A) -> Option<RebuildOutcome> {
        let ticket = self.begin_refresh()?;
        let maps = ReferenceMaps::load(api, ticket.tenant_id());
        Some(self.complete_rebuild(&ticket, maps))
    }

    fn issue_ticket(&mut self, tenant_id: &str) -> ScopeTicket {
        self.generation += 1;
        self.maps = Arc::new(ReferenceMaps::empty(tenant_id));
        ScopeTicket {
            generation: self.generation,
            tenant_id: tenant_id.to_string(),
        }
    }
}
