//! Tier-gated console navigation.

use crate::model::actor::PrivilegeTier;

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Parent menu label for nested entries.
    pub group: Option<&'static str>,
    pub label: &'static str,
    pub route: &'static str,
}

impl NavItem {
    const fn top(label: &'static str, route: &'static str) -> Self {
        Self {
            group: None,
            label,
            route,
        }
    }

    const fn nested(group: &'static str, label: &'static str, route: &'static str) -> Self {
        Self {
            group: Some(group),
            label,
            route,
        }
    }
}

/// Returns the sidebar entries available to `tier`, in display order.
pub fn navigation(tier: PrivilegeTier) -> Vec<NavItem> {
    use PrivilegeTier::{Admin, Leader, Owner};

    let mut items = vec![NavItem::top("Dashboard", "/dashboard")];
    if tier != Owner {
        items.push(NavItem::nested("Meetings", "New", "/schedule/meeting"));
    }
    items.push(NavItem::nested("Meetings", "List", "/schedule"));
    items.push(NavItem::nested("Tasks", "Dates", "/task-calendar"));
    items.push(NavItem::nested("Tasks", "List", "/tasks"));

    if matches!(tier, Owner | Admin) {
        items.push(NavItem::top("Users", "/users"));
    }
    if tier == Owner {
        items.push(NavItem::top("Subscribers", "/subscribers"));
        items.push(NavItem::top("Edit Church", "/edit-church"));
    }
    if matches!(tier, Admin | Leader) {
        items.push(NavItem::top("People", "/people"));
    }
    if matches!(tier, Owner | Admin) {
        items.push(NavItem::top("Subscriptions", "/subscriptions"));
    }
    match tier {
        Owner => items.push(NavItem::top("Payments", "/paymenthistory")),
        Admin => items.push(NavItem::top("Payments", "/paymenthistorya")),
        Leader => {}
    }
    items
}

/// Whether list screens render the tenant scope selector for `tier`.
pub fn shows_scope_selector(tier: PrivilegeTier) -> bool {
    tier == PrivilegeTier::Owner
}
