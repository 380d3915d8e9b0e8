//! Visibility predicate and collection filter.

use crate::model::actor::{Actor, PrivilegeTier};
use crate::visibility::record::{LeaderAccess, MalformedRecordError, ScopedRecord};
use log::{debug, warn};

/// Returns whether `actor` may see `record`.
///
/// `scope_override` is the tenant an Owner-tier actor explicitly selected; it
/// is ignored for every other tier. Malformed records are never visible.
pub fn is_visible<R: ScopedRecord>(
    actor: &Actor,
    record: &R,
    scope_override: Option<&str>,
) -> bool {
    match check_visibility(actor, record, scope_override) {
        Ok(visible) => visible,
        Err(err) => {
            warn!(
                "event=record_malformed module=visibility status=excluded kind={} record_id={} missing={}",
                err.kind.as_str(),
                err.record_id,
                err.missing
            );
            false
        }
    }
}

/// Visibility decision that reports malformed records instead of logging them.
///
/// Rules are evaluated in tier order; the first applicable rule decides.
pub fn check_visibility<R: ScopedRecord>(
    actor: &Actor,
    record: &R,
    scope_override: Option<&str>,
) -> Result<bool, MalformedRecordError> {
    record.check_well_formed()?;

    let visible = match actor.tier() {
        PrivilegeTier::Leader => match R::KIND.leader_access() {
            LeaderAccess::Authored => record.created_by() == Some(actor.actor_id()),
            LeaderAccess::Denied => false,
        },
        PrivilegeTier::Admin => match actor.tenant_id() {
            Some(tenant_id) => record.tenant_id() == Some(tenant_id),
            None => false,
        },
        PrivilegeTier::Owner => match scope_override {
            Some(scope) => record.tenant_id() == Some(scope),
            None => false,
        },
    };
    Ok(visible)
}

/// Keeps only the records `actor` may see, preserving source order.
pub fn filter_visible<R: ScopedRecord>(
    actor: &Actor,
    mut records: Vec<R>,
    scope_override: Option<&str>,
) -> Vec<R> {
    let total = records.len();
    records.retain(|record| is_visible(actor, record, scope_override));
    debug!(
        "event=visibility_filter module=visibility status=ok kind={} tier={} scoped={} total={} visible={}",
        R::KIND.as_str(),
        actor.tier().code(),
        scope_override.is_some(),
        total,
        records.len()
    );
    records
}

#[cfg(test)]
mod tests {
    use super::{check_visibility, filter_visible, is_visible};
    use crate::model::account::{Payment, UserAccount};
    use crate::model::actor::{Actor, PrivilegeTier};
    use crate::model::meeting::Meeting;
    use crate::model::task::Task;

    fn payment(id: &str, tenant: Option<&str>) -> Payment {
        Payment {
            payment_id: id.to_string(),
            tenant_id: tenant.map(str::to_string),
            email: String::new(),
            amount: 10.0,
            date: String::new(),
        }
    }

    fn user(id: &str, tenant: Option<&str>) -> UserAccount {
        UserAccount {
            id: id.to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@grace.org".to_string(),
            tier: Some(PrivilegeTier::Leader),
            tenant_id: tenant.map(str::to_string),
        }
    }

    #[test]
    fn leader_sees_authored_records_across_tenants() {
        let leader = Actor::leader("u7", "A");
        assert!(is_visible(&leader, &Task::new("5", "B", "u7"), None));
        assert!(!is_visible(&leader, &Task::new("6", "A", "u8"), None));
        assert!(is_visible(&leader, &Meeting::new("1", "Z", "u7"), Some("Q")));
    }

    #[test]
    fn leader_never_sees_unauthored_kinds() {
        let leader = Actor::leader("u7", "A");
        assert!(!is_visible(&leader, &payment("p1", Some("A")), None));
        assert!(!is_visible(&leader, &user("u7", Some("A")), None));
    }

    #[test]
    fn admin_sees_own_tenant_only() {
        let admin = Actor::admin("u1", "A");
        assert!(is_visible(&admin, &Meeting::new("1", "A", "u9"), None));
        assert!(!is_visible(&admin, &Meeting::new("2", "B", "u1"), None));
        assert!(is_visible(&admin, &payment("p1", Some("A")), None));
        assert!(!is_visible(&admin, &user("u2", Some("B")), None));
    }

    #[test]
    fn admin_ignores_scope_override() {
        let admin = Actor::admin("u1", "A");
        assert!(!is_visible(&admin, &Meeting::new("2", "B", "u9"), Some("B")));
        assert!(is_visible(&admin, &Meeting::new("1", "A", "u9"), Some("B")));
    }

    #[test]
    fn owner_is_fail_closed_without_scope() {
        let owner = Actor::owner("root").with_home_tenant("A");
        assert!(!is_visible(&owner, &Meeting::new("1", "A", "root"), None));
        assert!(!is_visible(&owner, &payment("p1", Some("A")), None));
        assert!(is_visible(&owner, &Meeting::new("1", "A", "u1"), Some("A")));
        assert!(!is_visible(&owner, &Meeting::new("2", "B", "u1"), Some("A")));
    }

    #[test]
    fn malformed_records_are_never_visible() {
        let owner = Actor::owner("root");
        let leader = Actor::leader("u7", "A");

        let mut orphan = Meeting::new("1", "A", "u7");
        orphan.tenant_id = None;
        assert!(!is_visible(&leader, &orphan, None));
        assert!(!is_visible(&owner, &orphan, Some("A")));
        let err = check_visibility(&leader, &orphan, None).expect_err("missing tenant");
        assert_eq!(err.missing, "tenant_id");

        let mut anonymous = Task::new("2", "A", "u7");
        anonymous.created_by = None;
        assert!(!is_visible(&Actor::admin("u1", "A"), &anonymous, None));
        let err = check_visibility(&leader, &anonymous, None).expect_err("missing author");
        assert_eq!(err.missing, "created_by");

        assert!(!is_visible(&Actor::admin("u1", "A"), &payment("p1", None), None));
    }

    #[test]
    fn filter_is_stable_and_idempotent() {
        let admin = Actor::admin("u1", "A");
        let meetings = vec![
            Meeting::new("3", "A", "u2"),
            Meeting::new("1", "B", "u1"),
            Meeting::new("2", "A", "u1"),
            Meeting::new("4", "A", "u3"),
        ];

        let once = filter_visible(&admin, meetings, None);
        let ids: Vec<_> = once.iter().map(|meeting| meeting.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "4"]);

        let twice = filter_visible(&admin, once.clone(), None);
        assert_eq!(twice, once);
    }
}
