use flockdesk_core::{
    Actor, ChurchApi, RebuildOutcome, ReferenceMaps, SnapshotApi, TenantScopeSelector,
};
use serde_json::json;
use std::sync::mpsc;
use std::thread;

fn two_tenant_api() -> SnapshotApi {
    let document = json!({
        "people": [
            {"id": 1, "name": "Jane Doe", "church": "A"},
            {"id": 1, "name": "Omar Haddad", "church": "B"}
        ],
        "tasks": [
            {"id": 5, "church": "A", "created_by": "u1", "task_name": "Order hymnals"},
            {"id": 6, "church": "B", "created_by": "u1", "task_name": "Paint nursery"}
        ]
    });
    SnapshotApi::from_json(&document.to_string()).expect("fixture snapshot")
}

#[test]
fn out_of_order_rebuilds_keep_latest_selection() {
    let api = two_tenant_api();
    let mut selector = TenantScopeSelector::new(Actor::owner("root"));
    let first = selector.select_scope("A").expect("select A");
    let second = selector.select_scope("B").expect("select B");

    let (sender, receiver) = mpsc::channel();
    thread::scope(|scope| {
        for ticket in [second.clone(), first.clone()] {
            let sender = sender.clone();
            let api = &api;
            scope.spawn(move || {
                let maps = ReferenceMaps::load(api, ticket.tenant_id());
                sender.send((ticket, maps)).expect("send rebuilt maps");
            });
        }
    });
    drop(sender);

    let mut results: Vec<_> = receiver.iter().collect();
    // Apply the newer rebuild first so the stale one arrives last.
    results.sort_by_key(|(ticket, _)| std::cmp::Reverse(ticket.generation()));
    let outcomes: Vec<_> = results
        .into_iter()
        .map(|(ticket, maps)| selector.complete_rebuild(&ticket, maps))
        .collect();

    assert_eq!(outcomes, vec![RebuildOutcome::Applied, RebuildOutcome::Discarded]);
    let maps = selector.reference_maps();
    assert_eq!(maps.tenant_id(), Some("B"));
    assert_eq!(maps.person.resolve("1"), Some("Omar Haddad"));
    assert_eq!(maps.task.label("5"), "Unknown ID: 5");
    assert_eq!(maps.task.label("6"), "Paint nursery");
}

#[test]
fn consumers_keep_their_snapshot_across_scope_changes() {
    let api = two_tenant_api();
    let mut selector = TenantScopeSelector::new(Actor::owner("root"));
    selector.select_and_rebuild(&api, "A").expect("scope A");
    let held = selector.reference_maps();

    selector.select_and_rebuild(&api, "B").expect("scope B");
    assert_eq!(held.person.resolve("1"), Some("Jane Doe"));
    assert_eq!(selector.reference_maps().person.resolve("1"), Some("Omar Haddad"));
}

#[test]
fn non_owner_references_follow_own_tenant() {
    let api = two_tenant_api();
    let mut selector = TenantScopeSelector::new(Actor::leader("u1", "B"));
    assert_eq!(selector.refresh(&api), Some(RebuildOutcome::Applied));
    assert_eq!(selector.scope(), None);
    assert_eq!(selector.reference_maps().person.resolve("1"), Some("Omar Haddad"));
    assert_eq!(api.fetch_people("B").expect("people").len(), 1);
}
