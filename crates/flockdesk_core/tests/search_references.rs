use flockdesk_core::{
    build_person_map, matches, search_records, ApiError, ApiResult, ChurchApi, Meeting, Payment,
    Person, PersonMap, ReferenceMaps, Task, TaskMap, Tenant, UserAccount,
};
use std::cell::Cell;

/// API whose people/task endpoints fail; other collections are empty.
#[derive(Default)]
struct FailingReferencesApi {
    people_calls: Cell<u32>,
}

impl ChurchApi for FailingReferencesApi {
    fn fetch_meetings(&self) -> ApiResult<Vec<Meeting>> {
        Ok(Vec::new())
    }

    fn fetch_tasks(&self) -> ApiResult<Vec<Task>> {
        Err(ApiError::Unavailable {
            operation: "fetch_tasks",
            message: "connection reset".to_string(),
        })
    }

    fn fetch_people(&self, _tenant_id: &str) -> ApiResult<Vec<Person>> {
        self.people_calls.set(self.people_calls.get() + 1);
        Err(ApiError::Unavailable {
            operation: "fetch_people",
            message: "timeout".to_string(),
        })
    }

    fn fetch_tenants(&self) -> ApiResult<Vec<Tenant>> {
        Ok(Vec::new())
    }

    fn fetch_users(&self) -> ApiResult<Vec<UserAccount>> {
        Ok(Vec::new())
    }

    fn fetch_payments(&self) -> ApiResult<Vec<Payment>> {
        Ok(Vec::new())
    }
}

fn person(id: &str, name: &str) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{id}@grace.org"),
        tenant_id: Some("A".to_string()),
    }
}

fn jane_maps() -> ReferenceMaps {
    ReferenceMaps::new(
        "A",
        PersonMap::from_people("A", vec![person("12", "Jane Doe")]),
        TaskMap::default(),
    )
}

fn meeting_with_attendees() -> Meeting {
    let mut meeting = Meeting::new("1", "A", "u1");
    meeting.name = "Budget".to_string();
    meeting.attendees = vec!["12".to_string(), "99".to_string()];
    meeting
}

#[test]
fn scenario_resolved_names_match_but_ids_do_not() {
    let maps = jane_maps();
    let meeting = meeting_with_attendees();
    assert!(matches("jane", &meeting, &maps));
    assert!(!matches("99", &meeting, &maps));
}

#[test]
fn search_is_case_insensitive() {
    let maps = jane_maps();
    let meeting = meeting_with_attendees();
    assert_eq!(
        matches("JANE", &meeting, &maps),
        matches("jane", &meeting, &maps)
    );
    assert!(matches("bUdGeT", &meeting, &maps));
}

#[test]
fn unknown_placeholder_is_not_searchable() {
    let maps = jane_maps();
    let meeting = meeting_with_attendees();
    assert_eq!(maps.person.label("99"), "Unknown ID: 99");
    assert!(!matches("Unknown", &meeting, &maps));
    assert!(!matches("id: 99", &meeting, &maps));
}

#[test]
fn empty_query_returns_input_unchanged() {
    let maps = jane_maps();
    let meetings = vec![
        Meeting::new("3", "A", "u1"),
        Meeting::new("1", "A", "u1"),
        Meeting::new("2", "A", "u1"),
    ];
    let found = search_records("   ", meetings.clone(), &maps);
    assert_eq!(found, meetings);
}

#[test]
fn reference_fetch_failure_degrades_to_scalar_search() {
    let api = FailingReferencesApi::default();
    let err = build_person_map(&api, "A").expect_err("people fetch fails");
    assert_eq!(err.tenant_id, "A");

    let maps = ReferenceMaps::load(&api, "A");
    assert_eq!(maps.tenant_id(), Some("A"));
    assert!(maps.person.is_empty());
    assert!(maps.task.is_empty());
    assert_eq!(api.people_calls.get(), 2);

    let meeting = meeting_with_attendees();
    assert!(matches("budget", &meeting, &maps));
    assert!(!matches("jane", &meeting, &maps));
}
