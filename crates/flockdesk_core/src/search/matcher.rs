//! Per-field substring matcher.

use crate::model::meeting::Meeting;
use crate::model::task::{Task, TaskPriority};
use crate::model::tenant::Person;
use crate::reference::resolver::ReferenceMaps;
use log::debug;

/// Normalized free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    normalized: String,
}

impl SearchQuery {
    /// Trims and lower-cases `text`. No tokenization is applied.
    pub fn new(text: &str) -> Self {
        Self {
            normalized: text.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Returns whether any searchable field of `record` contains the query.
    pub fn matches<R: Searchable + ?Sized>(&self, record: &R, maps: &ReferenceMaps) -> bool {
        if self.is_empty() {
            return true;
        }
        record
            .search_fields(maps)
            .into_iter()
            .any(|field| field.to_lowercase().contains(self.normalized.as_str()))
    }
}

/// Record that exposes a search surface.
///
/// Each entry is matched on its own, so a query never spans two fields.
pub trait Searchable {
    fn search_fields<'a>(&'a self, maps: &'a ReferenceMaps) -> Vec<&'a str>;
}

/// Matches one record against raw query text.
pub fn matches<R: Searchable + ?Sized>(query: &str, record: &R, maps: &ReferenceMaps) -> bool {
    SearchQuery::new(query).matches(record, maps)
}

/// Keeps records matching `query`, preserving input order.
pub fn search_records<R: Searchable>(
    query: &str,
    mut records: Vec<R>,
    maps: &ReferenceMaps,
) -> Vec<R> {
    let query = SearchQuery::new(query);
    if query.is_empty() {
        return records;
    }
    let total = records.len();
    records.retain(|record| query.matches(record, maps));
    debug!(
        "event=search module=search status=ok query_len={} total={} matched={}",
        query.as_str().chars().count(),
        total,
        records.len()
    );
    records
}

impl Searchable for Meeting {
    fn search_fields<'a>(&'a self, maps: &'a ReferenceMaps) -> Vec<&'a str> {
        let mut fields = vec![
            self.name.as_str(),
            self.kind.as_str(),
            self.date.as_str(),
            self.time.as_str(),
            self.action_steps.as_str(),
            self.questions.as_str(),
        ];
        fields.extend(
            [&self.notes, &self.agenda, &self.objective]
                .into_iter()
                .filter_map(|value| value.as_deref()),
        );
        fields.extend(
            self.attendees
                .iter()
                .filter_map(|id| maps.person.resolve(id)),
        );
        for task in self.meeting_tasks.iter().filter_map(|id| maps.task.resolve(id)) {
            fields.push(task.task_name.as_str());
            if let Some(priority) = task.priority {
                fields.push(priority.as_str());
            }
        }
        fields
    }
}

impl Searchable for Task {
    fn search_fields<'a>(&'a self, maps: &'a ReferenceMaps) -> Vec<&'a str> {
        let mut fields = vec![self.task_name.as_str(), self.description.as_str()];
        if let Some(priority) = self.priority {
            fields.push(TaskPriority::as_str(priority));
        }
        fields.extend(
            self.employees
                .iter()
                .filter_map(|id| maps.person.resolve(id)),
        );
        fields
    }
}

impl Searchable for Person {
    fn search_fields<'a>(&'a self, _maps: &'a ReferenceMaps) -> Vec<&'a str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

#[cfg(test)]
mod tests {
    use super::{matches, search_records, SearchQuery};
    use crate::model::meeting::Meeting;
    use crate::model::task::{Task, TaskPriority};
    use crate::model::tenant::Person;
    use crate::reference::resolver::{PersonMap, ReferenceMaps, TaskMap};

    fn maps() -> ReferenceMaps {
        let people = vec![Person {
            id: "12".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@grace.org".to_string(),
            tenant_id: Some("A".to_string()),
        }];
        let mut task = Task::new("5", "A", "u1");
        task.task_name = "Order hymnals".to_string();
        task.priority = Some(TaskPriority::High);
        ReferenceMaps::new(
            "A",
            PersonMap::from_people("A", people),
            TaskMap::from_tasks("A", vec![task]),
        )
    }

    fn meeting() -> Meeting {
        let mut meeting = Meeting::new("1", "A", "u1");
        meeting.name = "Elder board".to_string();
        meeting.kind = "Planning".to_string();
        meeting.date = "2024-03-10".to_string();
        meeting.time = "18:30".to_string();
        meeting.attendees = vec!["12".to_string(), "99".to_string()];
        meeting.meeting_tasks = vec!["5".to_string(), "77".to_string()];
        meeting
    }

    #[test]
    fn query_is_trimmed_and_lowercased() {
        assert_eq!(SearchQuery::new("  JoHN ").as_str(), "john");
        assert!(SearchQuery::new("   ").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches("", &Meeting::new("1", "A", "u1"), &ReferenceMaps::default()));
        assert!(matches("  ", &Task::new("1", "A", "u1"), &ReferenceMaps::default()));
    }

    #[test]
    fn resolved_attendee_names_are_searchable() {
        let maps = maps();
        assert!(matches("jane", &meeting(), &maps));
        assert!(matches("JANE", &meeting(), &maps));
        assert!(!matches("99", &meeting(), &maps));
        assert!(!matches("12", &meeting(), &maps));
    }

    #[test]
    fn unresolved_placeholder_text_never_matches() {
        let maps = maps();
        assert!(!matches("unknown", &meeting(), &maps));
        assert!(!matches("Unknown ID", &meeting(), &maps));
    }

    #[test]
    fn meeting_tasks_match_by_name_and_priority() {
        let maps = maps();
        assert!(matches("hymnals", &meeting(), &maps));
        assert!(matches("high", &meeting(), &maps));
    }

    #[test]
    fn query_never_spans_field_boundaries() {
        let maps = maps();
        assert!(matches("board", &meeting(), &maps));
        assert!(!matches("board planning", &meeting(), &maps));
        assert!(!matches("board plan", &meeting(), &maps));
    }

    #[test]
    fn optional_meeting_fields_are_searchable() {
        let mut meeting = meeting();
        meeting.agenda = Some("Budget review".to_string());
        meeting.objective = Some("Approve mission trip".to_string());
        let maps = ReferenceMaps::default();
        assert!(matches("budget", &meeting, &maps));
        assert!(matches("mission", &meeting, &maps));
        assert!(!matches("potluck", &meeting, &maps));
    }

    #[test]
    fn task_employees_and_priority_are_searchable() {
        let maps = maps();
        let mut task = Task::new("8", "A", "u1");
        task.task_name = "Clean kitchen".to_string();
        task.priority = Some(TaskPriority::Low);
        task.employees = vec!["12".to_string()];
        assert!(matches("doe", &task, &maps));
        assert!(matches("low", &task, &maps));
        assert!(matches("kitchen", &task, &maps));
        assert!(!matches("medium", &task, &maps));
    }

    #[test]
    fn search_records_preserves_order() {
        let maps = maps();
        let mut first = Meeting::new("1", "A", "u1");
        first.name = "Youth night".to_string();
        let mut second = Meeting::new("2", "A", "u1");
        second.name = "Choir".to_string();
        let mut third = Meeting::new("3", "A", "u1");
        third.name = "Youth retreat".to_string();

        let found = search_records("youth", vec![first, second, third], &maps);
        let ids: Vec<_> = found.iter().map(|meeting| meeting.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
