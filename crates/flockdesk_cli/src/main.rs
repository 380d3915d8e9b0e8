//! Console CLI over a JSON snapshot.
//!
//! # Responsibility
//! - Open a console session from a saved snapshot and session file.
//! - Print the visible, searched records for one list view.

use clap::{Parser, ValueEnum};
use flockdesk_core::{ConsoleConfig, ConsoleService, InMemorySessionStore, SnapshotApi};
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "flockdesk")]
#[command(about = "List visible church console records from a JSON snapshot")]
struct Cli {
    /// Snapshot document (`churches`, `people`, `meetings`, `tasks`, `users`, `payments`)
    snapshot: PathBuf,

    /// Session file: flat JSON object of session keys
    session: PathBuf,

    /// List to print
    #[arg(value_enum, default_value_t = View::Meetings)]
    view: View,

    /// Free-text search; words are joined with single spaces
    query: Vec<String>,

    /// Tenant to scope an Owner session to
    #[arg(long)]
    scope: Option<String>,

    /// Logging config (`log_level`, `log_dir`)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Meetings,
    Tasks,
    People,
    Payments,
}

impl View {
    fn as_str(self) -> &'static str {
        match self {
            Self::Meetings => "meetings",
            Self::Tasks => "tasks",
            Self::People => "people",
            Self::Payments => "payments",
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let query = cli.query.join(" ");
    let config = match &cli.config {
        Some(path) => ConsoleConfig::from_path(path)?,
        None => ConsoleConfig::default(),
    };
    config.init_logging()?;

    let api = SnapshotApi::from_path(&cli.snapshot)?;
    let session = InMemorySessionStore::from_json(&std::fs::read_to_string(&cli.session)?)?;
    let mut console = ConsoleService::from_session(api, &session)?;
    if let Some(scope) = &cli.scope {
        console.select_scope(scope)?;
    }
    info!(
        "event=cli_list module=cli status=start view={} query_len={}",
        cli.view.as_str(),
        query.len()
    );

    match cli.view {
        View::Meetings => {
            let maps = console.reference_maps();
            for meeting in console.meetings(&query)? {
                let attendees: Vec<_> = meeting
                    .attendees
                    .iter()
                    .map(|id| maps.person.label(id).into_owned())
                    .collect();
                println!(
                    "{}\t{} {}\t{}\t{}",
                    meeting.id,
                    meeting.date,
                    meeting.time,
                    meeting.name,
                    attendees.join(", ")
                );
            }
        }
        View::Tasks => {
            for task in console.tasks(&query)? {
                let priority = task.priority.map_or("-", |priority| priority.as_str());
                println!(
                    "{}\t{}\t{}\t{}",
                    task.id, task.end_date, priority, task.task_name
                );
            }
        }
        View::People => {
            for person in console.people(&query)? {
                println!("{}\t{}\t{}", person.id, person.name, person.email);
            }
        }
        View::Payments => {
            for payment in console.payments()? {
                println!(
                    "{}\t{}\t{:.2}\t{}",
                    payment.payment_id, payment.date, payment.amount, payment.email
                );
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_list module=cli status=error error={err}");
            eprintln!("flockdesk: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, View};
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn parses_view_query_and_scope() {
        let cli = Cli::try_parse_from([
            "flockdesk",
            "snap.json",
            "session.json",
            "tasks",
            "order",
            "hymnals",
            "--scope",
            "2",
        ])
        .expect("valid args");
        assert_eq!(cli.snapshot, Path::new("snap.json"));
        assert_eq!(cli.view, View::Tasks);
        assert_eq!(cli.query.join(" "), "order hymnals");
        assert_eq!(cli.scope.as_deref(), Some("2"));
        assert_eq!(cli.config, None);
    }

    #[test]
    fn defaults_to_meetings_and_requires_two_paths() {
        let cli = Cli::try_parse_from(["flockdesk", "snap.json", "session.json"])
            .expect("valid args");
        assert_eq!(cli.view, View::Meetings);
        assert!(cli.query.is_empty());

        assert!(Cli::try_parse_from(["flockdesk", "snap.json"]).is_err());
        assert!(Cli::try_parse_from(["flockdesk", "a", "b", "--scope"]).is_err());
        assert!(Cli::try_parse_from(["flockdesk", "a", "b", "sermons"]).is_err());
    }
}
