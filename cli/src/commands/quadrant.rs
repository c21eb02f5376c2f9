use anyhow::Result;
use dida365_core::{Quadrant, QuadrantListing, QuadrantService, SyncService};
use serde::Serialize;
use std::collections::BTreeMap;

use super::App;
use crate::args::QuadrantCommands;
use crate::output::task_line;

#[derive(Debug, Serialize)]
struct Bucket<'a> {
    label: &'static str,
    count: usize,
    tasks: &'a [dida365_core::types::Task],
}

fn render(listing: &QuadrantListing, quadrants: &[Quadrant]) -> String {
    let mut sections = Vec::new();
    for &q in quadrants {
        let tasks = listing.tasks(q);
        let mut lines = vec![format!("{} {} ({}): {}", q, q.label(), tasks.len(), q.description())];
        lines.extend(tasks.iter().map(|t| {
            format!("  {}  [{}]", task_line(t), listing.project_name(&t.project_id))
        }));
        sections.push(lines.join("\n"));
    }
    sections.join("\n\n")
}

fn buckets<'a>(listing: &'a QuadrantListing, quadrants: &[Quadrant]) -> BTreeMap<String, Bucket<'a>> {
    quadrants
        .iter()
        .map(|&q| {
            let tasks = listing.tasks(q);
            (
                q.to_string(),
                Bucket {
                    label: q.label(),
                    count: tasks.len(),
                    tasks,
                },
            )
        })
        .collect()
}

pub async fn run(app: &App, cmd: QuadrantCommands) -> Result<()> {
    let selected = match &cmd {
        QuadrantCommands::List => Quadrant::ALL.to_vec(),
        QuadrantCommands::View { quadrant } => vec![quadrant.parse::<Quadrant>()?],
    };

    let listing = QuadrantService::new(SyncService::new(app.client.clone()))
        .list()
        .await?;
    app.out
        .show(&buckets(&listing, &selected), |_| render(&listing, &selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dida365_core::types::{Project, Task};
    use dida365_core::SyncSnapshot;

    fn listing() -> QuadrantListing {
        let urgent = Task {
            id: "t1".to_string(),
            priority: Some(5),
            status: Some(0),
            ..Task::new("Urgent", "p1")
        };
        let later = Task {
            id: "t2".to_string(),
            priority: Some(0),
            status: Some(0),
            ..Task::new("Later", "p9")
        };
        let snapshot = SyncSnapshot::new(
            vec![urgent, later],
            vec![Project {
                id: "p1".to_string(),
                ..Project::new("Work")
            }],
            vec![],
            vec![],
            None,
        );
        QuadrantListing::from_snapshot(&snapshot)
    }

    #[test]
    fn test_render_single_quadrant_names_project() {
        let text = render(&listing(), &[Quadrant::Q1]);
        assert!(text.starts_with("Q1 Do First (1): "));
        assert!(text.ends_with("  [ ] Urgent (t1) !high  [Work]"));
    }

    #[test]
    fn test_unknown_project_falls_back_to_id() {
        let text = render(&listing(), &[Quadrant::Q4]);
        assert!(text.ends_with("[p9]"));
    }

    #[test]
    fn test_buckets_keep_requested_quadrants() {
        let listing = listing();
        let all = buckets(&listing, &Quadrant::ALL);
        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["Q1", "Q2", "Q3", "Q4"]);
        assert_eq!(all["Q4"].count, 1);
    }
}
