//! Eisenhower-matrix view over a sync snapshot
//!
//! | priority | due date | quadrant |
//! |----------|----------|----------|
//! | 5        | any      | Q1       |
//! | 3        | present  | Q2       |
//! | 1        | present  | Q3       |
//! | other    | any      | Q4       |
//!
//! Only open tasks take part: completed tasks and tasks without a status are
//! left out of every bucket.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{Dida365Error, Result};
use crate::sync::{SyncService, SyncSnapshot};
use crate::types::{Priority, Task, STATUS_COMPLETED};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    pub fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Do First",
            Self::Q2 => "Schedule",
            Self::Q3 => "Delegate",
            Self::Q4 => "Eliminate",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Q1 => "important & urgent",
            Self::Q2 => "important, not urgent",
            Self::Q3 => "not important, urgent",
            Self::Q4 => "not important, not urgent",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        };
        f.write_str(name)
    }
}

impl FromStr for Quadrant {
    type Err = Dida365Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            _ => Err(Dida365Error::InvalidArgument(format!(
                "invalid quadrant '{s}', must be Q1, Q2, Q3 or Q4"
            ))),
        }
    }
}

/// Quadrant of a task, ignoring its status
pub fn classify(task: &Task) -> Quadrant {
    let due = task.has_due_date();
    match task.priority_level().unwrap_or(Priority::None) {
        Priority::High => Quadrant::Q1,
        Priority::Medium if due => Quadrant::Q2,
        Priority::Low if due => Quadrant::Q3,
        _ => Quadrant::Q4,
    }
}

/// Whether a task is placed in the matrix at all
pub fn is_open(task: &Task) -> bool {
    matches!(task.status, Some(status) if status != STATUS_COMPLETED)
}

/// Open tasks bucketed by quadrant; all four buckets are always present
pub fn group_by_quadrant<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> BTreeMap<Quadrant, Vec<Task>> {
    let mut buckets: BTreeMap<Quadrant, Vec<Task>> =
        Quadrant::ALL.iter().map(|&q| (q, Vec::new())).collect();
    for task in tasks.into_iter().filter(|t| is_open(t)) {
        buckets.entry(classify(task)).or_default().push(task.clone());
    }
    buckets
}

/// All four buckets plus project names for display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantListing {
    pub buckets: BTreeMap<Quadrant, Vec<Task>>,
    pub project_names: HashMap<String, String>,
}

impl QuadrantListing {
    pub fn from_snapshot(snapshot: &SyncSnapshot) -> Self {
        Self {
            buckets: group_by_quadrant(snapshot.tasks()),
            project_names: snapshot.project_names(),
        }
    }

    pub fn tasks(&self, quadrant: Quadrant) -> &[Task] {
        self.buckets.get(&quadrant).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Project name for display, falling back to the raw id
    pub fn project_name<'a>(&'a self, project_id: &'a str) -> &'a str {
        self.project_names
            .get(project_id)
            .map(String::as_str)
            .unwrap_or(project_id)
    }

    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone)]
pub struct QuadrantService {
    sync: SyncService,
}

impl QuadrantService {
    pub fn new(sync: SyncService) -> Self {
        Self { sync }
    }

    pub async fn list(&self) -> Result<QuadrantListing> {
        let snapshot = self.sync.full_sync().await?;
        Ok(QuadrantListing::from_snapshot(&snapshot))
    }

    /// Tasks of one quadrant; the name is checked before syncing
    pub async fn view(&self, quadrant: &str) -> Result<Vec<Task>> {
        let quadrant: Quadrant = quadrant.parse()?;
        let mut listing = self.list().await?;
        Ok(listing.buckets.remove(&quadrant).unwrap_or_default())
    }
}
