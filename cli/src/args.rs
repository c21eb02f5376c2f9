//! CLI argument definitions
//!
//! Contains the main CLI struct and one subcommand enum per command group.

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dida365")]
#[command(about = "Command-line client for Dida365 (TickTick CN)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print results as pretty JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save, check or forget the credential
    #[command(subcommand)]
    Auth(AuthCommands),
    /// Projects, read from a full sync (private API)
    #[command(subcommand)]
    Project(ProjectCommands),
    /// Single tasks
    #[command(subcommand)]
    Task(TaskCommands),
    /// Completed tasks by day, week or range
    #[command(subcommand)]
    Completed(CompletedCommands),
    /// Full-state sync and user settings
    #[command(subcommand)]
    Sync(SyncCommands),
    /// Tags
    #[command(subcommand)]
    Tag(TagCommands),
    /// Bulk mutations through the batch endpoints
    #[command(subcommand)]
    Batch(BatchCommands),
    /// Eisenhower matrix of open tasks
    #[command(subcommand)]
    Quadrant(QuadrantCommands),
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Print the OAuth authorization URL
    Login,
    /// Exchange the code from the OAuth redirect for a token
    Callback {
        /// Value of the `code` parameter in the redirect URL
        code: String,
    },
    /// Save the `t` cookie of a logged-in web session
    Cookie {
        /// Hexadecimal session token
        token: String,
    },
    /// Show whether a credential is saved
    Status,
    /// Forget the saved credential
    Logout,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List all projects
    List,
    /// Show one project and its open tasks
    Show {
        /// Project ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a task
    Create {
        /// Task title
        title: String,
        /// Project to create it in (default: inbox)
        #[arg(long, short)]
        project: Option<String>,
        /// Body text
        #[arg(long)]
        content: Option<String>,
        /// none, low, medium, high (or 0/1/3/5)
        #[arg(long)]
        priority: Option<String>,
        /// Due date, e.g. 2024-01-15T09:00:00+0800
        #[arg(long)]
        due: Option<String>,
        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Show one task
    Show {
        /// Project ID
        project_id: String,
        /// Task ID
        task_id: String,
    },
    /// Mark a task complete
    Complete {
        /// Project ID
        project_id: String,
        /// Task ID
        task_id: String,
    },
    /// Delete a task
    Delete {
        /// Project ID
        project_id: String,
        /// Task ID
        task_id: String,
    },
    /// Find a task by ID without knowing its project
    Find {
        /// Task ID
        task_id: String,
    },
}

/// Timezone shared by the completed-task queries
#[derive(Args, Debug, Clone, Default)]
pub struct TimezoneArg {
    /// IANA timezone name (default: Asia/Shanghai)
    #[arg(long, short = 'z')]
    pub timezone: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CompletedCommands {
    /// Tasks completed today
    Today(TimezoneArg),
    /// Tasks completed yesterday
    Yesterday(TimezoneArg),
    /// Tasks completed this week (Sunday to Saturday)
    Week(TimezoneArg),
    /// Tasks completed on one day
    Date {
        /// YYYY-MM-DD
        date: String,
        #[command(flatten)]
        tz: TimezoneArg,
    },
    /// Tasks completed between two days, inclusive
    Range {
        /// First day, YYYY-MM-DD
        start: String,
        /// Last day, YYYY-MM-DD
        end: String,
        #[command(flatten)]
        tz: TimezoneArg,
    },
}

#[derive(Subcommand, Debug)]
pub enum SyncCommands {
    /// Summary of everything in the account
    All,
    /// User settings
    Settings,
    /// The account's timezone
    Timezone,
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List tags
    List,
    /// Create a tag
    Create {
        name: String,
        /// Hex colour, e.g. #FF0000
        #[arg(long)]
        color: Option<String>,
        /// Parent tag name
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename a tag
    Rename { old_name: String, new_name: String },
    /// Set a tag's colour
    Color { name: String, color: String },
    /// Nest a tag under a parent; omit the parent to un-nest
    Nest {
        name: String,
        parent: Option<String>,
    },
    /// Merge one tag into another
    Merge { from: String, to: String },
    /// Delete one or more tags
    Delete {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BatchCommands {
    /// Move a task to another project
    MoveTask {
        task_id: String,
        from_project: String,
        to_project: String,
    },
    /// Make a task the subtask of another
    SetSubtask {
        task_id: String,
        parent_id: String,
        project_id: String,
    },
    /// Complete several tasks of one project
    CompleteTasks {
        /// Project ID
        project_id: String,
        #[arg(required = true)]
        task_ids: Vec<String>,
    },
    /// Delete several tasks of one project
    DeleteTasks {
        /// Project ID
        project_id: String,
        #[arg(required = true)]
        task_ids: Vec<String>,
    },
    /// Create a project
    CreateProject {
        name: String,
        #[arg(long)]
        color: Option<String>,
        /// Folder to place it in
        #[arg(long)]
        group: Option<String>,
    },
    /// Delete projects
    DeleteProjects {
        #[arg(required = true)]
        project_ids: Vec<String>,
    },
    /// Create a project folder
    CreateFolder { name: String },
    /// Delete project folders
    DeleteFolders {
        #[arg(required = true)]
        group_ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuadrantCommands {
    /// All four quadrants
    List,
    /// One quadrant: Q1, Q2, Q3 or Q4
    View { quadrant: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["dida365", "tag", "list", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Tag(TagCommands::List)));
    }

    #[test]
    fn test_completed_range_with_timezone() {
        let cli = Cli::try_parse_from([
            "dida365",
            "completed",
            "range",
            "2024-01-01",
            "2024-01-31",
            "--timezone",
            "UTC",
        ])
        .unwrap();
        match cli.command {
            Commands::Completed(CompletedCommands::Range { start, end, tz }) => {
                assert_eq!(start, "2024-01-01");
                assert_eq!(end, "2024-01-31");
                assert_eq!(tz.timezone.as_deref(), Some("UTC"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_tag_nest_parent_is_optional() {
        let cli = Cli::try_parse_from(["dida365", "tag", "nest", "child"]).unwrap();
        match cli.command {
            Commands::Tag(TagCommands::Nest { name, parent }) => {
                assert_eq!(name, "child");
                assert!(parent.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_batch_lists_require_an_item() {
        assert!(Cli::try_parse_from(["dida365", "batch", "complete-tasks", "p1"]).is_err());
        assert!(Cli::try_parse_from(["dida365", "tag", "delete"]).is_err());

        let cli =
            Cli::try_parse_from(["dida365", "batch", "complete-tasks", "p1", "t1", "t2"]).unwrap();
        match cli.command {
            Commands::Batch(BatchCommands::CompleteTasks {
                project_id,
                task_ids,
            }) => {
                assert_eq!(project_id, "p1");
                assert_eq!(task_ids, vec!["t1", "t2"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_repeatable_tag_option() {
        let cli = Cli::try_parse_from([
            "dida365", "task", "create", "Buy milk", "--tag", "home", "--tag", "errand",
        ])
        .unwrap();
        match cli.command {
            Commands::Task(TaskCommands::Create { title, tags, project, .. }) => {
                assert_eq!(title, "Buy milk");
                assert_eq!(tags, vec!["home", "errand"]);
                assert!(project.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["dida365", "-vv", "sync", "all"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
