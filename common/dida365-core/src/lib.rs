//! Dida365 (TickTick CN) client core
//!
//! Layers, leaf first:
//!
//! - [`credential`]: the single persisted secret
//! - [`transport`]: authenticated calls against the official and private APIs
//! - [`sync`]: full-state snapshots and lookups over them
//! - [`batch`]: add/update/delete envelopes for tasks, projects, folders and tags
//! - [`completed`], [`quadrant`]: derived views
//! - [`open_api`], [`oauth`]: the documented API and its token exchange
//!
//! # Example
//!
//! ```rust,no_run
//! use dida365_core::{Config, SyncService};
//!
//! # async fn run() -> dida365_core::Result<()> {
//! let client = Config::load()?.client()?;
//! let snapshot = SyncService::new(client).full_sync().await?;
//! println!("{} tasks", snapshot.tasks().len());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod completed;
pub mod config;
pub mod credential;
pub mod error;
pub mod oauth;
pub mod open_api;
pub mod quadrant;
pub mod sync;
pub mod transport;
pub mod types;

pub use batch::{BatchResponse, BatchService, TagService};
pub use completed::CompletedService;
pub use config::Config;
pub use credential::{Credential, CredentialStore};
pub use error::{Dida365Error, Result};
pub use open_api::OpenApiService;
pub use quadrant::{Quadrant, QuadrantListing, QuadrantService};
pub use sync::{ProjectWithTasks, SyncService, SyncSnapshot};
pub use transport::{ApiRequest, Backend, Dida365Client};
