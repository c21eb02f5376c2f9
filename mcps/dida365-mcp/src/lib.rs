//! Dida365 MCP Library
//!
//! MCP-compatible tools for Dida365 (TickTick CN) built on `dida365-core`.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use dida365_core::Config;
//! use dida365_mcp::Dida365McpServer;
//!
//! let server = Dida365McpServer::new(Config::load()?)?;
//! // Use with in-memory transport or serve via stdio
//! ```
//!
//! # Features
//! - Auth: OAuth login/callback, cookie token, status, logout
//! - Projects & tasks: list, get, create, update, complete, delete
//! - Sync: full snapshot, settings, task lookup by id
//! - Completed tasks: by date, range, today, yesterday, this week
//! - Tags: list, create, rename, update, merge, delete
//! - Batch: move, subtask, bulk complete/delete, projects, folders
//! - Eisenhower quadrants

pub mod handlers;
pub mod init;
pub mod params;
pub mod result;
pub mod server;

// Re-export main server type
pub use server::Dida365McpServer;

// Re-export parameter types for direct API usage
pub use params::*;
