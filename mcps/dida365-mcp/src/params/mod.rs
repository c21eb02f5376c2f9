//! Parameter types for Dida365 MCP tools

mod batch;
mod completed;
mod tag;
mod task;

pub use batch::*;
pub use completed::*;
pub use tag::*;
pub use task::*;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Empty parameters for tools that take no arguments
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EmptyParams {}

/// What the auth tool should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthAction {
    /// Produce the OAuth URL to open in a browser
    Login,
    /// Exchange an authorization code for a token
    Callback,
    /// Save a web session cookie token
    Cookie,
    /// Report whether a credential is saved
    Status,
    /// Forget the saved credential
    Logout,
}

/// Parameters for the auth tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AuthParams {
    #[schemars(description = "login: auth URL; callback: exchange code; cookie: save cookie token; status: check; logout: forget token")]
    pub action: AuthAction,

    #[schemars(description = "Authorization code from the redirect URL (action='callback')")]
    pub code: Option<String>,

    #[schemars(description = "Value of the 't' cookie from a logged-in dida365.com session (action='cookie')")]
    pub token: Option<String>,
}

/// Parameters naming one project
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ProjectIdParams {
    #[schemars(description = "The project ID")]
    pub project_id: String,
}

/// Parameters for the Eisenhower-matrix listing
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct QuadrantParams {
    #[schemars(description = "Only this quadrant: Q1, Q2, Q3 or Q4 (case-insensitive). Omit for all four")]
    pub quadrant: Option<String>,
}
