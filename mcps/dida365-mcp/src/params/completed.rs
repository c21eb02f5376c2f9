//! Completed-task parameter types

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for a date or date-range query
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CompletedParams {
    #[schemars(description = "Single date in YYYY-MM-DD format (e.g., '2024-01-15')")]
    pub date: Option<String>,

    #[schemars(description = "Start date in YYYY-MM-DD format (e.g., '2024-01-01')")]
    pub start_date: Option<String>,

    #[schemars(description = "End date in YYYY-MM-DD format (e.g., '2024-01-31'), inclusive")]
    pub end_date: Option<String>,

    #[schemars(description = "Timezone (e.g., 'Asia/Shanghai'). Default: Asia/Shanghai")]
    pub timezone: Option<String>,
}

/// Parameters for the today/yesterday/this-week shortcuts
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TimezoneParams {
    #[schemars(description = "Timezone (e.g., 'Asia/Shanghai'). Default: Asia/Shanghai")]
    pub timezone: Option<String>,
}
