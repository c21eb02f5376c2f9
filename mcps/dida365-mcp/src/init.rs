//! Tracing setup
//!
//! Logs go to stderr; stdout carries the MCP protocol. `RUST_LOG` replaces
//! the default filter and `LOG_FORMAT=json` switches to JSON lines.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_DIRECTIVES: &[&str] = &["dida365_mcp=info", "dida365_core=info"];

/// Build a filter from explicit directives, failing on the first bad one
pub fn filter_from(directives: &[&str]) -> anyhow::Result<EnvFilter> {
    directives
        .iter()
        .try_fold(EnvFilter::default(), |filter, directive| {
            Ok(filter.add_directive(directive.parse()?))
        })
}

pub fn init_tracing(directives: &[&str]) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_from(directives)?,
    };
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
