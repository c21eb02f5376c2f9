//! Auth handler implementation

use chrono::DateTime;
use dida365_core::{oauth, Backend};
use rmcp::{model::CallToolResult, ErrorData as McpError};

use crate::params::{AuthAction, AuthParams};
use crate::result::{invalid_params, respond, text_success};

use super::Dida365Context;

pub async fn auth(ctx: &Dida365Context, params: AuthParams) -> Result<CallToolResult, McpError> {
    let store = ctx.credential_store();

    match params.action {
        AuthAction::Status => {
            let text = match store.load() {
                Some(credential) => {
                    let saved = DateTime::from_timestamp_millis(credential.saved_at)
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| "unknown".to_string());
                    format!("Authenticated. Token saved at {} ({}).", store.path().display(), saved)
                }
                None => "Not authenticated. Use action='cookie' with your session token, or action='login' to start the OAuth flow.".to_string(),
            };
            Ok(text_success(text))
        }

        AuthAction::Login => {
            let state = oauth::new_state();
            respond(oauth::build_auth_url(&ctx.config().oauth, &state), |url| {
                Ok(text_success(
                    [
                        "Please open this URL in your browser to authorize:",
                        "",
                        url.as_str(),
                        "",
                        "After authorizing, copy the 'code' parameter from the redirect URL",
                        "and call this tool again with action='callback' and the code.",
                    ]
                    .join("\n"),
                ))
            })
        }

        AuthAction::Callback => {
            let code = required(params.code, "'code' is required for action='callback'")?;
            let outcome = match oauth::exchange_code(&ctx.config().oauth, &code).await {
                Ok(token) => store.save(&token.access_token),
                Err(e) => Err(e),
            };
            respond(outcome, |_| {
                Ok(text_success(
                    "Authentication successful! Token has been saved. You can now use other Dida365 tools.",
                ))
            })
        }

        AuthAction::Cookie => {
            let token = required(params.token, "'token' is required for action='cookie'")?;
            let outcome = Backend::Private
                .check_secret(&token)
                .and_then(|_| store.save(&token));
            respond(outcome, |_| Ok(text_success("Cookie token saved.")))
        }

        AuthAction::Logout => {
            store.clear();
            Ok(text_success("Logged out. Saved token cleared."))
        }
    }
}

fn required(value: Option<String>, message: &str) -> Result<String, McpError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| invalid_params(message))
}
