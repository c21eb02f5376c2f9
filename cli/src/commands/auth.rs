use anyhow::Result;
use chrono::DateTime;
use dida365_core::{oauth, Backend};

use super::App;
use crate::args::AuthCommands;

pub async fn run(app: &App, cmd: AuthCommands) -> Result<()> {
    let store = app.client.credential_store();

    match cmd {
        AuthCommands::Login => {
            let url = oauth::build_auth_url(&app.config.oauth, &oauth::new_state())?;
            println!("Open this URL in your browser to authorize:\n");
            println!("{}\n", url);
            println!("Then run: dida365 auth callback <code>");
        }
        AuthCommands::Callback { code } => {
            let token = oauth::exchange_code(&app.config.oauth, code.trim()).await?;
            store.save(&token.access_token)?;
            app.out.message("Authentication successful. Token saved.")?;
        }
        AuthCommands::Cookie { token } => {
            let token = token.trim();
            Backend::Private.check_secret(token)?;
            store.save(token)?;
            app.out.message(format!("Cookie token saved to {}.", store.path().display()))?;
        }
        AuthCommands::Status => match store.load() {
            Some(credential) => {
                let saved = DateTime::from_timestamp_millis(credential.saved_at)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "unknown".to_string());
                app.out.message(format!(
                    "Authenticated (token saved {} in {}).",
                    saved,
                    store.path().display()
                ))?;
            }
            None => app.out.message("Not authenticated.")?,
        },
        AuthCommands::Logout => {
            store.clear();
            app.out.message("Logged out.")?;
        }
    }

    Ok(())
}
