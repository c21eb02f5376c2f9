//! OAuth authorization-code flow for the open API
//!
//! Only the two ends of the flow live here: the URL the user opens and the
//! code-for-token exchange. Browser interaction and the redirect listener are
//! the caller's business.

use serde::Deserialize;
use tracing::{error, info, instrument};
use url::Url;

use crate::config::OAuthConfig;
use crate::error::{Dida365Error, Result};

/// Scopes requested for the open API
pub const OAUTH_SCOPE: &str = "tasks:write tasks:read";

/// Token endpoint response (fields the tools use)
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Random value tying the callback to the request
pub fn new_state() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn ensure_configured(config: &OAuthConfig) -> Result<()> {
    if config.is_configured() {
        Ok(())
    } else {
        Err(Dida365Error::Config(
            "OAuth client id and secret are required (set DIDA365_CLIENT_ID and DIDA365_CLIENT_SECRET)"
                .to_string(),
        ))
    }
}

/// Authorization URL the user opens in a browser
pub fn build_auth_url(config: &OAuthConfig, state: &str) -> Result<Url> {
    ensure_configured(config)?;
    let mut url = Url::parse(&config.authorize_url)?;
    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("scope", OAUTH_SCOPE)
        .append_pair("state", state)
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("response_type", "code");
    Ok(url)
}

/// Trade an authorization code for an access token
#[instrument(skip_all)]
pub async fn exchange_code(config: &OAuthConfig, code: &str) -> Result<TokenResponse> {
    ensure_configured(config)?;

    let form = [
        ("code", code),
        ("grant_type", "authorization_code"),
        ("scope", OAUTH_SCOPE),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];

    let response = reqwest::Client::new()
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(status = status.as_u16(), "token exchange failed");
        return Err(Dida365Error::Upstream {
            status: status.as_u16(),
            method: "POST".to_string(),
            path: config.token_url.clone(),
            body,
        });
    }

    let token: TokenResponse = response.json().await?;
    info!("OAuth token obtained");
    Ok(token)
}
