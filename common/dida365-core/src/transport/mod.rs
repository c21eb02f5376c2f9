//! Authenticated HTTP transport for both Dida365 API surfaces
//!
//! A request names the [`Backend`] it targets; the backend decides the base
//! URL, the credential check and the auth headers. Every call is a single
//! attempt: load credential, send, map non-2xx to [`Dida365Error::Upstream`].

pub mod device;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, COOKIE, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument};
use url::Url;

use crate::config::ApiConfig;
use crate::credential::CredentialStore;
use crate::error::{Dida365Error, Result};

/// Which API surface a request goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Documented open API, OAuth bearer auth
    Official,
    /// Undocumented web-client API, cookie auth plus browser headers
    Private,
}

impl Backend {
    pub fn name(self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Private => "private",
        }
    }

    fn base_url(self, config: &ApiConfig) -> &str {
        match self {
            Self::Official => &config.official_base_url,
            Self::Private => &config.private_base_url,
        }
    }

    /// Reject secrets this backend cannot use
    ///
    /// The cookie path breaks on anything but hex tokens, so private calls
    /// refuse them up front.
    pub fn check_secret(self, secret: &str) -> Result<()> {
        match self {
            Self::Official => Ok(()),
            Self::Private => {
                if !secret.is_empty() && secret.chars().all(|c| c.is_ascii_hexdigit()) {
                    Ok(())
                } else {
                    Err(Dida365Error::InvalidCredential(
                        "token must contain only hex characters".to_string(),
                    ))
                }
            }
        }
    }

    /// Auth and identification headers for one call
    pub fn headers(self, secret: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        match self {
            Self::Official => {
                headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", secret))?);
            }
            Self::Private => {
                headers.insert(COOKIE, header_value(&format!("t={}", secret))?);
                headers.insert(USER_AGENT, HeaderValue::from_static(device::PRIVATE_USER_AGENT));
                headers.insert(
                    HeaderName::from_static(device::DEVICE_HEADER),
                    header_value(device::device_header_value())?,
                );
            }
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        Dida365Error::InvalidCredential("token contains characters not allowed in a header".to_string())
    })
}

/// One call against one backend
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub backend: Backend,
    pub method: Method,
    /// Path relative to the backend base, starting with '/'
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(backend: Backend, method: Method, path: impl Into<String>) -> Self {
        Self {
            backend,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::GET, path)
    }

    pub fn post(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::POST, path)
    }

    pub fn put(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::PUT, path)
    }

    pub fn delete(backend: Backend, path: impl Into<String>) -> Self {
        Self::new(backend, Method::DELETE, path)
    }

    /// Append a query parameter; repeated keys are kept in order
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Absolute URL against the configured base
    pub fn url(&self, config: &ApiConfig) -> Result<Url> {
        let base = self.backend.base_url(config).trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, self.path))?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Path plus encoded query string, as reported in errors and logs
    pub fn display_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{}", self.path, query)
    }
}

/// Join `segments` into an absolute path, percent-encoding each one
///
/// Ids that would collapse or vanish as segments (empty, `.`, `..`) are
/// rejected so a request never lands on another route.
pub fn encode_path(segments: &[&str]) -> Result<String> {
    if let Some(bad) = segments
        .iter()
        .find(|s| matches!(**s, "" | "." | ".."))
    {
        return Err(Dida365Error::InvalidArgument(format!(
            "'{}' is not a valid path segment",
            bad
        )));
    }
    let mut scratch = Url::parse("http://localhost/")?;
    scratch
        .path_segments_mut()
        .map_err(|_| Dida365Error::InvalidArgument("URL cannot take path segments".to_string()))?
        .clear()
        .extend(segments);
    Ok(scratch.path().to_string())
}

/// HTTP client for Dida365
#[derive(Debug, Clone)]
pub struct Dida365Client {
    http: Client,
    config: ApiConfig,
    store: CredentialStore,
}

impl Dida365Client {
    pub fn new(config: ApiConfig, store: CredentialStore) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            config,
            store,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn credential_store(&self) -> &CredentialStore {
        &self.store
    }

    /// Perform `request` and decode the JSON response
    ///
    /// An empty 2xx body decodes to `T::default()`.
    #[instrument(skip(self, request), fields(backend = request.backend.name(), method = %request.method, path = %request.path))]
    pub async fn send<T>(&self, request: ApiRequest) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let credential = self.store.load().ok_or(Dida365Error::Unauthenticated)?;
        request.backend.check_secret(&credential.token)?;

        let headers = request.backend.headers(&credential.token)?;
        let url = request.url(&self.config)?;

        debug!("{} {}", request.method, request.display_path());

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Dida365 request failed");
            return Err(Dida365Error::Upstream {
                status: status.as_u16(),
                method: request.method.to_string(),
                path: request.display_path(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_private_rejects_non_hex() {
        assert!(matches!(
            Backend::Private.check_secret("not-hex!"),
            Err(Dida365Error::InvalidCredential(_))
        ));
        assert!(Backend::Private.check_secret("").is_err());
        assert!(Backend::Private.check_secret("DEADbeef0123").is_ok());
    }

    #[test]
    fn test_official_accepts_any_secret() {
        assert!(Backend::Official.check_secret("oauth-token.with_dots").is_ok());
    }

    #[test]
    fn test_private_headers() {
        let headers = Backend::Private.headers("abc123").unwrap();
        assert_eq!(headers[COOKIE], "t=abc123");
        assert_eq!(headers[USER_AGENT], device::PRIVATE_USER_AGENT);
        assert_eq!(headers[device::DEVICE_HEADER], device::device_header_value());
        assert!(!headers.contains_key(AUTHORIZATION));
    }

    #[test]
    fn test_official_headers() {
        let headers = Backend::Official.headers("tok").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer tok");
        assert!(!headers.contains_key(COOKIE));
        assert!(!headers.contains_key(device::DEVICE_HEADER));
    }

    #[test]
    fn test_header_rejects_control_characters() {
        assert!(matches!(
            Backend::Official.headers("bad\ntoken"),
            Err(Dida365Error::InvalidCredential(_))
        ));
    }

    #[test]
    fn test_url_joins_base_and_repeated_query() {
        let config = ApiConfig {
            private_base_url: "https://example.com/api/v2/".to_string(),
            official_base_url: "https://example.com".to_string(),
        };
        let request = ApiRequest::delete(Backend::Private, "/tag")
            .query("name", "work")
            .query("name", "home life");

        let url = request.url(&config).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/v2/tag?name=work&name=home+life"
        );
        assert_eq!(request.display_path(), "/tag?name=work&name=home+life");
    }

    #[test]
    fn test_official_url() {
        let config = ApiConfig::default();
        let request = ApiRequest::get(Backend::Official, "/open/v1/project");
        assert_eq!(
            request.url(&config).unwrap().as_str(),
            "https://api.dida365.com/open/v1/project"
        );
        assert_eq!(request.display_path(), "/open/v1/project");
    }

    #[test]
    fn test_encode_path_keeps_ids_in_one_segment() {
        assert_eq!(
            encode_path(&["open", "v1", "project", "a/b?c#d", "task"]).unwrap(),
            "/open/v1/project/a%2Fb%3Fc%23d/task"
        );
        assert_eq!(encode_path(&["open", "v1", "task", "t1"]).unwrap(), "/open/v1/task/t1");
    }

    #[test]
    fn test_encode_path_rejects_dot_and_empty_segments() {
        for bad in ["", ".", ".."] {
            assert!(matches!(
                encode_path(&["open", "v1", "task", bad]),
                Err(Dida365Error::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_encoded_id_survives_url_join() {
        let path = encode_path(&["open", "v1", "project", "p/1", "task", "t?2"]).unwrap();
        let request = ApiRequest::get(Backend::Official, path);
        let url = request.url(&ApiConfig::default()).unwrap();
        assert_eq!(url.path(), "/open/v1/project/p%2F1/task/t%3F2");
        assert_eq!(url.query(), None);
    }
}
