//! Browser impersonation headers for the private API
//!
//! The web API only answers clients that look like the official web app, so
//! every private call carries a fixed user agent and an `x-device` descriptor.
//! The descriptor's id is generated once per process.

use serde::Serialize;
use std::sync::LazyLock;

/// User agent of the impersonated browser
pub const PRIVATE_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:95.0) Gecko/20100101 Firefox/95.0";

/// Header carrying the JSON device descriptor
pub const DEVICE_HEADER: &str = "x-device";

const DEVICE_ID_PREFIX: &str = "6490";
const DEVICE_ID_RANDOM_LEN: usize = 20;

/// Device descriptor as the web client sends it
#[derive(Debug, Clone, Serialize)]
pub struct DeviceDescriptor {
    pub platform: &'static str,
    pub os: &'static str,
    pub device: &'static str,
    pub name: &'static str,
    pub version: u32,
    pub id: String,
    pub channel: &'static str,
    pub campaign: &'static str,
    pub websocket: &'static str,
}

static DEVICE_ID: LazyLock<String> = LazyLock::new(|| {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", DEVICE_ID_PREFIX, &random[..DEVICE_ID_RANDOM_LEN])
});

static DEVICE_HEADER_VALUE: LazyLock<String> = LazyLock::new(|| {
    serde_json::to_string(&DeviceDescriptor::current()).unwrap_or_default()
});

impl DeviceDescriptor {
    /// Descriptor for this process
    pub fn current() -> Self {
        Self {
            platform: "web",
            os: "OS X",
            device: "Firefox 95.0",
            name: "dida365-tools",
            version: 4531,
            id: device_id().to_string(),
            channel: "website",
            campaign: "",
            websocket: "",
        }
    }
}

/// Per-process device identifier: "6490" followed by 20 hex characters
pub fn device_id() -> &'static str {
    &DEVICE_ID
}

/// JSON-encoded `x-device` header value
pub fn device_header_value() -> &'static str {
    &DEVICE_HEADER_VALUE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_id_shape() {
        let id = device_id();
        assert!(id.starts_with("6490"));
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_device_id_stable_within_process() {
        assert_eq!(device_id(), device_id());
        assert_eq!(DeviceDescriptor::current().id, device_id());
    }

    #[test]
    fn test_header_value_is_json_descriptor() {
        let value: serde_json::Value = serde_json::from_str(device_header_value()).unwrap();
        assert_eq!(value["platform"], "web");
        assert_eq!(value["version"], 4531);
        assert_eq!(value["id"], device_id());
        assert_eq!(value["campaign"], "");
    }
}
