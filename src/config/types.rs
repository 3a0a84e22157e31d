use serde::{Deserialize, Serialize};
use url::Url;

use super::ConfigError;
use super::layout::default_fields;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
/// Environment variable that overrides `api.base_url`.
pub const API_BASE_ENV: &str = "LIFEPANEL_API_BASE";

/// Everything persisted in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelSettings {
    /// Prediction API connection settings.
    #[serde(default)]
    pub api: ApiSettings,
    /// Controls shown on the form.
    #[serde(default)]
    pub form: FormLayout,
}

/// Connection settings for the prediction API.
///
/// Config keys: `base_url`, `connect_timeout_secs`, `read_timeout_secs`,
/// `write_timeout_secs`, `max_response_bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Scheme, host and port of the prediction service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_io_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default = "default_io_timeout_secs")]
    pub write_timeout_secs: u64,
    /// Largest response body accepted from the API.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_io_timeout_secs(),
            write_timeout_secs: default_io_timeout_secs(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl ApiSettings {
    /// Settings pointing at `base_url` with default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Parse and validate the configured base URL.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(self.base_url.trim()).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        Ok(url)
    }
}

/// Ordered list of form controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormLayout {
    #[serde(default = "default_fields")]
    pub fields: Vec<FieldSpec>,
}

impl Default for FormLayout {
    fn default() -> Self {
        Self {
            fields: default_fields(),
        }
    }
}

/// One control bound to a payload column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Stable identifier (`countrySelect` and `yearInput` are required).
    pub id: String,
    /// Payload key the control feeds.
    pub column: String,
    /// Text shown next to the control.
    pub label: String,
    pub kind: FieldKind,
    /// Whether a suggested-range hint is shown under the control.
    #[serde(default)]
    pub hint: bool,
    /// Text restored when the form is reset.
    #[serde(default)]
    pub initial: String,
}

/// Control type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Drop-down with server-provided options.
    Select,
    /// Free text parsed as a number.
    Number,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_io_timeout_secs() -> u64 {
    30
}

fn default_max_response_bytes() -> usize {
    1024 * 1024
}
