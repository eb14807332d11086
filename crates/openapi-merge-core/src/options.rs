use serde::{Deserialize, Serialize};

/// Environment variable holding the default server URL.
pub const DEFAULT_SERVER_ENV: &str = "MERGE_DEFAULT_SERVER";

/// Fixed metadata written into every merged document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Value of the top-level `openapi` key.
    pub openapi_version: String,
    /// `info.title` of the merged document.
    pub title: String,
    /// `info.version` of the merged document.
    pub version: String,
    /// When set to a non-blank URL, the output gets a single `servers`
    /// entry pointing at it. Servers from inputs are never merged.
    pub default_server: Option<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            openapi_version: "3.0.3".into(),
            title: "FocusNest - All Services".into(),
            version: "1.0.0".into(),
            default_server: None,
        }
    }
}

impl MergeOptions {
    pub fn with_default_server(mut self, url: impl Into<String>) -> Self {
        self.default_server = Some(url.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The trimmed server URL, or `None` when unset or blank.
    pub fn server_url(&self) -> Option<&str> {
        self.default_server
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
