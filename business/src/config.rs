use std::env::vars;
use std::path::PathBuf;

use serde::Deserialize;
use ustr::Ustr;

/// Page size used when neither the caller nor the environment sets one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct BusinessConfig {
    pub api_base_url: String,
    /// Rows per page for tables that do not override it.
    pub page_size: usize,
    /// Directory spreadsheet exports are written to.
    pub export_dir: PathBuf,
    /// Bearer token handed to the initial [`crate::Session`], if any.
    pub api_token: Option<String>,
}

// Intermediate struct for deserializing environment variables; every field is optional.
#[derive(Debug, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    page_size: Option<usize>,
    export_dir: Option<PathBuf>,
    api_token: Option<String>,
}

impl BusinessConfig {
    pub fn new(base_url: String) -> Self {
        Self {
            api_base_url: base_url,
            ..Self::default()
        }
    }

    /// Read `API_BASE_URL`, `PAGE_SIZE`, `EXPORT_DIR` and `API_TOKEN` from the
    /// environment, falling back to defaults for unset values.
    pub fn init() -> anyhow::Result<Self> {
        log::info!("Loading configuration from environment variables");
        let raw: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            api_base_url,
            page_size,
            export_dir,
            api_token,
        } = raw;

        let defaults = Self::default();

        let page_size = match page_size {
            Some(0) => anyhow::bail!("PAGE_SIZE must be at least 1"),
            Some(size) => size,
            None => defaults.page_size,
        };

        let api_base_url = match api_base_url {
            Some(url) => {
                log::info!("Using provided API_BASE_URL: {url}");
                url.trim_end_matches('/').to_owned()
            }
            None => defaults.api_base_url,
        };

        Ok(Self {
            api_base_url,
            page_size,
            export_dir: export_dir.unwrap_or(defaults.export_dir),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn api_url(&self) -> Ustr {
        if self.api_base_url.is_empty() {
            Ustr::from("/api")
        } else {
            Ustr::from(&format!("{}/api", self.api_base_url))
        }
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            export_dir: PathBuf::from("."),
            api_token: None,
        }
    }
}
