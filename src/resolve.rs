//! Logo resolution: fetches the store logo named by the settings.
//!
//! Rendering is synchronous and never touches the network. Callers resolve
//! the logo first and hand the bytes to the template through
//! [`StoreDetail`]:
//!
//! ```no_run
//! # async fn demo(settings: docsmith::model::DocumentSettings) -> docsmith::Result<()> {
//! use docsmith::resolve::LogoResolver;
//!
//! let resolver = LogoResolver::new()?;
//! let store = resolver.store_detail(&settings).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{DocsmithError, Result};
use crate::model::{DocumentSettings, StoreDetail};

/// Somewhere logo bytes can be loaded from.
#[async_trait]
pub trait LogoSource: Send + Sync {
    /// Whether this source understands `location`.
    fn handles(&self, location: &str) -> bool;

    /// Load the raw (still encoded) image.
    async fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// `http://` and `https://` URLs.
pub struct HttpLogoSource {
    client: reqwest::Client,
}

impl HttpLogoSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("docsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DocsmithError::Asset(format!("HTTP client error: {}", e)))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LogoSource for HttpLogoSource {
    fn handles(&self, location: &str) -> bool {
        location.starts_with("http://") || location.starts_with("https://")
    }

    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| DocsmithError::Asset(format!("Failed to download {}: {}", location, e)))?;
        if !response.status().is_success() {
            return Err(DocsmithError::Asset(format!(
                "Failed to download {}: HTTP {}",
                location,
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| DocsmithError::Asset(format!("Failed to read logo data: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

/// Local paths, with or without a `file://` prefix.
#[derive(Debug, Default)]
pub struct FileLogoSource;

impl FileLogoSource {
    fn path(location: &str) -> PathBuf {
        PathBuf::from(location.strip_prefix("file://").unwrap_or(location))
    }
}

#[async_trait]
impl LogoSource for FileLogoSource {
    fn handles(&self, location: &str) -> bool {
        !location.contains("://") || location.starts_with("file://")
    }

    async fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        let path = Self::path(location);
        tokio::fs::read(&path)
            .await
            .map_err(|e| DocsmithError::Asset(format!("Failed to read {}: {}", path.display(), e)))
    }
}

/// Picks a source per location and caches what it fetched.
pub struct LogoResolver {
    sources: Vec<Arc<dyn LogoSource>>,
    cache: RwLock<HashMap<String, Arc<Vec<u8>>>>,
}

impl LogoResolver {
    /// HTTP and file sources.
    pub fn new() -> Result<Self> {
        Ok(Self::with_sources(vec![
            Arc::new(HttpLogoSource::new()?),
            Arc::new(FileLogoSource),
        ]))
    }

    /// Sources are tried in order; the first that handles a location wins.
    pub fn with_sources(sources: Vec<Arc<dyn LogoSource>>) -> Self {
        Self {
            sources,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the logo at `location`, or return the cached copy.
    ///
    /// Bytes that are not a recognizable image are rejected here rather than
    /// at render time.
    pub async fn fetch(&self, location: &str) -> Result<Arc<Vec<u8>>> {
        let location = location.trim();
        if let Some(cached) = self.cache.read().await.get(location) {
            return Ok(cached.clone());
        }

        let source = self
            .sources
            .iter()
            .find(|s| s.handles(location))
            .ok_or_else(|| DocsmithError::Asset(format!("No source for logo {}", location)))?;
        let bytes = source.fetch(location).await?;
        image::guess_format(&bytes)
            .map_err(|e| DocsmithError::Asset(format!("Logo {} is not an image: {}", location, e)))?;
        log::debug!("Fetched logo {} ({} bytes)", location, bytes.len());

        let bytes = Arc::new(bytes);
        self.cache
            .write()
            .await
            .insert(location.to_string(), bytes.clone());
        Ok(bytes)
    }

    /// Store detail for rendering, with the logo filled in when configured.
    pub async fn store_detail(&self, settings: &DocumentSettings) -> Result<StoreDetail> {
        let company = settings
            .store_address
            .as_ref()
            .and_then(|a| a.company.clone());
        let logo = match settings
            .store_logo_source
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            Some(location) => Some(self.fetch(location).await?.as_ref().clone()),
            None => None,
        };
        Ok(StoreDetail {
            name: company,
            logo,
        })
    }
}
