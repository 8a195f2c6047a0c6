//! Sources of division geometry and search results.

use std::path::{Path, PathBuf};

use crate::error::{OutlineError, Result};
use crate::geom::Geometry;
use crate::io::geojson::parse_geometry;
use crate::viewer::{SearchRequest, SearchResult};

/// Anything that can produce the boundary geometry for a division id.
pub trait GeometrySource {
    /// Fetch the full geometry. Failures surface as `GeometryFetch`; no retries.
    fn fetch(&self, id: &str) -> Result<Geometry>;
}

/// Anything that can answer division name searches.
pub trait SearchSource {
    fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>>;
}

/// Serves one GeoJSON file as the geometry of every id.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl GeometrySource for FileSource {
    fn fetch(&self, id: &str) -> Result<Geometry> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| OutlineError::fetch(id, format!("read {}: {e}", self.path.display())))?;
        parse_geometry(&bytes).map_err(|e| OutlineError::fetch(id, e))
    }
}

#[cfg(feature = "download")]
pub use http::HttpClient;

#[cfg(feature = "download")]
mod http {
    use std::time::Duration;

    use reqwest::{blocking::Client, Url};

    use super::{GeometrySource, SearchSource};
    use crate::error::{OutlineError, Result};
    use crate::geom::Geometry;
    use crate::io::geojson::parse_geometry_response;
    use crate::viewer::{SearchRequest, SearchResult};

    /// Blocking client for the division service (`/api/search`, `/api/geometry/{id}`).
    #[derive(Debug, Clone)]
    pub struct HttpClient {
        base: Url,
        client: Client,
    }

    impl HttpClient {
        pub fn new(base_url: &str) -> Result<Self> {
            let base = Url::parse(base_url)
                .map_err(|e| OutlineError::InvalidOptions(format!("invalid server URL {base_url:?}: {e}")))?;
            if base.cannot_be_a_base() {
                return Err(OutlineError::InvalidOptions(format!("server URL {base_url:?} cannot be a base")));
            }
            let client = Client::builder()
                .user_agent(concat!("division-outline/", env!("CARGO_PKG_VERSION")))
                .timeout(Duration::from_secs(10))
                .build()
                .map_err(|e| OutlineError::InvalidOptions(format!("cannot build HTTP client: {e}")))?;
            Ok(Self { base, client })
        }

        /// Append path segments to the base URL, percent-encoding each one.
        fn endpoint(&self, segments: &[&str]) -> Url {
            let mut url = self.base.clone();
            if let Ok(mut path) = url.path_segments_mut() {
                path.pop_if_empty().extend(segments);
            }
            url
        }
    }

    impl GeometrySource for HttpClient {
        fn fetch(&self, id: &str) -> Result<Geometry> {
            let url = self.endpoint(&["api", "geometry", id]);
            log::info!("[io::client] GET {url}");

            let response = self.client.get(url.clone()).send()
                .map_err(|e| OutlineError::fetch(id, e))?;
            let status = response.status();
            if !status.is_success() {
                return Err(OutlineError::fetch(id, format!("HTTP error! status: {status}")));
            }
            let bytes = response.bytes().map_err(|e| OutlineError::fetch(id, e))?;
            parse_geometry_response(&bytes).map_err(|e| OutlineError::fetch(id, e))
        }
    }

    impl SearchSource for HttpClient {
        fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResult>> {
            let url = self.endpoint(&["api", "search"]);
            log::info!("[io::client] POST {url} query={:?} bbox={}", request.query, request.bbox.is_some());

            let response = self.client.post(url).json(request).send()
                .map_err(|e| OutlineError::Search(e.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(OutlineError::Search(format!("HTTP error! status: {status}")));
            }
            let results: Vec<SearchResult> = response.json()
                .map_err(|e| OutlineError::Search(format!("unreadable response: {e}")))?;

            log::info!("[io::client] {} result(s) for {:?}", results.len(), request.query);
            Ok(results)
        }
    }

}
