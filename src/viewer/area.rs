use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{OutlineError, Result};
use crate::geom::{GeoBounds, Geometry};

/// Classification of an administrative division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaKind {
    City,       // Overture "locality"
    County,
    State,      // Overture "region"
    Country,
    #[default]
    #[serde(other)]
    Region,     // Anything else
}

impl AreaKind {
    pub fn to_str(&self) -> &'static str {
        match self {
            AreaKind::City => "city",
            AreaKind::County => "county",
            AreaKind::State => "state",
            AreaKind::Country => "country",
            AreaKind::Region => "region",
        }
    }

    /// OSM-style admin level used when the service does not report one.
    pub fn default_admin_level(&self) -> u32 {
        match self {
            AreaKind::City => 8,
            AreaKind::County => 6,
            AreaKind::State => 4,
            AreaKind::Country => 2,
            AreaKind::Region => 5,
        }
    }
}

impl std::str::FromStr for AreaKind {
    type Err = OutlineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "city" => Ok(AreaKind::City),
            "county" => Ok(AreaKind::County),
            "state" => Ok(AreaKind::State),
            "country" => Ok(AreaKind::Country),
            "region" => Ok(AreaKind::Region),
            other => Err(OutlineError::InvalidOptions(format!("unknown area kind {other:?}"))),
        }
    }
}

impl fmt::Display for AreaKind {
    /// Capitalized label, e.g. "County".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_str();
        let mut chars = s.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

/// Which division kinds a search should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub city: bool,
    pub state: bool,
    pub county: bool,
}

impl Default for SearchFilters {
    fn default() -> Self { Self { city: true, state: true, county: true } }
}

/// Spatial filter of a search: the visible map extent.
pub type ViewBox = GeoBounds;

/// Body of a search call: name query, kind filters and optional viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub filters: SearchFilters,
    pub bbox: Option<ViewBox>,
}

impl SearchRequest {
    /// Trimmed, non-empty query with every filter enabled.
    pub fn new(query: &str) -> Result<Self> {
        let query = query.trim();
        if query.is_empty() {
            return Err(OutlineError::Search("query must not be empty".into()));
        }
        Ok(Self { query: query.to_string(), filters: SearchFilters::default(), bbox: None })
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_bbox(mut self, bbox: ViewBox) -> Self {
        self.bbox = Some(bbox);
        self
    }
}

/// One division returned by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AreaKind,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub admin_level: Option<u32>,
    #[serde(default)]
    pub population: Option<u64>,
    /// Some geocoders return the boundary inline; most results need a fetch.
    /// Inline points and lines are dropped so the area is fetched instead.
    #[serde(default, deserialize_with = "inline_boundary")]
    pub geometry: Option<Geometry>,
}

/// Keep an inline geometry only if it is a usable Polygon or MultiPolygon.
fn inline_boundary<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Geometry>, D::Error> {
    let Some(value) = Option::<Value>::deserialize(deserializer)? else { return Ok(None) };
    match serde_json::from_value::<Geometry>(value) {
        Ok(geometry) => Ok(Some(geometry)),
        Err(e) => {
            log::debug!("[viewer::area] ignoring inline geometry: {e}");
            Ok(None)
        }
    }
}

/// The division currently shown by the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedArea {
    pub id: String,
    pub name: String,
    pub kind: AreaKind,
    pub region: String,
    pub country: Option<String>,
    pub population: Option<u64>,
    pub admin_level: Option<u32>,
    pub geometry: Option<Geometry>,
}

impl SelectedArea {
    /// Admin level as reported, or the default for the kind.
    pub fn admin_level_or_default(&self) -> u32 {
        self.admin_level.unwrap_or_else(|| self.kind.default_admin_level())
    }
}

impl From<SearchResult> for SelectedArea {
    fn from(result: SearchResult) -> Self {
        Self {
            id: result.id,
            name: result.name,
            kind: result.kind,
            region: result.region,
            country: result.country,
            population: result.population,
            admin_level: result.admin_level,
            geometry: result.geometry,
        }
    }
}

/// Format an integer with comma thousands separators.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 { out.push(',') }
        out.push(ch);
    }
    out
}
