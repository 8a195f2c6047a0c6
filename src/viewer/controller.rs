use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::geom::Geometry;
use crate::io::{fs::write_atomic, GeometrySource};
use crate::viewer::export::{outline_file_name, print_file_name, render_outline, render_print, PRINT_JPEG_QUALITY};
use crate::viewer::{SearchResult, SelectedArea};

/// Whether the base map tiles are drawn under the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Basemap {
    #[default]
    Visible,
    Hidden,
}

impl Basemap {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Basemap::Visible => Basemap::Hidden,
            Basemap::Hidden => Basemap::Visible,
        }
    }
}

/// Owns the current selection and basemap state, and drives exports.
#[derive(Debug, Default)]
pub struct Viewer {
    selected: Option<SelectedArea>,
    basemap: Basemap,
}

impl Viewer {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn selected(&self) -> Option<&SelectedArea> { self.selected.as_ref() }

    #[inline] pub fn basemap(&self) -> Basemap { self.basemap }

    /// Replace the current selection. Inline geometry on the result is kept.
    pub fn select(&mut self, result: SearchResult) -> &SelectedArea {
        log::info!("[viewer] selected {} ({}, {})", result.name, result.kind.to_str(), result.id);
        self.selected.insert(SelectedArea::from(result))
    }

    /// Attach fetched geometry if `id` is still the selected area.
    /// Returns `false` and drops the geometry otherwise.
    pub fn attach_geometry(&mut self, id: &str, geometry: Geometry) -> bool {
        match self.selected.as_mut() {
            Some(area) if area.id == id => {
                area.geometry = Some(geometry);
                true
            }
            Some(area) => {
                log::warn!("[viewer] discarding stale geometry for {id}; {} is selected", area.id);
                false
            }
            None => {
                log::warn!("[viewer] discarding geometry for {id}; nothing is selected");
                false
            }
        }
    }

    /// Fetch and attach geometry for the current selection.
    pub fn load_geometry<G: GeometrySource + ?Sized>(&mut self, source: &G) -> Result<()> {
        let id = self.selected.as_ref()
            .map(|area| area.id.clone())
            .context("[viewer] No area selected")?;
        let geometry = source.fetch(&id)
            .with_context(|| format!("[viewer] Could not load boundary for {id}"))?;
        self.attach_geometry(&id, geometry);
        Ok(())
    }

    /// Drop the selection and show the basemap again.
    pub fn clear(&mut self) {
        self.selected = None;
        self.basemap = Basemap::Visible;
    }

    pub fn toggle_basemap(&mut self) -> Basemap {
        self.basemap = self.basemap.toggled();
        self.basemap
    }

    fn area(&self) -> Result<&SelectedArea> {
        self.selected.as_ref().context("[viewer] No area selected")
    }

    /// Write the screen outline PNG into `dir`.
    pub fn export_outline(&self, dir: &Path, force: bool) -> Result<PathBuf> {
        let area = self.area()?;
        let png = render_outline(area)?.encode_png()?;
        let path = write_atomic(&dir.join(outline_file_name(&area.name)), &png, force)?;
        log::info!("[viewer] outline exported to {}", path.display());
        Ok(path)
    }

    /// Write the print-resolution JPEG into `dir`, stamped with `generated`.
    pub fn export_print(&self, dir: &Path, generated: NaiveDateTime, force: bool) -> Result<PathBuf> {
        let area = self.area()?;
        let jpeg = render_print(area, generated)?.encode_jpeg(PRINT_JPEG_QUALITY)?;
        let path = write_atomic(&dir.join(print_file_name(&area.name)), &jpeg, force)?;
        log::info!("[viewer] print map exported to {}", path.display());
        Ok(path)
    }
}
