//! The layer registry collaborator.
//!
//! This is the host application's project/map-layer system. The bridge
//! only ever hands it fully validated connection strings (see
//! [`crate::descriptor::SourceDescriptor::into_source`]) and reads back a
//! validity flag, the same contract the host exposes for layer creation.

use std::path::Path;

/// Snapshot of the host's current project, read on demand.
#[derive(Debug, Clone, Default)]
pub struct ProjectState {
    /// Absolute path of the project file; empty when never saved.
    pub path: String,
    /// Project title from the project properties; may be empty.
    pub title: String,
    /// True when the project was modified since the last save.
    pub dirty: bool,
    /// True when the project is stored as a compressed archive.
    pub zipped: bool,
}

/// Host project and map-layer collection.
pub trait LayerRegistry {
    /// Add a raster layer from an encoded source string. Returns false
    /// when the host considers the resulting layer invalid.
    fn add_raster_layer(&mut self, source: &str, name: &str, provider: &str) -> bool;

    /// Add a vector layer from an encoded source string. Returns false
    /// when the host considers the resulting layer invalid.
    fn add_vector_layer(&mut self, source: &str, name: &str, provider: &str) -> bool;

    /// Apply a named style file to a previously added layer.
    fn apply_layer_style(&mut self, layer_name: &str, style_path: &Path) -> bool;

    /// Discard the current project.
    fn clear_project(&mut self);

    /// Load the project stored at `path`.
    fn open_project(&mut self, path: &Path) -> bool;

    /// Current project state.
    fn project(&self) -> ProjectState;
}
