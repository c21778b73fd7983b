//! Script-to-host bridge for the geopanel web panel.
//!
//! The panel runs untrusted script content inside a browser-like view
//! embedded in a desktop GIS host. Scripts invoke a fixed catalog of
//! named operations (add a web map service, open a remote file, read the
//! current project, ...) which this crate validates and translates into
//! side effects on the filesystem, the settings store, and the host's
//! map-layer registry.
//!
//! The host-controlled pieces (widget tree, browser rendering, layer
//! rendering) stay behind collaborator traits: [`registry::LayerRegistry`],
//! [`ui::UserInteraction`], [`script::ScriptHost`], [`fetch::Fetcher`] and
//! [`ui::MetadataView`]. Everything else - parameter parsing, descriptor
//! construction, download staging, error taxonomy - lives here and is
//! testable without a GUI toolkit.

pub mod bridge;
pub mod composite;
pub mod descriptor;
pub mod dispatch;
pub mod encoding;
pub mod errors;
pub mod fetch;
pub mod project;
pub mod registry;
pub mod script;
pub mod ui;

pub use bridge::{Bridge, Collaborators};
pub use descriptor::{SourceDescriptor, SourceKind, SslMode};
pub use dispatch::{CallValue, Operation};
pub use errors::{BridgeError, ErrorKind, PreconditionError};
pub use registry::{LayerRegistry, ProjectState};
pub use script::{ScriptCall, ScriptHost};
pub use ui::{Confirm, MetadataView, UserInteraction};
