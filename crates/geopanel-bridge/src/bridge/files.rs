//! Local and remote file operations, URL delegation and the metadata
//! view.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::descriptor::{SourceDescriptor, SourceKind};
use crate::errors::BridgeError;
use crate::fetch::derived_local_file_name;
use crate::ui::Confirm;

impl super::Bridge {
    /// Open a local file as a map layer. Archives load as vector
    /// sources, everything else as raster.
    pub fn open_local_file(&mut self, name: &str, path: &str) -> Result<(), BridgeError> {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_uppercase();

        let kind = if extension == "ZIP" {
            SourceKind::LocalVector
        } else {
            SourceKind::LocalRaster
        };
        debug!(name, path, kind = ?kind, "openLocalFile");

        let mut descriptor = SourceDescriptor::new(kind);
        descriptor.set_param("path", path);
        let source = descriptor.into_source()?;

        let added = match kind {
            SourceKind::LocalVector => {
                self.registry.add_vector_layer(&source, name, kind.provider())
            }
            _ => self.registry.add_raster_layer(&source, name, kind.provider()),
        };
        if added {
            Ok(())
        } else {
            Err(BridgeError::RegistryRejected {
                kind: "file",
                name: name.to_owned(),
                detail: format!("\npath: {path}"),
            })
        }
    }

    /// Stage a remote file in the download folder and open it as a
    /// vector layer.
    ///
    /// When a file with the derived name already exists locally the
    /// user chooses between overwriting it (fetch again), reusing the
    /// existing copy (no fetch), or aborting entirely.
    pub fn open_remote_file(&mut self, name: &str, url: &str) -> Result<(), BridgeError> {
        let folder = self.ensure_download_folder()?;
        let file_name = derived_local_file_name(url);
        let local_path = folder.join(&file_name);

        let mut download = true;
        if local_path.is_file() {
            let overwrite = self.ui.confirm(
                "Attention",
                "The file is already present in the download folder.\nOverwrite it?",
            );
            if overwrite == Confirm::No {
                download = false;
                let reuse = self.ui.confirm(
                    "Download cancelled",
                    "Load the copy already present locally?",
                );
                if reuse == Confirm::No {
                    return Ok(());
                }
            }
        }

        if download {
            let bytes = self.fetcher.fetch(url)?;
            fs::write(&local_path, bytes).map_err(|source| BridgeError::Write {
                path: local_path.clone(),
                source,
            })?;
            debug!(url, path = %local_path.display(), "remote file staged");
        }

        let mut descriptor = SourceDescriptor::new(SourceKind::LocalVector);
        descriptor.set_param("path", local_path.to_string_lossy());
        let source = descriptor.into_source()?;

        if self
            .registry
            .add_vector_layer(&source, name, SourceKind::LocalVector.provider())
        {
            Ok(())
        } else {
            Err(BridgeError::RegistryRejected {
                kind: "file",
                name: name.to_owned(),
                detail: format!("\npath: {}", local_path.display()),
            })
        }
    }

    /// Blocking fetch of `url` into the download folder under
    /// `local_name`. The caller must have validated the folder.
    pub(crate) fn download_file(
        &mut self,
        url: &str,
        local_name: &str,
    ) -> Result<PathBuf, BridgeError> {
        let local_path = PathBuf::from(&self.download_folder).join(local_name);
        debug!(url, path = %local_path.display(), "downloading");
        let bytes = self.fetcher.fetch(url)?;
        fs::write(&local_path, bytes).map_err(|source| BridgeError::Write {
            path: local_path.clone(),
            source,
        })?;
        Ok(local_path)
    }

    /// Open a URL with the platform's default handler.
    pub fn open_url_externally(&self, url: &str) {
        self.ui.open_url(url);
    }

    /// Open a metadata URL with the platform's default handler.
    pub fn open_metadata_externally(&self, url: &str) {
        info!(url, "opening metadata externally");
        self.ui.open_url(url);
    }

    /// Present the reusable metadata view for a layer. The view is
    /// constructed lazily on first use and kept for the session.
    pub fn show_metadata_dialog(&mut self, layer_name: &str, metadata_url: &str) {
        info!(layer = layer_name, url = metadata_url, "showMetadataDialog");
        let view = self
            .metadata
            .get_or_insert_with(|| (self.metadata_factory)());
        view.present(layer_name, metadata_url);
    }
}
