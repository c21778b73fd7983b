//! Project download and export operations.

use std::fs;

use tracing::{info, warn};

use crate::errors::{BridgeError, PreconditionError};
use crate::project::{compact_xml, is_unsaved_path, panel_project_name, ProjectKind};
use crate::registry::ProjectState;

impl super::Bridge {
    /// Write a project payload delivered by the panel into the download
    /// folder and make the host open it, discarding the current project.
    ///
    /// The payload kind is recognized from its content, not from a file
    /// extension; unrecognized content fails before anything is written.
    pub fn download_and_open_project(
        &mut self,
        content: &str,
        file_stem: &str,
    ) -> Result<(), BridgeError> {
        let folder = self.ensure_download_folder()?;

        let Some(kind) = ProjectKind::sniff(content) else {
            return Err(BridgeError::UnrecognizedContent {
                file_stem: file_stem.to_owned(),
            });
        };

        let destination = folder.join(format!("{file_stem}.{}", kind.extension()));
        let bytes = match kind {
            ProjectKind::PlainXml => content.as_bytes().to_vec(),
            // Archive bytes travel as text in the legacy encoding; map
            // them back to raw bytes before writing.
            ProjectKind::Archive => self.encoding.encode(content),
        };
        fs::write(&destination, bytes).map_err(|source| BridgeError::Write {
            path: destination.clone(),
            source,
        })?;

        info!(path = %destination.display(), "closing the current project and opening the downloaded one");
        self.registry.clear_project();
        if !self.registry.open_project(&destination) {
            warn!(path = %destination.display(), "the host could not open the downloaded project");
        }
        Ok(())
    }

    /// Current project base name with spaces replaced by underscores.
    pub fn project_name(&self) -> String {
        panel_project_name(&self.registry.project().path)
    }

    /// Serialize the current project to portable UTF-8 text.
    ///
    /// Preconditions, each an early error with no disk access: the
    /// project must be saved under a real path, carry no unsaved
    /// changes, and have a title. Archived projects are decoded with
    /// the configured legacy encoding; plain projects are compacted.
    pub fn project_as_utf8_text(&mut self) -> Result<String, BridgeError> {
        let state = self.registry.project();

        if is_unsaved_path(&state.path) {
            return Err(PreconditionError::ProjectNotSaved { path: state.path }.into());
        }
        if state.dirty {
            return Err(PreconditionError::ProjectDirty.into());
        }
        if state.title.is_empty() {
            return Err(PreconditionError::ProjectUntitled.into());
        }

        self.ui.set_busy(true);
        let result = self.read_project_text(&state);
        self.ui.set_busy(false);
        result
    }

    fn read_project_text(&self, state: &ProjectState) -> Result<String, BridgeError> {
        if state.zipped {
            let bytes = fs::read(&state.path)?;
            Ok(self.encoding.decode(&bytes))
        } else {
            let text = fs::read_to_string(&state.path)?;
            Ok(compact_xml(&text))
        }
    }
}
