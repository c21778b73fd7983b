//! Session operations: messages, credentials and the download folder.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{BridgeError, PreconditionError};
use crate::script::ScriptCall;
use crate::ui::Confirm;

/// Reported to the panel while no download folder is configured.
pub const DOWNLOAD_FOLDER_PLACEHOLDER: &str = "-- not selected --";

impl super::Bridge {
    /// User-visible notification; side effect only.
    pub fn show_message(&self, title: &str, message: &str) {
        self.ui.show_message(title, message);
    }

    /// Blocking yes/no prompt on behalf of the panel.
    pub fn confirm(&self, message: &str) -> Confirm {
        self.ui.confirm("Attention", message)
    }

    /// Background color fixed at construction, matching the host
    /// palette the panel is embedded in.
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Update the in-memory session credentials. When they differ from
    /// the persisted values the user is offered to store them; either
    /// way the panel's continuation is fired afterwards.
    pub fn set_credentials(&mut self, user: &str, password: &str) -> Result<(), BridgeError> {
        self.session_user = user.to_owned();
        self.session_password = password.to_owned();

        if user != self.settings.user() || password != self.settings.password() {
            let answer = self.ui.confirm(
                "Save the password?",
                "Store the credentials to sign in to the panel automatically?",
            );
            if answer == Confirm::Ok {
                self.settings.user = Some(user.to_owned());
                self.settings.password = Some(password.to_owned());
                self.settings.save()?;
            }
        }

        self.script.push(ScriptCall::SubmitUser);
        Ok(())
    }

    /// Push the persisted password back into the panel; empty string
    /// when never stored.
    pub fn push_password(&self) {
        self.script
            .push(ScriptCall::SetPassword(self.settings.password().to_owned()));
    }

    /// Push the persisted user name back into the panel; empty string
    /// when never stored.
    pub fn push_user(&self) {
        self.script
            .push(ScriptCall::SetUser(self.settings.user().to_owned()));
    }

    /// Let the user pick the download folder. When one is already set,
    /// replacement is confirmed first; a cancelled chooser leaves the
    /// current value untouched. The chosen folder is persisted and
    /// pushed back to the panel.
    pub fn choose_download_folder(&mut self) -> Result<(), BridgeError> {
        if !self.download_folder.is_empty() {
            let message = format!(
                "Current download folder: {}\nReplace it?",
                self.download_folder
            );
            if self.ui.confirm("Download folder", &message) == Confirm::No {
                return Ok(());
            }
        }

        let Some(directory) = self.ui.choose_directory() else {
            return Ok(());
        };
        self.download_folder = directory.to_string_lossy().into_owned();
        debug!(folder = %self.download_folder, "download folder changed");

        self.settings.download_folder = Some(self.download_folder.clone());
        self.settings.save()?;
        self.script
            .push(ScriptCall::SetDownloadFolder(self.download_folder.clone()));
        Ok(())
    }

    /// Configured download folder, or the fixed placeholder when unset.
    pub fn download_folder_display(&self) -> String {
        if self.download_folder.is_empty() {
            DOWNLOAD_FOLDER_PLACEHOLDER.to_owned()
        } else {
            self.download_folder.clone()
        }
    }

    /// Validate the download folder on demand: existence is checked
    /// every time, never cached. When missing, the requirement is
    /// explained and the chooser is offered once before giving up.
    pub(crate) fn ensure_download_folder(&mut self) -> Result<PathBuf, BridgeError> {
        if Path::new(&self.download_folder).exists() && !self.download_folder.is_empty() {
            return Ok(PathBuf::from(&self.download_folder));
        }

        self.ui.show_message(
            "Attention",
            "The local download folder has not been selected: choose one before proceeding.",
        );
        self.choose_download_folder()?;

        if Path::new(&self.download_folder).exists() && !self.download_folder.is_empty() {
            return Ok(PathBuf::from(&self.download_folder));
        }

        self.ui.show_message(
            "Attention",
            "The selected download folder does not exist or is not valid.",
        );
        Err(PreconditionError::DownloadFolderUnavailable.into())
    }
}
