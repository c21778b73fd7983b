//! The bridge object: session state plus the collaborator seams.
//!
//! A [`Bridge`] lives as long as the hosting view. Session credentials
//! and the download folder are loaded from the settings store once at
//! construction, mutated by operations during the session, and flushed
//! back only when the user opts in. All operations run on the host's
//! single UI thread; there is no internal locking.

mod files;
mod layers;
mod project;
mod session;

use geopanel_config::Settings;
use tracing::{debug, warn};

use crate::dispatch::{lookup, CallValue, Operation};
use crate::encoding::LegacyEncoding;
use crate::errors::BridgeError;
use crate::fetch::Fetcher;
use crate::registry::LayerRegistry;
use crate::script::ScriptHost;
use crate::ui::{MetadataView, UserInteraction};

pub use session::DOWNLOAD_FOLDER_PLACEHOLDER;

/// Builds the reusable metadata view on first use.
pub type MetadataViewFactory = Box<dyn FnMut() -> Box<dyn MetadataView>>;

/// The host-side collaborators handed to the bridge at construction.
pub struct Collaborators {
    pub registry: Box<dyn LayerRegistry>,
    pub ui: Box<dyn UserInteraction>,
    pub script: Box<dyn ScriptHost>,
    pub fetcher: Box<dyn Fetcher>,
    pub metadata_factory: MetadataViewFactory,
}

/// Receiver for the panel's script-originated calls.
pub struct Bridge {
    settings: Settings,
    session_user: String,
    session_password: String,
    download_folder: String,
    background_color: String,
    encoding: LegacyEncoding,
    registry: Box<dyn LayerRegistry>,
    ui: Box<dyn UserInteraction>,
    script: Box<dyn ScriptHost>,
    fetcher: Box<dyn Fetcher>,
    metadata_factory: MetadataViewFactory,
    metadata: Option<Box<dyn MetadataView>>,
}

impl Bridge {
    /// Build a bridge over the given settings and collaborators. The
    /// background color is fixed at construction; credentials and the
    /// download folder are seeded from the settings store.
    pub fn new(
        settings: Settings,
        background_color: impl Into<String>,
        collaborators: Collaborators,
    ) -> Self {
        let encoding = settings
            .legacy_encoding
            .as_deref()
            .and_then(LegacyEncoding::from_label)
            .unwrap_or_default();
        let session_user = settings.user().to_owned();
        let session_password = settings.password().to_owned();
        let download_folder = settings.download_folder().to_owned();
        debug!(encoding = encoding.label(), "bridge constructed");
        Self {
            settings,
            session_user,
            session_password,
            download_folder,
            background_color: background_color.into(),
            encoding,
            registry: collaborators.registry,
            ui: collaborators.ui,
            script: collaborators.script,
            fetcher: collaborators.fetcher,
            metadata_factory: collaborators.metadata_factory,
            metadata: None,
        }
    }

    /// Validate and execute one script-originated call. The operation is
    /// resolved through the fixed dispatch table; an unknown name or a
    /// wrong argument count never reaches a handler.
    pub fn dispatch(&mut self, name: &str, args: &[&str]) -> Result<CallValue, BridgeError> {
        let Some(op) = lookup(name, args.len()) else {
            return Err(BridgeError::UnknownOperation {
                name: name.to_owned(),
                arity: args.len(),
            });
        };
        debug!(operation = name, arity = args.len(), "dispatching");
        match (op, args) {
            (Operation::ShowMessage, [title, message]) => {
                self.show_message(title, message);
                Ok(CallValue::None)
            }
            (Operation::Confirm, [message]) => Ok(CallValue::Confirm(self.confirm(message))),
            (Operation::BackgroundColor, []) => {
                Ok(CallValue::Text(self.background_color().to_owned()))
            }
            (Operation::DownloadAndOpenProject, [content, file_stem]) => {
                self.download_and_open_project(content, file_stem)?;
                Ok(CallValue::None)
            }
            (Operation::SetCredentials, [user, password]) => {
                self.set_credentials(user, password)?;
                Ok(CallValue::None)
            }
            (Operation::PushPassword, []) => {
                self.push_password();
                Ok(CallValue::None)
            }
            (Operation::PushUser, []) => {
                self.push_user();
                Ok(CallValue::None)
            }
            (Operation::ChooseDownloadFolder, []) => {
                self.choose_download_folder()?;
                Ok(CallValue::None)
            }
            (Operation::AddWebMapLayer, [name, url, layers, mime_type, epsg_code, protocol]) => {
                self.add_web_map_layer(name, url, layers, mime_type, epsg_code, protocol)?;
                Ok(CallValue::None)
            }
            (Operation::AddFeatureLayer, [name, url, layer, epsg_code, style_path]) => {
                self.add_feature_layer(
                    name,
                    url,
                    layer,
                    epsg_code,
                    std::path::Path::new(style_path),
                )?;
                Ok(CallValue::None)
            }
            (Operation::AddFeatureLayerWithStyle, [name, url, layer_epsg, style_url]) => {
                self.add_feature_layer_with_style(name, url, layer_epsg, style_url)?;
                Ok(CallValue::None)
            }
            (
                Operation::AddDatabaseTableWithStyle,
                [name, host, port_ssl, database_name, username, schema, table_filter, geom_col, id_col, style_url],
            ) => {
                self.add_database_table_with_style(
                    name,
                    host,
                    port_ssl,
                    database_name,
                    username,
                    schema,
                    table_filter,
                    geom_col,
                    id_col,
                    style_url,
                )?;
                Ok(CallValue::None)
            }
            (Operation::OpenLocalFile, [name, path]) => {
                self.open_local_file(name, path)?;
                Ok(CallValue::None)
            }
            (Operation::OpenRemoteFile, [name, url]) => {
                self.open_remote_file(name, url)?;
                Ok(CallValue::None)
            }
            (Operation::OpenUrlExternally, [url]) => {
                self.open_url_externally(url);
                Ok(CallValue::None)
            }
            (Operation::OpenMetadataExternally, [url]) => {
                self.open_metadata_externally(url);
                Ok(CallValue::None)
            }
            (Operation::ShowMetadataDialog, [layer_name, metadata_url]) => {
                self.show_metadata_dialog(layer_name, metadata_url);
                Ok(CallValue::None)
            }
            (Operation::DownloadFolder, []) => Ok(CallValue::Text(self.download_folder_display())),
            (Operation::ProjectName, []) => Ok(CallValue::Text(self.project_name())),
            (Operation::ProjectAsUtf8Text, []) => {
                self.project_as_utf8_text().map(CallValue::Text)
            }
            _ => Err(BridgeError::UnknownOperation {
                name: name.to_owned(),
                arity: args.len(),
            }),
        }
    }

    /// Dispatch a call and render any failure as a user-facing dialog.
    /// This is the entry point the host glue wires to the embedded view:
    /// malformed script input surfaces as a dialog plus a log record,
    /// never as a crash.
    pub fn handle(&mut self, name: &str, args: &[&str]) -> CallValue {
        match self.dispatch(name, args) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    operation = name,
                    kind = ?err.kind(),
                    error = %err,
                    "operation failed"
                );
                self.ui.show_error("Warning", &err.to_string());
                CallValue::None
            }
        }
    }

    /// Session credentials currently in effect (used by the host glue
    /// for diagnostics).
    pub fn session_user(&self) -> &str {
        &self.session_user
    }
}
