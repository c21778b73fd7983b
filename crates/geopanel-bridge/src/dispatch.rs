//! Fixed dispatch table for script-originated calls.
//!
//! The embedded content invokes bridge operations by name with a
//! positional string argument list. Instead of runtime introspection,
//! the catalog is a static table mapping operation name and arity to a
//! handler; an unknown name or a wrong argument count is rejected
//! explicitly before any handler runs.

use crate::ui::Confirm;

/// The operations the panel may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ShowMessage,
    Confirm,
    BackgroundColor,
    DownloadAndOpenProject,
    SetCredentials,
    PushPassword,
    PushUser,
    ChooseDownloadFolder,
    AddWebMapLayer,
    AddFeatureLayer,
    AddFeatureLayerWithStyle,
    AddDatabaseTableWithStyle,
    OpenLocalFile,
    OpenRemoteFile,
    OpenUrlExternally,
    OpenMetadataExternally,
    ShowMetadataDialog,
    DownloadFolder,
    ProjectName,
    ProjectAsUtf8Text,
}

/// Wire name, arity, handler. The wire names are the identifiers the
/// panel scripts call on the injected host object.
pub const DISPATCH_TABLE: &[(&str, usize, Operation)] = &[
    ("showMessage", 2, Operation::ShowMessage),
    ("confirm", 1, Operation::Confirm),
    ("getBackgroundColor", 0, Operation::BackgroundColor),
    ("downloadAndOpenProject", 2, Operation::DownloadAndOpenProject),
    ("setCredentials", 2, Operation::SetCredentials),
    ("getPassword", 0, Operation::PushPassword),
    ("getUser", 0, Operation::PushUser),
    ("chooseDownloadFolder", 0, Operation::ChooseDownloadFolder),
    ("addWebMapLayer", 6, Operation::AddWebMapLayer),
    ("addFeatureLayer", 5, Operation::AddFeatureLayer),
    ("addFeatureLayerWithStyle", 4, Operation::AddFeatureLayerWithStyle),
    ("addDatabaseTableWithStyle", 10, Operation::AddDatabaseTableWithStyle),
    ("openLocalFile", 2, Operation::OpenLocalFile),
    ("openRemoteFile", 2, Operation::OpenRemoteFile),
    ("openUrlExternally", 1, Operation::OpenUrlExternally),
    ("openMetadataExternally", 1, Operation::OpenMetadataExternally),
    ("showMetadataDialog", 2, Operation::ShowMetadataDialog),
    ("getDownloadFolder", 0, Operation::DownloadFolder),
    ("getProjectName", 0, Operation::ProjectName),
    ("getProjectAsUtf8Text", 0, Operation::ProjectAsUtf8Text),
];

/// Resolve an operation by wire name and argument count.
pub fn lookup(name: &str, arity: usize) -> Option<Operation> {
    DISPATCH_TABLE
        .iter()
        .find(|(entry_name, entry_arity, _)| *entry_name == name && *entry_arity == arity)
        .map(|(_, _, op)| *op)
}

/// Value an operation yields back to the calling script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallValue {
    /// Side effect only.
    None,
    /// Plain text result.
    Text(String),
    /// Yes/no sentinel.
    Confirm(Confirm),
}

impl CallValue {
    /// Script-facing encoding of the value; empty string for `None`.
    pub fn as_text(&self) -> &str {
        match self {
            CallValue::None => "",
            CallValue::Text(text) => text,
            CallValue::Confirm(confirm) => confirm.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_wire_name_resolves_at_its_declared_arity() {
        for (name, arity, op) in DISPATCH_TABLE {
            assert_eq!(lookup(name, *arity), Some(*op), "{name}");
        }
    }

    #[test]
    fn wrong_arity_does_not_resolve() {
        assert_eq!(lookup("showMessage", 3), None);
        assert_eq!(lookup("getUser", 1), None);
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(lookup("eval", 1), None);
        assert_eq!(lookup("", 0), None);
    }

    #[test]
    fn wire_names_are_unique_per_arity() {
        for (i, (name, arity, _)) in DISPATCH_TABLE.iter().enumerate() {
            let duplicates = DISPATCH_TABLE
                .iter()
                .skip(i + 1)
                .filter(|(n, a, _)| n == name && a == arity)
                .count();
            assert_eq!(duplicates, 0, "duplicate entry for {name}/{arity}");
        }
    }

    #[test]
    fn call_values_encode_for_the_script_side() {
        assert_eq!(CallValue::None.as_text(), "");
        assert_eq!(CallValue::Text("x".into()).as_text(), "x");
        assert_eq!(CallValue::Confirm(Confirm::Ok).as_text(), "OK");
    }
}
