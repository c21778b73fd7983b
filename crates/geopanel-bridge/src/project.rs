//! Project-file classification and text extraction helpers.

/// Path value a never-saved project reports besides the empty string.
pub const EMPTY_PROJECT_PATH_SENTINEL: &str = ".qgs";

/// The two project-file kinds the panel can deliver, recognized by the
/// leading characters of the payload rather than a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// Plain XML project file.
    PlainXml,
    /// Compressed project archive.
    Archive,
}

impl ProjectKind {
    /// Classify payload content by its leading characters,
    /// case-insensitively. An XML project starts with the doctype
    /// declaration (which the upload should have stripped, but did not
    /// always) or the root element; an archive starts with the zip
    /// signature.
    pub fn sniff(content: &str) -> Option<Self> {
        let head: String = content
            .chars()
            .take(16)
            .collect::<String>()
            .to_lowercase();
        if head.starts_with("<!doctype") || head.starts_with("<qgis") {
            Some(ProjectKind::PlainXml)
        } else if head.starts_with("pk") {
            Some(ProjectKind::Archive)
        } else {
            None
        }
    }

    /// File extension written for this kind.
    pub fn extension(self) -> &'static str {
        match self {
            ProjectKind::PlainXml => "qgs",
            ProjectKind::Archive => "qgz",
        }
    }
}

/// True when the project path reports "never saved".
pub fn is_unsaved_path(path: &str) -> bool {
    path.is_empty() || path == EMPTY_PROJECT_PATH_SENTINEL
}

/// Compact a textual project serialization: indentation and line breaks
/// are stripped so the payload travels as a single line.
pub fn compact_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(line.trim());
    }
    out
}

/// Project base name with spaces replaced by underscores, as reported
/// to the panel. The name stops at the first dot, so multi-extension
/// files keep only the leading segment.
pub fn panel_project_name(path: &str) -> String {
    let file_name = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path);
    let base = file_name
        .split_once('.')
        .map_or(file_name, |(stem, _)| stem);
    base.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctype_prefix_is_plain_xml_any_case() {
        assert_eq!(
            ProjectKind::sniff("<!DOCTYPE qgis SYSTEM"),
            Some(ProjectKind::PlainXml)
        );
        assert_eq!(
            ProjectKind::sniff("<!doctype qgis"),
            Some(ProjectKind::PlainXml)
        );
    }

    #[test]
    fn root_element_prefix_is_plain_xml() {
        assert_eq!(
            ProjectKind::sniff("<qgis projectname=\"\">"),
            Some(ProjectKind::PlainXml)
        );
        assert_eq!(
            ProjectKind::sniff("<QGIS version=\"3.4\">"),
            Some(ProjectKind::PlainXml)
        );
    }

    #[test]
    fn zip_signature_is_archive() {
        assert_eq!(ProjectKind::sniff("PK\u{3}\u{4}rest"), Some(ProjectKind::Archive));
        assert_eq!(ProjectKind::sniff("pk..."), Some(ProjectKind::Archive));
    }

    #[test]
    fn anything_else_is_unrecognized() {
        assert_eq!(ProjectKind::sniff("GIF89a"), None);
        assert_eq!(ProjectKind::sniff(""), None);
    }

    #[test]
    fn extensions_match_kinds() {
        assert_eq!(ProjectKind::PlainXml.extension(), "qgs");
        assert_eq!(ProjectKind::Archive.extension(), "qgz");
    }

    #[test]
    fn unsaved_path_sentinels() {
        assert!(is_unsaved_path(""));
        assert!(is_unsaved_path(".qgs"));
        assert!(!is_unsaved_path("/work/city.qgs"));
    }

    #[test]
    fn compact_xml_strips_indentation_and_newlines() {
        let text = "<qgis>\n  <title>x</title>\n  <layers>\n  </layers>\n</qgis>\n";
        assert_eq!(
            compact_xml(text),
            "<qgis><title>x</title><layers></layers></qgis>"
        );
    }

    #[test]
    fn project_name_replaces_spaces() {
        assert_eq!(panel_project_name("/work/urban plan 2019.qgs"), "urban_plan_2019");
        assert_eq!(panel_project_name("C:\\work\\city.qgz"), "city");
        assert_eq!(panel_project_name(""), "");
    }

    #[test]
    fn project_name_stops_at_the_first_dot() {
        assert_eq!(panel_project_name("/work/city.backup.qgs"), "city");
        assert_eq!(panel_project_name("city.backup.qgs"), "city");
    }
}
