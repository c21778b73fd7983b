//! Data-source descriptors handed to the layer registry.
//!
//! A descriptor is an ordered key/value parameter set for one of the
//! supported source kinds. It is built incrementally by an operation and
//! serialized into a single connection string with [`SourceDescriptor::into_source`],
//! which validates the kind's required keys first - a partial descriptor
//! is never handed to the registry.

use tracing::warn;

use crate::errors::BridgeError;

/// The source kinds the bridge can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Web map (raster tile) service.
    WebMap,
    /// Web feature service.
    FeatureService,
    /// Spatial database table.
    DatabaseTable,
    /// Local vector file (archive or plain).
    LocalVector,
    /// Local raster file.
    LocalRaster,
}

impl SourceKind {
    /// Provider identifier the registry expects for this kind.
    pub fn provider(self) -> &'static str {
        match self {
            SourceKind::WebMap => "wms",
            SourceKind::FeatureService => "WFS",
            SourceKind::DatabaseTable => "postgres",
            SourceKind::LocalVector => "ogr",
            SourceKind::LocalRaster => "gdal",
        }
    }

    /// Short label used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::WebMap => "WMS",
            SourceKind::FeatureService => "WFS",
            SourceKind::DatabaseTable => "database table",
            SourceKind::LocalVector | SourceKind::LocalRaster => "file",
        }
    }

    /// Keys that must be present and non-empty before submission.
    fn required_keys(self) -> &'static [&'static str] {
        match self {
            SourceKind::WebMap => &["url", "layers", "format", "crs"],
            SourceKind::FeatureService => &["url", "typename", "srsname", "version"],
            SourceKind::DatabaseTable => &["host", "port", "dbname", "schema", "table", "key"],
            SourceKind::LocalVector | SourceKind::LocalRaster => &["path"],
        }
    }

    /// Keys that must be present but may carry an empty value (empty
    /// styles list, anonymous credentials).
    fn expected_keys(self) -> &'static [&'static str] {
        match self {
            SourceKind::WebMap => &["styles", "username", "password"],
            SourceKind::DatabaseTable => &["user", "password"],
            _ => &[],
        }
    }
}

/// SSL request mode for database connections. Unrecognized labels fall
/// back to `Allow`, matching the panel backend's historical contract;
/// the fallback is logged because it usually means a typo upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    Require,
    #[default]
    Allow,
    Disable,
    Prefer,
}

impl SslMode {
    pub fn from_label(label: &str) -> Self {
        match label {
            "require" => SslMode::Require,
            "allow" => SslMode::Allow,
            "disable" => SslMode::Disable,
            "prefer" => SslMode::Prefer,
            other => {
                warn!(label = other, "unrecognized ssl mode, defaulting to allow");
                SslMode::Allow
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SslMode::Require => "require",
            SslMode::Allow => "allow",
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
        }
    }
}

/// Incrementally built connection-parameter set.
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    kind: SourceKind,
    params: Vec<(String, String)>,
}

impl SourceDescriptor {
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            params: Vec::new(),
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Append a parameter. Repeated keys are kept in insertion order
    /// (the web map `layers` key repeats once per layer).
    pub fn set_param(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.params.push((key.to_owned(), value.into()));
        self
    }

    /// First value recorded for `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values recorded for `key`.
    pub fn params_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.params
            .iter()
            .filter(move |(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check the kind's key contract without consuming the descriptor.
    pub fn validate(&self) -> Result<(), BridgeError> {
        for key in self.kind.required_keys().iter().copied() {
            match self.param(key) {
                Some(value) if !value.is_empty() => {}
                _ => {
                    return Err(BridgeError::IncompleteDescriptor {
                        kind: self.kind.label(),
                        key,
                    })
                }
            }
        }
        for key in self.kind.expected_keys().iter().copied() {
            if self.param(key).is_none() {
                return Err(BridgeError::IncompleteDescriptor {
                    kind: self.kind.label(),
                    key,
                });
            }
        }
        Ok(())
    }

    /// Validate and serialize into the connection string the registry
    /// consumes. This is the only way to obtain the source string, so
    /// partial descriptors cannot be submitted.
    pub fn into_source(self) -> Result<String, BridgeError> {
        self.validate()?;
        Ok(match self.kind {
            SourceKind::WebMap | SourceKind::FeatureService => self.encode_query(),
            SourceKind::DatabaseTable => self.encode_conninfo(),
            SourceKind::LocalVector | SourceKind::LocalRaster => {
                self.param("path").unwrap_or_default().to_owned()
            }
        })
    }

    fn encode_query(&self) -> String {
        let parts: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        parts.join("&")
    }

    fn encode_conninfo(&self) -> String {
        let mut out = String::new();
        for key in ["host", "port", "sslmode"] {
            if let Some(value) = self.param(key) {
                push_part(&mut out, &format!("{key}={value}"));
            }
        }
        for key in ["dbname", "user", "password", "key"] {
            if let Some(value) = self.param(key) {
                push_part(&mut out, &format!("{key}='{value}'"));
            }
        }
        let schema = self.param("schema").unwrap_or_default();
        let table = self.param("table").unwrap_or_default();
        push_part(&mut out, &format!("table=\"{schema}\".\"{table}\""));
        if let Some(geom) = self.param("geomcolumn") {
            push_part(&mut out, &format!("({geom})"));
        }
        if let Some(filter) = self.param("sql") {
            push_part(&mut out, &format!("sql={filter}"));
        } else {
            push_part(&mut out, "sql=");
        }
        out
    }
}

fn push_part(out: &mut String, part: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(part);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_map_descriptor() -> SourceDescriptor {
        let mut descriptor = SourceDescriptor::new(SourceKind::WebMap);
        descriptor
            .set_param("url", "https://maps.example/ows?")
            .set_param("layers", "base")
            .set_param("layers", "labels")
            .set_param("styles", "")
            .set_param("format", "image/png")
            .set_param("crs", "EPSG:32632")
            .set_param("IgnoreGetMapUrl", "1")
            .set_param("username", "")
            .set_param("password", "");
        descriptor
    }

    #[test]
    fn web_map_descriptor_with_all_keys_validates() {
        assert!(web_map_descriptor().validate().is_ok());
    }

    #[test]
    fn missing_format_blocks_submission() {
        let mut descriptor = SourceDescriptor::new(SourceKind::WebMap);
        descriptor
            .set_param("url", "https://maps.example/ows?")
            .set_param("layers", "base")
            .set_param("styles", "")
            .set_param("crs", "EPSG:32632")
            .set_param("username", "")
            .set_param("password", "");
        assert!(matches!(
            descriptor.into_source(),
            Err(BridgeError::IncompleteDescriptor { key: "format", .. })
        ));
    }

    #[test]
    fn empty_required_value_blocks_submission() {
        let mut descriptor = SourceDescriptor::new(SourceKind::FeatureService);
        descriptor
            .set_param("url", "https://maps.example/wfs")
            .set_param("typename", "")
            .set_param("srsname", "EPSG:4326")
            .set_param("version", "auto");
        assert!(matches!(
            descriptor.into_source(),
            Err(BridgeError::IncompleteDescriptor { key: "typename", .. })
        ));
    }

    #[test]
    fn repeated_layer_keys_encode_in_order() {
        let source = web_map_descriptor().into_source();
        assert!(source.is_ok_and(|s| s.contains("layers=base&layers=labels")));
    }

    #[test]
    fn conninfo_omits_absent_geometry_column() {
        let mut descriptor = SourceDescriptor::new(SourceKind::DatabaseTable);
        descriptor
            .set_param("host", "db.example")
            .set_param("port", "5432")
            .set_param("sslmode", SslMode::Require.as_str())
            .set_param("dbname", "cadastre")
            .set_param("user", "mrossi")
            .set_param("password", "secret")
            .set_param("schema", "public")
            .set_param("table", "parcels")
            .set_param("key", "gid");
        let source = descriptor.into_source();
        assert!(source.is_ok_and(|s| {
            s.contains("table=\"public\".\"parcels\"") && !s.contains('(')
        }));
    }

    #[test]
    fn conninfo_includes_geometry_column_when_set() {
        let mut descriptor = SourceDescriptor::new(SourceKind::DatabaseTable);
        descriptor
            .set_param("host", "db.example")
            .set_param("port", "5432")
            .set_param("sslmode", SslMode::Allow.as_str())
            .set_param("dbname", "cadastre")
            .set_param("user", "")
            .set_param("password", "")
            .set_param("schema", "public")
            .set_param("table", "parcels")
            .set_param("geomcolumn", "geom")
            .set_param("key", "gid");
        let source = descriptor.into_source();
        assert!(source.is_ok_and(|s| s.contains("(geom)")));
    }

    #[test]
    fn local_source_is_the_bare_path() {
        let mut descriptor = SourceDescriptor::new(SourceKind::LocalVector);
        descriptor.set_param("path", "/data/parcels.zip");
        assert!(descriptor
            .into_source()
            .is_ok_and(|s| s == "/data/parcels.zip"));
    }

    #[test]
    fn ssl_mode_labels_round_trip() {
        for mode in [
            SslMode::Require,
            SslMode::Allow,
            SslMode::Disable,
            SslMode::Prefer,
        ] {
            assert_eq!(SslMode::from_label(mode.as_str()), mode);
        }
    }
}
