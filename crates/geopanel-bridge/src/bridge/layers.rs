//! Service and database layer operations.

use std::path::Path;

use tracing::{debug, warn};

use crate::composite::{LayerEpsg, PortSsl, TableFilter};
use crate::descriptor::{SourceDescriptor, SourceKind};
use crate::errors::BridgeError;
use crate::fetch::style_file_name;

impl super::Bridge {
    /// Add a web map service to the host project.
    ///
    /// The URL is split at its first query-string delimiter. A query
    /// with exactly one `key=value` pair is lifted into a descriptor
    /// parameter; longer query strings are logged and left undecomposed
    /// (a known limitation of the panel contract, kept deliberately).
    /// Basic authentication rides on the session credentials; the
    /// `protocol` marker is logged but not otherwise interpreted yet.
    pub fn add_web_map_layer(
        &mut self,
        name: &str,
        url: &str,
        layers: &str,
        mime_type: &str,
        epsg_code: &str,
        protocol: &str,
    ) -> Result<(), BridgeError> {
        debug!(name, url, layers, mime_type, epsg_code, protocol, "addWebMapLayer");

        let mut descriptor = SourceDescriptor::new(SourceKind::WebMap);
        let effective_url = match url.split_once('?') {
            None => url.to_owned(),
            Some((base, query)) => {
                let pair: Vec<&str> = query.split('=').collect();
                if let [key, value] = pair[..] {
                    descriptor.set_param(key, value);
                } else {
                    warn!(query, "query string with more than one parameter is not decomposed");
                }
                format!("{base}?")
            }
        };
        descriptor.set_param("url", &effective_url);

        for layer in layers.split(',') {
            descriptor.set_param("layers", layer);
        }

        // An empty styles entry is still required by the service contract.
        descriptor
            .set_param("styles", "")
            .set_param("format", mime_type)
            .set_param("crs", format!("EPSG:{epsg_code}"))
            .set_param("IgnoreGetMapUrl", "1")
            .set_param("username", self.session_user.clone())
            .set_param("password", self.session_password.clone());

        let source = descriptor.into_source()?;
        debug!(source, "web map source");

        if self
            .registry
            .add_raster_layer(&source, name, SourceKind::WebMap.provider())
        {
            Ok(())
        } else {
            Err(BridgeError::RegistryRejected {
                kind: "WMS",
                name: name.to_owned(),
                detail: String::new(),
            })
        }
    }

    /// Add a web feature service layer and apply a locally available
    /// style file after insertion.
    pub fn add_feature_layer(
        &mut self,
        name: &str,
        url: &str,
        layer: &str,
        epsg_code: &str,
        style_path: &Path,
    ) -> Result<(), BridgeError> {
        debug!(name, url, layer, epsg_code, style = %style_path.display(), "addFeatureLayer");

        let mut descriptor = SourceDescriptor::new(SourceKind::FeatureService);
        descriptor
            .set_param("url", url)
            .set_param("typename", layer)
            .set_param("srsname", format!("EPSG:{epsg_code}"))
            .set_param("version", "auto");
        let source = descriptor.into_source()?;

        if self
            .registry
            .add_vector_layer(&source, name, SourceKind::FeatureService.provider())
        {
            if !self.registry.apply_layer_style(name, style_path) {
                warn!(name, style = %style_path.display(), "could not apply the layer style");
            }
            Ok(())
        } else {
            Err(BridgeError::RegistryRejected {
                kind: "WFS",
                name: name.to_owned(),
                detail: String::new(),
            })
        }
    }

    /// Variant of [`Self::add_feature_layer`] that first downloads the
    /// style file named by `style_url` into the download folder.
    pub fn add_feature_layer_with_style(
        &mut self,
        name: &str,
        url: &str,
        layer_epsg: &str,
        style_url: &str,
    ) -> Result<(), BridgeError> {
        let parsed = LayerEpsg::parse(layer_epsg)?;
        self.ensure_download_folder()?;
        let style_path = self.download_file(style_url, &style_file_name(style_url))?;
        self.add_feature_layer(name, url, &parsed.layer, &parsed.epsg_code, &style_path)
    }

    /// Add a spatial database table with its downloaded style.
    ///
    /// `port_ssl` packs "port|sslmode" and `table_filter` packs
    /// "table|filter". The connection authenticates with the session
    /// credentials; the positional `username` is recorded for
    /// diagnostics only.
    #[allow(clippy::too_many_arguments)]
    pub fn add_database_table_with_style(
        &mut self,
        name: &str,
        host: &str,
        port_ssl: &str,
        database_name: &str,
        username: &str,
        schema: &str,
        table_filter: &str,
        geom_col: &str,
        id_col: &str,
        style_url: &str,
    ) -> Result<(), BridgeError> {
        let port_ssl = PortSsl::parse(port_ssl)?;
        let table_filter = TableFilter::parse(table_filter)?;
        debug!(
            name,
            host,
            port = port_ssl.port,
            ssl = port_ssl.ssl_mode.as_str(),
            database_name,
            username,
            schema,
            table = table_filter.table,
            sql_filter = table_filter.sql_filter,
            geom_col,
            id_col,
            style_url,
            "addDatabaseTableWithStyle"
        );

        self.ensure_download_folder()?;
        let style_path = self.download_file(style_url, &style_file_name(style_url))?;

        let mut descriptor = SourceDescriptor::new(SourceKind::DatabaseTable);
        descriptor
            .set_param("host", host)
            .set_param("port", &port_ssl.port)
            .set_param("sslmode", port_ssl.ssl_mode.as_str())
            .set_param("dbname", database_name)
            .set_param("user", self.session_user.clone())
            .set_param("password", self.session_password.clone())
            .set_param("schema", schema)
            .set_param("table", &table_filter.table)
            .set_param("key", id_col)
            .set_param("sql", &table_filter.sql_filter);
        // The geometry column is optional: geometry-less tables omit the
        // key entirely and are still submitted.
        if !geom_col.is_empty() {
            descriptor.set_param("geomcolumn", geom_col);
        }

        let source = descriptor.into_source()?;

        if self
            .registry
            .add_vector_layer(&source, name, SourceKind::DatabaseTable.provider())
        {
            if !self.registry.apply_layer_style(name, &style_path) {
                warn!(name, style = %style_path.display(), "could not apply the layer style");
            }
            Ok(())
        } else {
            let detail = format!(
                "\nhost: {host}\
                 \nport: {}\
                 \ndbname: {database_name}\
                 \nuser: {}\
                 \nssl: {}\
                 \nschema: {schema}\
                 \ntable: {}\
                 \ngeom_col: {geom_col}\
                 \nid_col: {id_col}\
                 \nstyle: {}\
                 \nsql_filter: {}",
                port_ssl.port,
                self.session_user,
                port_ssl.ssl_mode.as_str(),
                table_filter.table,
                style_path.display(),
                table_filter.sql_filter,
            );
            Err(BridgeError::RegistryRejected {
                kind: "database table",
                name: name.to_owned(),
                detail,
            })
        }
    }
}
