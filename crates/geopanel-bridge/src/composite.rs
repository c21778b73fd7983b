//! Pipe-delimited composite call parameters.
//!
//! Several operations pack two logical values into one string parameter
//! using `|` as delimiter ("5432|require", "parcels|owner = 'x'",
//! "roads|32632"). The number of parts must exactly match the expected
//! arity for the field; a mismatch is a caller-input error, never a
//! silent default.

use crate::descriptor::SslMode;
use crate::errors::BridgeError;

pub const COMPOSITE_DELIMITER: char = '|';

/// Split `raw` into exactly `N` parts, or fail with the offending
/// field name and the observed arity.
pub fn split_exact<const N: usize>(
    field: &'static str,
    raw: &str,
) -> Result<[String; N], BridgeError> {
    let parts: Vec<String> = raw
        .split(COMPOSITE_DELIMITER)
        .map(str::to_owned)
        .collect();
    let got = parts.len();
    parts.try_into().map_err(|_| BridgeError::CompositeArity {
        field,
        expected: N,
        got,
    })
}

/// The "port|sslmode" composite of the database-table operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSsl {
    pub port: String,
    pub ssl_mode: SslMode,
}

impl PortSsl {
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        let [port, ssl] = split_exact("port|sslmode", raw)?;
        Ok(Self {
            port,
            ssl_mode: SslMode::from_label(&ssl),
        })
    }
}

/// The "table|filter" composite of the database-table operation. The
/// filter part may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    pub table: String,
    pub sql_filter: String,
}

impl TableFilter {
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        let [table, sql_filter] = split_exact("table|filter", raw)?;
        Ok(Self { table, sql_filter })
    }
}

/// The "layer|epsg" composite of the styled feature-layer operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerEpsg {
    pub layer: String,
    pub epsg_code: String,
}

impl LayerEpsg {
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        let [layer, epsg_code] = split_exact("layer|epsg", raw)?;
        Ok(Self { layer, epsg_code })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_ssl_round_trip() {
        let parsed = PortSsl::parse("5432|require");
        assert!(parsed.is_ok_and(|p| p.port == "5432" && p.ssl_mode == SslMode::Require));
    }

    #[test]
    fn unrecognized_ssl_label_defaults_to_allow() {
        let parsed = PortSsl::parse("5432|bogus");
        assert!(parsed.is_ok_and(|p| p.ssl_mode == SslMode::Allow));
    }

    #[test]
    fn missing_delimiter_is_an_arity_error() {
        let parsed = PortSsl::parse("5432");
        assert!(matches!(
            parsed,
            Err(BridgeError::CompositeArity {
                field: "port|sslmode",
                expected: 2,
                got: 1,
            })
        ));
    }

    #[test]
    fn extra_parts_are_an_arity_error() {
        let parsed = TableFilter::parse("roads|a=1|b=2");
        assert!(matches!(
            parsed,
            Err(BridgeError::CompositeArity {
                expected: 2,
                got: 3,
                ..
            })
        ));
    }

    #[test]
    fn table_filter_keeps_empty_filter() {
        let parsed = TableFilter::parse("parcels|");
        assert!(parsed.is_ok_and(|t| t.table == "parcels" && t.sql_filter.is_empty()));
    }

    #[test]
    fn layer_epsg_splits_in_declared_order() {
        let parsed = LayerEpsg::parse("roads|32632");
        assert!(parsed.is_ok_and(|l| l.layer == "roads" && l.epsg_code == "32632"));
    }
}
