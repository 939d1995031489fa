use crate::domain::model::RowLayout;
use crate::utils::error::{PortfolioError, Result};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ACTIVE: &str = "serie_1";
pub const DEFAULT_SERIES_DIR: &str = "images";

/// `rows` entries are kept exactly as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesConfig {
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub rows: Option<RowLayout>,
}

impl SeriesConfig {
    pub fn new(dir: &str, rows: &[u32]) -> Self {
        Self {
            dir: Some(dir.to_string()),
            rows: Some(rows.iter().map(|&row| row.into()).collect()),
        }
    }

    pub fn dir(&self) -> &str {
        self.dir.as_deref().unwrap_or(DEFAULT_SERIES_DIR)
    }

    pub fn rows(&self) -> RowLayout {
        self.rows.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MultiSeriesConfig {
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub series: Option<IndexMap<String, SeriesConfig>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlatConfig {
    #[serde(default)]
    pub rows: Option<RowLayout>,
}

/// Either a set of named series or one implicit series under the images dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioConfig {
    MultiSeries(MultiSeriesConfig),
    Flat(FlatConfig),
}

impl PortfolioConfig {
    /// Reads `path` when it exists, otherwise falls back to the built-in series.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new("<inline>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let parse_error = |source: serde_json::Error| PortfolioError::ConfigParseError {
            path: path.to_path_buf(),
            source,
        };

        let value: serde_json::Value = serde_json::from_str(content).map_err(parse_error)?;
        // serde would also accept a JSON array for a struct
        let Some(obj) = value.as_object() else {
            return Err(parse_error(serde_json::Error::custom(
                "config must be a JSON object",
            )));
        };
        let is_flat =
            obj.contains_key("rows") && !obj.contains_key("series") && !obj.contains_key("active");

        if is_flat {
            let flat = serde_json::from_value(value).map_err(parse_error)?;
            Ok(PortfolioConfig::Flat(flat))
        } else {
            let multi = serde_json::from_value(value).map_err(parse_error)?;
            Ok(PortfolioConfig::MultiSeries(multi))
        }
    }

    /// Configured active series, else the first one, else `serie_1`.
    /// `None` for the flat shape.
    pub fn active_name(&self) -> Option<String> {
        match self {
            PortfolioConfig::MultiSeries(multi) => {
                let configured = multi.active.as_deref().filter(|name| !name.is_empty());
                let first = multi.series.as_ref().and_then(|s| s.keys().next());
                Some(
                    configured
                        .or(first.map(String::as_str))
                        .unwrap_or(DEFAULT_ACTIVE)
                        .to_string(),
                )
            }
            PortfolioConfig::Flat(_) => None,
        }
    }

    /// Named series in file order; empty for the flat shape.
    pub fn series(&self) -> Vec<(&str, &SeriesConfig)> {
        match self {
            PortfolioConfig::MultiSeries(multi) => multi
                .series
                .iter()
                .flatten()
                .map(|(name, series)| (name.as_str(), series))
                .collect(),
            PortfolioConfig::Flat(_) => Vec::new(),
        }
    }
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        let mut series = IndexMap::new();
        series.insert(
            "serie_1".to_string(),
            SeriesConfig::new("images", &[4, 3, 4, 3, 2, 4, 4, 2, 1, 3, 3]),
        );
        series.insert(
            "serie_2".to_string(),
            SeriesConfig::new("images/serie2", &[4, 3, 4, 3, 2, 4, 4, 4]),
        );

        PortfolioConfig::MultiSeries(MultiSeriesConfig {
            active: Some(DEFAULT_ACTIVE.to_string()),
            series: Some(series),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = PortfolioConfig::load(temp_dir.path().join("portfolio.config.json")).unwrap();

        assert_eq!(config.active_name().as_deref(), Some("serie_1"));
        let series = config.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[1].0, "serie_2");
        assert_eq!(series[1].1.dir(), "images/serie2");
        assert_eq!(
            series[1].1.rows(),
            vec![json!(4), json!(3), json!(4), json!(3), json!(2), json!(4), json!(4), json!(4)]
        );
    }

    #[test]
    fn test_parse_multi_series_keeps_file_order() {
        let config = PortfolioConfig::from_json_str(
            r#"{
  "series": {
    "zeta": {"dir": "images/zeta", "rows": [1]},
    "alpha": {"rows": null}
  }
}"#,
        )
        .unwrap();

        assert_eq!(config.active_name().as_deref(), Some("zeta"));
        let series = config.series();
        assert_eq!(series[0].0, "zeta");
        assert_eq!(series[1].0, "alpha");
        assert_eq!(series[1].1.dir(), DEFAULT_SERIES_DIR);
        assert!(series[1].1.rows().is_empty());
    }

    #[test]
    fn test_rows_pass_through_unchanged() {
        let config = PortfolioConfig::from_json_str(
            r#"{"series": {"odd": {"rows": [-1, 2.5, "wide", 3]}}}"#,
        )
        .unwrap();

        assert_eq!(
            config.series()[0].1.rows(),
            vec![json!(-1), json!(2.5), json!("wide"), json!(3)]
        );
    }

    #[test]
    fn test_dir_is_not_rewritten() {
        let series = SeriesConfig::new("images/${SERIES}", &[]);
        assert_eq!(series.dir(), "images/${SERIES}");
    }

    #[test]
    fn test_parse_flat_shape() {
        let config = PortfolioConfig::from_json_str(r#"{"rows": [3, 2]}"#).unwrap();

        match &config {
            PortfolioConfig::Flat(flat) => {
                assert_eq!(flat.rows, Some(vec![json!(3), json!(2)]))
            }
            other => panic!("expected flat config, got {:?}", other),
        }
        assert_eq!(config.active_name(), None);
        assert!(config.series().is_empty());
    }

    #[test]
    fn test_empty_active_falls_back() {
        let config = PortfolioConfig::from_json_str(r#"{"active": "", "series": {}}"#).unwrap();
        assert_eq!(config.active_name().as_deref(), Some(DEFAULT_ACTIVE));
    }

    #[test]
    fn test_non_object_config_is_rejected() {
        for content in ["[]", "[null, {}]", "3", "\"serie_1\"", "null"] {
            let err = PortfolioConfig::from_json_str(content).unwrap_err();
            assert!(
                matches!(err, PortfolioError::ConfigParseError { .. }),
                "{} should be rejected, got {:?}",
                content,
                err
            );
        }
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{\"series\": ").unwrap();

        let err = PortfolioConfig::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, PortfolioError::ConfigParseError { .. }));
    }
}
