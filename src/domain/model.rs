use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Row capacities as written in the config; the page interprets them.
pub type RowLayout = Vec<serde_json::Value>;

/// One photo collection as the page consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub horizontal: Vec<String>,
    pub rows: RowLayout,
    pub vertical: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub active: String,
    pub series: IndexMap<String, Series>,
}

/// The value written into the HTML data block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Portfolio(PortfolioData),
    Single(Series),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub converted: usize,
    pub skipped: usize,
}

impl ConversionReport {
    pub fn merge(&mut self, other: ConversionReport) {
        self.converted += other.converted;
        self.skipped += other.skipped;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSummary {
    pub name: String,
    pub horizontal: usize,
    pub vertical: usize,
    pub conversions: ConversionReport,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub html_file: String,
    pub series: Vec<SeriesSummary>,
}
