use crate::config::layout::ProjectLayout;
use crate::config::portfolio_config::PortfolioConfig;
use crate::config::storage::LocalStorage;
use crate::core::injector::HtmlInjector;
use crate::core::series::SeriesBuilder;
use crate::core::{DocumentStore, RawToJpegConverter};
use crate::domain::model::{Payload, PortfolioData, RunSummary, SeriesSummary};
use crate::utils::error::Result;
use indexmap::IndexMap;

/// Summary name used for the flat config's implicit series.
pub const IMPLICIT_SERIES: &str = "images";

pub struct PortfolioEngine<C: RawToJpegConverter> {
    layout: ProjectLayout,
    converter: C,
    injector: HtmlInjector,
}

impl<C: RawToJpegConverter> PortfolioEngine<C> {
    pub fn new(layout: ProjectLayout, converter: C) -> Self {
        Self {
            layout,
            converter,
            injector: HtmlInjector::default(),
        }
    }

    pub fn with_injector(mut self, injector: HtmlInjector) -> Self {
        self.injector = injector;
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Config -> series -> payload, without touching the HTML file.
    pub fn collect(&self, config: &PortfolioConfig) -> Result<(Payload, Vec<SeriesSummary>)> {
        let builder = SeriesBuilder::new(&self.layout, &self.converter);
        let mut summaries = Vec::new();

        let payload = match config {
            PortfolioConfig::Flat(flat) => {
                let rows = flat.rows.clone().unwrap_or_default();
                let (series, conversions) = builder.build(&self.layout.images_dir, rows)?;
                summaries.push(SeriesSummary {
                    name: IMPLICIT_SERIES.to_string(),
                    horizontal: series.horizontal.len(),
                    vertical: series.vertical.len(),
                    conversions,
                });
                Payload::Single(series)
            }
            PortfolioConfig::MultiSeries(_) => {
                let active = config.active_name().unwrap_or_default();
                let mut series_data = IndexMap::new();

                for (name, series_config) in config.series() {
                    let dir = self.layout.resolve_dir(series_config.dir());
                    tracing::info!("Building series {} from {}", name, dir.display());

                    let (series, conversions) = builder.build(&dir, series_config.rows())?;
                    tracing::debug!(
                        "Series {}: {} converted, {} up to date",
                        name,
                        conversions.converted,
                        conversions.skipped
                    );
                    summaries.push(SeriesSummary {
                        name: name.to_string(),
                        horizontal: series.horizontal.len(),
                        vertical: series.vertical.len(),
                        conversions,
                    });
                    series_data.insert(name.to_string(), series);
                }

                if !series_data.contains_key(&active) {
                    tracing::warn!("Active series '{}' is not configured", active);
                }

                Payload::Portfolio(PortfolioData {
                    active,
                    series: series_data,
                })
            }
        };

        Ok((payload, summaries))
    }

    pub fn run(&self) -> Result<RunSummary> {
        let config = PortfolioConfig::load(&self.layout.config_path)?;
        self.run_with_config(&config)
    }

    pub fn run_with_config(&self, config: &PortfolioConfig) -> Result<RunSummary> {
        let (payload, series) = self.collect(config)?;

        let store = LocalStorage::new(&self.layout.html_path);
        self.injector.inject(&store, &payload)?;
        tracing::info!("Injected {} series into {}", series.len(), store.describe());

        Ok(RunSummary {
            html_file: store.describe(),
            series,
        })
    }
}
