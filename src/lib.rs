pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{layout::ProjectLayout, portfolio_config::PortfolioConfig, storage::LocalStorage};
pub use crate::core::{
    converter::CommandConverter,
    engine::PortfolioEngine,
    injector::{HtmlInjector, InjectorOptions},
    series::SeriesBuilder,
};
pub use crate::utils::error::{PortfolioError, Result};
