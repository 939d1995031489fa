use anyhow::Context;
use clap::Parser;
use portfolio_build::utils::logger::{self, LogFormat};
use portfolio_build::utils::validation::Validate;
use portfolio_build::{CliConfig, CommandConverter, HtmlInjector, PortfolioEngine};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(LogFormat::from_flag(config.log_json), config.verbose);

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("error: {}", e.user_friendly_message());
        eprintln!("hint: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let layout = config.layout();
    let converter = CommandConverter::parse(&config.converter)
        .with_context(|| format!("invalid --converter '{}'", config.converter))?;
    let engine = PortfolioEngine::new(layout, converter)
        .with_injector(HtmlInjector::with_marker_id(&config.marker_id));

    tracing::info!("Building portfolio under {}", engine.layout().root.display());

    match engine.run() {
        Ok(summary) => {
            println!("Updated {} in {}", config.marker_id, summary.html_file);
            for series in &summary.series {
                println!(
                    "{}: {} horizontal, {} vertical",
                    series.name, series.horizontal, series.vertical
                );
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Portfolio build failed: {} ({:?})", e, e.category());
            eprintln!("error: {}", e.user_friendly_message());
            eprintln!("hint: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
