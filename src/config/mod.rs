pub mod layout;
pub mod portfolio_config;
pub mod storage;

#[cfg(feature = "cli")]
use crate::config::layout::ProjectLayout;
#[cfg(feature = "cli")]
use crate::core::converter::SIPS_TEMPLATE;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio-build")]
#[command(about = "Convert portfolio photos and refresh the data block in index.html")]
pub struct CliConfig {
    /// Project root holding images/, index.html and portfolio.config.json
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Images base directory (defaults to <root>/images)
    #[arg(long)]
    pub images: Option<String>,

    /// Series config file (defaults to <root>/portfolio.config.json)
    #[arg(long)]
    pub config: Option<String>,

    /// HTML file to update (defaults to <root>/index.html)
    #[arg(long)]
    pub html: Option<String>,

    /// id attribute of the application/json script tag
    #[arg(long, default_value = "portfolio-data")]
    pub marker_id: String,

    /// Raw to JPEG command, with {input} and {output} placeholders
    #[arg(long, default_value = SIPS_TEMPLATE)]
    pub converter: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn layout(&self) -> ProjectLayout {
        let mut layout = ProjectLayout::from_root(&self.root);
        if let Some(images) = &self.images {
            layout.images_dir = layout.root.join(images);
        }
        if let Some(config) = &self.config {
            layout.config_path = layout.root.join(config);
        }
        if let Some(html) = &self.html {
            layout.html_path = layout.root.join(html);
        }
        layout
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("root", &self.root)?;
        for (field, value) in [
            ("images", &self.images),
            ("config", &self.config),
            ("html", &self.html),
        ] {
            if let Some(path) = value {
                validation::validate_path(field, path)?;
            }
        }
        validation::validate_marker_id("marker_id", &self.marker_id)?;
        validation::validate_command_template("converter", &self.converter)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_resolve_against_root() {
        let config = CliConfig::parse_from(["portfolio-build", "--root", "site"]);
        let layout = config.layout();

        assert_eq!(layout.images_dir, PathBuf::from("site/images"));
        assert_eq!(layout.html_path, PathBuf::from("site/index.html"));
        assert_eq!(
            layout.config_path,
            PathBuf::from("site/portfolio.config.json")
        );
        assert_eq!(config.converter, SIPS_TEMPLATE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_and_validation() {
        let config = CliConfig::parse_from([
            "portfolio-build",
            "--html",
            "public/home.html",
            "--converter",
            "magick {input}",
        ]);

        assert_eq!(config.layout().html_path, PathBuf::from("./public/home.html"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_images_override_moves_default_series() {
        let config = CliConfig::parse_from(["portfolio-build", "--images", "public/photos"]);
        let layout = config.layout();

        assert_eq!(
            layout.resolve_dir("images/serie2"),
            PathBuf::from("./public/photos/serie2")
        );
    }
}
