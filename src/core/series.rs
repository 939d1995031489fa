use crate::config::layout::ProjectLayout;
use crate::core::converter::convert_raw_files;
use crate::core::lister::list_images;
use crate::core::RawToJpegConverter;
use crate::domain::model::{ConversionReport, RowLayout, Series};
use crate::utils::error::{PortfolioError, Result};
use std::fs;
use std::path::{Component, Path};

pub const HORIZONTAL_DIR: &str = "hor";
pub const VERTICAL_DIR: &str = "vert";

pub struct SeriesBuilder<'a, C: RawToJpegConverter> {
    layout: &'a ProjectLayout,
    converter: &'a C,
}

impl<'a, C: RawToJpegConverter> SeriesBuilder<'a, C> {
    pub fn new(layout: &'a ProjectLayout, converter: &'a C) -> Self {
        Self { layout, converter }
    }

    pub fn build(&self, dir: &Path, rows: RowLayout) -> Result<(Series, ConversionReport)> {
        let hor_dir = dir.join(HORIZONTAL_DIR);
        let vert_dir = dir.join(VERTICAL_DIR);
        fs::create_dir_all(&hor_dir)?;
        fs::create_dir_all(&vert_dir)?;

        let mut report = convert_raw_files(&hor_dir, self.converter)?;
        report.merge(convert_raw_files(&vert_dir, self.converter)?);

        let prefix = self.prefix_for(dir)?;
        let horizontal = list_images(&hor_dir)?
            .into_iter()
            .map(|name| format!("{}{}/{}", prefix, HORIZONTAL_DIR, name))
            .collect();
        let vertical = list_images(&vert_dir)?
            .into_iter()
            .map(|name| format!("{}{}/{}", prefix, VERTICAL_DIR, name))
            .collect();

        Ok((
            Series {
                horizontal,
                rows,
                vertical,
            },
            report,
        ))
    }

    /// `""` for the images dir itself, `"serie2/"` for `images/serie2`.
    fn prefix_for(&self, dir: &Path) -> Result<String> {
        let outside = || PortfolioError::SeriesOutsideImagesError {
            dir: dir.to_path_buf(),
            images_dir: self.layout.images_dir.clone(),
        };

        let dir = dir.canonicalize()?;
        let images_dir = self.layout.images_dir.canonicalize().map_err(|_| outside())?;
        let relative = dir.strip_prefix(&images_dir).map_err(|_| outside())?;

        let parts: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("{}/", parts.join("/")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct TouchConverter {
        calls: AtomicUsize,
    }

    impl RawToJpegConverter for TouchConverter {
        fn convert(&self, _input: &Path, output: &Path) -> Result<()> {
            fs::write(output, b"jpeg")?;
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_builds_sorted_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ProjectLayout::from_root(temp_dir.path());
        let hor = layout.images_dir.join("hor");
        let vert = layout.images_dir.join("vert");
        fs::create_dir_all(&hor).unwrap();
        fs::create_dir_all(&vert).unwrap();
        fs::write(hor.join("b.JPG"), b"x").unwrap();
        fs::write(hor.join("a.JPG"), b"x").unwrap();
        fs::write(vert.join("c.JPG"), b"x").unwrap();

        let converter = TouchConverter::default();
        let builder = SeriesBuilder::new(&layout, &converter);
        let (series, report) = builder.build(&layout.images_dir, vec![serde_json::json!(2)]).unwrap();

        assert_eq!(
            serde_json::to_value(&series).unwrap(),
            serde_json::json!({
                "horizontal": ["hor/a.JPG", "hor/b.JPG"],
                "rows": [2],
                "vertical": ["vert/c.JPG"]
            })
        );
        assert_eq!(report, ConversionReport::default());
    }

    #[test]
    fn test_sub_series_gets_prefix_and_conversions() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ProjectLayout::from_root(temp_dir.path());
        let dir = layout.images_dir.join("serie2");
        fs::create_dir_all(dir.join("vert")).unwrap();
        fs::write(dir.join("vert").join("p.CR3"), b"raw").unwrap();

        let converter = TouchConverter::default();
        let builder = SeriesBuilder::new(&layout, &converter);
        let (series, report) = builder.build(&dir, vec![serde_json::json!(1), serde_json::json!(1)]).unwrap();

        assert!(dir.join("hor").is_dir());
        assert!(series.horizontal.is_empty());
        assert_eq!(series.vertical, vec!["serie2/vert/p.JPG"]);
        assert_eq!(series.rows, vec![serde_json::json!(1), serde_json::json!(1)]);
        assert_eq!(report.converted, 1);
        assert_eq!(converter.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dir_outside_images_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ProjectLayout::from_root(temp_dir.path());
        fs::create_dir_all(&layout.images_dir).unwrap();

        let converter = TouchConverter::default();
        let builder = SeriesBuilder::new(&layout, &converter);
        let err = builder
            .build(&temp_dir.path().join("elsewhere"), vec![])
            .unwrap_err();

        assert!(matches!(err, PortfolioError::SeriesOutsideImagesError { .. }));
    }
}
