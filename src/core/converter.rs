use crate::core::RawToJpegConverter;
use crate::domain::model::ConversionReport;
use crate::utils::error::{PortfolioError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::SystemTime;

pub const RAW_EXTENSION: &str = "CR3";
pub const JPEG_EXTENSION: &str = "JPG";

/// macOS `sips`, the default backend.
pub const SIPS_TEMPLATE: &str = "sips -s format jpeg {input} --out {output}";

/// Runs an external program once per file, e.g. `magick {input} {output}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl CommandConverter {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn sips() -> Self {
        Self::new(
            "sips",
            ["-s", "format", "jpeg", "{input}", "--out", "{output}"],
        )
    }

    /// Splits a template on whitespace; the first word is the program.
    pub fn parse(template: &str) -> Result<Self> {
        let mut words = template.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| PortfolioError::InvalidArgumentError {
                field: "converter".to_string(),
                value: template.to_string(),
                reason: "Command cannot be empty".to_string(),
            })?;
        Ok(Self::new(program, words))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn args_for(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace("{input}", &input).replace("{output}", &output))
            .collect()
    }
}

impl RawToJpegConverter for CommandConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        let args = self.args_for(input, output);
        tracing::debug!("Running {} {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| PortfolioError::ConversionSpawnError {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PortfolioError::ConversionFailedError {
                input: input.to_path_buf(),
                status,
            });
        }

        Ok(())
    }
}

/// Files directly in `folder` whose extension is exactly `extension`, sorted by name.
pub(crate) fn files_with_extension(folder: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        // follows symlinks, like a shell glob would
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn modified(path: &Path) -> Result<SystemTime> {
    Ok(fs::metadata(path)?.modified()?)
}

fn is_up_to_date(raw: &Path, jpeg: &Path) -> Result<bool> {
    if !jpeg.exists() {
        return Ok(false);
    }
    Ok(modified(jpeg)? >= modified(raw)?)
}

/// Converts every `.CR3` in `folder` whose `.JPG` sibling is missing or older.
pub fn convert_raw_files<C: RawToJpegConverter>(
    folder: &Path,
    converter: &C,
) -> Result<ConversionReport> {
    let mut report = ConversionReport::default();

    for raw in files_with_extension(folder, RAW_EXTENSION)? {
        let jpeg = raw.with_extension(JPEG_EXTENSION);
        if is_up_to_date(&raw, &jpeg)? {
            tracing::debug!("Skipping {}, JPEG is current", raw.display());
            report.skipped += 1;
            continue;
        }

        tracing::info!("Converting {}", raw.display());
        converter.convert(&raw, &jpeg)?;
        report.converted += 1;
    }

    Ok(report)
}
