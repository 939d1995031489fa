use crate::utils::error::Result;
use std::path::Path;

/// Turns one raw camera file into a JPEG at `output`.
pub trait RawToJpegConverter {
    fn convert(&self, input: &Path, output: &Path) -> Result<()>;
}

impl<C: RawToJpegConverter + ?Sized> RawToJpegConverter for &C {
    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        (**self).convert(input, output)
    }
}

impl<C: RawToJpegConverter + ?Sized> RawToJpegConverter for Box<C> {
    fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        (**self).convert(input, output)
    }
}

pub trait DocumentStore {
    fn read_document(&self) -> Result<String>;
    fn write_document(&self, content: &str) -> Result<()>;
    fn describe(&self) -> String;
}
