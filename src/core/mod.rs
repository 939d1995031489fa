pub mod converter;
pub mod engine;
pub mod injector;
pub mod lister;
pub mod series;

pub use crate::domain::model::{ConversionReport, Payload, PortfolioData, Series};
pub use crate::domain::ports::{DocumentStore, RawToJpegConverter};
pub use crate::utils::error::Result;
