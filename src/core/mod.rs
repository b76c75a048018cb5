pub mod charts;
pub mod document;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{CrimeDataset, RenderedChart};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
