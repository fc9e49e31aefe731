pub mod aggregator;
pub mod catalog;
pub mod etl;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod roster;
pub mod sales;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{AggregationResult, SourceData};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
