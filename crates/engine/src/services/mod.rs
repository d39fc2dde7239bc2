pub mod group_builder;
pub mod ordering;
pub mod sinclair;
pub mod weight_class;

pub use group_builder::{GroupBuilder, SinclairGroupBuilder, TotalWeightGroupBuilder};
pub use ordering::OrderingStrategy;
