pub mod aggregate;
pub mod buckets;
pub mod charts;
pub mod loader;
pub mod pipelines;
pub mod records;
