pub mod fallback;

mod extract;
mod model;

pub use extract::{Extractor, TaskSummary};
pub use model::{PropertyValue, TaskRecord};
