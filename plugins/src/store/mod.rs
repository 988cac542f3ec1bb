pub mod notion;

pub use notion::{DatabaseQuery, NotionTaskSource};
