pub mod engine;
pub mod rules;
pub mod section;

pub use engine::{classify_line, Classifier};
pub use section::SectionTracker;
