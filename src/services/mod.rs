pub mod capture;
pub mod resolver;

pub use capture::{AnalysisSource, RandomAnalysisSource};
pub use resolver::resolve;
