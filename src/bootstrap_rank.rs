pub mod estimator;
pub use estimator::*;

pub mod parser;
pub use parser::*;

pub mod execute;
pub use execute::*;
