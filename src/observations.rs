pub mod columns;
pub use columns::*;

pub mod table;
pub use table::*;
