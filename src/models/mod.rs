pub mod bracket;
pub mod period;
pub mod transaction;

pub use bracket::*;
pub use period::*;
pub use transaction::*;
