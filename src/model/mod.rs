pub mod format;
pub mod io;
pub mod result;
pub mod types;

pub use result::{ApplicantResult, CalculationResult};
pub use types::*;
