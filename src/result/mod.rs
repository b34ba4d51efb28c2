pub mod outcome;

pub use outcome::{FailureStatus, Outcome, SuccessStatus};
