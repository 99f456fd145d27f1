//! Pure transformations for transfer operations.
//!
//! Everything in this module is free of I/O: redirect classification,
//! percent arithmetic, progress throttling, and output plausibility checks.

mod progress;
mod redirect;
mod validation;

pub use progress::{ProgressGate, percent};
pub use redirect::is_redirect;
pub use validation::artifact_large_enough;
