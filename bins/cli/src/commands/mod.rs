//! Command handlers.

mod check;
mod generate;
mod matching;

pub use check::run_check;
pub use generate::run_generate;
pub use matching::run_match;
