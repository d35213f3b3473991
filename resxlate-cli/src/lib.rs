//! CLI library for testing purposes

pub mod logging;
pub mod seed;
pub mod translate;
pub mod validation;

pub use seed::{SeedCommand, run_seed_command};
pub use translate::{TranslateCommand, run_translate_command};
