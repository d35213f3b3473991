use std::path::PathBuf;

use resxlate::{IgnoreSet, SeedOptions, seed_locales};
use tracing::info;

use crate::validation::{ValidationContext, validate_context};

#[derive(Debug, Clone)]
pub struct SeedCommand {
    pub base_path: PathBuf,
    pub ignore: Vec<String>,
    pub force: bool,
    pub verbose: bool,
}

/// Run the seed command: copy the default strings.xml into every locale
/// folder that does not have one yet.
pub fn run_seed_command(cmd: SeedCommand) -> Result<(), String> {
    validate_context(&ValidationContext::new(&cmd.base_path))?;

    let ignore = IgnoreSet::with_extra(&cmd.ignore);
    if cmd.verbose && !cmd.ignore.is_empty() {
        println!("Ignoring languages: {}", cmd.ignore.join(","));
    }
    info!(base = %cmd.base_path.display(), force = cmd.force, "seeding locale folders");

    let options = SeedOptions {
        ignore,
        force: cmd.force,
    };
    let report = seed_locales(&cmd.base_path, &options).map_err(|e| e.to_string())?;

    if cmd.verbose {
        for path in &report.seeded {
            println!("Copying to file: {}", path.display());
        }
        for path in &report.existing {
            println!("Already present, skipped: {}", path.display());
        }
        println!("==============================================");
        println!("Copied {} files.", report.seeded.len());
    }
    Ok(())
}
