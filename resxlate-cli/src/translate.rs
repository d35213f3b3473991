use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use resxlate::{
    Error, GoogleTranslator, IgnoreSet, LocaleTarget, MergeReport, Settings, StringTable,
    TranslationClient, Translator, enumerate_locales, load_defaults, merge_file,
};
use resxlate::locale::RESOURCE_FILE;
use tracing::{info, warn};

use crate::validation::{ValidationContext, validate_context};

#[derive(Debug, Clone)]
pub struct TranslateCommand {
    pub base_path: PathBuf,
    /// Keys to translate; empty means every translatable key.
    pub keys: Vec<String>,
    pub ignore: Vec<String>,
    pub settings: PathBuf,
    pub jobs: usize,
    pub verbose: bool,
}

/// Result of translating and merging one locale folder.
#[derive(Debug)]
pub struct LocaleOutcome {
    pub target: LocaleTarget,
    pub result: Result<MergeReport, Error>,
}

/// Translate `defaults` for one locale and merge the result into its file.
/// The file is only written when every key translated successfully.
pub fn translate_locale<T: Translator>(
    client: &TranslationClient<T>,
    defaults: &StringTable,
    target: &LocaleTarget,
) -> Result<MergeReport, Error> {
    let language = target.service_code();
    info!(locale = %target.qualifier, %language, "translating");
    let translated = client.translate_table(defaults, &language)?;
    merge_file(&target.path.join(RESOURCE_FILE), &translated)
}

/// Process every target on a pool of `jobs` threads. Each locale is
/// independent; a failure in one does not stop the others.
pub fn translate_locales<T: Translator>(
    client: &TranslationClient<T>,
    defaults: &StringTable,
    targets: Vec<LocaleTarget>,
    jobs: usize,
) -> Result<Vec<LocaleOutcome>, String> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()
        .map_err(|e| format!("Failed to start worker pool: {}", e))?;

    Ok(pool.install(|| {
        targets
            .into_par_iter()
            .map(|target| {
                let result = translate_locale(client, defaults, &target);
                LocaleOutcome { target, result }
            })
            .collect()
    }))
}

/// Run the translate command.
pub fn run_translate_command(cmd: TranslateCommand) -> Result<(), String> {
    let started = Instant::now();

    validate_context(
        &ValidationContext::new(&cmd.base_path)
            .with_settings_file(&cmd.settings)
            .with_jobs(cmd.jobs),
    )?;

    // Settings and defaults must be valid before any network or file work.
    let settings = Settings::load(&cmd.settings).map_err(|e| e.to_string())?;
    if cmd.verbose {
        if cmd.keys.is_empty() {
            println!("Getting default values for all translatable keys...");
        } else {
            println!("Getting default values for {}...", cmd.keys.join(","));
        }
    }
    let defaults = load_defaults(&cmd.base_path, &cmd.keys).map_err(|e| e.to_string())?;
    if defaults.is_empty() {
        warn!("no translatable strings selected");
        println!("Nothing to translate.");
        return Ok(());
    }

    let ignore = IgnoreSet::with_extra(&cmd.ignore);
    if cmd.verbose && !cmd.ignore.is_empty() {
        println!("Ignoring languages: {}", cmd.ignore.join(","));
    }
    let targets = enumerate_locales(&cmd.base_path, &ignore).map_err(|e| e.to_string())?;
    let total = targets.len();
    if cmd.verbose {
        println!("Translating {} strings into {} locales", defaults.len(), total);
    }

    let translator = GoogleTranslator::from_settings(&settings.translate).map_err(|e| e.to_string())?;
    let client = TranslationClient::new(translator);
    let outcomes = translate_locales(&client, &defaults, targets, cmd.jobs)?;

    let failed = print_summary(&outcomes, total, cmd.verbose);

    if cmd.verbose {
        println!("------------------------------------------------");
        println!(
            "--- Execution time {:.2} seconds ---",
            started.elapsed().as_secs_f64()
        );
    }

    if failed > 0 {
        return Err(format!("{} of {} locales failed", failed, total));
    }
    Ok(())
}

fn print_summary(outcomes: &[LocaleOutcome], total: usize, verbose: bool) -> usize {
    let mut failed = 0;
    for (i, outcome) in outcomes.iter().enumerate() {
        match &outcome.result {
            Ok(report) => {
                println!(
                    "✅ {}: {} updated, {} added",
                    outcome.target.qualifier,
                    report.updated.len(),
                    report.inserted.len()
                );
                if verbose && !report.skipped.is_empty() {
                    println!(
                        "   skipped non-translatable: {}",
                        report.skipped.join(", ")
                    );
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("❌ {}: {}", outcome.target.qualifier, e);
            }
        }
        if verbose {
            println!("=> {} out of {} files processed.", i + 1, total);
        }
    }
    failed
}
