use std::path::PathBuf;

use clap::{Parser, Subcommand};
use resxlate::settings::DEFAULT_SETTINGS_FILE;
use resxlate_cli::{
    SeedCommand, TranslateCommand, logging::init_logging, run_seed_command, run_translate_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy the default strings.xml into every locale folder that has none yet,
    /// to prepare for a first complete translation.
    Seed {
        /// The base res folder containing values and values-* folders
        base_path: PathBuf,

        /// Comma separated locale qualifiers to skip, e.g. ar,pt-rBR
        #[arg(short, long, value_delimiter = ',')]
        ignore: Vec<String>,

        /// Overwrite locale files that already exist
        #[arg(long)]
        force: bool,

        #[arg(short, long)]
        verbose: bool,
    },

    /// Translate strings of the default strings.xml into every locale folder.
    Translate {
        /// The base res folder containing values and values-* folders
        base_path: PathBuf,

        /// Comma separated keys to translate, e.g. app_name,loading_msg.
        /// Every translatable key is translated when omitted.
        #[arg(value_delimiter = ',')]
        keys: Vec<String>,

        /// Comma separated locale qualifiers to skip, e.g. ar,pt-rBR
        #[arg(short, long, value_delimiter = ',')]
        ignore: Vec<String>,

        /// Settings file with the translation API key
        #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
        settings: PathBuf,

        /// Number of locales translated in parallel
        #[arg(short, long, default_value_t = 1)]
        jobs: usize,

        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let args = Args::parse();

    let result = match args.commands {
        Commands::Seed {
            base_path,
            ignore,
            force,
            verbose,
        } => {
            init_logging(verbose);
            run_seed_command(SeedCommand {
                base_path,
                ignore,
                force,
                verbose,
            })
        }
        Commands::Translate {
            base_path,
            keys,
            ignore,
            settings,
            jobs,
            verbose,
        } => {
            init_logging(verbose);
            run_translate_command(TranslateCommand {
                base_path,
                keys: keys.into_iter().filter(|k| !k.trim().is_empty()).collect(),
                ignore,
                settings,
                jobs,
                verbose,
            })
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
