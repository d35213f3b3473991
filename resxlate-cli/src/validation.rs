use std::path::Path;

use resxlate::locale::{DEFAULT_FOLDER, RESOURCE_FILE, default_resource_path};

/// Validation context for the seed and translate commands
pub struct ValidationContext<'a> {
    pub base_path: &'a Path,
    pub settings_file: Option<&'a Path>,
    pub jobs: Option<usize>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(base_path: &'a Path) -> Self {
        Self {
            base_path,
            settings_file: None,
            jobs: None,
        }
    }

    pub fn with_settings_file(mut self, path: &'a Path) -> Self {
        self.settings_file = Some(path);
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }
}

/// Validate the resource base path and its default strings file
pub fn validate_base_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Base path does not exist: {}", path.display()));
    }

    if !path.is_dir() {
        return Err(format!("Base path is not a directory: {}", path.display()));
    }

    let default_file = default_resource_path(path);
    if !default_file.is_file() {
        return Err(format!(
            "Default resource file not found: {} (expected {}/{})",
            default_file.display(),
            DEFAULT_FOLDER,
            RESOURCE_FILE
        ));
    }

    Ok(())
}

/// Validate the settings file exists
pub fn validate_settings_file(path: &Path) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("Settings file not found: {}", path.display()));
    }
    Ok(())
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    validate_base_path(context.base_path)?;

    if let Some(settings) = context.settings_file {
        validate_settings_file(settings)?;
    }

    if context.jobs == Some(0) {
        return Err("--jobs must be at least 1".to_string());
    }

    Ok(())
}
