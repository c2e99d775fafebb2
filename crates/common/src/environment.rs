use anyhow::{Context, Result};
use std::env;
use std::fs;

/// Retrieve some environment variable value by its name. Also checks if the environment variable
/// value is in some file, the path to which is retrieved from an environment variable by the
/// given name concatenated with `_FILE`. Values are trimmed.
///
/// Returns [Option::None] when neither variable is set or the value is blank. A `_FILE` variable
/// that points at an unreadable file is an error.
pub fn get_optional_env_var(name: &str) -> Result<Option<String>> {
    let value = match env::var(name) {
        Ok(s) => s,
        Err(_) => match env::var(format!("{}_FILE", name)) {
            Ok(path) => fs::read_to_string(&path)
                .with_context(|| format!("Could not read {}_FILE at {}.", name, path))?,
            Err(_) => return Ok(None),
        },
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}

pub mod variables {
    pub use crate::environment_variables::*;
}
