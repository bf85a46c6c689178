//! Bearer credential loading.
//!
//! The credential is read once, validated, and handed to the completion
//! client at construction. It is never read mid-call.
//!
//! # Security
//! - Wrapped in RedactedApiKey (safe Debug impl, zeroized on drop)
//! - Only the length is ever logged

pub mod validation;

use crate::error::CredentialError;

use common::RedactedApiKey;

use std::env;
use std::path::PathBuf;

use log::{debug, info, warn};

/// Load the credential named by `env_var`, consulting a .env file first.
///
/// # Returns
/// - `Ok(Some(key))` for a valid credential
/// - `Ok(None)` when the variable is unset or blank
/// - `Err(CredentialError)` when the value is present but unusable
pub fn load_credential(env_var: &str) -> Result<Option<RedactedApiKey>, CredentialError> {
    match try_load_dotenv() {
        Some(path) => debug!("Reading {env_var} after loading {}", path.display()),
        None => debug!("No .env file found - will check existing environment variables"),
    }

    read_credential(env_var)
}

/// Read and validate the credential from the process environment only.
pub fn read_credential(env_var: &str) -> Result<Option<RedactedApiKey>, CredentialError> {
    match env::var(env_var) {
        Ok(value) if value.trim().is_empty() => {
            debug!("{env_var} is set but blank, treating as unset");
            Ok(None)
        }
        Ok(value) => {
            let key = validation::validate_and_wrap(env_var, value)?;
            info!("Found credential in {} ({} chars)", env_var, key.len());
            Ok(Some(key))
        }
        Err(env::VarError::NotPresent) => {
            debug!("No {env_var} env var found");
            Ok(None)
        }
        Err(env::VarError::NotUnicode(_)) => {
            warn!("Env var {env_var} contains invalid unicode");
            Err(CredentialError::not_unicode(env_var))
        }
    }
}

/// Attempts to load .env from known locations.
///
/// Returns the path of the file that was loaded, if any.
fn try_load_dotenv() -> Option<PathBuf> {
    // Try current directory first
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return Some(path);
    }

    // Try executable directory
    let exe_path = env::current_exe().ok()?;
    let env_path = exe_path.parent()?.join(".env");
    if !env_path.exists() {
        return None;
    }

    match dotenvy::from_path(&env_path) {
        Ok(()) => {
            info!("Loaded .env from: {:?}", env_path);
            Some(env_path)
        }
        Err(e) => {
            warn!("Failed to parse .env at {:?}: {}", env_path, e);
            None
        }
    }
}
