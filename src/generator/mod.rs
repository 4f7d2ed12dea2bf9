//! Invocation of the external generator process.
//!
//! The generator is a Node tool living in its own checkout; repodist
//! starts it with `npm start` in that directory. Its stdout streams
//! through to the user, stderr is captured: the generator signals some
//! failures only by writing to stderr while still exiting 0, so a
//! non-empty stderr counts as a failure too.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::core::RepodistError;

/// Run `npm start` in `dir`, unless `dry_run` is set.
///
/// Returns whether the generator actually ran (`false` in dry-run mode).
///
/// # Errors
///
/// [`RepodistError::Generator`] when the process cannot be spawned, exits
/// non-zero, or writes to stderr.
pub async fn run_generator(dir: &Path, dry_run: bool) -> Result<bool, RepodistError> {
    debug!(dir = %dir.display(), "generator invocation requested");
    info!("starting the generator with 'npm start' in {}", dir.display());

    if dry_run {
        info!("dry-run flag set, skipping 'npm start'");
        return Ok(false);
    }

    let output = Command::new("npm")
        .arg("start")
        .current_dir(dir)
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| RepodistError::Generator {
            reason: format!("could not run 'npm start' in {}: {e}", dir.display()),
        })?;

    if !output.status.success() {
        return Err(RepodistError::Generator {
            reason: format!("'npm start' exited with {}", output.status),
        });
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return Err(RepodistError::Generator {
            reason: format!("'npm start' wrote to stderr: {}", stderr.trim()),
        });
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dry_run_skips_the_process() {
        // The directory does not exist; dry-run must return before any
        // process is spawned.
        let ran = run_generator(Path::new("/nonexistent/generator"), true)
            .await
            .unwrap();
        assert!(!ran);
    }

    #[tokio::test]
    async fn missing_directory_is_a_generator_error() {
        let err = run_generator(Path::new("/nonexistent/generator"), false)
            .await
            .unwrap_err();
        assert!(matches!(err, RepodistError::Generator { .. }));
    }
}
