//! Working tree path normalization
//!
//! Under a POSIX emulation layer on Windows, libgit2 reports roots such as
//! `/cygdrive/c/work/repo`. The native `git` executable cannot use that as a
//! working directory, so such roots are rewritten into native form by the
//! platform helper before anything is spawned there.

use crate::error::{GitError, GitResult};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Prefix marking a path from the emulated filesystem
pub const CYGDRIVE_PREFIX: &str = "/cygdrive";

/// Converts an emulated path into the native form of the host
pub trait PathTranslator {
    /// Translate `path`, returning the helper's raw output
    fn to_native(&self, path: &str) -> GitResult<String>;
}

/// Translator backed by the `cygpath` utility
#[derive(Debug, Default, Clone, Copy)]
pub struct Cygpath;

impl PathTranslator for Cygpath {
    fn to_native(&self, path: &str) -> GitResult<String> {
        debug!("Translating {} with cygpath", path);

        let output = Command::new("cygpath")
            .args(["-w", path])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| GitError::path_translation(path, format!("cannot run cygpath: {}", e)))?;

        if !output.status.success() {
            return Err(GitError::path_translation(
                path,
                format!(
                    "cygpath exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Normalize a working tree root reported by the repository library
///
/// Roots under [`CYGDRIVE_PREFIX`] go through `translator`; anything else is
/// returned as-is. Surrounding whitespace and a trailing `/` are trimmed in
/// both cases.
pub fn normalize_root(raw: &str, translator: &dyn PathTranslator) -> GitResult<PathBuf> {
    let raw = trim_trailing_separator(raw.trim());
    if raw.starts_with(CYGDRIVE_PREFIX) {
        let native = translator.to_native(raw)?;
        let native = native.trim();
        if native.is_empty() {
            return Err(GitError::path_translation(
                raw,
                "translator returned an empty path".to_string(),
            ));
        }
        debug!("Translated working tree root {} to {}", raw, native);
        return Ok(PathBuf::from(native));
    }

    Ok(PathBuf::from(raw))
}

/// Drop trailing `/` while keeping a bare filesystem root intact
fn trim_trailing_separator(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() && path.starts_with('/') {
        "/"
    } else {
        trimmed
    }
}
