//! Working-directory guard for tests that resolve relative paths.
//!
//! The working directory is process-global, so every guard holds a shared
//! lock until it is dropped and the previous directory is restored.
//!
//! # Examples
//!
//! ```no_run
//! use test_helpers::cwd;
//!
//! let guard = cwd::enter("/tmp/crate-root").expect("enter crate root");
//! // Relative module paths now resolve against `/tmp/crate-root`.
//! drop(guard);
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::{Mutex, MutexGuard};
use std::sync::LazyLock;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// Restores the previous working directory when dropped.
#[must_use = "dropping the guard leaves the directory immediately"]
pub struct CwdGuard {
    previous: Utf8PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    /// Directory that will be restored.
    #[must_use]
    pub fn previous(&self) -> &Utf8Path {
        &self.previous
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _restored = std::env::set_current_dir(&self.previous);
    }
}

/// Switches the working directory to `dir` until the guard is dropped.
///
/// # Errors
///
/// Returns an error if the current directory is unreadable or not UTF-8,
/// or if `dir` cannot be entered. The directory is unchanged on error.
pub fn enter(dir: impl AsRef<Utf8Path>) -> Result<CwdGuard> {
    let lock = CWD_LOCK.lock();
    let current = std::env::current_dir().context("read current directory")?;
    let previous = Utf8PathBuf::from_path_buf(current)
        .map_err(|path| anyhow!("current directory is not UTF-8: {}", path.display()))?;
    std::env::set_current_dir(dir.as_ref())
        .with_context(|| format!("enter {}", dir.as_ref()))?;
    Ok(CwdGuard {
        previous,
        _lock: lock,
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for the working-directory guard.

    use super::*;

    #[test]
    fn restores_previous_directory() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let target = Utf8PathBuf::from_path_buf(temp.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;

        let guard = enter(&target)?;
        let before = guard.previous().to_owned();
        anyhow::ensure!(std::env::current_dir()?.canonicalize()? == target.canonicalize()?);
        drop(guard);

        anyhow::ensure!(std::env::current_dir()?.as_path() == before.as_std_path());

        anyhow::ensure!(enter(target.join("missing")).is_err());
        anyhow::ensure!(std::env::current_dir()?.as_path() == before.as_std_path());
        Ok(())
    }
}
