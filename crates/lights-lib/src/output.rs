//! Output adapters — trait + sysfs, dry-run and mock backends.
//!
//! The controller only ever sees a [`LedOutput`]. Whether a failed write is
//! reported, logged, or ignored is the adapter's business.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{LightsError, Result};

// ── Trait ──

pub trait LedOutput: Send {
    /// Open `path`, write `value`, close.
    fn write(&mut self, path: &Path, value: &str) -> Result<()>;

    /// Read the whole contents of `path`.
    /// Default: not supported by this backend.
    fn read(&mut self, path: &Path) -> Result<String> {
        Err(LightsError::Io(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("read not supported for {}", path.display()),
        )))
    }
}

impl<T: LedOutput + ?Sized> LedOutput for Box<T> {
    fn write(&mut self, path: &Path, value: &str) -> Result<()> {
        (**self).write(path, value)
    }

    fn read(&mut self, path: &Path) -> Result<String> {
        (**self).read(path)
    }
}

/// Join `path` under `root`, treating absolute paths as relative to it.
pub fn rooted(root: Option<&Path>, path: &Path) -> PathBuf {
    match root {
        Some(root) => root.join(path.strip_prefix("/").unwrap_or(path)),
        None => path.to_path_buf(),
    }
}

// ── sysfs ──

/// Writes device attribute files.
///
/// Files are opened for writing without being created: a missing attribute
/// means the LED isn't there. Each failing path is logged once.
#[derive(Debug, Default)]
pub struct SysfsOutput {
    root: Option<PathBuf>,
    warned: HashSet<PathBuf>,
}

impl SysfsOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every path under `root` instead of `/`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        SysfsOutput {
            root: Some(root.into()),
            warned: HashSet::new(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        rooted(self.root.as_deref(), path)
    }

    fn warn_once(&mut self, path: &Path, op: &str, e: &std::io::Error) {
        if self.warned.insert(path.to_path_buf()) {
            log::error!("{op} {} failed: {e}", path.display());
        }
    }
}

impl LedOutput for SysfsOutput {
    fn write(&mut self, path: &Path, value: &str) -> Result<()> {
        let full = self.resolve(path);
        let result = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&full)
            .and_then(|mut f| f.write_all(format!("{value}\n").as_bytes()));
        if let Err(e) = result {
            self.warn_once(&full, "write", &e);
            return Err(e.into());
        }
        Ok(())
    }

    fn read(&mut self, path: &Path) -> Result<String> {
        let full = self.resolve(path);
        std::fs::read_to_string(&full).map_err(|e| {
            self.warn_once(&full, "read", &e);
            e.into()
        })
    }
}

// ── dry run ──

/// Logs and records writes without touching any file. Reads always fail.
#[derive(Debug, Default)]
pub struct DryRunOutput {
    pub writes: Vec<(PathBuf, String)>,
}

impl LedOutput for DryRunOutput {
    fn write(&mut self, path: &Path, value: &str) -> Result<()> {
        log::info!("dry-run: {} <- {value}", path.display());
        self.writes.push((path.to_path_buf(), value.to_string()));
        Ok(())
    }
}

// ── Mock ──

pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    #[derive(Debug, Default)]
    pub struct MockState {
        /// Every successful write, in order.
        pub writes: Vec<(PathBuf, String)>,
        /// Contents served by `read`, keyed by path. Writes update this too.
        pub files: HashMap<PathBuf, String>,
        /// Paths whose writes fail.
        pub failing: HashSet<PathBuf>,
        /// Number of rejected writes.
        pub failed_writes: usize,
    }

    /// In-memory output for tests. Clones share the same state, so a test can
    /// keep one handle while a controller owns another.
    #[derive(Debug, Clone, Default)]
    pub struct MockOutput {
        state: Arc<Mutex<MockState>>,
    }

    impl MockOutput {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn state(&self) -> MutexGuard<'_, MockState> {
            self.state.lock().unwrap_or_else(PoisonError::into_inner)
        }

        /// Snapshot of all writes so far.
        pub fn writes(&self) -> Vec<(PathBuf, String)> {
            self.state().writes.clone()
        }

        /// Last value written to `path`.
        pub fn last(&self, path: impl AsRef<Path>) -> Option<String> {
            self.state()
                .writes
                .iter()
                .rev()
                .find(|(p, _)| p == path.as_ref())
                .map(|(_, v)| v.clone())
        }

        pub fn clear(&self) {
            self.state().writes.clear();
        }

        pub fn fail_path(&self, path: impl Into<PathBuf>) {
            self.state().failing.insert(path.into());
        }

        pub fn set_file(&self, path: impl Into<PathBuf>, contents: &str) {
            self.state().files.insert(path.into(), contents.to_string());
        }
    }

    impl LedOutput for MockOutput {
        fn write(&mut self, path: &Path, value: &str) -> Result<()> {
            let mut st = self.state();
            if st.failing.contains(path) {
                st.failed_writes += 1;
                return Err(LightsError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("mock: {} unavailable", path.display()),
                )));
            }
            st.writes.push((path.to_path_buf(), value.to_string()));
            st.files.insert(path.to_path_buf(), value.to_string());
            Ok(())
        }

        fn read(&mut self, path: &Path) -> Result<String> {
            self.state().files.get(path).cloned().ok_or_else(|| {
                LightsError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("mock: {} not found", path.display()),
                ))
            })
        }
    }
}
