//! Recursive remote-directory creation over the SFTP channel.
//!
//! ssh2 exposes no native mkdir-all, so each accumulated prefix of the
//! target path is probed with stat and created when absent. Expressed over
//! a small trait so the walk is unit-testable without a live session.

use std::path::Path;

use crate::error::{TransferError, TransferResult};

/// The two SFTP primitives the walk needs. Implemented by `ssh2::Sftp`,
/// and by an in-memory mock in the tests below.
pub(crate) trait RemoteDirs {
    /// `Some(is_dir)` when the path exists, `None` when it does not.
    fn stat_dir(&self, path: &str) -> Result<Option<bool>, String>;
    fn mkdir(&self, path: &str) -> Result<(), String>;
}

impl RemoteDirs for ssh2::Sftp {
    fn stat_dir(&self, path: &str) -> Result<Option<bool>, String> {
        // Stat failure means "absent" here; a real permission problem will
        // surface from the mkdir that follows.
        match self.stat(Path::new(path)) {
            Ok(stat) => Ok(Some(stat.is_dir())),
            Err(_) => Ok(None),
        }
    }

    fn mkdir(&self, path: &str) -> Result<(), String> {
        ssh2::Sftp::mkdir(self, Path::new(path), 0o755).map_err(|e| e.to_string())
    }
}

/// Create `folder` and all missing parents. Idempotent: existing
/// directories are left untouched, and a second call with the same folder
/// succeeds without issuing any mkdir.
pub(crate) fn mkdir_all<D: RemoteDirs>(dirs: &D, folder: &str) -> TransferResult<()> {
    let mut current = String::new();
    if folder.starts_with('/') {
        current.push('/');
    }

    for component in folder.split('/').filter(|c| !c.is_empty()) {
        if current.is_empty() || current.ends_with('/') {
            current.push_str(component);
        } else {
            current.push('/');
            current.push_str(component);
        }

        match dirs
            .stat_dir(&current)
            .map_err(|e| TransferError::remote_failed(format!("failed to stat '{}': {}", current, e)))?
        {
            Some(true) => continue,
            Some(false) => {
                return Err(TransferError::remote_failed(format!(
                    "remote path '{}' exists and is not a directory",
                    current
                )))
            }
            None => dirs.mkdir(&current).map_err(|e| {
                TransferError::remote_failed(format!("failed to create folder '{}': {}", current, e))
            })?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory remote filesystem: path → is_dir, recording every mkdir.
    struct MockDirs {
        entries: RefCell<HashMap<String, bool>>,
        created: RefCell<Vec<String>>,
    }

    impl MockDirs {
        fn with_dirs(dirs: &[&str]) -> Self {
            MockDirs {
                entries: RefCell::new(dirs.iter().map(|d| (d.to_string(), true)).collect()),
                created: RefCell::new(Vec::new()),
            }
        }
    }

    impl RemoteDirs for MockDirs {
        fn stat_dir(&self, path: &str) -> Result<Option<bool>, String> {
            Ok(self.entries.borrow().get(path).copied())
        }

        fn mkdir(&self, path: &str) -> Result<(), String> {
            self.entries.borrow_mut().insert(path.to_string(), true);
            self.created.borrow_mut().push(path.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_creates_only_missing_prefixes() {
        let dirs = MockDirs::with_dirs(&["/a"]);
        mkdir_all(&dirs, "/a/b/c").unwrap();
        assert_eq!(*dirs.created.borrow(), vec!["/a/b", "/a/b/c"]);
    }

    #[test]
    fn test_relative_path() {
        let dirs = MockDirs::with_dirs(&[]);
        mkdir_all(&dirs, "a/b").unwrap();
        assert_eq!(*dirs.created.borrow(), vec!["a", "a/b"]);
    }

    #[test]
    fn test_idempotent_second_run() {
        let dirs = MockDirs::with_dirs(&[]);
        mkdir_all(&dirs, "/x/y").unwrap();
        let first = dirs.created.borrow().clone();
        mkdir_all(&dirs, "/x/y").unwrap();
        assert_eq!(*dirs.created.borrow(), first);
    }

    #[test]
    fn test_file_in_the_way_fails() {
        let dirs = MockDirs::with_dirs(&["/a"]);
        dirs.entries.borrow_mut().insert("/a/f".to_string(), false);
        let err = mkdir_all(&dirs, "/a/f/c").unwrap_err();
        assert!(err.message.contains("'/a/f' exists and is not a directory"));
    }
}
