//! Remote folder provisioning for FTP uploads.
//!
//! FTP has no MKDIRP, so the target folder chain is walked segment by
//! segment: try to CWD into each segment, create it when the CWD fails, and
//! restore the original working directory once the full path exists. The
//! walk is expressed over a small trait so it can be unit-tested without a
//! live control connection.

use suppaftp::FtpStream;

use crate::error::{TransferError, TransferResult};

/// The three control-channel primitives the folder walk needs. Implemented
/// by `FtpStream`, and by an in-memory mock in the tests below.
pub(crate) trait RemoteCwd {
    fn pwd(&mut self) -> Result<String, String>;
    fn cwd(&mut self, path: &str) -> Result<(), String>;
    fn mkdir(&mut self, path: &str) -> Result<(), String>;
}

impl RemoteCwd for FtpStream {
    fn pwd(&mut self) -> Result<String, String> {
        FtpStream::pwd(self).map_err(|e| e.to_string())
    }

    fn cwd(&mut self, path: &str) -> Result<(), String> {
        FtpStream::cwd(self, path).map_err(|e| e.to_string())
    }

    fn mkdir(&mut self, path: &str) -> Result<(), String> {
        FtpStream::mkdir(self, path).map(|_| ()).map_err(|e| e.to_string())
    }
}

/// Ensure `folder` (a `/`-separated chain, relative to the current working
/// directory) exists on the remote side, creating missing segments.
///
/// The working directory is captured once up front and restored before
/// returning, so a successful call leaves the session where it found it.
/// Calling this twice with the same folder succeeds both times — existing
/// segments are entered, never re-created.
pub(crate) fn ensure_remote_folders<N: RemoteCwd>(nav: &mut N, folder: &str) -> TransferResult<()> {
    let original = nav
        .pwd()
        .map_err(|e| TransferError::remote_failed(format!("failed to read working directory: {}", e)))?;

    for segment in folder.split('/').filter(|s| !s.is_empty()) {
        if nav.cwd(segment).is_err() {
            nav.mkdir(segment).map_err(|e| {
                TransferError::remote_failed(format!("failed to create folder '{}': {}", segment, e))
            })?;
            nav.cwd(segment).map_err(|e| {
                TransferError::remote_failed(format!(
                    "failed to change to folder '{}': {}",
                    segment, e
                ))
            })?;
        }
    }

    nav.cwd(&original).map_err(|e| {
        TransferError::remote_failed(format!(
            "failed to restore working directory '{}': {}",
            original, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// In-memory remote filesystem: a set of absolute directory paths plus a
    /// working directory, recording every MKD issued.
    struct MockRemote {
        dirs: HashSet<String>,
        cwd: String,
        created: Vec<String>,
        fail_mkdir: bool,
    }

    impl MockRemote {
        fn with_dirs(dirs: &[&str]) -> Self {
            let mut set: HashSet<String> = dirs.iter().map(|d| d.to_string()).collect();
            set.insert("/".to_string());
            MockRemote {
                dirs: set,
                cwd: "/".to_string(),
                created: Vec::new(),
                fail_mkdir: false,
            }
        }

        fn join(&self, path: &str) -> String {
            if path.starts_with('/') {
                path.to_string()
            } else if self.cwd == "/" {
                format!("/{}", path)
            } else {
                format!("{}/{}", self.cwd, path)
            }
        }
    }

    impl RemoteCwd for MockRemote {
        fn pwd(&mut self) -> Result<String, String> {
            Ok(self.cwd.clone())
        }

        fn cwd(&mut self, path: &str) -> Result<(), String> {
            let target = self.join(path);
            if self.dirs.contains(&target) {
                self.cwd = target;
                Ok(())
            } else {
                Err(format!("550 {}: no such directory", target))
            }
        }

        fn mkdir(&mut self, path: &str) -> Result<(), String> {
            if self.fail_mkdir {
                return Err("550 permission denied".to_string());
            }
            let target = self.join(path);
            self.dirs.insert(target.clone());
            self.created.push(target);
            Ok(())
        }
    }

    #[test]
    fn test_creates_only_missing_segments() {
        let mut remote = MockRemote::with_dirs(&["/a"]);
        ensure_remote_folders(&mut remote, "a/b/c").unwrap();
        assert_eq!(remote.created, vec!["/a/b", "/a/b/c"]);
        assert!(remote.dirs.contains("/a/b/c"));
    }

    #[test]
    fn test_restores_working_directory() {
        let mut remote = MockRemote::with_dirs(&["/a"]);
        ensure_remote_folders(&mut remote, "a/b/c").unwrap();
        assert_eq!(remote.cwd, "/");
    }

    #[test]
    fn test_idempotent_second_run() {
        let mut remote = MockRemote::with_dirs(&[]);
        ensure_remote_folders(&mut remote, "x/y").unwrap();
        let created_first = remote.created.clone();
        ensure_remote_folders(&mut remote, "x/y").unwrap();
        assert_eq!(remote.created, created_first);
        assert_eq!(remote.cwd, "/");
    }

    #[test]
    fn test_mkdir_failure_names_segment() {
        let mut remote = MockRemote::with_dirs(&["/a"]);
        remote.fail_mkdir = true;
        let err = ensure_remote_folders(&mut remote, "a/b").unwrap_err();
        assert!(err.message.contains("failed to create folder 'b'"));
        assert!(err.message.contains("permission denied"));
    }

    #[test]
    fn test_leading_slash_and_empty_segments_ignored() {
        let mut remote = MockRemote::with_dirs(&[]);
        ensure_remote_folders(&mut remote, "/a//b/").unwrap();
        assert_eq!(remote.created, vec!["/a", "/a/b"]);
    }
}
