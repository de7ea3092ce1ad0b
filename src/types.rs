// ── Types ─────────────────────────────────────────────────────────────────────

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::TransferError;

// ── Serde default helpers ────────────────────────────────────────────────────

fn default_timeout_secs() -> u64 {
    30
}
fn default_false() -> bool {
    false
}

// ── Protocol ─────────────────────────────────────────────────────────────────

/// Transfer protocol selector. Closed set — anything that is not exactly
/// `"ftp"` or `"sftp"` (case-sensitive) is rejected when parsing, so an
/// unsupported protocol can never reach the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Ftp,
    Sftp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Ftp => "ftp",
            Protocol::Sftp => "sftp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ftp" => Ok(Protocol::Ftp),
            "sftp" => Ok(Protocol::Sftp),
            other => Err(TransferError::unsupported_protocol(other)),
        }
    }
}

// ── Connection configuration ─────────────────────────────────────────────────

/// Immutable connection parameters, passed by value into adapter
/// construction. No validation beyond the protocol tag happens here; an
/// empty host or bad credentials surface as connect-time errors from the
/// underlying library.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub protocol: Protocol,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Dial timeout. Applies to transport establishment only, not to
    /// subsequent transfer operations.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// SFTP only: accept any presented host key instead of checking it
    /// against `~/.ssh/known_hosts`.
    #[serde(default = "default_false")]
    pub ignore_host_key: bool,
}

impl ConnectionConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ── Upload descriptor ────────────────────────────────────────────────────────

/// One upload request: which local file goes into which remote folder under
/// which name. The folder chain is created on the remote side if missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub local_path: String,
    pub remote_folder: String,
    pub remote_file_name: String,
}

impl FileUpload {
    /// Remote destination path, `folder/filename`.
    pub fn remote_path(&self) -> String {
        if self.remote_folder.is_empty() || self.remote_folder.ends_with('/') {
            format!("{}{}", self.remote_folder, self.remote_file_name)
        } else {
            format!("{}/{}", self.remote_folder, self.remote_file_name)
        }
    }
}

// ── Directory listing ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntry {
    pub name: String,
    pub size: u64,
}

// ── Per-instance transfer statistics ─────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferStats {
    pub connected_at: Option<DateTime<Utc>>,
    pub bytes_uploaded: u64,
    pub bytes_downloaded: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransferErrorKind;

    #[test]
    fn test_protocol_parse_exact() {
        assert_eq!("ftp".parse::<Protocol>().unwrap(), Protocol::Ftp);
        assert_eq!("sftp".parse::<Protocol>().unwrap(), Protocol::Sftp);
    }

    #[test]
    fn test_protocol_parse_is_case_sensitive() {
        for bad in ["FTP", "Sftp", "ftps", "scp", "", " ftp"] {
            let err = bad.parse::<Protocol>().unwrap_err();
            assert_eq!(err.kind, TransferErrorKind::UnsupportedProtocol);
        }
    }

    #[test]
    fn test_protocol_roundtrip_display() {
        assert_eq!(Protocol::Ftp.to_string(), "ftp");
        assert_eq!(Protocol::Sftp.to_string(), "sftp");
    }

    #[test]
    fn test_config_deserialise_with_defaults() {
        let cfg: ConnectionConfig = serde_json::from_str(
            r#"{"protocol":"sftp","host":"example.com","port":22,"username":"u","password":"p"}"#,
        )
        .unwrap();
        assert_eq!(cfg.protocol, Protocol::Sftp);
        assert_eq!(cfg.timeout_secs, 30);
        assert!(!cfg.ignore_host_key);
        assert_eq!(cfg.addr(), "example.com:22");
    }

    #[test]
    fn test_config_rejects_unknown_protocol() {
        let res: Result<ConnectionConfig, _> = serde_json::from_str(
            r#"{"protocol":"gopher","host":"h","port":1,"username":"u","password":"p"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_upload_remote_path_join() {
        let up = FileUpload {
            local_path: "/tmp/f".into(),
            remote_folder: "a/b".into(),
            remote_file_name: "f.txt".into(),
        };
        assert_eq!(up.remote_path(), "a/b/f.txt");

        let up2 = FileUpload {
            remote_folder: "a/b/".into(),
            ..up.clone()
        };
        assert_eq!(up2.remote_path(), "a/b/f.txt");
    }
}
