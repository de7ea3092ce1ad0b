// ── uniftp / sftp module ─────────────────────────────────────────────────────
//
// SFTP adapter backed by ssh2:
//   • TCP dial with timeout, SSH handshake, password auth
//   • Host-key verification against ~/.ssh/known_hosts (opt-out per config)
//   • Recursive remote-directory creation before uploads
//   • Streamed uploads / downloads over the SFTP channel

pub mod client;
pub mod dir_ops;
pub mod known_hosts;

pub use client::SftpRemote;
pub use known_hosts::{find_host_key, KnownHostKey};
