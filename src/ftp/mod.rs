// ── uniftp / ftp module ──────────────────────────────────────────────────────
//
// FTP adapter backed by suppaftp's sync `FtpStream`:
//   • connect / login over the control channel with a dial timeout
//   • segment-by-segment remote folder provisioning before uploads
//   • streamed STOR / RETR transfers
//   • LIST output parsed with suppaftp's own listing parser

pub mod client;
pub mod directory;

pub use client::FtpRemote;
