//! Central Configuration Constants
//!
//! Single source of truth for pipeline defaults.
//! The server reads its overrides from the environment and falls back here.

/// Rows per inference batch.
///
/// Bounds peak memory of a run. Any value >= 1 yields the same result set.
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// Column names accepted as the source IP column.
///
/// Matching is case- and separator-insensitive, so `IP Address`,
/// `ip_address` and `IP-ADDRESS` are the same alias.
pub const DEFAULT_IDENTITY_ALIASES: &[&str] = &[
    "ip",
    "Random_IP",
    "IP",
    "ip_address",
    "IP_Address",
    "source_ip",
    "src_ip",
    "IP Address",
];

/// Header of the staged prediction file
pub const STAGING_HEADER: [&str; 2] = ["ip_address", "prediction"];

/// Header of a generated block report
pub const REPORT_HEADER: [&str; 2] = ["Blocked IP Address", "Attack Type"];

/// File name prefix for block reports
pub const REPORT_PREFIX: &str = "blocked_ips";

/// Directory name used under the system temp dir for staged predictions
pub const STAGING_DIR_NAME: &str = "ddos-shield";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "DDoS Shield";
