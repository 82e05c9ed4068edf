use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    /// Inactivity timeout given to records from `create`, and the cooldown
    /// between opportunistic sweeps.
    pub default_timeout_secs: u64,
    /// Sweep the directory on the first access after open/reconfiguration.
    pub clean_expired_on_startup: bool,
    /// Delete files whose content cannot be decoded back into a record.
    pub clean_unreadable: bool,
    pub sync_on_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            default_timeout_secs: 1800,
            clean_expired_on_startup: false,
            clean_unreadable: true,
            sync_on_write: false,
        }
    }
}
