/// User-visible outcome of the last load or save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    pub message: String,
    pub is_error: bool,
}

impl SyncStatus {
    pub const SYNCED: &'static str = "Data synced";
    pub const LOAD_FAILED: &'static str = "Online data failed to load, using local data";
    pub const PUSH_FAILED: &'static str = "Online sync failed, saved locally only";
    pub const CACHE_UNREADABLE: &'static str = "Local cache unreadable, using built-in data";

    /// Nothing to report (remote not configured, or nothing happened yet).
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.message.is_empty() && !self.is_error
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
