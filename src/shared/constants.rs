use std::time::Duration;

/// Number of sites shown in the dashboard "recent" list
pub const DASHBOARD_RECENT_SITES: usize = 5;

/// Delay before a successfully submitted form is reset to its defaults
pub const FORM_RESET_DELAY: Duration = Duration::from_secs(2);

/// Upper bound on live map sessions; the oldest is evicted beyond this
pub const MAX_MAP_SESSIONS: usize = 1000;

// =============================================================================
// USER-FACING MESSAGES
// =============================================================================

pub const MSG_REQUIRED_SITE_FIELDS: &str = "Semua field site harus diisi";

pub const MSG_SUBMIT_SUCCESS: &str = "Data berhasil disimpan!";

pub const MSG_SUBMIT_FAILED: &str = "Gagal menyimpan data. Silakan coba lagi.";

pub const MSG_NO_SITES: &str = "Belum ada data menara untuk ditampilkan";

pub const MSG_MAP_UNAVAILABLE: &str = "Peta tidak dapat ditampilkan";
