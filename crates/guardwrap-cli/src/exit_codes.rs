//! Exit codes for guardwrap.

pub const SUCCESS: i32 = 0;
pub const FILES_FAILED: i32 = 1; // At least one page failed to transform or could not be read/written
pub const CONFIG_ERROR: i32 = 2; // Settings file or embedded mapping invalid
