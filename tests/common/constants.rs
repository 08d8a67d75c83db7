//! Shared constants for end-to-end tests
//!
//! When the test catalog changes, update only this file and fixtures.rs.

// ============================================================================
// Test Catalog
// ============================================================================

/// "Opening Track" by The Test Band, features [0, 0]
pub const TRACK_1_ID: &str = "track-1";

/// "Second Song" by The Test Band, features [1, 0]
pub const TRACK_2_ID: &str = "track-2";

/// "Blue Note" by Jazz Ensemble, features [2, 0]
pub const TRACK_3_ID: &str = "track-3";

/// "Blue Note" by Jazz Ensemble again (a re-release), features [2.5, 0]
pub const TRACK_4_ID: &str = "track-4";

/// "Late Night" by Jazz Ensemble, features [4, 0]
pub const TRACK_5_ID: &str = "track-5";

/// "Quiet Hours" by Solo Pianist, features [0, 3]
pub const TRACK_6_ID: &str = "track-6";

pub const ARTIST_1_NAME: &str = "The Test Band";
pub const ARTIST_2_NAME: &str = "Jazz Ensemble";

pub const CATALOG_SIZE: usize = 6;
pub const FEATURE_DIM: usize = 2;

// ============================================================================
// Timing
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
