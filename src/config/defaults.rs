// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application.

// ==========================================================================
// Endpoint Defaults
// ==========================================================================

/// Default URL of the pixelation service upload route.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000/pixelar_menores";

/// Default multipart field carrying the image bytes.
pub const DEFAULT_FILE_FIELD: &str = "file";

/// Default multipart field carrying the debug flag.
pub const DEFAULT_FLAG_FIELD: &str = "debug";

// ==========================================================================
// Timeout Defaults
// ==========================================================================

/// Wall-clock budget for one submission (in milliseconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Minimum accepted submission timeout (in milliseconds).
pub const MIN_TIMEOUT_MS: u64 = 1_000;

/// Maximum accepted submission timeout (in milliseconds).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Timeout for the startup health probe (in milliseconds).
pub const HEALTH_PROBE_TIMEOUT_MS: u64 = 5_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_within_bounds() {
        assert!((MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn health_probe_is_shorter_than_submission() {
        assert!(HEALTH_PROBE_TIMEOUT_MS < DEFAULT_TIMEOUT_MS);
    }
}
