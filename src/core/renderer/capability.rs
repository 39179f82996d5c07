//! Minimum-version gate for the graphics API.
//!
//! Versions travel as a packed descriptor with the major version in the high
//! 16 bits, so ES 3.0 is `0x30000` and comparisons stay plain integer
//! ordering.

use glow::HasContext;

/// Lowest packed version this application renders with (OpenGL ES 3.0).
pub const MIN_GLES_VERSION: u32 = 0x0003_0000;

/// Packs a major/minor version pair into the comparable descriptor.
pub fn packed_version(major: u32, minor: u32) -> u32 {
    (major << 16) | (minor & 0xffff)
}

/// Packs the version the current context reports.
pub fn reported_version(gl: &glow::Context) -> u32 {
    let version = gl.version();
    packed_version(version.major, version.minor)
}

/// Whether the reported descriptor meets the required minimum.
pub fn supports_minimum(reported: u32) -> bool {
    reported >= MIN_GLES_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_version_puts_major_in_high_word() {
        assert_eq!(packed_version(3, 0), 0x30000);
        assert_eq!(packed_version(3, 2), 0x30002);
        assert_eq!(packed_version(2, 0), 0x20000);
    }

    #[test]
    fn versions_at_or_above_es30_pass() {
        assert!(supports_minimum(MIN_GLES_VERSION));
        assert!(supports_minimum(packed_version(3, 1)));
        assert!(supports_minimum(packed_version(4, 6)));
    }

    #[test]
    fn versions_below_es30_fail() {
        assert!(!supports_minimum(0));
        assert!(!supports_minimum(packed_version(2, 0)));
        assert!(!supports_minimum(0x2ffff));
    }
}
