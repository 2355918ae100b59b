// es-renderer/build.rs
//
//! The `es-renderer` build script.

use cfg_aliases::cfg_aliases;

fn main() {
    // Setup aliases for #[cfg] checks
    cfg_aliases! {
        // Platforms
        ios: { target_os = "ios" },

        // Features:
        // Platform variants that are compiled in only where the platform exists.
        eagl: { all(ios, not(feature = "sm-no-eagl")) },
    }
}
