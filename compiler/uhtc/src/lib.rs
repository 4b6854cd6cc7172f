//! Session driver for the reflection header front-end.
//!
//! A [`Session`] owns every header of a run and the shared type table, and
//! drives them through the global phases:
//!
//! 1. parse (parallel per header)
//! 2. bind bases (sequential, over all headers)
//! 3. resolve properties (parallel per header)
//! 4. resolve final (parallel per header)
//! 5. validate (parallel per header)
//!
//! Each phase is a barrier: it starts only after the previous one finished
//! for every header, and only if no errors have been recorded so far.

mod intrinsics;
mod session;

use std::sync::Once;

pub use intrinsics::{INTRINSIC_HEADER, INTRINSIC_SOURCE};
pub use session::{Phase, Session, SessionConfig, SessionError};
pub use uht_parse::ModuleKind;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=uht_parse=debug` or `RUST_LOG=uhtc=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
