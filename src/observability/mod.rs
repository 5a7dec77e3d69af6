//! Logging setup and crash reporting for the CLI.
//!
//! Install both at startup:
//!
//! ```ignore
//! use healthhive::observability::{init_tracing, install_panic_hook};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_tracing(0);
//! }
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{current_context, set_command, set_snapshot, ReportContext};
pub use panic_hook::install_panic_hook;
pub use self::tracing::{filter_directive, init_tracing};
