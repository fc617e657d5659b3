#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]

//! Logging setup shared by the floor tools.
//!
//! [`init_logging_with_sink`] installs a compact subscriber whose lines go to a
//! callback; the browser build points it at the developer console.

pub mod error;
pub mod init;
pub mod sink;

pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, init_logging_with_sink, sink_subscriber};
pub use sink::{LineSinkMakeWriter, LineSinkWriter};
