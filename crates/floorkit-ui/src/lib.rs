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
//! Browser front-end for the floor tools.
//! The form model is target-neutral; host bindings, storage, timers and the
//! Yew panel only build for wasm32.

pub mod form;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod host;
#[cfg(target_arch = "wasm32")]
pub mod panel;
#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod timer;

pub use form::{ANCHOR_ID, Field, PanelForm};

#[cfg(target_arch = "wasm32")]
pub use host::{HostCommandRegistry, HostContext, PageHost, ToastrNotifier};
#[cfg(target_arch = "wasm32")]
pub use panel::{PagePanel, SettingsPanel, SettingsPanelProps};
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStore;
#[cfg(target_arch = "wasm32")]
pub use timer::GlooTimer;
