//! Entrypoint: wait for the host settings area, then mount the panel and commands.

use std::rc::Rc;

use floorkit_config::{ConfigStore, load_config};
use floorkit_core::{InitOutcome, ToolPanel, register_floor_commands, run_initializer};
use floorkit_telemetry::{DEFAULT_LOG_LEVEL, init_logging_with_sink};
use gloo::console;
use gloo::utils::document;
use tracing::{info, warn};
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::form::ANCHOR_ID;
use crate::host::{HostCommandRegistry, PageHost, ToastrNotifier};
use crate::panel::{SettingsPanel, SettingsPanelProps};
use crate::storage::BrowserStore;
use crate::timer::GlooTimer;

const MOUNT_ID: &str = "xgj_settings_root";

/// Module start hook run by the wasm loader.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = init_logging_with_sink(DEFAULT_LOG_LEVEL, |line| console::log!(line)) {
        console::warn!(format!("logging unavailable: {err}"));
    }

    let settings = load_config(&BrowserStore).retry;
    spawn_local(async move {
        let probe = || document().get_element_by_id(ANCHOR_ID);
        match run_initializer(settings, probe, &GlooTimer, mount).await {
            InitOutcome::Initialized { retries } => info!(retries, "floor tools ready"),
            InitOutcome::GaveUp { retries } => {
                warn!(retries, anchor = ANCHOR_ID, "settings area never appeared");
            }
        }
    });
}

fn mount(anchor: Element) {
    let root = match document().create_element("div") {
        Ok(root) => root,
        Err(err) => {
            warn!(error = ?err, "failed to create panel root");
            return;
        }
    };
    root.set_id(MOUNT_ID);
    if let Err(err) = anchor.append_child(&root) {
        warn!(error = ?err, "failed to attach panel root");
        return;
    }

    let config = ConfigStore::open(BrowserStore);
    let panel = Rc::new(ToolPanel::new(PageHost, ToastrNotifier, config));
    yew::Renderer::<SettingsPanel>::with_root_and_props(root, SettingsPanelProps { panel }).render();

    register_floor_commands(&mut HostCommandRegistry);
}
