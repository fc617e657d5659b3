//! Settings drawer mounted into the host's extension settings.
//!
//! # Design
//! - Inputs are bound to a [`PanelForm`]; actions read the form and hand the text to [`ToolPanel`].
//! - After each action the form is refilled from saved settings so the inputs show what persisted.

use std::rc::Rc;

use floorkit_core::ToolPanel;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::form::{Field, PanelForm, ids};
use crate::host::{PageHost, ToastrNotifier};
use crate::storage::BrowserStore;

/// Panel logic wired to the page host.
pub type PagePanel = ToolPanel<PageHost, ToastrNotifier, BrowserStore>;

/// Props for [`SettingsPanel`].
#[derive(Properties, Clone)]
pub struct SettingsPanelProps {
    /// Shared panel logic.
    pub panel: Rc<PagePanel>,
}

impl PartialEq for SettingsPanelProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.panel, &other.panel)
    }
}

fn on_field(form: &UseStateHandle<PanelForm>, field: Field) -> Callback<InputEvent> {
    let form = form.clone();
    Callback::from(move |event: InputEvent| {
        let value = event
            .target_dyn_into::<HtmlInputElement>()
            .map(|input| input.value())
            .or_else(|| {
                event
                    .target_dyn_into::<HtmlTextAreaElement>()
                    .map(|area| area.value())
            });
        if let Some(value) = value {
            form.set(form.with(field, value));
        }
    })
}

fn text_input(form: &UseStateHandle<PanelForm>, field: Field, placeholder: &'static str) -> Html {
    html! {
        <input
            id={field.element_id()}
            class="text_pole"
            type="text"
            inputmode="numeric"
            placeholder={placeholder}
            value={form.get(field).to_string()}
            oninput={on_field(form, field)}
        />
    }
}

/// The floor tools drawer.
#[function_component(SettingsPanel)]
pub fn settings_panel(props: &SettingsPanelProps) -> Html {
    let open = use_state(|| false);
    let form = {
        let panel = props.panel.clone();
        use_state(move || PanelForm::from_config(&panel.config()))
    };

    let toggle = {
        let open = open.clone();
        Callback::from(move |_| open.set(!*open))
    };

    let on_hide = {
        let panel = props.panel.clone();
        let form = form.clone();
        Callback::from(move |_| {
            let panel = panel.clone();
            let form = form.clone();
            spawn_local(async move {
                let current = (*form).clone();
                if panel.apply_hide(&current.hide_start, &current.hide_end).await {
                    form.set(PanelForm::from_config(&panel.config()));
                }
            });
        })
    };

    let on_unhide = {
        let panel = props.panel.clone();
        let form = form.clone();
        Callback::from(move |_| {
            let panel = panel.clone();
            let form = form.clone();
            spawn_local(async move {
                let current = (*form).clone();
                if panel
                    .apply_unhide(&current.unhide_start, &current.unhide_end)
                    .await
                {
                    form.set(PanelForm::from_config(&panel.config()));
                }
            });
        })
    };

    let on_load_floor = {
        let panel = props.panel.clone();
        let form = form.clone();
        Callback::from(move |_| {
            if let Some(text) = panel.load_floor(&form.floor_number) {
                form.set(form.with(Field::FloorContent, text));
            }
        })
    };

    let on_apply_floor = {
        let panel = props.panel.clone();
        let form = form.clone();
        Callback::from(move |_| {
            let panel = panel.clone();
            let form = form.clone();
            spawn_local(async move {
                let current = (*form).clone();
                if panel
                    .apply_floor(&current.floor_number, &current.floor_content)
                    .await
                {
                    form.set(PanelForm::from_config(&panel.config()));
                }
            });
        })
    };

    let on_save_settings = {
        let panel = props.panel.clone();
        let form = form.clone();
        Callback::from(move |_| {
            if panel.save_init_settings(&form.retry_interval, &form.max_retries, &form.init_delay) {
                form.set(PanelForm::from_config(&panel.config()));
            }
        })
    };

    let content_class = if *open {
        "inline-drawer-content"
    } else {
        "inline-drawer-content hidden"
    };
    let icon_class = if *open {
        "inline-drawer-icon fa-solid fa-circle-chevron-up up"
    } else {
        "inline-drawer-icon fa-solid fa-circle-chevron-down down"
    };

    html! {
        <div class="xgj-settings inline-drawer">
            <div class="inline-drawer-toggle inline-drawer-header" onclick={toggle}>
                <b>{"Floor tools"}</b>
                <div class={icon_class}></div>
            </div>
            <div class={content_class}>
                <h4>{"Hide floors"}</h4>
                <div class="flex-container">
                    {text_input(&form, Field::HideStart, "start floor")}
                    {text_input(&form, Field::HideEnd, "end floor")}
                    <button id={ids::HIDE_APPLY} class="menu_button" onclick={on_hide}>
                        {"Hide"}
                    </button>
                </div>

                <h4>{"Unhide floors"}</h4>
                <div class="flex-container">
                    {text_input(&form, Field::UnhideStart, "start floor")}
                    {text_input(&form, Field::UnhideEnd, "end floor")}
                    <button id={ids::UNHIDE_APPLY} class="menu_button" onclick={on_unhide}>
                        {"Unhide"}
                    </button>
                </div>

                <h4>{"Edit floor"}</h4>
                <div class="flex-container">
                    {text_input(&form, Field::FloorNumber, "floor")}
                    <button id={ids::FLOOR_LOAD} class="menu_button" onclick={on_load_floor}>
                        {"Load"}
                    </button>
                </div>
                <textarea
                    id={ids::FLOOR_CONTENT}
                    class="text_pole"
                    rows="6"
                    value={form.floor_content.clone()}
                    oninput={on_field(&form, Field::FloorContent)}
                />
                <button id={ids::FLOOR_APPLY} class="menu_button" onclick={on_apply_floor}>
                    {"Apply"}
                </button>

                <h4>{"Startup"}</h4>
                <label for={ids::RETRY_INTERVAL}>{"Retry interval (ms)"}</label>
                {text_input(&form, Field::RetryInterval, "1000")}
                <label for={ids::MAX_RETRIES}>{"Max retries"}</label>
                {text_input(&form, Field::MaxRetries, "10")}
                <label for={ids::INIT_DELAY}>{"Init delay (ms)"}</label>
                {text_input(&form, Field::InitDelay, "0")}
                <button id={ids::SAVE_SETTINGS} class="menu_button" onclick={on_save_settings}>
                    {"Save settings"}
                </button>
            </div>
        </div>
    }
}
