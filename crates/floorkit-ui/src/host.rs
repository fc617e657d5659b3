//! Bindings to the host page: chat context, toasts and slash commands.
//!
//! # Design
//! - Host globals are looked up with `Reflect` on every call; a missing API is
//!   an error value, never a thrown exception.
//! - The chat array is the host's live object, so writes are visible to the host immediately.

use async_trait::async_trait;
use floorkit_core::{
    ChatContext, ChatHost, CommandError, CommandRegistry, HostError, Notifier, SlashCommand,
    Visibility,
};
use gloo::console;
use js_sys::{Array, Function, Promise, Reflect};
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, future_to_promise};

fn property(target: &JsValue, name: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, JsValue> {
    let method = property(target, name)
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("{name} is not a function")))?;
    method.apply(target, args)
}

/// The host's chat context object.
#[derive(Debug, Clone)]
pub struct HostContext {
    context: JsValue,
    chat: Array,
}

impl HostContext {
    fn message(&self, floor: usize) -> Option<JsValue> {
        let index = u32::try_from(floor).ok()?;
        if index >= self.chat.length() {
            return None;
        }
        Some(self.chat.get(index)).filter(JsValue::is_object)
    }

    fn flag(message: &JsValue, name: &str) -> bool {
        property(message, name)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    fn set(message: &JsValue, name: &str, value: &JsValue) -> bool {
        Reflect::set(message, &JsValue::from_str(name), value).unwrap_or(false)
    }
}

#[async_trait(?Send)]
impl ChatContext for HostContext {
    fn floor_count(&self) -> usize {
        self.chat.length() as usize
    }

    fn message_text(&self, floor: usize) -> Option<String> {
        let message = self.message(floor)?;
        Some(
            property(&message, "mes")
                .and_then(|value| value.as_string())
                .unwrap_or_default(),
        )
    }

    fn visibility(&self, floor: usize) -> Option<Visibility> {
        let message = self.message(floor)?;
        Some(Visibility {
            is_system: Self::flag(&message, "is_system"),
            is_hidden: Self::flag(&message, "is_hidden"),
        })
    }

    fn set_visibility(&self, floor: usize, visibility: Visibility) -> bool {
        let Some(message) = self.message(floor) else {
            return false;
        };
        Self::set(&message, "is_system", &JsValue::from_bool(visibility.is_system))
            && Self::set(&message, "is_hidden", &JsValue::from_bool(visibility.is_hidden))
    }

    fn set_text(&self, floor: usize, text: &str) -> bool {
        let Some(message) = self.message(floor) else {
            return false;
        };
        Self::set(&message, "mes", &JsValue::from_str(text))
    }

    async fn save_chat(&self) -> Result<(), HostError> {
        let returned = call_method(&self.context, "saveChat", &Array::new()).map_err(|err| {
            HostError::SaveFailed {
                detail: format!("{err:?}"),
            }
        })?;
        if let Ok(promise) = returned.dyn_into::<Promise>() {
            JsFuture::from(promise)
                .await
                .map_err(|err| HostError::SaveFailed {
                    detail: format!("{err:?}"),
                })?;
        }
        Ok(())
    }
}

/// `SillyTavern.getContext()` on the current page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageHost;

impl PageHost {
    fn raw_context() -> Option<JsValue> {
        let tavern = property(&js_sys::global(), "SillyTavern")?;
        call_method(&tavern, "getContext", &Array::new())
            .ok()
            .filter(JsValue::is_object)
    }
}

impl ChatHost for PageHost {
    type Context = HostContext;

    fn context(&self) -> Option<Self::Context> {
        let context = Self::raw_context()?;
        let chat = property(&context, "chat")?.dyn_into::<Array>().ok()?;
        Some(HostContext { context, chat })
    }
}

/// Toast notifications through the host's `toastr` global.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToastrNotifier;

impl ToastrNotifier {
    fn show(kind: &str, message: &str) {
        let shown = property(&js_sys::global(), "toastr").map(|toastr| {
            call_method(&toastr, kind, &Array::of1(&JsValue::from_str(message)))
        });
        if !matches!(shown, Some(Ok(_))) {
            console::log!(kind, message);
        }
    }
}

impl Notifier for ToastrNotifier {
    fn success(&self, message: &str) {
        Self::show("success", message);
    }

    fn error(&self, message: &str) {
        Self::show("error", message);
    }
}

/// Registers slash commands through `getContext().registerSlashCommand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostCommandRegistry;

impl CommandRegistry for HostCommandRegistry {
    fn register(&mut self, command: SlashCommand) -> Result<(), CommandError> {
        let registration_failed = |detail: String| CommandError::Registration {
            name: command.name(),
            detail,
        };
        let context = PageHost::raw_context()
            .ok_or_else(|| registration_failed("host context unavailable".to_string()))?;

        let callback = Closure::<dyn Fn(JsValue, JsValue) -> Promise>::new(
            move |_named: JsValue, unnamed: JsValue| {
                let args = unnamed.as_string().unwrap_or_default();
                future_to_promise(async move {
                    let reply = command.execute(&PageHost, &args).await;
                    Ok(JsValue::from_str(&reply))
                })
            },
        );
        let args = Array::of4(
            &JsValue::from_str(command.name()),
            callback.as_ref(),
            &Array::new(),
            &JsValue::from_str(command.help()),
        );
        call_method(&context, "registerSlashCommand", &args).map_err(|err| {
            warn!(command = command.name(), "host refused slash command");
            registration_failed(format!("{err:?}"))
        })?;
        // The host keeps calling the command for the lifetime of the page.
        callback.forget();
        Ok(())
    }
}
