use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use web_sys::BeforeUnloadEvent;

/// Asks for confirmation before leaving the page while `window.app_dirty`
/// is set.
pub fn install() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let listener = Closure::<dyn Fn(BeforeUnloadEvent)>::new(|event: BeforeUnloadEvent| {
        let dirty = web_sys::window()
            .and_then(|w| Reflect::get(&w, &JsValue::from_str("app_dirty")).ok())
            .and_then(|flag| flag.as_bool())
            .unwrap_or(false);
        if dirty {
            event.prevent_default();
            event.set_return_value("");
        }
    });
    window.set_onbeforeunload(Some(listener.as_ref().unchecked_ref()));
    listener.forget();
}
