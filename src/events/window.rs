use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::{ResizeDispatcher, ViewportDimensions};

/// Reads `innerWidth`/`innerHeight` from the window.
pub fn current_viewport(window: &Window) -> ViewportDimensions {
    let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    ViewportDimensions::from_host(read(window.inner_width()), read(window.inner_height()))
}

/// Forwards the window's `resize` events into a [`ResizeDispatcher`].
///
/// The listener is removed when this value is dropped.
pub struct WindowResizeSource {
    _listener: EventListener,
}

impl WindowResizeSource {
    pub fn attach(window: &Window, dispatcher: &ResizeDispatcher) -> Self {
        let target = window.clone();
        let dispatcher = dispatcher.clone();
        let listener = EventListener::new(window, "resize", move |_| {
            let dimensions = current_viewport(&target);
            log::trace!("window resized to {}x{}", dimensions.width, dimensions.height);
            dispatcher.dispatch(dimensions);
        });

        Self {
            _listener: listener,
        }
    }
}
