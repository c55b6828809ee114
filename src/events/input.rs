use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use gloo_events::EventListener;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{Event, KeyboardEvent, MouseEvent, Window};

use super::{ResizeDispatcher, ResizeSubscription, ViewportDimensions, current_viewport};

/// Host input, in the order the host delivered it.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    /// Pointer position in CSS pixels from the viewport's top-left corner.
    MouseMove { x: i32, y: i32 },
    MouseDown(i16),
    MouseUp(i16),
    Focus,
    Blur,
    Resize(ViewportDimensions),
}

/// Input state as of the last [`InputCollector::poll`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSnapshot {
    pub focused: bool,
    /// `KeyboardEvent.code` of every key held down.
    pub keys_pressed: BTreeSet<String>,
    pub mouse_buttons_pressed: Vec<i16>,
    /// Pointer in [-1, 1] on both axes, y pointing up.
    pub mouse_position: [f32; 2],
    pub mouse_delta: [f32; 2],
    pub screen_size: ViewportDimensions,
}

impl InputSnapshot {
    fn new(screen_size: ViewportDimensions) -> Self {
        Self {
            focused: true,
            keys_pressed: BTreeSet::new(),
            mouse_buttons_pressed: Vec::new(),
            mouse_position: [0.0, 0.0],
            mouse_delta: [0.0, 0.0],
            screen_size,
        }
    }
}

type Queue = Rc<RefCell<Vec<InputEvent>>>;

/// Buffers host input between frames and folds it into an [`InputSnapshot`]
/// once per frame.
pub struct InputCollector {
    queue: Queue,
    state: InputSnapshot,
    mouse_pixel: (i32, i32),
    _resize: ResizeSubscription,
    _listeners: Vec<EventListener>,
}

impl InputCollector {
    /// Collector fed only by `push` and the resize dispatcher.
    pub fn new(screen_size: ViewportDimensions, resize: &ResizeDispatcher) -> Self {
        let queue: Queue = Rc::default();
        let resize_queue = Rc::clone(&queue);
        let subscription =
            resize.subscribe(move |dims| resize_queue.borrow_mut().push(InputEvent::Resize(dims)));

        Self {
            queue,
            state: InputSnapshot::new(screen_size),
            mouse_pixel: (0, 0),
            _resize: subscription,
            _listeners: Vec::new(),
        }
    }

    /// Collector listening for keyboard, mouse and focus events on `window`.
    /// Listeners detach when the collector is dropped.
    pub fn attach(window: &Window, resize: &ResizeDispatcher) -> Self {
        let mut collector = Self::new(current_viewport(window), resize);
        collector._listeners = vec![
            listen(window, "keydown", &collector.queue, |e| {
                e.dyn_ref::<KeyboardEvent>().map(|e| InputEvent::KeyDown(e.code()))
            }),
            listen(window, "keyup", &collector.queue, |e| {
                e.dyn_ref::<KeyboardEvent>().map(|e| InputEvent::KeyUp(e.code()))
            }),
            listen(window, "mousemove", &collector.queue, |e| {
                e.dyn_ref::<MouseEvent>()
                    .map(|e| InputEvent::MouseMove { x: e.x(), y: e.y() })
            }),
            listen(window, "mousedown", &collector.queue, |e| {
                e.dyn_ref::<MouseEvent>().map(|e| InputEvent::MouseDown(e.button()))
            }),
            listen(window, "mouseup", &collector.queue, |e| {
                e.dyn_ref::<MouseEvent>().map(|e| InputEvent::MouseUp(e.button()))
            }),
            listen(window, "focus", &collector.queue, |_| Some(InputEvent::Focus)),
            listen(window, "blur", &collector.queue, |_| Some(InputEvent::Blur)),
        ];
        collector
    }

    pub fn push(&self, event: InputEvent) {
        self.queue.borrow_mut().push(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn snapshot(&self) -> &InputSnapshot {
        &self.state
    }

    /// Applies everything queued since the last poll.
    ///
    /// While unfocused, keys and buttons read as released and key presses are
    /// ignored.
    pub fn poll(&mut self) -> &InputSnapshot {
        let events = std::mem::take(&mut *self.queue.borrow_mut());
        let state = &mut self.state;

        for event in events {
            match event {
                InputEvent::KeyDown(code) => {
                    if state.focused {
                        state.keys_pressed.insert(code);
                    }
                }
                InputEvent::KeyUp(code) => {
                    state.keys_pressed.remove(&code);
                }
                InputEvent::MouseMove { x, y } => self.mouse_pixel = (x, y),
                InputEvent::MouseDown(button) => {
                    if state.focused && !state.mouse_buttons_pressed.contains(&button) {
                        state.mouse_buttons_pressed.push(button);
                    }
                }
                InputEvent::MouseUp(button) => state.mouse_buttons_pressed.retain(|b| *b != button),
                InputEvent::Focus => state.focused = true,
                InputEvent::Blur => {
                    state.focused = false;
                    state.keys_pressed.clear();
                    state.mouse_buttons_pressed.clear();
                }
                InputEvent::Resize(dims) => state.screen_size = dims,
            }
        }

        let position = normalize(self.mouse_pixel, state.screen_size);
        state.mouse_delta = [
            position[0] - state.mouse_position[0],
            position[1] - state.mouse_position[1],
        ];
        state.mouse_position = position;

        &self.state
    }
}

fn listen<F>(window: &Window, event_type: &'static str, queue: &Queue, translate: F) -> EventListener
where
    F: Fn(&Event) -> Option<InputEvent> + 'static,
{
    let queue = Rc::clone(queue);
    EventListener::new(window, event_type, move |event| {
        if let Some(input) = translate(event) {
            queue.borrow_mut().push(input);
        }
    })
}

fn normalize((x, y): (i32, i32), screen: ViewportDimensions) -> [f32; 2] {
    if screen.width == 0 || screen.height == 0 {
        return [0.0, 0.0];
    }
    [
        x as f32 / screen.width as f32 * 2.0 - 1.0,
        1.0 - y as f32 / screen.height as f32 * 2.0,
    ]
}
