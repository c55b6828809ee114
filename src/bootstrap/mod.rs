pub mod entry;
pub mod scenes;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

use crate::config::OrganizerConfig;
use crate::diagnostics;
use crate::error::{ModuleLoadError, OrganizerError};
use crate::events::{
    InputCollector, InputSnapshot, ResizeDispatcher, ViewportDimensions, WindowResizeSource,
    current_viewport,
};
use crate::resources::{ImageFetcher, ResourceLoadBridge};

pub use entry::EntryPoint;
use scenes::SceneState;

pub struct Organizer {
    config: OrganizerConfig,
    window: Window,
    canvas: HtmlCanvasElement,
    resize: ResizeDispatcher,
    _resize_source: WindowResizeSource,
    input: InputCollector,
    loader: ResourceLoadBridge<ImageFetcher>,
    viewport: ViewportDimensions,
}

impl Organizer {
    pub fn init(config: OrganizerConfig) -> Result<Self, ModuleLoadError> {
        diagnostics::init(config.level()?);
        log::info!("organizer initializing");

        let window = web_sys::window().ok_or(ModuleLoadError::NoWindow)?;
        let document = window.document().ok_or(ModuleLoadError::NoDocument)?;
        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .ok_or_else(|| ModuleLoadError::CanvasMissing(config.canvas_id.clone()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ModuleLoadError::NotACanvas(config.canvas_id.clone()))?;

        let resize = ResizeDispatcher::new();
        let resize_source = WindowResizeSource::attach(&window, &resize);
        let input = InputCollector::attach(&window, &resize);
        let viewport = current_viewport(&window);
        let loader = ResourceLoadBridge::new(ImageFetcher::new(config.cross_origin.clone()));

        log::info!(
            "canvas #{} ready, viewport {}x{}",
            config.canvas_id,
            viewport.width,
            viewport.height
        );

        Ok(Self {
            config,
            window,
            canvas,
            resize,
            _resize_source: resize_source,
            input,
            loader,
            viewport,
        })
    }

    /// Runs `entry`. The returned session keeps its listeners and pending
    /// loads alive until dropped.
    pub fn run(self, entry: EntryPoint) -> Result<Session, OrganizerError> {
        let scene = match entry {
            EntryPoint::LineTest => scenes::line_test(&self)?,
            EntryPoint::TextureTest => scenes::texture_test(&self)?,
        };
        Ok(Session {
            entry,
            scene,
            organizer: self,
        })
    }

    pub fn config(&self) -> &OrganizerConfig {
        &self.config
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn resize(&self) -> &ResizeDispatcher {
        &self.resize
    }

    pub fn loader(&self) -> &ResourceLoadBridge<ImageFetcher> {
        &self.loader
    }

    /// Folds the input received since the previous call into the snapshot.
    pub fn poll_input(&mut self) -> &InputSnapshot {
        self.input.poll()
    }

    /// Viewport size read during initialization.
    pub fn viewport(&self) -> ViewportDimensions {
        self.viewport
    }
}

/// A running entry point, owned by the host page.
#[wasm_bindgen]
pub struct Session {
    entry: EntryPoint,
    // Dropped before the organizer so subscriptions detach first.
    scene: SceneState,
    organizer: Organizer,
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(getter)]
    pub fn entry(&self) -> String {
        self.entry.name().to_string()
    }

    /// Cancels every load that has not completed yet; returns how many were
    /// still pending.
    pub fn cancel_pending(&mut self) -> usize {
        let cancelled = self.scene.pending.drain(..).filter(|token| token.cancel()).count();
        log::info!("{} cancelled {} pending loads", self.entry, cancelled);
        cancelled
    }

    /// Live resize handlers, the input collector's included.
    pub fn resize_subscribers(&self) -> usize {
        self.organizer.resize().subscriber_count()
    }

    /// Input state for the current frame, as JSON.
    pub fn poll_input(&mut self) -> Result<String, JsValue> {
        let snapshot = self.organizer.poll_input();
        serde_json::to_string(snapshot).map_err(|err| JsValue::from_str(&err.to_string()))
    }
}

/// Bootstraps the organizer and runs `entry`, reporting failures to the
/// diagnostic log. Nothing is retried.
pub fn launch(entry: EntryPoint, config: OrganizerConfig) -> Result<Session, OrganizerError> {
    let result = Organizer::init(config)
        .map_err(OrganizerError::from)
        .and_then(|organizer| organizer.run(entry));
    if let Err(err) = &result {
        log::error!("{} failed: {}", entry, err);
    }
    result
}
