use gloo_events::EventListener;
use web_sys::HtmlImageElement;

use super::{Completion, ResourceFetcher, ResourceLocator};
use crate::error::{LoadError, describe_js};

/// A fully decoded image, ready to hand to a texture upload.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    image: HtmlImageElement,
}

impl ImageHandle {
    pub fn width(&self) -> u32 {
        self.image.natural_width()
    }

    pub fn height(&self) -> u32 {
        self.image.natural_height()
    }

    pub fn element(&self) -> &HtmlImageElement {
        &self.image
    }
}

/// Loads images through `HtmlImageElement`, completing on `load` or `error`.
#[derive(Debug, Clone, Default)]
pub struct ImageFetcher {
    cross_origin: Option<String>,
}

impl ImageFetcher {
    pub fn new(cross_origin: Option<String>) -> Self {
        Self { cross_origin }
    }
}

impl ResourceFetcher for ImageFetcher {
    type Handle = ImageHandle;

    fn fetch(&self, locator: &ResourceLocator, completion: Completion<ImageHandle>) {
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(err) => {
                completion.complete(Err(LoadError::Host(describe_js(&err))));
                return;
            }
        };
        if let Some(origin) = &self.cross_origin {
            image.set_cross_origin(Some(origin.as_str()));
        }

        let on_load = {
            let loaded = image.clone();
            let completion = completion.clone();
            EventListener::once(&image, "load", move |_| {
                completion.complete(Ok(ImageHandle { image: loaded }));
            })
        };
        let on_error = {
            let completion = completion.clone();
            let locator = locator.to_string();
            EventListener::once(&image, "error", move |_| {
                log::warn!("image failed to load: {}", locator);
                completion.complete(Err(LoadError::Failed { locator }));
            })
        };

        // The listeners live in the completion until it settles. wasm-bindgen
        // defers freeing a closure that is dropped while it is running.
        let target = image.clone();
        completion.on_release(move || {
            drop((on_load, on_error));
            if !target.complete() {
                // Cancelled mid-flight: stop the fetch.
                if let Err(err) = target.remove_attribute("src") {
                    log::warn!("failed to abort image request: {}", describe_js(&err));
                }
            }
        });

        image.set_src(locator.as_str());
    }
}
