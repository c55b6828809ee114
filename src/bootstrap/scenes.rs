use futures::future::join_all;
use serde_json::json;

use super::Organizer;
use crate::diagnostics;
use crate::error::OrganizerError;
use crate::events::{ResizeSubscription, ViewportDimensions};
use crate::protocol;
use crate::resources::CancelToken;

/// Host-side state an entry point leaves running after it returns.
#[derive(Default)]
pub struct SceneState {
    pub subscriptions: Vec<ResizeSubscription>,
    pub pending: Vec<CancelToken>,
}

/// A straight line segment in clip space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: [f32; 2],
    pub to: [f32; 2],
    pub width: f32,
}

/// Corner positions of the quad covering `segment` with clipped ends, as
/// interleaved x, y pairs: from+n, from-n, to+n, to-n.
pub fn line_vertices(segment: &Segment) -> [f32; 8] {
    let [x0, y0] = segment.from;
    let [x1, y1] = segment.to;
    let (dx, dy) = (x1 - x0, y1 - y0);
    let len = (dx * dx + dy * dy).sqrt();
    let (nx, ny) = if len > 0.0 {
        let half = segment.width / 2.0;
        (-dy / len * half, dx / len * half)
    } else {
        (0.0, 0.0)
    };

    [x0 + nx, y0 + ny, x0 - nx, y0 - ny, x1 + nx, y1 + ny, x1 - nx, y1 - ny]
}

const LINES: [Segment; 2] = [
    Segment {
        from: [0.0, 0.0],
        to: [0.5, 0.0],
        width: 0.01,
    },
    Segment {
        from: [0.0, 0.0],
        to: [0.0, 0.5],
        width: 0.02,
    },
];

pub(super) fn line_test(organizer: &Organizer) -> Result<SceneState, OrganizerError> {
    log::info!("starting line test");

    let vertices: Vec<f32> = LINES.iter().flat_map(line_vertices).collect();
    let bytes = protocol::encode(&vertices);
    let decoded = protocol::decode_and_log(&bytes)?;

    let viewport = organizer.viewport();
    let summary = json!({
        "entry": "line_test",
        "segments": LINES.len(),
        "floats": decoded.len(),
        "bytes": bytes.len(),
        "viewport": [viewport.width, viewport.height],
    });
    diagnostics::emit(&summary.to_string())?;

    Ok(SceneState {
        subscriptions: vec![watch_viewport(organizer)],
        pending: Vec::new(),
    })
}

pub(super) fn texture_test(organizer: &Organizer) -> Result<SceneState, OrganizerError> {
    log::info!("starting texture test");

    let mut pending = Vec::new();
    let mut loads = Vec::new();
    for url in &organizer.config().textures {
        let (load, token) = organizer.loader().load_async(url.as_str());
        pending.push(token);
        let url = url.clone();
        loads.push(async move { (url, load.await) });
    }

    wasm_bindgen_futures::spawn_local(async move {
        let results = join_all(loads).await;
        let total = results.len();
        let mut loaded = 0;
        for (url, result) in results {
            match result {
                Ok(image) => {
                    loaded += 1;
                    log::info!("loaded {} ({}x{})", url, image.width(), image.height());
                }
                Err(err) => log::error!("{}: {}", url, err),
            }
        }
        log::info!("{} of {} textures loaded", loaded, total);
    });

    Ok(SceneState {
        subscriptions: vec![watch_viewport(organizer)],
        pending,
    })
}

/// Logs each viewport change and, when configured, resizes the canvas
/// backing store to match its displayed size.
fn watch_viewport(organizer: &Organizer) -> ResizeSubscription {
    let canvas = organizer.canvas().clone();
    let sync = organizer.config().sync_canvas_size;
    if sync {
        sync_canvas(&canvas);
    }

    organizer.resize().subscribe(move |dims: ViewportDimensions| {
        log::info!("viewport {}x{}", dims.width, dims.height);
        if sync {
            sync_canvas(&canvas);
        }
    })
}

fn sync_canvas(canvas: &web_sys::HtmlCanvasElement) {
    canvas.set_width(canvas.client_width().max(0) as u32);
    canvas.set_height(canvas.client_height().max(0) as u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_segment_offsets_vertically() {
        let quad = line_vertices(&Segment {
            from: [0.0, 0.0],
            to: [0.5, 0.0],
            width: 0.01,
        });
        assert_eq!(quad, [0.0, 0.005, 0.0, -0.005, 0.5, 0.005, 0.5, -0.005]);
    }

    #[test]
    fn vertical_segment_offsets_horizontally() {
        let quad = line_vertices(&Segment {
            from: [0.0, 0.0],
            to: [0.0, 2.0],
            width: 1.0,
        });
        assert_eq!(quad, [-0.5, 0.0, 0.5, 0.0, -0.5, 2.0, 0.5, 2.0]);
    }

    #[test]
    fn degenerate_segment_collapses_to_point() {
        let quad = line_vertices(&Segment {
            from: [0.25, 0.25],
            to: [0.25, 0.25],
            width: 0.1,
        });
        assert!(quad.chunks(2).all(|p| p == [0.25, 0.25]));
    }

    #[test]
    fn line_buffer_survives_the_wire() {
        let vertices: Vec<f32> = LINES.iter().flat_map(line_vertices).collect();
        let bytes = protocol::encode(&vertices);
        assert_eq!(bytes.len(), LINES.len() * 8 * 4);
        assert_eq!(protocol::decode(&bytes).unwrap(), vertices);
    }
}
