use wasm_bindgen::prelude::*;

pub mod bootstrap;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod protocol;
pub mod resources;

use bootstrap::{EntryPoint, Session};
use config::OrganizerConfig;

#[wasm_bindgen(start)]
pub fn init() {
    diagnostics::init(log::Level::Info);
}

#[wasm_bindgen]
pub fn line_test() -> Result<Session, JsValue> {
    Ok(bootstrap::launch(EntryPoint::LineTest, OrganizerConfig::default())?)
}

#[wasm_bindgen]
pub fn texture_test() -> Result<Session, JsValue> {
    Ok(bootstrap::launch(EntryPoint::TextureTest, OrganizerConfig::default())?)
}

/// Starts the entry point named `entry` with an optional JSON configuration.
#[wasm_bindgen]
pub fn run_entry(entry: &str, config: Option<String>) -> Result<Session, JsValue> {
    let prepared = entry.parse::<EntryPoint>().and_then(|entry| {
        let config = match config.as_deref() {
            Some(text) => OrganizerConfig::from_json(text)?,
            None => OrganizerConfig::default(),
        };
        Ok((entry, config))
    });
    let (entry, config) = prepared.inspect_err(|err| log::error!("{}", err))?;
    Ok(bootstrap::launch(entry, config)?)
}

/// Parses `text` as JSON and logs the value.
#[wasm_bindgen]
pub fn log_json_string(text: &str) -> Result<(), JsValue> {
    diagnostics::emit(text)?;
    Ok(())
}

/// Decodes little-endian binary32 values from `bytes`, logging the values
/// and the raw bytes.
#[wasm_bindgen]
pub fn log_u8_as_f32_arr(bytes: &[u8]) -> Result<Vec<f32>, JsValue> {
    Ok(protocol::decode_and_log(bytes)?)
}
