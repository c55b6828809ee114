pub mod json;

use std::sync::Once;

pub use json::emit;

static INIT: Once = Once::new();

/// Installs the console logger and panic hook on first use, then sets the
/// maximum level. Later calls only change the level.
pub fn init(level: log::Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        // Filtering happens through `log::set_max_level` below.
        wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    });
    log::set_max_level(level.to_level_filter());
    log::debug!("log level set to {}", level);
}
