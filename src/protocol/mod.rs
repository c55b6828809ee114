pub mod decode;
pub mod format;

pub use decode::{Decoder, decode, decode_and_log, encode};
pub use format::F32_WIDTH;
