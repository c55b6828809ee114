//! Wire layout of the module's numeric output: packed IEEE-754 binary32
//! values, least-significant byte first, independent of the host platform.

/// Width in bytes of one encoded binary32 value.
pub const F32_WIDTH: usize = 4;

/// Number of whole binary32 values in a buffer of `len` bytes, or `None`
/// when the length leaves a partial element.
pub fn element_count(len: usize) -> Option<usize> {
    if len % F32_WIDTH == 0 {
        Some(len / F32_WIDTH)
    } else {
        None
    }
}
