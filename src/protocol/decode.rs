use super::format::{F32_WIDTH, element_count};
use crate::error::DecodeError;

/// Decodes a packed buffer of little-endian binary32 values.
///
/// The buffer is not retained; the returned values are a fresh allocation.
pub fn decode(buffer: &[u8]) -> Result<Vec<f32>, DecodeError> {
    Decoder::new(buffer).decode_f32s()
}

/// Decodes `buffer` and writes both the values and the raw bytes to the
/// diagnostic log.
pub fn decode_and_log(buffer: &[u8]) -> Result<Vec<f32>, DecodeError> {
    let values = decode(buffer)?;
    log::info!("{:?}", values);
    log::info!("{:?}", buffer);
    Ok(values)
}

/// Serializes values in the same layout `decode` reads.
pub fn encode(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Reads every remaining value. The unread tail must be a whole number
    /// of elements; nothing is consumed otherwise.
    pub fn decode_f32s(&mut self) -> Result<Vec<f32>, DecodeError> {
        let len = self.remaining();
        let count = element_count(len).ok_or(DecodeError::MalformedInput {
            len,
            width: F32_WIDTH,
        })?;
        self.read_f32_array(count)
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    // primitives

    pub fn read_f32_array(&mut self, count: usize) -> Result<Vec<f32>, DecodeError> {
        (0..count).map(|_| self.read_f32()).collect()
    }

    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        let bytes = self.read_bytes(F32_WIDTH)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.offset + len > self.data.len() {
            return Err(DecodeError::UnexpectedEof {
                offset: self.offset,
            });
        }
        let data = self.data;
        let slice = &data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn round_trips_whole_buffers(words in proptest::collection::vec(any::<[u8; 4]>(), 0..64)) {
            let buffer: Vec<u8> = words.concat();
            let values = decode(&buffer).unwrap();
            prop_assert_eq!(values.len(), buffer.len() / 4);
            prop_assert_eq!(encode(&values), buffer);
        }

        #[test]
        fn rejects_ragged_buffers(buffer in proptest::collection::vec(any::<u8>(), 0..256)) {
            prop_assume!(buffer.len() % 4 != 0);
            let is_malformed = matches!(decode(&buffer), Err(DecodeError::MalformedInput { .. }));
            prop_assert!(is_malformed);
        }
    }
}
