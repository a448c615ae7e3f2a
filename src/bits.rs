//! LSB-first bit packing and unpacking
//!
//! The legacy format packs each codeword least significant bit first: bit 0
//! of a codeword lands in the lowest unused bit of the current output byte,
//! and codewords spill across byte boundaries without alignment.

use crate::common::{CartPackError, Result};

/// Reads fixed-width values from a byte buffer, least significant bit first.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over `data`, positioned at bit 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Read `width` bits (1..=16) as an unsigned value.
    ///
    /// Fails with [`CartPackError::OutOfBounds`] if the read would pass the
    /// end of the buffer; the cursor is not advanced in that case.
    pub fn read_bits(&mut self, width: u32) -> Result<u16> {
        debug_assert!((1..=16).contains(&width));
        let end = self.bit_pos + width as usize;
        if end > self.data.len() * 8 {
            return Err(CartPackError::OutOfBounds {
                offset: self.data.len(),
            });
        }

        let mut value: u32 = 0;
        for i in 0..width as usize {
            let bit = self.bit_pos + i;
            let set = (self.data[bit / 8] >> (bit % 8)) & 1;
            value |= (set as u32) << i;
        }
        self.bit_pos = end;
        Ok(value as u16)
    }

    /// Current cursor position in bits.
    pub fn bit_pos(&self) -> usize {
        self.bit_pos
    }

    /// Bytes consumed so far, rounded up to a whole byte.
    pub fn bytes_consumed(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }
}

/// Writes fixed-width values to a growing byte buffer, least significant bit
/// first. The final partial byte is zero-padded.
#[derive(Debug, Default)]
pub struct BitWriter {
    out: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `width` bits (1..=16) of `value`.
    ///
    /// Fails with [`CartPackError::EncodingOverflow`] if `value` does not fit
    /// in `width` bits.
    pub fn write_bits(&mut self, value: u16, width: u32) -> Result<()> {
        debug_assert!((1..=16).contains(&width));
        if width < 16 && value >= 1 << width {
            return Err(CartPackError::EncodingOverflow { value, width });
        }

        for i in 0..width as usize {
            if self.bit_len % 8 == 0 {
                self.out.push(0);
            }
            if (value >> i) & 1 != 0 {
                self.out[self.bit_len / 8] |= 1 << (self.bit_len % 8);
            }
            self.bit_len += 1;
        }
        Ok(())
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Consume the writer, returning the packed bytes with the final partial
    /// byte zero-padded.
    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }
}
