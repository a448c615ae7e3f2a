//! Codeword stream reading
//!
//! Splits a compressed block into its codeword sequence. The reader tracks
//! the same next-code counter the LZW dictionary maintains, so the codeword
//! width grows in lockstep with dictionary growth and the bit cursor never
//! drifts from what the encoder wrote.

use crate::bits::BitReader;
use crate::common::{
    CartPackError, Codeword, Result, CODE_END, CODE_RESET, FIRST_PHRASE_CODE, MAX_CODE_WIDTH,
    MIN_CODE_WIDTH,
};

/// Read the codeword sequence of the block starting at `offset` in `image`.
///
/// Returns the codewords in stream order, with the end code as the final
/// element, and the exact number of source bytes consumed (rounded up to a
/// whole byte when the end code finishes mid-byte).
///
/// Fails with [`CartPackError::OutOfBounds`] if the stream runs out of bytes
/// before the end code, and [`CartPackError::UndefinedCode`] if a codeword
/// value exceeds the highest code the dictionary could have assigned at that
/// point.
pub fn read_codewords(image: &[u8], offset: usize) -> Result<(Vec<Codeword>, usize)> {
    let block = image
        .get(offset..)
        .ok_or(CartPackError::OutOfBounds { offset })?;
    let mut bits = BitReader::new(block);
    let mut width = MIN_CODE_WIDTH;
    let mut next_code = FIRST_PHRASE_CODE;
    let mut codewords = Vec::new();

    loop {
        let raw = bits.read_bits(width)?;
        match raw {
            CODE_RESET => {
                codewords.push(Codeword::Reset);
                width = MIN_CODE_WIDTH;
                // The codeword after a reset is written directly and defines
                // no dictionary entry; the counter rejoins at 0x102 one
                // codeword later.
                next_code = CODE_END;
            }
            CODE_END => {
                codewords.push(Codeword::End);
                break;
            }
            _ => {
                // Equality is legal: the codeword may name the entry that is
                // about to be defined (handled by the LZW expander).
                if raw > next_code {
                    return Err(CartPackError::UndefinedCode {
                        code: raw,
                        next: next_code,
                    });
                }
                codewords.push(Codeword::from_raw(raw));
                next_code = next_code.saturating_add(1);
                if u32::from(next_code) >= (1 << width) && width < MAX_CODE_WIDTH {
                    width += 1;
                }
            }
        }
    }

    Ok((codewords, bits.bytes_consumed()))
}
