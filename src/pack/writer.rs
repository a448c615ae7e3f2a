//! Codeword packing
//!
//! Serializes a codeword sequence into the variable-width bit stream. The
//! writer tracks the same next-free-code counter as the reader so both sides
//! agree on the width of every codeword.

use crate::bits::BitWriter;
use crate::common::{Codeword, Result, CODE_END, FIRST_PHRASE_CODE};

/// Width in bits of a codeword written while `next_code` is the next free
/// dictionary slot.
fn code_width(next_code: u16) -> u32 {
    match next_code {
        0..=0x1FF => 9,
        0x200..=0x3FF => 10,
        0x400..=0x7FF => 11,
        _ => 12,
    }
}

/// Pack codewords into the compressed byte stream.
///
/// The original packer always flushes one final byte, so a stream that ends
/// bit-aligned still gains a trailing zero byte. The reader never consumes
/// that pad; it stops at the end code.
pub fn pack_codewords(codewords: &[Codeword]) -> Result<Vec<u8>> {
    let mut bits = BitWriter::new();
    let mut next_code: u16 = FIRST_PHRASE_CODE;

    for &codeword in codewords {
        bits.write_bits(codeword.raw(), code_width(next_code))?;
        match codeword {
            Codeword::Reset => next_code = CODE_END,
            Codeword::End => break,
            _ => next_code = next_code.saturating_add(1),
        }
    }

    let aligned = bits.bit_len() % 8 == 0;
    let mut out = bits.into_bytes();
    if aligned {
        out.push(0x00);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Codeword::{End, Literal, Reference, Reset};
    use crate::unpack::read_codewords;

    #[test]
    fn test_width_thresholds() {
        assert_eq!(code_width(0x101), 9);
        assert_eq!(code_width(0x1FF), 9);
        assert_eq!(code_width(0x200), 10);
        assert_eq!(code_width(0x3FF), 10);
        assert_eq!(code_width(0x400), 11);
        assert_eq!(code_width(0x800), 12);
    }

    #[test]
    fn test_end_only_stream() {
        // 0x101 in 9 bits: bits 0..=7 give 0x01, bit 8 gives 0x01
        assert_eq!(pack_codewords(&[End]).unwrap(), [0x01, 0x01]);
    }

    #[test]
    fn test_known_stream() {
        let codewords = [
            Reset,
            Literal(0x41),
            Literal(0x42),
            Reference(0x102),
            Reference(0x102),
            End,
        ];
        assert_eq!(
            pack_codewords(&codewords).unwrap(),
            [0x00, 0x83, 0x08, 0x11, 0x28, 0x30, 0x20]
        );
    }

    #[test]
    fn test_aligned_stream_gains_pad_byte() {
        // No codewords at all: zero bits is aligned, the flush still writes
        // one byte
        assert_eq!(pack_codewords(&[]).unwrap(), [0x00]);
    }

    #[test]
    fn test_reset_rewinds_code_counter() {
        // After a reset the counter drops below the first phrase code, so
        // the reader and writer stay at 9 bits together.
        let codewords = [Reset, Literal(0x41), Reset, Literal(0x42), End];
        let packed = pack_codewords(&codewords).unwrap();
        let (read_back, _) = read_codewords(&packed, 0).unwrap();
        assert_eq!(read_back, codewords);
    }

    #[test]
    fn test_round_trip_through_reader() {
        let mut codewords = vec![Reset, Literal(0x41)];
        for i in 0..0x300u16 {
            codewords.push(Literal((i % 0x100) as u8));
        }
        codewords.push(End);
        let packed = pack_codewords(&codewords).unwrap();
        let (read_back, consumed) = read_codewords(&packed, 0).unwrap();
        assert_eq!(read_back, codewords);
        assert!(consumed <= packed.len());
    }
}
