//! Run-length expansion
//!
//! A literal byte is copied verbatim and remembered; `0x81 0x00` is an
//! escaped literal `0x81` (which does not become the remembered byte);
//! `0x81 N` appends `N - 1` further copies of the remembered byte, so a run
//! of length `k` is stored as one literal plus `0x81 k`.

use crate::common::{CartPackError, Result, RLE_MARKER};

/// Expand a run-length stream into the raw asset bytes.
///
/// Fails with [`CartPackError::TruncatedRun`] if the input ends on a marker
/// byte with no count byte after it.
pub fn decompress_rle(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len());
    let mut last: u8 = 0;
    let mut pos = 0;

    while pos < data.len() {
        let byte = data[pos];
        if byte == RLE_MARKER {
            let count = *data.get(pos + 1).ok_or(CartPackError::TruncatedRun)?;
            if count == 0 {
                out.push(RLE_MARKER);
            } else {
                for _ in 1..count {
                    out.push(last);
                }
            }
            pos += 2;
        } else {
            out.push(byte);
            last = byte;
            pos += 1;
        }
    }

    Ok(out)
}
