//! Run-length collapse
//!
//! Runs of three or more identical bytes become one literal plus
//! `0x81 <run length>`; shorter runs stay literal. A literal `0x81` in the
//! input is written as `0x81 0x00`, with any pending run flushed first so
//! the decoder can never mistake one for the other.

use crate::common::{RLE_MARKER, RLE_MAX_RUN, RLE_MIN_RUN};

/// Collapse raw asset bytes into the run-length stream the LZW layer
/// compresses.
pub fn compress_rle(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut last: Option<u8> = None;
    // Repeats counted beyond the literal already emitted
    let mut run: usize = 0;

    for &byte in data {
        if byte == RLE_MARKER {
            flush_run(&mut out, last, run);
            run = 0;
            out.push(RLE_MARKER);
            out.push(0x00);
            // `last` survives: an escaped marker does not change the
            // decoder's repeat byte either.
        } else if last == Some(byte) && run < RLE_MAX_RUN - 1 {
            run += 1;
        } else {
            flush_run(&mut out, last, run);
            run = 0;
            last = Some(byte);
            out.push(byte);
        }
    }
    flush_run(&mut out, last, run);

    out
}

/// Emit `run` pending repeats of `last`, as an escape sequence when the full
/// run (the emitted literal plus the repeats) reaches the threshold.
fn flush_run(out: &mut Vec<u8>, last: Option<u8>, run: usize) {
    if run + 1 >= RLE_MIN_RUN {
        out.push(RLE_MARKER);
        out.push((run + 1) as u8);
    } else if let Some(byte) = last {
        for _ in 0..run {
            out.push(byte);
        }
    }
}
