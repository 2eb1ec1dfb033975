//! Embedding symbols into alpha bytes and reading them back.
//!
//! Symbols are consumed in groups of `threshold`. Each group is interpreted
//! as the coefficients of a polynomial which is evaluated at `threshold`
//! fixed points; every evaluation, reduced modulo the field prime `p` and
//! offset by `256 - p`, becomes the alpha byte of one pixel. With the
//! default `threshold` of 1 the polynomial is constant and every symbol maps
//! straight to one near-opaque alpha byte.
//!
//! The message ends with a delimiter of `3 * threshold` sentinel bytes, and
//! every alpha slot after it is padded with the sentinel as well. Extraction
//! stops at the first run of [`TERMINATION_RUN`] consecutive sentinel bytes,
//! which the pad guarantees to exist whenever the delimiter fits.

use crate::codec::Config;
use crate::pack::{self, CODE_UNIT_BITS};
use crate::prime::next_prime;
use crate::Error;

/// Number of consecutive sentinel alpha bytes that terminates extraction.
pub const TERMINATION_RUN: usize = CODE_UNIT_BITS;

/// The sentinel byte value: fully opaque alpha.
pub const SENTINEL: u8 = 255;

/// Embeds `symbols` into the alpha bytes of the RGBA buffer `data`.
///
/// Color bytes are never written. The buffer is checked up front and left
/// untouched on failure.
///
/// # Arguments
///
/// * `data` - The RGBA pixel buffer, four bytes per pixel, row-major
/// * `symbols` - The symbol stream produced by [`pack::pack`]
/// * `config` - Symbol width, threshold, and evaluation points
///
/// # Returns
/// [`Error::BufferTooSmall`] if the shares plus the delimiter need more
/// alpha slots than the buffer has.
pub fn embed(data: &mut [u8], symbols: &[u8], config: &Config) -> Result<(), Error> {
    let p = next_prime(1 << config.t());
    let offset = (256 - p) as u8;
    let threshold = config.threshold();

    let mut shares = Vec::with_capacity(symbols.len());
    for group in symbols.chunks(threshold) {
        // A partial group at the stream's end yields one share per present
        // symbol, with the polynomial degree reduced accordingly.
        for i in 0..group.len() {
            let x = config.eval_point(i);
            let mut q = 0u64;
            for &symbol in group.iter().rev() {
                q = (q * x + u64::from(symbol)) % p;
            }
            shares.push(offset + q as u8);
        }
    }

    let slots = data.len() / 4;
    let required = shares.len() + config.delimiter_len();
    if slots < required {
        return Err(Error::BufferTooSmall {
            actual: data.len(),
            required: required * 4,
        });
    }

    for (slot, share) in shares.iter().enumerate() {
        data[slot * 4 + 3] = *share;
    }
    // Delimiter and trailing pad share the sentinel value, so the rest of
    // the buffer is one uniform fill.
    for slot in shares.len()..slots {
        data[slot * 4 + 3] = SENTINEL;
    }
    Ok(())
}

/// Reads symbols back out of the alpha bytes of `data` and reassembles text.
///
/// Only `threshold = 1` streams can be inverted; any other threshold is
/// rejected with [`Error::UnsupportedThreshold`]. Scanning stops at the
/// first sentinel run. Exhausting the buffer without finding one is not an
/// error: whatever was read so far is decoded as-is.
pub fn extract(data: &[u8], config: &Config) -> Result<String, Error> {
    let threshold = config.threshold();
    if threshold != 1 {
        return Err(Error::UnsupportedThreshold { threshold });
    }

    let p = next_prime(1 << config.t());
    let offset = (256 - p) as u8;
    let slots = data.len() / 4;

    let mut symbols = Vec::new();
    for slot in 0..slots {
        if terminated(data, slot) {
            break;
        }
        symbols.push(data[slot * 4 + 3].wrapping_sub(offset));
    }

    // The last symbol belongs to the virtual zero unit appended by the
    // packer; it carries no message bits.
    symbols.pop();
    Ok(pack::unpack(&symbols, config.t()))
}

/// Whether the [`TERMINATION_RUN`] alpha bytes starting at `slot` are all
/// the sentinel. A window that runs past the end of the buffer never
/// terminates the scan.
fn terminated(data: &[u8], slot: usize) -> bool {
    let slots = data.len() / 4;
    slot + TERMINATION_RUN <= slots
        && (slot..slot + TERMINATION_RUN).all(|s| data[s * 4 + 3] == SENTINEL)
}
