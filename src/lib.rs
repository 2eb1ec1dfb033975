//! Hide text messages in the alpha channel of RGBA images.
//!
//! A message is repacked from 16-bit code units into narrow `t`-bit symbols,
//! every symbol group is evaluated as a polynomial over a small prime field,
//! and the results are written into the alpha bytes of consecutive pixels as
//! values close to fully opaque. A run of sentinel bytes marks the end of the
//! message; extraction reverses each step.
//!
//! The embedding only ever touches alpha bytes. Color channels pass through
//! unchanged, and the modified image differs from the cover by at most a
//! small alpha bias per pixel.
//!
//! This is concealment, not encryption: there is no key, and the scheme
//! makes no attempt to resist statistical steganalysis. It guarantees a
//! lossless round-trip of the message bits, nothing more.

pub mod alpha;
pub mod codec;
pub mod image;
pub mod pack;
pub mod prime;

pub use codec::{capacity, Codec, Config};
pub use image::{ImageSink, ImageSource, PixelMap, PngSink, PngSource, Viewport};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Symbol width t = {t} is not valid: 0 < t < 8.")]
    InvalidSymbolWidth { t: u8 },
    #[error("Threshold {threshold} is not valid: threshold must be at least 1.")]
    InvalidThreshold { threshold: usize },
    #[error("Message is too long: can only store {capacity} characters, but {length} is given.")]
    MessageTooLong { length: usize, capacity: usize },
    #[error("Unsupported threshold value for extraction: {threshold}.")]
    UnsupportedThreshold { threshold: usize },
    #[error("Buffer is too small: Buffer is {actual} bytes, but {required} bytes is required.")]
    BufferTooSmall { actual: usize, required: usize },
    #[error("No 8-bit RGB(A) surface is available: image is {color:?} at depth {depth:?}.")]
    UnsupportedSurface {
        color: png::ColorType,
        depth: png::BitDepth,
    },
    #[error("Failed to decode the source image.")]
    Decode(#[from] png::DecodingError),
    #[error("Failed to encode the output image.")]
    Encode(#[from] png::EncodingError),
}
