//! Image collaborators: owned pixel buffers, sources, and sinks.
//!
//! The codec itself only ever sees a [`PixelMap`], an owned RGBA byte
//! buffer. Getting pixels in and out of transportable encodings is the job
//! of the [`ImageSource`] and [`ImageSink`] traits; the [`PngSource`] and
//! [`PngSink`] implementations cover the PNG format, and a `PixelMap` is
//! itself a source for the already-decoded case.

use crate::Error;
use std::io::Read;

/// An owned RGBA pixel buffer: four bytes per pixel, row-major.
#[derive(Clone, Debug)]
pub struct PixelMap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelMap {
    /// Creates a blank, fully opaque surface of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        let pixels = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            data.extend_from_slice(&[0, 0, 0, 255]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps an existing RGBA buffer.
    ///
    /// # Returns
    /// [`Error::BufferTooSmall`] if `data` is not exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, Error> {
        let required = width as usize * height as usize * 4;
        if data.len() != required {
            return Err(Error::BufferTooSmall {
                actual: data.len(),
                required,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Draws this map onto a surface of the given dimensions.
    ///
    /// Same dimensions pass the buffer through; differing dimensions sample
    /// nearest-neighbor, which keeps every output pixel an exact copy of
    /// some input pixel.
    pub fn render(self, width: u32, height: u32) -> PixelMap {
        if width == self.width && height == self.height {
            return self;
        }
        if self.data.is_empty() {
            return PixelMap::new(width, height);
        }
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height as u64 {
            let sy = y * u64::from(self.height) / u64::from(height);
            for x in 0..width as u64 {
                let sx = x * u64::from(self.width) / u64::from(width);
                let i = ((sy * u64::from(self.width) + sx) * 4) as usize;
                data.extend_from_slice(&self.data[i..i + 4]);
            }
        }
        PixelMap {
            width,
            height,
            data,
        }
    }
}

/// Optional per-call overrides for the surface dimensions.
///
/// Unset fields fall back to the source image's own dimensions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Viewport {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Viewport {
    pub fn resolve(&self, map: &PixelMap) -> (u32, u32) {
        (
            self.width.unwrap_or(map.width),
            self.height.unwrap_or(map.height),
        )
    }
}

/// Anything that can be turned into a pixel buffer exactly once.
///
/// `acquire` consumes the source, so one source value is good for one
/// acquisition; a codec call acquires its source once, up front, and never
/// observes a partially loaded image.
pub trait ImageSource {
    fn acquire(self) -> Result<PixelMap, Error>;
}

/// An already-decoded image is its own source.
impl ImageSource for PixelMap {
    fn acquire(self) -> Result<PixelMap, Error> {
        Ok(self)
    }
}

/// Decodes a PNG stream into a [`PixelMap`].
///
/// 8-bit RGBA passes through; 8-bit RGB is widened with opaque alpha. Any
/// other color type or depth has no RGBA rendition here and is rejected
/// with [`Error::UnsupportedSurface`].
pub struct PngSource<R> {
    reader: R,
}

impl<R: Read> PngSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> ImageSource for PngSource<R> {
    fn acquire(self) -> Result<PixelMap, Error> {
        let decoder = png::Decoder::new(self.reader);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf)?;
        buf.truncate(frame.buffer_size());

        let data = match (frame.color_type, frame.bit_depth) {
            (png::ColorType::Rgba, png::BitDepth::Eight) => buf,
            (png::ColorType::Rgb, png::BitDepth::Eight) => {
                let mut rgba = Vec::with_capacity(buf.len() / 3 * 4);
                for px in buf.chunks_exact(3) {
                    rgba.extend_from_slice(px);
                    rgba.push(255);
                }
                rgba
            }
            (color, depth) => return Err(Error::UnsupportedSurface { color, depth }),
        };
        PixelMap::from_rgba(frame.width, frame.height, data)
    }
}

/// Serializes a pixel buffer into a transportable encoding.
pub trait ImageSink {
    type Output;

    fn emit(&self, map: &PixelMap) -> Result<Self::Output, Error>;
}

/// Encodes a [`PixelMap`] as 8-bit RGBA PNG bytes.
///
/// The output can be fed straight back into a [`PngSource`].
pub struct PngSink;

impl ImageSink for PngSink {
    type Output = Vec<u8>;

    fn emit(&self, map: &PixelMap) -> Result<Vec<u8>, Error> {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, map.width(), map.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(map.data())?;
        writer.finish()?;
        Ok(out)
    }
}
