//! Configuration and the caller-facing codec surface.

use crate::image::{ImageSink, ImageSource, Viewport};
use crate::pack::{self, CODE_UNIT_BITS};
use crate::{alpha, Error};

/// Immutable configuration for one [`Codec`] value.
///
/// Validated on construction and fixed for the lifetime of every call made
/// with it; there is no process-wide default to mutate.
#[derive(Clone, Copy)]
pub struct Config {
    t: u8,
    threshold: usize,
    eval_point: fn(usize) -> u64,
}

impl Config {
    /// Creates a configuration with the given symbol width and threshold.
    ///
    /// # Arguments
    ///
    /// * `t` - The symbol width in bits, `1..=7`
    /// * `threshold` - Symbols per polynomial group, at least 1. Embedding
    ///   supports any threshold; extraction only supports 1.
    ///
    /// # Returns
    /// [`Error::InvalidSymbolWidth`] or [`Error::InvalidThreshold`] when a
    /// parameter is out of range.
    pub fn new(t: u8, threshold: usize) -> Result<Self, Error> {
        if t < 1 || t > 7 {
            return Err(Error::InvalidSymbolWidth { t });
        }
        if threshold < 1 {
            return Err(Error::InvalidThreshold { threshold });
        }
        Ok(Self {
            t,
            threshold,
            eval_point: |i| i as u64 + 1,
        })
    }

    /// Replaces the polynomial evaluation points. `eval_point(i)` is the
    /// point the `i`-th share of each group is evaluated at.
    pub fn with_eval_point(mut self, eval_point: fn(usize) -> u64) -> Self {
        self.eval_point = eval_point;
        self
    }

    pub fn t(&self) -> u8 {
        self.t
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn eval_point(&self, i: usize) -> u64 {
        (self.eval_point)(i)
    }

    /// Length of the sentinel delimiter written after the message, in alpha
    /// slots.
    pub fn delimiter_len(&self) -> usize {
        3 * self.threshold
    }
}

impl Default for Config {
    /// Symbol width 3, threshold 1, evaluation points `i + 1`.
    fn default() -> Self {
        Self {
            t: 3,
            threshold: 1,
            eval_point: |i| i as u64 + 1,
        }
    }
}

/// Upper bound on the number of symbols embeddable in a `width` x `height`
/// surface at symbol width `t`.
///
/// A pure function of the geometry; message content never enters into it.
/// The bound is also used as the character-count limit by [`Codec::hide`],
/// and it does not subtract the delimiter: a message at exactly this bound
/// may still fail inside embedding when no delimiter slack remains.
pub fn capacity(width: u32, height: u32, t: u8) -> usize {
    t as usize * width as usize * height as usize / CODE_UNIT_BITS
}

/// The codec surface: hides messages in images and reveals them again.
///
/// Every call acquires its image source exactly once, owns every buffer it
/// works on, and shares no state with other calls; independent codec values
/// interoperate freely.
///
/// # Examples
///
/// ```
/// use mirage::{Codec, Config, PixelMap, PngSink, PngSource, Viewport};
/// # fn main() -> Result<(), mirage::Error> {
/// let codec = Codec::new(Config::default());
/// let cover = PixelMap::new(16, 16);
/// let stego = codec.hide("Hello World", cover, &PngSink, Viewport::default())?;
/// let message = codec.reveal(PngSource::new(&stego[..]), Viewport::default())?;
/// assert_eq!(message, "Hello World");
/// # Ok(())
/// # }
/// ```
pub struct Codec {
    config: Config,
}

impl Codec {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The number of characters that can be hidden in the source image.
    pub fn capacity(&self, source: impl ImageSource, viewport: Viewport) -> Result<usize, Error> {
        let map = source.acquire()?;
        let (width, height) = viewport.resolve(&map);
        Ok(capacity(width, height, self.config.t))
    }

    /// Hides `message` in the source image and serializes the result
    /// through `sink`.
    ///
    /// # Returns
    /// [`Error::MessageTooLong`] when the message's UTF-16 length exceeds
    /// [`capacity`], or [`Error::BufferTooSmall`] when the message fits the
    /// capacity bound but leaves no room for the delimiter.
    pub fn hide<S: ImageSink>(
        &self,
        message: &str,
        source: impl ImageSource,
        sink: &S,
        viewport: Viewport,
    ) -> Result<S::Output, Error> {
        let map = source.acquire()?;
        let (width, height) = viewport.resolve(&map);

        let capacity = capacity(width, height, self.config.t);
        let length = message.encode_utf16().count();
        if length > capacity {
            return Err(Error::MessageTooLong { length, capacity });
        }

        let mut map = map.render(width, height);
        let symbols = pack::pack(message, self.config.t);
        alpha::embed(map.data_mut(), &symbols, &self.config)?;
        sink.emit(&map)
    }

    /// Reveals the message hidden in the source image.
    pub fn reveal(&self, source: impl ImageSource, viewport: Viewport) -> Result<String, Error> {
        let map = source.acquire()?;
        let (width, height) = viewport.resolve(&map);
        let map = map.render(width, height);
        alpha::extract(map.data(), &self.config)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{capacity, Config};
    use crate::Error;

    #[test]
    fn config_rejects_out_of_range_symbol_widths() {
        assert!(matches!(
            Config::new(0, 1),
            Err(Error::InvalidSymbolWidth { t: 0 })
        ));
        assert!(matches!(
            Config::new(8, 1),
            Err(Error::InvalidSymbolWidth { t: 8 })
        ));
        for t in 1..=7 {
            assert!(Config::new(t, 1).is_ok());
        }
    }

    #[test]
    fn config_rejects_zero_threshold() {
        assert!(matches!(
            Config::new(3, 0),
            Err(Error::InvalidThreshold { threshold: 0 })
        ));
    }

    #[test]
    fn default_evaluation_points() {
        let config = Config::default();
        assert_eq!(config.eval_point(0), 1);
        assert_eq!(config.eval_point(3), 4);
    }

    #[test]
    fn capacity_values() {
        // floor(t * w * h / 16)
        assert_eq!(capacity(8, 6, 3), 9);
        assert_eq!(capacity(100, 100, 3), 1875);
        assert_eq!(capacity(1, 1, 7), 0);
        assert_eq!(capacity(0, 100, 3), 0);
    }

    #[test]
    fn delimiter_scales_with_threshold() {
        assert_eq!(Config::default().delimiter_len(), 3);
        assert_eq!(Config::new(3, 4).unwrap().delimiter_len(), 12);
    }
}
