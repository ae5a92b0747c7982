use crate::transparency::TransparencyClass;

/// Convenience result type used across the crate.
pub type WatermarkResult<T> = Result<T, WatermarkError>;

/// Which input image a diagnostic refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterRole {
    /// The image the watermark is blended onto.
    Base,
    /// The watermark image itself.
    Watermark,
}

impl RasterRole {
    /// Noun used in diagnostics ("image" or "watermark").
    pub fn noun(self) -> &'static str {
        match self {
            Self::Base => "image",
            Self::Watermark => "watermark",
        }
    }
}

impl std::fmt::Display for RasterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

/// Error taxonomy of a compositing run.
///
/// Every variant is fatal to the run. `Display` renders a single diagnostic line.
#[derive(thiserror::Error, Debug)]
pub enum WatermarkError {
    /// An input path does not exist.
    #[error("The file {path} doesn't exist.")]
    FileNotFound {
        /// Path as given by the caller.
        path: String,
    },

    /// The raster does not have exactly three color components.
    #[error("The number of {role} color components isn't 3.")]
    UnsupportedColorModel {
        /// Which input failed.
        role: RasterRole,
        /// Color components found.
        components: u8,
    },

    /// The raster is neither 24 nor 32 bits per pixel.
    #[error("The {role} isn't 24 or 32-bit.")]
    UnsupportedBitDepth {
        /// Which input failed.
        role: RasterRole,
        /// Bits per pixel found.
        bits_per_pixel: u16,
    },

    /// The watermark is wider or taller than the base image.
    #[error("The watermark's dimensions are larger.")]
    OversizedWatermark,

    /// The percentage input is not an integer.
    #[error("The transparency percentage isn't an integer number.")]
    NotInteger,

    /// The percentage is outside `0..=100`.
    #[error("The transparency percentage is out of range.")]
    PercentageOutOfRange,

    /// The key color input is not three integers.
    #[error("The transparency color input is invalid.")]
    InvalidColorFormat,

    /// A key color channel is outside `0..=255`.
    #[error("The transparency color input is out of range.")]
    ChannelOutOfRange,

    /// The position method is neither `single` nor `grid`.
    #[error("The position method input is invalid.")]
    InvalidPositionMethod,

    /// The position input is not two integers.
    #[error("The position input is invalid.")]
    InvalidPositionFormat,

    /// A position coordinate is outside the placement bounds.
    #[error("The position input is out of range.")]
    PositionOutOfRange,

    /// The output file name does not end in `.jpg` or `.png`.
    #[error("The output file extension isn't \"jpg\" or \"png\".")]
    InvalidOutputExtension,

    /// The requested transparency handling is not offered for this watermark.
    #[error("The watermark's transparency is {class}, {requested} can't be used.")]
    TransparencyUnavailable {
        /// Human-readable name of the requested mode.
        requested: &'static str,
        /// Classification of the watermark.
        class: TransparencyClass,
    },

    /// Invalid threading or other run configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from the codec or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WatermarkError {
    /// Build a [`WatermarkError::FileNotFound`] value.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Build a [`WatermarkError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
