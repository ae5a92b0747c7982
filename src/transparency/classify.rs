use crate::{
    foundation::{
        color::Color,
        error::{WatermarkError, WatermarkResult},
    },
    raster::Raster,
    validate::validate_color_triple,
};

/// Transparency capability of a raster, as reported by its color model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransparencyClass {
    /// No alpha information at all.
    Opaque,
    /// Every pixel is either fully opaque or fully transparent.
    Bitmask,
    /// Arbitrary per-pixel alpha.
    Translucent,
    /// Transparency semantics could not be determined from the color model.
    Unsupported,
}

impl TransparencyClass {
    /// Only translucent watermarks may be blended with their own alpha channel.
    pub fn allows_alpha_channel(self) -> bool {
        matches!(self, Self::Translucent)
    }

    pub fn allows_key_color(self) -> bool {
        matches!(self, Self::Opaque | Self::Bitmask)
    }
}

impl std::fmt::Display for TransparencyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Opaque => "OPAQUE",
            Self::Bitmask => "BITMASK",
            Self::Translucent => "TRANSLUCENT",
            Self::Unsupported => "not defined",
        })
    }
}

/// How watermark pixels are deemed transparent while blending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransparencyMode {
    /// Every covered pixel is blended.
    #[default]
    None,
    /// Watermark pixels with alpha 0 leave the base pixel untouched.
    AlphaChannel,
    /// Watermark pixels exactly equal to the key color leave the base pixel untouched.
    KeyColor(Color),
}

pub fn classify(watermark: &Raster) -> TransparencyClass {
    watermark.model().transparency
}

/// Turn the caller's transparency answers into a [`TransparencyMode`].
///
/// `use_alpha` is only honored for translucent watermarks and `key_color` only for
/// opaque or bitmask ones. An [`TransparencyClass::Unsupported`] watermark accepts no
/// transparency request at all.
pub fn resolve_transparency(
    class: TransparencyClass,
    use_alpha: bool,
    key_color: Option<&str>,
) -> WatermarkResult<TransparencyMode> {
    if use_alpha && !class.allows_alpha_channel() {
        return Err(WatermarkError::TransparencyUnavailable {
            requested: "alpha channel",
            class,
        });
    }

    match key_color {
        Some(_) if !class.allows_key_color() => Err(WatermarkError::TransparencyUnavailable {
            requested: "transparency color",
            class,
        }),
        Some(raw) => Ok(TransparencyMode::KeyColor(validate_color_triple(raw)?)),
        None if use_alpha => Ok(TransparencyMode::AlphaChannel),
        None => {
            if class == TransparencyClass::Unsupported {
                tracing::warn!("watermark transparency is not defined; blending every pixel");
            }
            Ok(TransparencyMode::None)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transparency/classify.rs"]
mod tests;
