use crate::foundation::error::{HandoffError, HandoffResult};

pub use kurbo::{Point, Rect, Vec2};

/// Milliseconds on the host's monotonic clock.
///
/// All sequencing is expressed in this unit; the host decides where zero is.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct Millis(pub u64);

impl Millis {
    /// Zero milliseconds.
    pub const ZERO: Self = Self(0);

    /// Saturating addition.
    pub fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating subtraction, `0` when `other > self`.
    pub fn since(self, earlier: Self) -> Self {
        Self(self.0.saturating_sub(earlier.0))
    }

    /// Scale by a non-negative factor, rounding to the nearest millisecond.
    pub fn scaled(self, factor: f64) -> Self {
        Self(((self.0 as f64) * factor.max(0.0)).round() as u64)
    }

    /// Value in fractional seconds.
    pub fn as_secs_f64(self) -> f64 {
        (self.0 as f64) / 1000.0
    }
}

/// Viewport geometry as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// CSS pixel width.
    pub width: f64,
    /// CSS pixel height.
    pub height: f64,
    /// Device pixel ratio (backing-store scale).
    #[serde(default = "one")]
    pub device_pixel_ratio: f64,
}

fn one() -> f64 {
    1.0
}

impl Viewport {
    /// Create a validated viewport with positive, finite dimensions.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> HandoffResult<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(HandoffError::validation(
                "Viewport width and height must be finite and > 0",
            ));
        }
        if !(device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0) {
            return Err(HandoffError::validation(
                "Viewport device_pixel_ratio must be finite and > 0",
            ));
        }
        Ok(Self {
            width,
            height,
            device_pixel_ratio,
        })
    }

    /// Full viewport rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Straight-alpha RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque colour from RGB bytes.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional, case-insensitive).
    pub fn parse_hex(s: &str) -> HandoffResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> HandoffResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| HandoffError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(HandoffError::validation("hex colour must be ASCII"));
        }
        match s.len() {
            6 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: 255,
            }),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(HandoffError::validation(
                "hex colour must be #RRGGBB or #RRGGBBAA",
            )),
        }
    }

    /// Lower-case CSS hex form; alpha is only emitted when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
