// Background colour: `#RRGGBB` parsing and RGB distance

use std::fmt;
use std::str::FromStr;

use crate::error::CleanError;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Squared Euclidean distance to another colour.
    ///
    /// Thresholds are compared against the square so no square root is
    /// taken per pixel.
    pub fn distance_sq(&self, r: u8, g: u8, b: u8) -> u32 {
        let dr = i32::from(self.r) - i32::from(r);
        let dg = i32::from(self.g) - i32::from(g);
        let db = i32::from(self.b) - i32::from(b);
        (dr * dr + dg * dg + db * db) as u32
    }

    pub fn as_tuple(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = CleanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

/// Parse a colour string like `#899093` (the `#` is optional).
///
/// After stripping the `#`, exactly six hex digits must remain.
pub fn hex_to_rgb(hex: &str) -> crate::error::Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(CleanError::invalid_format(format!(
            "expected #RRGGBB, got '{hex}'"
        )));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| CleanError::invalid_format(format!("'{hex}': {e}")))
    };

    Ok(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
