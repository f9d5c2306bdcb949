use serde::{Deserialize, Serialize};

/// Linear RGB color.
///
/// Deserializes from an integer (`0xaae0f2` written as a number), a hex
/// string (`"0xaae0f2"` or `"#aae0f2"`) or an `[r, g, b]` float triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "ColorRepr")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Shown on surfaces whose texture is unresolved or failed.
    pub const PLACEHOLDER: Self = Self::new(0.55, 0.55, 0.6);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_hex(self) -> u32 {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (c(self.r) << 16) | (c(self.g) << 8) | c(self.b)
    }

    /// Parse `"0xRRGGBB"`, `"#RRGGBB"` or bare `"RRGGBB"`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .or_else(|| s.strip_prefix('#'))
            .unwrap_or(s);
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    /// Component-wise linear interpolation.
    pub fn mix(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(u32),
    Text(String),
    Triple([f32; 3]),
}

impl TryFrom<ColorRepr> for Rgb {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(hex) => Ok(Rgb::from_hex(hex)),
            ColorRepr::Text(s) => Rgb::parse_hex(&s).ok_or_else(|| format!("invalid color: {s:?}")),
            ColorRepr::Triple([r, g, b]) => Ok(Rgb::new(r, g, b)),
        }
    }
}

impl From<Rgb> for ColorRepr {
    fn from(c: Rgb) -> Self {
        ColorRepr::Hex(c.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        assert_eq!(Rgb::from_hex(0xaae0f2).to_hex(), 0xaae0f2);
    }

    #[test]
    fn parses_string_forms() {
        assert_eq!(Rgb::parse_hex("0xa875bd"), Some(Rgb::from_hex(0xa875bd)));
        assert_eq!(Rgb::parse_hex("#A875BD"), Some(Rgb::from_hex(0xa875bd)));
        assert_eq!(Rgb::parse_hex("nope"), None);
    }

    #[test]
    fn deserializes_all_reprs() {
        let a: Rgb = serde_json::from_str("255").unwrap();
        let b: Rgb = serde_json::from_str("\"0x0000ff\"").unwrap();
        let c: Rgb = serde_json::from_str("[0.0, 0.0, 1.0]").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert!(serde_json::from_str::<Rgb>("\"0xzz\"").is_err());
    }

    #[test]
    fn mix_endpoints() {
        let a = Rgb::BLACK;
        let b = Rgb::WHITE;
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }
}
