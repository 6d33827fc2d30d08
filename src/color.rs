use serde::{Deserialize, Serialize};

use crate::error::{WavyError, WavyResult};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (case-insensitive, leading `#` optional).
    pub fn parse(s: &str) -> WavyResult<Self> {
        let t = s.trim();
        let t = t.strip_prefix('#').unwrap_or(t);

        fn hex_byte(pair: &str) -> WavyResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| WavyError::config_parse(format!("invalid hex byte \"{pair}\"")))
        }

        if !t.is_ascii() {
            return Err(WavyError::config_parse(format!("invalid color \"{s}\"")));
        }

        match t.len() {
            6 => Ok(Self::rgb(
                hex_byte(&t[0..2])?,
                hex_byte(&t[2..4])?,
                hex_byte(&t[4..6])?,
            )),
            8 => Ok(Self::rgba(
                hex_byte(&t[0..2])?,
                hex_byte(&t[2..4])?,
                hex_byte(&t[4..6])?,
                hex_byte(&t[6..8])?,
            )),
            _ => Err(WavyError::config_parse(format!(
                "color \"{s}\" must be #RRGGBB or #RRGGBBAA"
            ))),
        }
    }

}

impl std::fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgba8::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_rgb_and_rgba() {
        assert_eq!(Rgba8::parse("#6d2dcc").unwrap(), Rgba8::rgb(0x6d, 0x2d, 0xcc));
        assert_eq!(Rgba8::parse("292929").unwrap(), Rgba8::rgb(0x29, 0x29, 0x29));
        assert_eq!(
            Rgba8::parse("#0000ff80").unwrap(),
            Rgba8::rgba(0, 0, 0xff, 0x80)
        );
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(Rgba8::parse("not-a-color").is_err());
        assert!(Rgba8::parse("#12345").is_err());
        assert!(Rgba8::parse("#gg0000").is_err());
        assert!(Rgba8::parse("").is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let c = Rgba8::rgba(0x6d, 0x2d, 0xcc, 0x80);
        assert_eq!(Rgba8::parse(&c.to_string()).unwrap(), c);
        let opaque = Rgba8::rgb(0x29, 0x29, 0x29);
        assert_eq!(opaque.to_string(), "#292929");
    }

    #[test]
    fn deserializes_from_json_string() {
        let c: Rgba8 = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(c, Rgba8::rgb(255, 0, 0));
        assert!(serde_json::from_str::<Rgba8>("\"#zzz\"").is_err());
    }
}
