use core::{fmt, str::FromStr};

use crate::Error;

/// Textual rendering requested from [`Generator::generate`].
///
/// Parses case-insensitively from `number`, `hex`, `base36` and `base62`.
///
/// ```
/// use distid::Format;
///
/// assert_eq!("HEX".parse::<Format>().unwrap(), Format::Hex);
/// assert_eq!(Format::default(), Format::Number);
/// assert!("base64".parse::<Format>().is_err());
/// ```
///
/// [`Generator::generate`]: crate::Generator::generate
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// The raw unsigned integer in decimal.
    #[default]
    Number,
    /// Lowercase hexadecimal, zero-padded to 16 characters.
    Hex,
    /// Lowercase base 36.
    Base36,
    /// Base 62 over `0-9A-Za-z`.
    Base62,
}

impl Format {
    pub const ALL: [Self; 4] = [Self::Number, Self::Hex, Self::Base36, Self::Base62];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Hex => "hex",
            Self::Base36 => "base36",
            Self::Base62 => "base62",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownFormat {
                format: s.to_owned(),
            })
    }
}
