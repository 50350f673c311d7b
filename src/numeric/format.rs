//! Format spec mini-grammar: `[C][,][.digits|.c]`.

/// Largest explicit number of decimal places accepted in a spec.
pub const MAX_DECIMAL_PLACES: usize = 100;

/// How many decimal places a formatted number gets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecimalPlaces {
    /// Shortest representation that round-trips.
    #[default]
    Natural,
    /// Exactly this many places.
    Fixed(usize),
    /// The currency's minor unit places from the helper settings.
    CurrencyMinor,
}

/// A parsed format spec.
///
/// | spec    | sign | thousands | places        |
/// |---------|------|-----------|---------------|
/// | `""`    | no   | no        | 0             |
/// | `","`   | no   | yes       | 0             |
/// | `".2"`  | no   | no        | 2             |
/// | `"."`   | no   | no        | natural       |
/// | `",.c"` | yes  | yes       | currency      |
/// | `"C.c"` | yes  | no        | currency      |
///
/// A `c` place count implies the currency sign.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatSpec {
    pub include_currency_sign: bool,
    pub include_thousands_separator: bool,
    pub decimal_places: DecimalPlaces,
}

impl FormatSpec {
    /// Parse `spec`, or `None` if it is not in the grammar.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vigil::numeric::{DecimalPlaces, FormatSpec};
    ///
    /// let spec = FormatSpec::parse(",.2").unwrap();
    /// assert!(spec.include_thousands_separator);
    /// assert_eq!(spec.decimal_places, DecimalPlaces::Fixed(2));
    ///
    /// assert!(FormatSpec::parse("x.y").is_none());
    /// ```
    pub fn parse(spec: &str) -> Option<Self> {
        let (currency_marker, rest) = strip(spec, 'C');
        let (include_thousands_separator, rest) = strip(rest, ',');
        let (point, places) = strip(rest, '.');

        let decimal_places = match places {
            "c" => DecimalPlaces::CurrencyMinor,
            "" if point => DecimalPlaces::Natural,
            "" => DecimalPlaces::Fixed(0),
            digits if digits.bytes().all(|b| b.is_ascii_digit()) => {
                let count: usize = digits.parse().ok()?;
                if count > MAX_DECIMAL_PLACES {
                    return None;
                }
                DecimalPlaces::Fixed(count)
            }
            _ => return None,
        };

        Some(Self {
            include_currency_sign: currency_marker
                || decimal_places == DecimalPlaces::CurrencyMinor,
            include_thousands_separator,
            decimal_places,
        })
    }
}

fn strip(text: &str, marker: char) -> (bool, &str) {
    match text.strip_prefix(marker) {
        Some(rest) => (true, rest),
        None => (false, text),
    }
}
