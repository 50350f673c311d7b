//! Locale-configured numeric parsing and formatting.

use super::error::NumericError;
use super::format::{DecimalPlaces, FormatSpec};
use crate::core::ValueFormatter;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separators and currency conventions of a locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericSettings {
    pub decimal_separator: String,
    pub thousands_separator: String,
    pub currency_sign: String,
    pub currency_minor_unit_places: usize,
}

impl Default for NumericSettings {
    fn default() -> Self {
        Self {
            decimal_separator: ".".to_string(),
            thousands_separator: ",".to_string(),
            currency_sign: "$".to_string(),
            currency_minor_unit_places: 2,
        }
    }
}

#[derive(Clone, Debug)]
struct Patterns {
    integer: Regex,
    float: Regex,
    currency_major: Regex,
    currency_major_minor: Regex,
}

impl Patterns {
    fn compile(settings: &NumericSettings) -> Result<Self, NumericError> {
        let thousands = regex::escape(&settings.thousands_separator);
        let decimal = regex::escape(&settings.decimal_separator);
        let currency = regex::escape(&settings.currency_sign);

        let integer = format!("[0-9]+({thousands}[0-9]{{3}})*");
        let float = format!("{integer}({decimal}[0-9]+)?");
        let currency_major = format!("({currency})?{integer}");
        let currency_major_minor = format!(
            "{currency_major}({decimal}[0-9]{{{}}})?",
            settings.currency_minor_unit_places
        );

        Ok(Self {
            integer: anchored(&integer)?,
            float: anchored(&float)?,
            currency_major: anchored(&currency_major)?,
            currency_major_minor: anchored(&currency_major_minor)?,
        })
    }
}

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^{pattern}$"))
}

/// Parses and formats numeric strings for one locale.
///
/// # Example
///
/// ```rust
/// use vigil::numeric::NumericHelper;
///
/// let helper = NumericHelper::init(",", ".", "€", 2).unwrap();
///
/// assert_eq!(helper.format(1234567.891, "C,.c"), "€1.234.567,89");
/// assert_eq!(helper.parse("€1.234.567,89").unwrap(), 1234567.89);
/// assert!(helper.is_currency_major_minor("€1.234,50"));
/// assert!(!helper.is_integer("1234,5"));
/// ```
#[derive(Clone, Debug)]
pub struct NumericHelper {
    settings: NumericSettings,
    patterns: Patterns,
}

impl NumericHelper {
    pub fn new(settings: NumericSettings) -> Result<Self, NumericError> {
        if settings.decimal_separator.is_empty() {
            return Err(NumericError::InvalidSettings {
                reason: "decimal separator must not be empty".to_string(),
            });
        }
        if settings.decimal_separator == settings.thousands_separator {
            return Err(NumericError::InvalidSettings {
                reason: "decimal and thousands separators must differ".to_string(),
            });
        }
        if !settings.currency_sign.is_empty()
            && (settings.currency_sign == settings.decimal_separator
                || settings.currency_sign == settings.thousands_separator)
        {
            return Err(NumericError::InvalidSettings {
                reason: "currency sign must differ from both separators".to_string(),
            });
        }
        let patterns = Patterns::compile(&settings)?;
        Ok(Self { settings, patterns })
    }

    pub fn init(
        decimal_separator: &str,
        thousands_separator: &str,
        currency_sign: &str,
        currency_minor_unit_places: usize,
    ) -> Result<Self, NumericError> {
        Self::new(NumericSettings {
            decimal_separator: decimal_separator.to_string(),
            thousands_separator: thousands_separator.to_string(),
            currency_sign: currency_sign.to_string(),
            currency_minor_unit_places,
        })
    }

    pub fn settings(&self) -> &NumericSettings {
        &self.settings
    }

    /// Format `value` according to `spec`.
    ///
    /// A spec outside the grammar formats the plain number with the
    /// locale's decimal separator and nothing else.
    pub fn format(&self, value: f64, spec: &str) -> String {
        let spec = FormatSpec::parse(spec).unwrap_or_default();
        let magnitude = value.abs();

        let digits = match self.places(spec) {
            None => magnitude.to_string(),
            Some(places) => format!("{magnitude:.places$}"),
        };
        self.decorate(value < 0.0, &digits, spec)
    }

    /// Format an integer according to `spec` without going through `f64`,
    /// so values beyond 2^53 keep every digit.
    pub fn format_integer(&self, value: i64, spec: &str) -> String {
        let spec = FormatSpec::parse(spec).unwrap_or_default();
        let mut digits = value.unsigned_abs().to_string();
        if let Some(places) = self.places(spec).filter(|places| *places > 0) {
            digits.push('.');
            digits.extend(std::iter::repeat('0').take(places));
        }
        self.decorate(value < 0, &digits, spec)
    }

    fn places(&self, spec: FormatSpec) -> Option<usize> {
        match spec.decimal_places {
            DecimalPlaces::Natural => None,
            DecimalPlaces::Fixed(places) => Some(places),
            DecimalPlaces::CurrencyMinor => Some(self.settings.currency_minor_unit_places),
        }
    }

    fn decorate(&self, negative: bool, digits: &str, spec: FormatSpec) -> String {
        let mut text = digits.replacen('.', &self.settings.decimal_separator, 1);
        if spec.include_thousands_separator {
            text = self.add_thousands_separator(&text);
        }

        let mut formatted = String::with_capacity(text.len() + 2);
        if negative {
            formatted.push('-');
        }
        if spec.include_currency_sign {
            formatted.push_str(&self.settings.currency_sign);
        }
        formatted.push_str(&text);
        formatted
    }

    /// Parse a possibly formatted number. Blank input is zero.
    pub fn parse(&self, text: &str) -> Result<f64, NumericError> {
        let canonical = self.unformat(text);
        let canonical = canonical.trim();
        if canonical.is_empty() {
            return Ok(0.0);
        }

        canonical
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| NumericError::NotNumeric {
                input: text.to_string(),
            })
    }

    /// Strip the currency sign and thousands separators and turn the
    /// decimal separator into `.`.
    ///
    /// Replacement is literal and covers every occurrence.
    pub fn unformat(&self, text: &str) -> String {
        let mut canonical = text.to_string();
        for (from, to) in [
            (self.settings.currency_sign.as_str(), ""),
            (self.settings.thousands_separator.as_str(), ""),
            (self.settings.decimal_separator.as_str(), "."),
        ] {
            if !from.is_empty() {
                canonical = canonical.replace(from, to);
            }
        }
        canonical
    }

    /// Group the integer digits of `text` in threes.
    ///
    /// `text` uses the locale's decimal separator; everything after it is
    /// left alone, as is a leading `-`.
    pub fn add_thousands_separator(&self, text: &str) -> String {
        let (integer, fraction) = match text.find(self.settings.decimal_separator.as_str()) {
            Some(index) => text.split_at(index),
            None => (text, ""),
        };
        let (sign, digits) = match integer.strip_prefix('-') {
            Some(digits) => ("-", digits),
            None => ("", integer),
        };

        let separator = &self.settings.thousands_separator;
        let mut grouped = String::with_capacity(text.len() + digits.len() / 3 * separator.len());
        grouped.push_str(sign);
        let count = digits.chars().count();
        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (count - index) % 3 == 0 {
                grouped.push_str(separator);
            }
            grouped.push(digit);
        }
        grouped.push_str(fraction);
        grouped
    }

    pub fn is_integer(&self, text: &str) -> bool {
        self.patterns.integer.is_match(text)
    }

    pub fn is_float(&self, text: &str) -> bool {
        self.patterns.float.is_match(text)
    }

    pub fn is_currency_major(&self, text: &str) -> bool {
        self.patterns.currency_major.is_match(text)
    }

    pub fn is_currency_major_minor(&self, text: &str) -> bool {
        self.patterns.currency_major_minor.is_match(text)
    }
}

impl ValueFormatter<f64> for NumericHelper {
    fn format_value(&self, value: &f64, format: Option<&str>) -> String {
        self.format(*value, format.unwrap_or(""))
    }
}

impl ValueFormatter<i64> for NumericHelper {
    fn format_value(&self, value: &i64, format: Option<&str>) -> String {
        self.format_integer(*value, format.unwrap_or(""))
    }
}

impl ValueFormatter<Option<f64>> for NumericHelper {
    fn format_value(&self, value: &Option<f64>, format: Option<&str>) -> String {
        value
            .map(|value| self.format(value, format.unwrap_or("")))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> NumericHelper {
        NumericHelper::new(NumericSettings::default()).unwrap()
    }

    #[test]
    fn formats_currency_with_minor_units() {
        let helper = helper();
        assert_eq!(helper.format(1234.5, ",.c"), "$1,234.50");
        assert_eq!(helper.format(1234.5, "C,.c"), "$1,234.50");
        assert_eq!(helper.format(-1234.5, "C,.2"), "-$1,234.50");
    }

    #[test]
    fn formats_without_markers() {
        let helper = helper();
        assert_eq!(helper.format(1234.6, ""), "1235");
        assert_eq!(helper.format(1234.5, "."), "1234.5");
        assert_eq!(helper.format(1234567.0, ","), "1,234,567");
        assert_eq!(helper.format(0.125, ".3"), "0.125");
    }

    #[test]
    fn invalid_spec_formats_plain_number() {
        assert_eq!(helper().format(1234.5, "bogus"), "1234.5");
    }

    #[test]
    fn parses_formatted_text() {
        let helper = helper();
        assert_eq!(helper.parse("$1,234.50").unwrap(), 1234.5);
        assert_eq!(helper.parse("$1,234,567.25").unwrap(), 1234567.25);
        assert_eq!(helper.parse("-12").unwrap(), -12.0);
        assert_eq!(helper.parse("  ").unwrap(), 0.0);
    }

    #[test]
    fn rejects_non_numeric_text() {
        let error = helper().parse("twelve").unwrap_err();
        assert!(matches!(error, NumericError::NotNumeric { ref input } if input == "twelve"));
        assert!(helper().parse("inf").is_err());
    }

    #[test]
    fn unformat_replaces_every_occurrence() {
        let helper = NumericHelper::init(",", ".", "€", 2).unwrap();
        assert_eq!(helper.unformat("€1.234.567,89"), "1234567.89");
    }

    #[test]
    fn separators_are_literal() {
        let helper = NumericHelper::init(".", "*", "+", 2).unwrap();
        assert!(helper.is_integer("1*234"));
        assert!(!helper.is_integer("1x234"));
        assert!(helper.is_currency_major("+1*234"));
        assert_eq!(helper.unformat("+1*234*567.5"), "1234567.5");
    }

    #[test]
    fn classifies_numeric_text() {
        let helper = helper();
        assert!(helper.is_integer("1234"));
        assert!(helper.is_integer("1,234"));
        assert!(!helper.is_integer("1,23"));
        assert!(!helper.is_integer("1.5"));

        assert!(helper.is_float("1,234.5"));
        assert!(!helper.is_float(".5"));

        assert!(helper.is_currency_major("$1,234"));
        assert!(!helper.is_currency_major("$1,234.50"));

        assert!(helper.is_currency_major_minor("$1,234.50"));
        assert!(helper.is_currency_major_minor("1234"));
        assert!(!helper.is_currency_major_minor("$1,234.5"));
    }

    #[test]
    fn groups_thousands() {
        let helper = helper();
        assert_eq!(helper.add_thousands_separator("1234567.891"), "1,234,567.891");
        assert_eq!(helper.add_thousands_separator("-1234"), "-1,234");
        assert_eq!(helper.add_thousands_separator("123"), "123");
        assert_eq!(helper.add_thousands_separator(""), "");
    }

    #[test]
    fn empty_decimal_separator_is_rejected() {
        let result = NumericHelper::init("", ",", "$", 2);
        assert!(matches!(result, Err(NumericError::InvalidSettings { .. })));
    }

    #[test]
    fn matching_separators_are_rejected() {
        let result = NumericHelper::init(".", ".", "$", 2);
        assert!(matches!(result, Err(NumericError::InvalidSettings { .. })));
    }

    #[test]
    fn currency_sign_must_differ_from_separators() {
        for (decimal, thousands) in [("$", ","), (".", "$")] {
            let result = NumericHelper::init(decimal, thousands, "$", 2);
            assert!(matches!(result, Err(NumericError::InvalidSettings { .. })));
        }
        assert!(NumericHelper::init(".", "", "", 2).is_ok());
    }

    #[test]
    fn large_integers_keep_every_digit() {
        let helper = helper();
        let value = (1i64 << 53) + 1;
        assert_eq!(helper.format_integer(value, ""), "9007199254740993");
        assert_eq!(helper.format_value(&i64::MIN, Some(",")), "-9,223,372,036,854,775,808");
        assert_eq!(helper.format_integer(-1234, "C,.c"), "-$1,234.00");
        assert_eq!(helper.format_integer(7, "."), "7");
    }

    #[test]
    fn settings_load_from_partial_config() {
        let settings: NumericSettings =
            serde_json::from_str(r#"{"decimal_separator": ",", "thousands_separator": "."}"#)
                .unwrap();
        assert_eq!(settings.currency_sign, "$");
        assert_eq!(settings.currency_minor_unit_places, 2);
        assert_eq!(settings.decimal_separator, ",");
    }

    #[test]
    fn formats_as_value_formatter() {
        let helper = helper();
        assert_eq!(helper.format_value(&1500i64, Some(",")), "1,500");
        assert_eq!(helper.format_value(&2.7f64, None), "3");
        assert_eq!(helper.format_value(&None::<f64>, Some(".2")), "");
    }
}
