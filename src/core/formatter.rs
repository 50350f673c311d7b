//! Value formatting hook for messages.

/// Formats a property value for display, e.g. in a `{value}` placeholder.
///
/// `format` is the property's configured value format, if any; its grammar
/// belongs to the formatter.
pub trait ValueFormatter<V> {
    fn format_value(&self, value: &V, format: Option<&str>) -> String;
}

impl<V, F> ValueFormatter<V> for F
where
    F: Fn(&V, Option<&str>) -> String,
{
    fn format_value(&self, value: &V, format: Option<&str>) -> String {
        self(value, format)
    }
}
