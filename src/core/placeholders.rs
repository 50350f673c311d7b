//! `{key}` placeholder substitution for messages.

/// Replace every `{key}` in `template` with its value.
///
/// Keys without a value are left untouched, so a message can be
/// filled in stages (a rule fills `{minimum}`, the property fills `{name}`).
///
/// ```rust
/// use vigil::core::replace_placeholders;
///
/// let message = replace_placeholders("{name} must be at least {minimum}", &[("minimum", "18")]);
/// assert_eq!(message, "{name} must be at least 18");
/// ```
pub fn replace_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |message, (key, value)| {
            message.replace(&format!("{{{key}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_all_occurrences() {
        let message = replace_placeholders("{name}, {name}!", &[("name", "Age")]);
        assert_eq!(message, "Age, Age!");
    }

    #[test]
    fn unknown_placeholders_survive() {
        let message = replace_placeholders("{value} is not {name}", &[("name", "Age")]);
        assert_eq!(message, "{value} is not Age");
    }

    #[test]
    fn empty_template_stays_empty() {
        assert_eq!(replace_placeholders("", &[("name", "Age")]), "");
    }
}
