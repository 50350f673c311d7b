//! Default classification of "missing" values.

/// Whether a value counts as absent for the purposes of `required`.
///
/// Text is missing when empty, options when `None` (or when the wrapped
/// value is itself missing), collections when empty. Numbers and booleans
/// are never missing.
pub trait MaybeMissing {
    fn is_missing(&self) -> bool;
}

impl MaybeMissing for String {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl MaybeMissing for &str {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

impl<T: MaybeMissing> MaybeMissing for Option<T> {
    fn is_missing(&self) -> bool {
        self.as_ref().map_or(true, MaybeMissing::is_missing)
    }
}

impl<T> MaybeMissing for Vec<T> {
    fn is_missing(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! never_missing {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MaybeMissing for $ty {
                fn is_missing(&self) -> bool {
                    false
                }
            }
        )*
    };
}

never_missing!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_missing() {
        assert!(String::new().is_missing());
        assert!("".is_missing());
        assert!(!"x".is_missing());
        assert!(!String::from(" ").is_missing());
    }

    #[test]
    fn options_defer_to_inner_value() {
        assert!(None::<String>.is_missing());
        assert!(Some(String::new()).is_missing());
        assert!(!Some(String::from("x")).is_missing());
        assert!(!Some(0i32).is_missing());
    }

    #[test]
    fn numbers_are_never_missing() {
        assert!(!0i32.is_missing());
        assert!(!0.0f64.is_missing());
        assert!(!false.is_missing());
    }

    #[test]
    fn empty_collections_are_missing() {
        assert!(Vec::<u8>::new().is_missing());
        assert!(!vec![1].is_missing());
    }
}
