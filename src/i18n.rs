//! Translation lookup
//!
//! Components never hard-code user-visible strings; they ask a [`Translator`]
//! for a key and pass the English text as the fallback.

/// Pure key-to-string lookup
pub trait Translator: Send + Sync {
    fn t(&self, key: &str, fallback: &str) -> String;
}

/// Translator with no catalog: always returns the fallback text
#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackTranslator;

impl Translator for FallbackTranslator {
    fn t(&self, _key: &str, fallback: &str) -> String {
        fallback.to_string()
    }
}

impl<F> Translator for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn t(&self, key: &str, fallback: &str) -> String {
        self(key, fallback)
    }
}
