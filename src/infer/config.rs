use std::fmt;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Opaque API credential. Never printed: `Debug` is redacted and there is no
/// `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Box<str>);

impl ApiKey {
    pub fn new(key: impl Into<Box<str>>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct InferConfig {
    pub key: ApiKey,
    pub base_url: Box<str>,
}

impl InferConfig {
    pub fn new(key: ApiKey) -> Self {
        Self {
            key,
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<Box<str>>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url() {
        let config = InferConfig::new(ApiKey::new("sk-test"));
        assert_eq!(config.base_url.as_ref(), "https://api.openai.com");
    }

    #[test]
    fn debug_never_shows_key() {
        let config = InferConfig::new(ApiKey::new("sk-very-secret"))
            .with_base_url("http://localhost:8080");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("ApiKey(***)"));
        assert!(debug.contains("http://localhost:8080"));
    }
}
