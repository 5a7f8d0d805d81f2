//! Bearer token authentication.

use crate::types::config::ENV_TOKEN;

/// Token provider for API authentication.
#[derive(Clone, Default)]
pub enum TokenProvider {
    /// Static bearer token.
    Static(String),

    /// No authentication.
    #[default]
    None,
}

impl TokenProvider {
    /// Create a static token provider. An empty token means no authentication.
    pub fn static_token(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.is_empty() {
            Self::None
        } else {
            Self::Static(token)
        }
    }

    /// Provider for an optional configured token.
    pub fn from_config(token: Option<&str>) -> Self {
        token.map(Self::static_token).unwrap_or_default()
    }

    /// Read `ATLAS_COMMAND_TOKEN`.
    pub fn from_env() -> Self {
        std::env::var(ENV_TOKEN)
            .map(Self::static_token)
            .unwrap_or_default()
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Static(token) if !token.is_empty() => Some(token),
            _ => None,
        }
    }

    /// `Authorization` header value.
    pub fn authorization(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    /// Check if authentication is configured.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

// Tokens never reach logs.
impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(_) => f.write_str("TokenProvider::Static(***)"),
            Self::None => f.write_str("TokenProvider::None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_static_token() {
        let provider = TokenProvider::static_token("test-token");
        assert!(provider.is_authenticated());
        assert_eq!(provider.token(), Some("test-token"));
        assert_eq!(
            provider.authorization(),
            Some("Bearer test-token".to_string())
        );
    }

    #[test]
    fn test_no_auth() {
        let provider = TokenProvider::None;
        assert!(!provider.is_authenticated());
        assert_eq!(provider.authorization(), None);
    }

    #[test]
    fn test_empty_token_is_anonymous() {
        let provider = TokenProvider::static_token("");
        assert!(matches!(provider, TokenProvider::None));
        assert!(!provider.is_authenticated());

        let built = TokenProvider::Static(String::new());
        assert_eq!(built.authorization(), None);
        assert!(!built.is_authenticated());

        assert!(matches!(TokenProvider::from_config(Some("")), TokenProvider::None));
        assert!(matches!(TokenProvider::from_config(None), TokenProvider::None));
        assert_eq!(
            TokenProvider::from_config(Some("t")).authorization(),
            Some("Bearer t".to_string())
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let provider = TokenProvider::static_token("secret");
        assert!(!format!("{:?}", provider).contains("secret"));
    }

    #[test]
    #[serial]
    fn test_from_env_static() {
        std::env::set_var(ENV_TOKEN, "env-token");
        let provider = TokenProvider::from_env();
        std::env::remove_var(ENV_TOKEN);

        assert!(matches!(provider, TokenProvider::Static(_)));
    }

    #[test]
    #[serial]
    fn test_from_env_empty_token() {
        std::env::set_var(ENV_TOKEN, "");
        let provider = TokenProvider::from_env();
        std::env::remove_var(ENV_TOKEN);

        assert!(matches!(provider, TokenProvider::None));
    }
}
