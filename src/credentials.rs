use anyhow::Result;
use async_trait::async_trait;
use dialoguer::Password;

use crate::error::CredentialError;

pub const TOKEN_PROMPT: &str =
    "Your pivotal tracker account token (get in https://www.pivotaltracker.com/profile)";

/// Source of the tracker API token. An empty string means "no token".
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn token(&self) -> Result<String>;
}

/// Asks on the terminal with hidden input.
pub struct PromptCredentials {
    prompt: String,
}

impl PromptCredentials {
    pub fn new() -> Self {
        Self {
            prompt: TOKEN_PROMPT.to_string(),
        }
    }
}

impl Default for PromptCredentials {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for PromptCredentials {
    async fn token(&self) -> Result<String> {
        let prompt = self.prompt.clone();
        let token = tokio::task::spawn_blocking(move || {
            Password::new()
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()
        })
        .await
        .map_err(CredentialError::from)?
        .map_err(CredentialError::from)?;
        Ok(token)
    }
}

/// Uses a fixed token, e.g. one read from the environment.
pub struct StaticCredentials {
    token: String,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    async fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// The environment token when one is set, the terminal prompt otherwise.
pub fn from_env_or_prompt(env_token: Option<String>) -> Box<dyn CredentialProvider> {
    match env_token.filter(|t| !t.is_empty()) {
        Some(token) => Box::new(StaticCredentials::new(token)),
        None => Box::new(PromptCredentials::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_credentials_return_their_token() {
        let creds = StaticCredentials::new("abc123");
        assert_eq!(creds.token().await.unwrap(), "abc123");
    }

    #[tokio::test]
    async fn env_token_skips_the_prompt() {
        let creds = from_env_or_prompt(Some("from-env".into()));
        assert_eq!(creds.token().await.unwrap(), "from-env");
    }
}
