use thiserror::Error;

/// Errors raised while talking to the tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracker rejected the story with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("tracker request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Errors raised while reading the token.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("token prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("token prompt was interrupted")]
    Interrupted(#[from] tokio::task::JoinError),
}
