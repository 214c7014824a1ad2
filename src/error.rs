use axum::http::StatusCode;
use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `tonecraft`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; the binary and client paths continue to
/// use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum ToneError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Rewrite pipeline ────────────────────────────────────────────────
    #[error("rewrite: {0}")]
    Rewrite(#[from] RewriteError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Rewrite pipeline errors ────────────────────────────────────────────────

/// Failure taxonomy for the rewrite gateway, ordered roughly by pipeline
/// stage. Every variant maps to one HTTP status and one stable `error` label;
/// the display string is the user-facing `message`.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Text is required and must be a non-empty string.")]
    EmptyText,

    #[error("Tone configuration with formality and detail is required.")]
    MissingTone,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("Mistral API key is not set up. Please check server configuration.")]
    MissingCredential,

    #[error("The request took too long to process. Please try again.")]
    UpstreamTimeout,

    #[error("Too many requests to the AI service. Please try again in a few minutes.")]
    UpstreamRateLimited,

    #[error("Invalid API key configuration.")]
    UpstreamAuth,

    #[error("Invalid response format from the AI service.")]
    MalformedResponse,

    #[error("AI service returned error: {message}")]
    Upstream { status: u16, message: String },

    #[error("An unexpected error occurred. Please try again later.")]
    Transport(#[source] anyhow::Error),
}

impl RewriteError {
    /// HTTP status the gateway returns for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyText | Self::MissingTone => StatusCode::BAD_REQUEST,
            Self::RateLimited | Self::UpstreamRateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamTimeout => StatusCode::REQUEST_TIMEOUT,
            Self::MissingCredential
            | Self::UpstreamAuth
            | Self::MalformedResponse
            | Self::Upstream { .. }
            | Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable label for the `error` field of the response
    /// body. The credential variants deliberately do not change wording based
    /// on upstream detail.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmptyText => "Invalid input",
            Self::MissingTone => "Invalid tone configuration",
            Self::RateLimited => "Rate limit exceeded",
            Self::MissingCredential => "API key not configured",
            Self::UpstreamTimeout => "Request timeout",
            Self::UpstreamRateLimited => "API rate limit exceeded",
            Self::UpstreamAuth => "Authentication failed",
            Self::MalformedResponse | Self::Upstream { .. } => "AI service error",
            Self::Transport(_) => "Internal server error",
        }
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, ToneError>;
