mod api_types;
mod client;

pub use client::Client;

/// Run some basic checks on the OAuth token
pub fn validate_token(token: &str) -> bool {
    let token = token.strip_prefix("OAuth ").unwrap_or(token);
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
