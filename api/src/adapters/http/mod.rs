//! HTTP adapters for third-party services
//!
//! Each client owns a `reqwest::Client` and maps non-success responses onto
//! `ExternalError` the same way.

pub mod email;
pub mod oauth;
pub mod payments;
pub mod session;
pub mod storage;

pub use email::ResendEmailSender;
pub use oauth::HttpOAuthClient;
pub use payments::StripePaymentGateway;
pub use session::SupabaseSessionVerifier;
pub use storage::SupabaseStorage;

use serde::de::DeserializeOwned;

use crate::error::ExternalError;

async fn error_from(response: reqwest::Response) -> ExternalError {
    let status = response.status().as_u16();
    if status == 401 {
        return ExternalError::Unauthorized;
    }
    let message = response.text().await.unwrap_or_default();
    ExternalError::Api { status, message }
}

pub(crate) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ExternalError> {
    if response.status().is_success() {
        response
            .json()
            .await
            .map_err(|e| ExternalError::Deserialization(e.to_string()))
    } else {
        Err(error_from(response).await)
    }
}

pub(crate) async fn handle_empty_response(
    response: reqwest::Response,
) -> Result<(), ExternalError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from(response).await)
    }
}

/// Percent-encode each segment of an object path, keeping the separators
pub(crate) fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_path_keeps_separators() {
        assert_eq!(encode_path("org/resumes/a b.pdf"), "org/resumes/a%20b.pdf");
        assert_eq!(encode_path("plain"), "plain");
    }
}
