//! HTTP transport shared by the object and user clients.
//!
//! Every operation flows through [`Transport`]: it builds requests with the
//! standard application headers, checks the expected success status, and
//! routes non-success responses through the error normalizer.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::credentials::Credentials;
use crate::error::{ApiError, Error};
use crate::server_url::ServerUrl;

pub(crate) const APPLICATION_ID_HEADER: &str = "X-App-Application-Id";
pub(crate) const REST_API_KEY_HEADER: &str = "X-App-REST-API-Key";
pub(crate) const SESSION_TOKEN_HEADER: &str = "X-App-Session-Token";
pub(crate) const REVOCABLE_SESSION_HEADER: &str = "X-App-Revocable-Session";

/// The operations the backend exposes.
///
/// Used to key the fixed fallback messages the error normalizer reports
/// when the backend supplies none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    CreateObject,
    ReadObject,
    UpdateObject,
    DeleteObject,
    ListObjects,
    Login,
    SignUp,
    PasswordReset,
    VerificationEmail,
    CurrentUser,
}

impl Operation {
    /// The message reported when the backend supplies none.
    pub(crate) fn failure_message(self) -> &'static str {
        match self {
            Operation::CreateObject => "unable to create object",
            Operation::ReadObject => "unable to read object",
            Operation::UpdateObject => "unable to update object",
            Operation::DeleteObject => "unable to delete object",
            Operation::ListObjects => "unable to list objects",
            Operation::Login => "unable to login",
            Operation::SignUp => "unable to sign up user",
            Operation::PasswordReset => "request password reset failed",
            Operation::VerificationEmail => "verify email request failed",
            Operation::CurrentUser => "unable to get current user",
        }
    }
}

/// HTTP transport for backend requests.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    client: reqwest::Client,
    server: ServerUrl,
    credentials: Credentials,
}

impl Transport {
    /// Create a new transport for the given server and credentials.
    pub(crate) fn new(server: ServerUrl, credentials: Credentials) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("appbase/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            server,
            credentials,
        }
    }

    /// Returns the server URL this transport is configured for.
    pub(crate) fn server(&self) -> &ServerUrl {
        &self.server
    }

    /// Returns the session token from the credentials, empty when unset.
    pub(crate) fn session_token(&self) -> &str {
        self.credentials.session_token()
    }

    /// Start a request to an endpoint path with the standard headers.
    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.server.endpoint(path);
        self.client.request(method, url).headers(self.base_headers())
    }

    /// Send a request, expecting `success` and a JSON body.
    pub(crate) async fn execute<R>(
        &self,
        op: Operation,
        success: StatusCode,
        request: reqwest::RequestBuilder,
    ) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        trace!(?op, %status, "response");

        if status == success {
            response.json::<R>().await.map_err(Error::decode)
        } else {
            Err(Error::Api(normalize_error(op, response).await))
        }
    }

    /// Send a request, expecting `success` and ignoring the body.
    pub(crate) async fn execute_no_response(
        &self,
        op: Operation,
        success: StatusCode,
        request: reqwest::RequestBuilder,
    ) -> Result<(), Error> {
        let response = request.send().await?;
        let status = response.status();
        trace!(?op, %status, "response");

        if status == success {
            Ok(())
        } else {
            Err(Error::Api(normalize_error(op, response).await))
        }
    }

    /// Standard headers attached to every request.
    fn base_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            APPLICATION_ID_HEADER,
            HeaderValue::from_str(self.credentials.application_id())
                .expect("invalid application id characters"),
        );
        headers.insert(
            REST_API_KEY_HEADER,
            HeaderValue::from_str(self.credentials.rest_api_key())
                .expect("invalid REST API key characters"),
        );
        headers
    }
}

/// The backend's JSON error body.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    code: Option<f64>,
}

/// Normalize a non-success response into an [`ApiError`].
///
/// A body that fails to decode is treated the same as an empty one; the
/// decode failure is never surfaced as a distinct error kind.
async fn normalize_error(op: Operation, response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.json::<ErrorBody>().await.unwrap_or_default();
    normalized(op, status, body)
}

fn normalized(op: Operation, status: u16, body: ErrorBody) -> ApiError {
    let message = match body.error {
        Some(error) if !error.is_empty() => error,
        _ => op.failure_message().to_string(),
    };

    ApiError {
        status,
        code: body.code,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> ErrorBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn error_and_code_both_copied() {
        let err = normalized(Operation::CreateObject, 400, body(r#"{"error":"boom","code":101}"#));
        assert_eq!(err.status, 400);
        assert_eq!(err.code, Some(101.0));
        assert_eq!(err.message, "boom");
    }

    #[test]
    fn empty_error_falls_back_to_operation_default() {
        let err = normalized(Operation::DeleteObject, 400, body(r#"{"error":"","code":101}"#));
        assert_eq!(err.message, "unable to delete object");
        assert_eq!(err.code, Some(101.0));
    }

    #[test]
    fn code_only_keeps_operation_default() {
        let err = normalized(Operation::Login, 404, body(r#"{"code":209}"#));
        assert_eq!(err.message, "unable to login");
        assert_eq!(err.code, Some(209.0));
    }

    #[test]
    fn empty_body_keeps_operation_default() {
        let err = normalized(Operation::ListObjects, 503, ErrorBody::default());
        assert_eq!(err.message, "unable to list objects");
        assert_eq!(err.code, None);
    }

    #[test]
    fn fractional_code_preserved() {
        let err = normalized(Operation::ReadObject, 400, body(r#"{"code":101.5}"#));
        assert_eq!(err.code, Some(101.5));
    }

    #[test]
    fn every_operation_has_a_distinct_message() {
        let ops = [
            Operation::CreateObject,
            Operation::ReadObject,
            Operation::UpdateObject,
            Operation::DeleteObject,
            Operation::ListObjects,
            Operation::Login,
            Operation::SignUp,
            Operation::PasswordReset,
            Operation::VerificationEmail,
            Operation::CurrentUser,
        ];
        for (i, a) in ops.iter().enumerate() {
            for b in &ops[i + 1..] {
                assert_ne!(a.failure_message(), b.failure_message());
            }
        }
    }
}
