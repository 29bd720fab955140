//! Session and account operations.

use reqwest::{Method, StatusCode};
use serde_json::json;
use tracing::{debug, instrument};

use crate::credentials::Credentials;
use crate::error::Error;
use crate::http::{Operation, REVOCABLE_SESSION_HEADER, SESSION_TOKEN_HEADER, Transport};
use crate::objects::Object;
use crate::server_url::ServerUrl;

/// Client for authentication and user account operations.
///
/// A successful [`login`](Users::login) or [`sign_up`](Users::sign_up)
/// caches the returned record as the client's current session, retrievable
/// via [`session`](Users::session). The cache is overwritten on each
/// success (last write wins); mutation requires `&mut self`, so one
/// instance cannot race its own cache.
///
/// # Example
///
/// ```no_run
/// use appbase::{Credentials, Users};
///
/// # async fn example() -> Result<(), appbase::Error> {
/// let mut users = Users::new(Credentials::new("app-id", "rest-key"));
/// let session = users.login("alice", "hunter2").await?;
/// println!("token: {:?}", session.get("sessionToken"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Users {
    transport: Transport,
    session: Option<Object>,
}

impl Users {
    /// Create a client against the default production server.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_server(ServerUrl::default(), credentials)
    }

    /// Create a client against a specific server.
    pub fn with_server(server: ServerUrl, credentials: Credentials) -> Self {
        Self {
            transport: Transport::new(server, credentials),
            session: None,
        }
    }

    /// Returns the server URL this client is configured for.
    pub fn server(&self) -> &ServerUrl {
        self.transport.server()
    }

    /// Returns the cached session record from the last successful login
    /// or sign-up, if any.
    pub fn session(&self) -> Option<&Object> {
        self.session.as_ref()
    }

    /// Log in with a username and password.
    ///
    /// The backend takes the credentials as query parameters on a GET
    /// request; that quirk is part of its wire contract and is preserved
    /// here. A revocable session is requested.
    ///
    /// Returns the session record (containing `sessionToken`) and caches
    /// it on this client.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Object, Error> {
        debug!("logging in");

        let request = self
            .transport
            .request(Method::GET, "login")
            .header(REVOCABLE_SESSION_HEADER, "1")
            .query(&[("username", username), ("password", password)]);

        let session: Object = self
            .transport
            .execute(Operation::Login, StatusCode::OK, request)
            .await?;

        self.session = Some(session.clone());
        Ok(session)
    }

    /// Sign up a new user.
    ///
    /// A string `sessionToken` field in the input is stripped from the
    /// body and sent as the session token header instead, which upgrades
    /// an anonymous session to a named account.
    ///
    /// Returns the created user record (containing `sessionToken`) and
    /// caches it on this client.
    #[instrument(skip(self, user))]
    pub async fn sign_up(&mut self, mut user: Object) -> Result<Object, Error> {
        debug!("signing up user");

        let session_token = user
            .remove("sessionToken")
            .and_then(|v| v.as_str().map(str::to_owned));

        let mut request = self
            .transport
            .request(Method::POST, "users")
            .header(REVOCABLE_SESSION_HEADER, "1")
            .json(&user);

        if let Some(token) = session_token.filter(|t| !t.is_empty()) {
            request = request.header(SESSION_TOKEN_HEADER, token);
        }

        let created: Object = self
            .transport
            .execute(Operation::SignUp, StatusCode::CREATED, request)
            .await?;

        self.session = Some(created.clone());
        Ok(created)
    }

    /// Ask the backend to send a password reset email.
    #[instrument(skip(self))]
    pub async fn request_password_reset(&self, email: &str) -> Result<(), Error> {
        debug!("requesting password reset");

        let request = self
            .transport
            .request(Method::POST, "requestPasswordReset")
            .json(&json!({ "email": email }));

        self.transport
            .execute_no_response(Operation::PasswordReset, StatusCode::OK, request)
            .await
    }

    /// Ask the backend to re-send the address verification email.
    #[instrument(skip(self))]
    pub async fn request_verification_email(&self, email: &str) -> Result<(), Error> {
        debug!("requesting verification email");

        let request = self
            .transport
            .request(Method::POST, "verificationEmailRequest")
            .json(&json!({ "email": email }));

        self.transport
            .execute_no_response(Operation::VerificationEmail, StatusCode::OK, request)
            .await
    }

    /// Fetch the user record associated with a session token.
    #[instrument(skip(self, session_token))]
    pub async fn current_user(&self, session_token: &str) -> Result<Object, Error> {
        debug!("fetching current user");

        let request = self
            .transport
            .request(Method::GET, "users/me")
            .header(SESSION_TOKEN_HEADER, session_token);

        self.transport
            .execute(Operation::CurrentUser, StatusCode::OK, request)
            .await
    }
}
