//! CRUD and list operations over a named class of objects.

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::credentials::Credentials;
use crate::error::Error;
use crate::http::{Operation, SESSION_TOKEN_HEADER, Transport};
use crate::server_url::ServerUrl;

/// A schema-less backend record: field names mapped to JSON values.
///
/// The backend assigns `objectId`, `createdAt`, and `updatedAt` on creation;
/// everything else is caller-defined.
pub type Object = serde_json::Map<String, serde_json::Value>;

/// Query options for [`Objects::list`].
///
/// All fields are optional; unset fields are omitted from the query string
/// entirely. `constraints` is a pre-encoded filter expression, passed
/// through verbatim as the `where` parameter.
///
/// # Example
///
/// ```
/// use appbase::ListOptions;
///
/// let options = ListOptions::new().limit(10).skip(20).order("-createdAt");
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distinct: Option<String>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    constraints: Option<String>,
}

impl ListOptions {
    /// Create options with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the total matching count alongside the results.
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Maximum number of results to return.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of results to skip (pagination offset).
    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sort specification, e.g. `"-createdAt"`.
    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Return distinct values of the given field.
    pub fn distinct(mut self, field: impl Into<String>) -> Self {
        self.distinct = Some(field.into());
        self
    }

    /// A pre-encoded filter expression, sent verbatim as `where`.
    ///
    /// The caller is responsible for producing a correctly formatted
    /// expression; the client performs no query-language parsing.
    pub fn constraints(mut self, constraints: impl Into<String>) -> Self {
        self.constraints = Some(constraints.into());
        self
    }
}

/// Response from [`Objects::list`].
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    /// The matching objects.
    pub results: Vec<Object>,

    /// Total matching count; present only when requested via
    /// [`ListOptions::count`].
    #[serde(default)]
    pub count: Option<i64>,
}

/// Client for object operations on named classes.
///
/// Every request carries the application headers plus the session token
/// header; the token is sent even when empty, which the backend tolerates.
///
/// # Example
///
/// ```no_run
/// use appbase::{Credentials, Objects};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), appbase::Error> {
/// let objects = Objects::new(Credentials::new("app-id", "rest-key"));
///
/// let game = json!({"score": 1337, "playerName": "Sean Plott"});
/// let created = objects.create("GameScore", game.as_object().unwrap()).await?;
/// println!("created {:?}", created.get("objectId"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Objects {
    transport: Transport,
}

impl Objects {
    /// Create a client against the default production server.
    pub fn new(credentials: Credentials) -> Self {
        Self::with_server(ServerUrl::default(), credentials)
    }

    /// Create a client against a specific server.
    pub fn with_server(server: ServerUrl, credentials: Credentials) -> Self {
        Self {
            transport: Transport::new(server, credentials),
        }
    }

    /// Returns the server URL this client is configured for.
    pub fn server(&self) -> &ServerUrl {
        self.transport.server()
    }

    /// Create an object in a class.
    ///
    /// Returns the created object; the backend adds `objectId` and
    /// timestamp fields.
    #[instrument(skip(self, object))]
    pub async fn create(&self, class: &str, object: &Object) -> Result<Object, Error> {
        debug!("creating object");

        let request = self
            .object_request(Method::POST, &format!("classes/{class}"))
            .json(object);

        self.transport
            .execute(Operation::CreateObject, StatusCode::CREATED, request)
            .await
    }

    /// Read an object by id.
    #[instrument(skip(self))]
    pub async fn read(&self, class: &str, id: &str) -> Result<Object, Error> {
        debug!("reading object");

        let request = self.object_request(Method::GET, &format!("classes/{class}/{id}"));

        self.transport
            .execute(Operation::ReadObject, StatusCode::OK, request)
            .await
    }

    /// Update an object by id.
    ///
    /// The backend applies a partial merge: only the supplied fields
    /// change.
    #[instrument(skip(self, partial))]
    pub async fn update(&self, class: &str, id: &str, partial: &Object) -> Result<(), Error> {
        debug!("updating object");

        let request = self
            .object_request(Method::PUT, &format!("classes/{class}/{id}"))
            .json(partial);

        self.transport
            .execute_no_response(Operation::UpdateObject, StatusCode::OK, request)
            .await
    }

    /// Delete an object by id.
    #[instrument(skip(self))]
    pub async fn delete(&self, class: &str, id: &str) -> Result<(), Error> {
        debug!("deleting object");

        let request = self.object_request(Method::DELETE, &format!("classes/{class}/{id}"));

        self.transport
            .execute_no_response(Operation::DeleteObject, StatusCode::OK, request)
            .await
    }

    /// List objects in a class.
    ///
    /// Only the options that were set appear in the query string.
    #[instrument(skip(self, options))]
    pub async fn list(&self, class: &str, options: ListOptions) -> Result<ListResponse, Error> {
        debug!("listing objects");

        let request = self
            .object_request(Method::GET, &format!("classes/{class}"))
            .query(&options);

        self.transport
            .execute(Operation::ListObjects, StatusCode::OK, request)
            .await
    }

    fn object_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.transport
            .request(method, path)
            .header(SESSION_TOKEN_HEADER, self.transport.session_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_options_serialize_to_nothing() {
        let value = serde_json::to_value(ListOptions::new()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn set_options_serialize_exactly() {
        let options = ListOptions::new()
            .count(5)
            .limit(10)
            .skip(10)
            .order("o")
            .distinct("d")
            .constraints("w");
        let value = serde_json::to_value(options).unwrap();
        assert_eq!(
            value,
            json!({
                "count": 5,
                "limit": 10,
                "skip": 10,
                "order": "o",
                "distinct": "d",
                "where": "w",
            })
        );
    }

    #[test]
    fn constraints_rename_to_where() {
        let value = serde_json::to_value(ListOptions::new().constraints("{\"score\":1337}")).unwrap();
        assert!(value.get("where").is_some());
        assert!(value.get("constraints").is_none());
    }
}
