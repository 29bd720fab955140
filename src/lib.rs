//! appbase - typed async client for the AppBase object-storage REST API.
//!
//! This library provides create/read/update/delete/list operations over
//! named classes of schema-less records ([`Objects`]), a session and
//! account layer ([`Users`]), and a codec for the backend's tagged date
//! wire format ([`DateValue`]).
//!
//! # Example
//!
//! ```no_run
//! use appbase::{Credentials, ListOptions, Objects};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), appbase::Error> {
//! let objects = Objects::new(Credentials::new("app-id", "rest-key"));
//!
//! let game = json!({"score": 1337, "playerName": "Sean Plott"});
//! let created = objects.create("GameScore", game.as_object().unwrap()).await?;
//! println!("created {:?}", created.get("objectId"));
//!
//! let page = objects
//!     .list("GameScore", ListOptions::new().limit(10).order("-createdAt"))
//!     .await?;
//! for result in page.results {
//!     println!("{:?}", result.get("playerName"));
//! }
//! # Ok(())
//! # }
//! ```

mod credentials;
pub mod date;
pub mod error;
mod http;
pub mod objects;
mod server_url;
pub mod users;

// Re-export primary types at crate root for convenience
pub use credentials::Credentials;
pub use date::DateValue;
pub use error::{ApiError, Error};
pub use objects::{ListOptions, ListResponse, Object, Objects};
pub use server_url::ServerUrl;
pub use users::Users;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
