//! Manage the users of a HubSpot account.
//!
//! You're probably looking for the [`Client`].
//!
//! # Examples
//! ```no_run
//! use hubspot_rs::{Client, Error, users::User};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::builder().with_token("my-access-token").build().await?;
//!
//!     let user = User {
//!         id: String::new(),
//!         email: "somebody@example.com".to_string(),
//!         role_id: "311".to_string(),
//!     };
//!     client.users().create(&user).await?;
//!
//!     let created = client.users().get(&user.email).await?;
//!     assert_eq!(created.role_id, "311");
//!
//!     client.users().delete(&user.email).await?;
//!
//!     Ok(())
//! }
//! ```
mod client;
mod model;
pub mod requests;

pub use client::Client;
pub use model::User;
