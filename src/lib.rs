//! The Rust SDK for the HubSpot user provisioning API.
//!
//! If you're just getting started, take a look at the [`Client`].
//! It contains all methods you'll need to interact with the API.
//!
//! # Examples
//! ```no_run
//! use hubspot_rs::{Client, Error};
//! use hubspot_rs::resource::{DeclaredUser, ResourceState, StateMap};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     // Exchange the OAuth credentials from HUBSPOT_CLIENT_ID,
//!     // HUBSPOT_CLIENT_SECRET and HUBSPOT_REFRESH_TOKEN for an access
//!     // token.
//!     let client = Client::builder().build().await?;
//!
//!     // Declare a user and reconcile it into the account.
//!     let declared = DeclaredUser {
//!         email: "somebody@example.com".to_string(),
//!         role_id: String::new(),
//!     };
//!     let mut state = StateMap::default();
//!     client.user_resource().create(&declared, &mut state).await?;
//!
//!     // The server-assigned role is read back into state.
//!     dbg!(state.get("role_id"));
//!
//!     // Delete the user again.
//!     client.user_resource().delete(&mut state).await?;
//!
//!     Ok(())
//! }
//! ```
pub mod auth;
pub mod client;
pub mod error;
mod http;
pub mod resource;
mod retry;
mod serde;

pub mod users;

pub use client::Client;
pub use error::Error;

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

#[cfg(all(feature = "default-tls", feature = "native-tls"))]
compile_error!("Feature \"default-tls\" and \"native-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "native-tls", feature = "rustls-tls"))]
compile_error!("Feature \"native-tls\" and \"rustls-tls\" cannot be enabled at the same time");

#[cfg(all(feature = "rustls-tls", feature = "default-tls"))]
compile_error!("Feature \"rustls-tls\" and \"default-tls\" cannot be enabled at the same time");
