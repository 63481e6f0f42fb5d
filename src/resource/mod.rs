//! Declarative management of users.
//!
//! An orchestration host declares the user it wants to exist as a
//! [`DeclaredUser`] and hands the stored state of the resource instance in
//! as a [`ResourceState`]; [`UserResource`] converges the remote account to
//! the declaration. [`UserLookup`] is the read-only counterpart for data
//! sources.
//!
//! # Examples
//! ```no_run
//! use hubspot_rs::{Client, Error};
//! use hubspot_rs::resource::{DeclaredUser, ResourceState, StateMap};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let client = Client::builder().build().await?;
//!
//!     let declared = DeclaredUser {
//!         email: "somebody@example.com".to_string(),
//!         role_id: String::new(),
//!     };
//!     let mut state = StateMap::default();
//!     client.user_resource().create(&declared, &mut state).await?;
//!     assert_eq!(state.id().as_deref(), Some("somebody@example.com"));
//!
//!     client.user_resource().delete(&mut state).await?;
//!     assert_eq!(state.id(), None);
//!
//!     Ok(())
//! }
//! ```
mod datasource;
mod state;
mod user;

pub use datasource::{UserLookup, FIELD_ID};
pub use state::{ResourceState, StateMap};
pub use user::{validate_email, DeclaredUser, UserResource, FIELD_EMAIL, FIELD_ROLE_ID};
