use serde::{Deserialize, Serialize};

use crate::serde::deserialize_null_default;

/// A user of a HubSpot account.
///
/// The API addresses users by email, not id; the email is the stable key
/// for all lookups and mutations and cannot change after creation.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier. Populated by read responses only, never
    /// sent by the client.
    #[serde(default)]
    pub id: String,
    /// The user's email address.
    pub email: String,
    /// Identifier of the role assigned to the user, empty when no role is
    /// assigned.
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub role_id: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn null_role_decodes_to_empty() {
        let user: User = serde_json::from_str(
            r#"{"id": "7", "email": "somebody@example.com", "roleId": null}"#,
        )
        .expect("valid user json");
        assert_eq!(user.role_id, "");
        assert_eq!(user.id, "7");
    }

    #[test]
    fn missing_id_and_role_decode_to_empty() {
        let user: User = serde_json::from_str(r#"{"email": "somebody@example.com"}"#)
            .expect("valid user json");
        assert_eq!(user.id, "");
        assert_eq!(user.role_id, "");
    }
}
