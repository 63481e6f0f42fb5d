//! Request types for the users API.

use serde::{Deserialize, Serialize};

use crate::users::User;

/// A request to create a user.
///
/// The API distinguishes two body shapes, with and without `roleId`; an
/// empty role id selects the shape without. Creation always triggers a
/// welcome email, the schema offers no way to turn that off.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct CreateUser {
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role_id: Option<String>,
    send_welcome_email: bool,
}

impl CreateUser {
    pub(crate) fn from_user(user: &User) -> Self {
        let role_id = (!user.role_id.is_empty()).then(|| user.role_id.clone());
        Self {
            email: user.email.clone(),
            role_id,
            send_welcome_email: true,
        }
    }
}

/// A request to change a user's role. The email address is not updatable.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct UpdateUser {
    role_id: String,
}

impl UpdateUser {
    pub(crate) fn from_user(user: &User) -> Self {
        Self {
            role_id: user.role_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user(role_id: &str) -> User {
        User {
            id: String::new(),
            email: "somebody@example.com".to_string(),
            role_id: role_id.to_string(),
        }
    }

    #[test]
    fn create_without_role_omits_the_field() {
        let body = serde_json::to_value(CreateUser::from_user(&user(""))).expect("serializable");
        assert_eq!(
            body,
            json!({"email": "somebody@example.com", "sendWelcomeEmail": true})
        );
    }

    #[test]
    fn create_with_role_includes_the_field() {
        let body = serde_json::to_value(CreateUser::from_user(&user("311"))).expect("serializable");
        assert_eq!(
            body,
            json!({
                "email": "somebody@example.com",
                "roleId": "311",
                "sendWelcomeEmail": true
            })
        );
    }

    #[test]
    fn update_carries_only_the_role() {
        let body = serde_json::to_value(UpdateUser::from_user(&user("311"))).expect("serializable");
        assert_eq!(body, json!({"roleId": "311"}));
    }
}
