use database::mongodb::ids::{option_uuid_as_string, uuid_as_string};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Postal address owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
}

impl Address {
    /// New address with a fresh id
    pub fn new(input: CreateAddress) -> Self {
        Self {
            id: Uuid::now_v7(),
            street: input.street,
            city: input.city,
            state: input.state,
            zip: input.zip,
        }
    }
}

/// User entity as stored. `address` holds the id of an [`Address`] and is
/// not checked by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(
        default,
        with = "option_uuid_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Uuid>,
}

impl User {
    /// New user with a fresh id referencing `address`
    pub fn new(input: CreateUser, address: Option<Uuid>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            hobbies: input.hobbies,
            address,
        }
    }
}

/// User with its address reference resolved. `address` is `None` when the
/// user has no reference or the reference is dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserWithAddress {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub address: Option<Address>,
}

/// User fields accepted on creation
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email, length(max = 255))]
    pub email: String,

    #[serde(default)]
    pub hobbies: Vec<String>,
}

/// Address fields accepted on creation
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAddress {
    #[validate(length(min = 1, max = 200))]
    pub street: String,

    #[validate(length(min = 1, max = 100))]
    pub city: String,

    #[validate(length(min = 1, max = 100))]
    pub state: String,

    #[validate(length(min = 1, max = 20))]
    pub zip: String,
}

/// Body of `POST /user`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(nested)]
    pub user: CreateUser,

    #[validate(nested)]
    pub address: CreateAddress,
}

/// Partial user update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email, length(max = 255))]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<Vec<String>>,
}

/// Partial address update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub street: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 20))]
    pub zip: Option<String>,
}

/// Body of `PUT /user/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(nested)]
    pub user: UpdateUser,

    #[serde(default)]
    #[validate(nested)]
    pub address: UpdateAddress,
}

/// Both records after a combined update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateResponse {
    pub user_response: User,
    pub address_response: Address,
}

/// Records removed by a combined delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDeleteResponse {
    pub user_response: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_response: Option<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request() -> serde_json::Value {
        json!({
            "user": { "name": "Ada", "email": "ada@example.com", "hobbies": ["chess"] },
            "address": { "street": "1 Main St", "city": "Springfield", "state": "IL", "zip": "62701" }
        })
    }

    #[test]
    fn test_create_request_validates() {
        let request: CreateUserRequest = serde_json::from_value(create_request()).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_bad_email() {
        let mut body = create_request();
        body["user"]["email"] = json!("not-an-email");

        let request: CreateUserRequest = serde_json::from_value(body).unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.errors().contains_key("user"));
    }

    #[test]
    fn test_create_request_rejects_empty_street() {
        let mut body = create_request();
        body["address"]["street"] = json!("");

        let request: CreateUserRequest = serde_json::from_value(body).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_request_fields_are_optional() {
        let request: UpdateUserRequest =
            serde_json::from_value(json!({ "user": { "name": "Grace" } })).unwrap();

        assert_eq!(request.user.name.as_deref(), Some("Grace"));
        assert_eq!(request.address, UpdateAddress::default());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_patch_serializes_only_set_fields() {
        let patch = UpdateUser {
            email: Some("grace@example.com".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();

        assert_eq!(value, json!({ "email": "grace@example.com" }));
    }

    #[test]
    fn test_user_without_address_omits_field() {
        let user = User::new(
            CreateUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                hobbies: vec![],
            },
            None,
        );
        let value = serde_json::to_value(&user).unwrap();

        assert!(value.get("address").is_none());
        assert_eq!(value["_id"], user.id.to_string());
    }

    #[test]
    fn test_delete_response_keys() {
        let user = User::new(
            CreateUser {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                hobbies: vec![],
            },
            None,
        );
        let response = UserDeleteResponse {
            user_response: user,
            address_response: None,
        };
        let value = serde_json::to_value(&response).unwrap();

        assert!(value.get("userResponse").is_some());
        assert!(value.get("addressResponse").is_none());
    }
}
