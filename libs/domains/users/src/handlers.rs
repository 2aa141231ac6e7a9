//! HTTP handlers for Users API

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use axum_helpers::{UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    Address, CreateAddress, CreateUser, CreateUserRequest, UpdateAddress, UpdateUser,
    UpdateUserRequest, User, UserDeleteResponse, UserUpdateResponse, UserWithAddress,
};
use crate::repository::{AddressRepository, UserRepository};
use crate::service::UserService;

/// Body returned by a successful `POST /user`
pub const USER_CREATED_ACK: &str = "Everything is fine, don't panic";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(schemas(
        User,
        Address,
        UserWithAddress,
        CreateUser,
        CreateAddress,
        CreateUserRequest,
        UpdateUser,
        UpdateAddress,
        UpdateUserRequest,
        UserUpdateResponse,
        UserDeleteResponse
    )),
    tags(
        (name = "Users", description = "Users and their addresses")
    )
)]
pub struct ApiDoc;

type SharedService<U, A> = Arc<UserService<U, A>>;

/// Create the users router
pub fn router<U, A>(service: UserService<U, A>) -> Router
where
    U: UserRepository + 'static,
    A: AddressRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// List users without their addresses
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
async fn list_users<U: UserRepository, A: AddressRepository>(
    State(service): State<SharedService<U, A>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a user together with its address
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User and address stored", body = String, content_type = "text/plain"),
        (status = 400, description = "Invalid body", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
async fn create_user<U: UserRepository, A: AddressRepository>(
    State(service): State<SharedService<U, A>>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> UserResult<&'static str> {
    service.create_user(request).await?;
    Ok(USER_CREATED_ACK)
}

/// Get a user with its address embedded
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 200, description = "User found", body = UserWithAddress),
        (status = 400, description = "Invalid UUID", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
async fn get_user<U: UserRepository, A: AddressRepository>(
    State(service): State<SharedService<U, A>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserWithAddress>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Patch a user and its address
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated records", body = UserUpdateResponse),
        (status = 400, description = "Invalid UUID or body", body = String, content_type = "text/plain"),
        (status = 404, description = "User or address not found", body = String, content_type = "text/plain"),
        (status = 422, description = "User has no address", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
async fn update_user<U: UserRepository, A: AddressRepository>(
    State(service): State<SharedService<U, A>>,
    UuidPath(id): UuidPath,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> UserResult<Json<UserUpdateResponse>> {
    let response = service.update_user(id, request).await?;
    Ok(Json(response))
}

/// Delete a user and its address
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 200, description = "Removed records", body = UserDeleteResponse),
        (status = 400, description = "Invalid UUID", body = String, content_type = "text/plain"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = String, content_type = "text/plain")
    )
)]
async fn delete_user<U: UserRepository, A: AddressRepository>(
    State(service): State<SharedService<U, A>>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<UserDeleteResponse>> {
    let response = service.delete_user(id).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockAddressRepository, MockUserRepository};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn body_string(body: Body) -> String {
        let bytes = body.collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn app(users: MockUserRepository, addresses: MockAddressRepository) -> Router {
        router(UserService::new(users, addresses))
    }

    fn user(id: Uuid, address: Option<Uuid>) -> User {
        User {
            id,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            hobbies: vec!["chess".to_string()],
            address,
        }
    }

    fn address(id: Uuid) -> Address {
        Address {
            id,
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_returns_ack() {
        let mut users = MockUserRepository::new();
        let mut addresses = MockAddressRepository::new();
        addresses
            .expect_create()
            .times(1)
            .returning(|_| Ok(address(Uuid::now_v7())));
        users.expect_create().times(1).returning(Ok);

        let body = json!({
            "user": { "name": "Ada", "email": "ada@example.com", "hobbies": ["chess"] },
            "address": { "street": "1 Main St", "city": "Springfield", "state": "IL", "zip": "62701" }
        });
        let response = app(users, addresses)
            .oneshot(json_request(Method::POST, "/", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response.into_body()).await, USER_CREATED_ACK);
    }

    #[tokio::test]
    async fn test_create_user_rejects_invalid_body() {
        let mut users = MockUserRepository::new();
        let mut addresses = MockAddressRepository::new();
        users.expect_create().never();
        addresses.expect_create().never();

        let body = json!({
            "user": { "name": "", "email": "not-an-email" },
            "address": { "street": "1 Main St", "city": "Springfield", "state": "IL", "zip": "62701" }
        });
        let response = app(users, addresses)
            .oneshot(json_request(Method::POST, "/", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_user_missing_address_is_unprocessable() {
        let body = json!({ "user": { "name": "Ada", "email": "ada@example.com" } });
        let response = app(MockUserRepository::new(), MockAddressRepository::new())
            .oneshot(json_request(Method::POST, "/", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_get_user_embeds_address() {
        let user_id = Uuid::now_v7();
        let address_id = Uuid::now_v7();
        let mut users = MockUserRepository::new();
        users.expect_get_with_address().returning(move |id| {
            Ok(Some(UserWithAddress {
                id,
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                hobbies: vec![],
                address: Some(address(address_id)),
            }))
        });

        let response = app(users, MockAddressRepository::new())
            .oneshot(empty_request(Method::GET, &format!("/{}", user_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = serde_json::from_str(&body_string(response.into_body()).await).unwrap();
        assert_eq!(value["_id"], user_id.to_string());
        assert_eq!(value["address"]["city"], "Springfield");
    }

    #[tokio::test]
    async fn test_get_unknown_user_is_404() {
        let mut users = MockUserRepository::new();
        users.expect_get_with_address().returning(|_| Ok(None));

        let response = app(users, MockAddressRepository::new())
            .oneshot(empty_request(Method::GET, &format!("/{}", Uuid::now_v7())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_user_invalid_uuid_is_400() {
        let mut users = MockUserRepository::new();
        users.expect_get_with_address().never();

        let response = app(users, MockAddressRepository::new())
            .oneshot(empty_request(Method::GET, "/not-a-uuid"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_user_response_keys() {
        let address_id = Uuid::now_v7();
        let mut users = MockUserRepository::new();
        let mut addresses = MockAddressRepository::new();
        users
            .expect_get_by_id()
            .returning(move |id| Ok(Some(user(id, Some(address_id)))));
        users
            .expect_update()
            .returning(move |id, _| Ok(Some(user(id, Some(address_id)))));
        addresses
            .expect_update_by_id()
            .returning(|id, _| Ok(Some(address(id))));

        let body = json!({ "user": { "name": "Ada" }, "address": { "zip": "62701" } });
        let response = app(users, addresses)
            .oneshot(json_request(
                Method::PUT,
                &format!("/{}", Uuid::now_v7()),
                body,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = serde_json::from_str(&body_string(response.into_body()).await).unwrap();
        assert!(value.get("userResponse").is_some());
        assert_eq!(value["addressResponse"]["_id"], address_id.to_string());
    }

    #[tokio::test]
    async fn test_update_user_without_address_is_422() {
        let mut users = MockUserRepository::new();
        users
            .expect_get_by_id()
            .returning(|id| Ok(Some(user(id, None))));
        users.expect_update().never();

        let response = app(users, MockAddressRepository::new())
            .oneshot(json_request(
                Method::PUT,
                &format!("/{}", Uuid::now_v7()),
                json!({}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_delete_user_without_address_omits_key() {
        let mut users = MockUserRepository::new();
        let mut addresses = MockAddressRepository::new();
        users
            .expect_delete()
            .returning(|id| Ok(Some(user(id, None))));
        addresses.expect_delete_by_id().never();

        let response = app(users, addresses)
            .oneshot(empty_request(Method::DELETE, &format!("/{}", Uuid::now_v7())))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let value: Value = serde_json::from_str(&body_string(response.into_body()).await).unwrap();
        assert!(value.get("userResponse").is_some());
        assert!(value.get("addressResponse").is_none());
    }

    #[tokio::test]
    async fn test_delete_user_cascades() {
        let address_id = Uuid::now_v7();
        let mut users = MockUserRepository::new();
        let mut addresses = MockAddressRepository::new();
        users
            .expect_delete()
            .returning(move |id| Ok(Some(user(id, Some(address_id)))));
        addresses
            .expect_delete_by_id()
            .times(1)
            .returning(|id| Ok(Some(address(id))));

        let response = app(users, addresses)
            .oneshot(empty_request(Method::DELETE, &format!("/{}", Uuid::now_v7())))
            .await
            .unwrap();

        let value: Value = serde_json::from_str(&body_string(response.into_body()).await).unwrap();
        assert_eq!(value["addressResponse"]["_id"], address_id.to_string());
    }

    #[tokio::test]
    async fn test_list_users_store_failure_is_generic_500() {
        let mut users = MockUserRepository::new();
        users
            .expect_list()
            .returning(|| Err(mongodb::error::Error::custom("pool cleared").into()));

        let response = app(users, MockAddressRepository::new())
            .oneshot(empty_request(Method::GET, "/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(response.into_body()).await,
            axum_helpers::SERVER_ERROR_BODY
        );
    }
}
