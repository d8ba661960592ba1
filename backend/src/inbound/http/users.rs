//! Users API handlers.
//!
//! ```text
//! POST   /user                {"firstName":"Jo","lastName":"Do",...}
//! GET    /user/{id}
//! PUT    /user/{id}           {"firstName":"Jonathan"}
//! DELETE /user/{id}
//! GET    /users
//! PUT    /user/{id}/add       {"userID":"66db21cdb5d96466fa5f3c3c"}
//! PUT    /user/{id}/remove    {"userID":"66db21cdb5d96466fa5f3c3c"}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CreateUserParams, UpdateUserParams, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    DeletedAck, ErrorBody, FriendAddedAck, FriendRemovedAck, UpdatedAck,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_entity_id};

const ID_FIELD: FieldName = FieldName::new("id");
const FRIEND_FIELD: FieldName = FieldName::new("userID");

/// Request payload for `POST /user`. Absent fields decode as empty strings
/// and are reported by validation.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    #[schema(example = "Jo")]
    pub first_name: String,
    #[schema(example = "Do")]
    pub last_name: String,
    #[schema(example = "a@b.com")]
    pub email: String,
    pub fcm_token: String,
    #[schema(example = "longenough")]
    pub password: String,
}

impl From<CreateUserRequest> for CreateUserParams {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            fcm_token: value.fcm_token,
            password: value.password,
        }
    }
}

/// Request payload for `PUT /user/{id}`. Empty strings are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub fcm_token: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserParams {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            fcm_token: value.fcm_token,
            password: value.password,
        }
    }
}

/// Request payload for the friend endpoints.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct FriendRequest {
    #[serde(rename = "userID")]
    #[schema(example = "66db21cdb5d96466fa5f3c3c")]
    pub user_id: Option<String>,
}

/// User as returned to clients. The password hash is never included.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "66db2c856699531daa9abc16")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub fcm_token: String,
    pub friends: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id.to_string(),
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            fcm_token: value.fcm_token,
            friends: value.friends.iter().map(ToString::to_string).collect(),
        }
    }
}

fn friend_id(payload: FriendRequest) -> ApiResult<UserId> {
    let raw = payload
        .user_id
        .ok_or_else(|| missing_field_error(FRIEND_FIELD))?;
    parse_entity_id(&raw, FRIEND_FIELD)
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Created user", body = UserResponse),
        (status = 400, description = "Validation failed or malformed body", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state
        .users
        .create_user(payload.into_inner().into())
        .await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_entity_id(&path, ID_FIELD)?;
    let user = state.users_query.get_user(&id).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Apply a sparse update to a user.
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated", body = UpdatedAck),
        (status = 400, description = "Malformed identifier or body", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UpdatedAck>> {
    let id = parse_entity_id(&path, ID_FIELD)?;
    state
        .users
        .update_user(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(UpdatedAck {
        updated: id.to_string(),
    }))
}

/// Delete a user. Unknown identifiers still succeed.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted", body = DeletedAck),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedAck>> {
    let id = parse_entity_id(&path, ID_FIELD)?;
    state.users.delete_user(&id).await?;
    Ok(web::Json(DeletedAck {
        deleted: id.to_string(),
    }))
}

/// Add a directed friend edge from `{id}` to `userID`.
#[utoipa::path(
    put,
    path = "/user/{id}/add",
    params(("id" = String, Path, description = "User gaining the friend")),
    request_body = FriendRequest,
    responses(
        (status = 200, description = "Friend added", body = FriendAddedAck),
        (status = 400, description = "Malformed identifier or self-friendship", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "addFriend"
)]
#[put("/user/{id}/add")]
pub async fn add_friend(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<FriendRequest>,
) -> ApiResult<web::Json<FriendAddedAck>> {
    let subject = parse_entity_id(&path, ID_FIELD)?;
    let friend = friend_id(payload.into_inner())?;
    state.users.add_friend(&subject, &friend).await?;
    Ok(web::Json(FriendAddedAck {
        added: friend.to_string(),
    }))
}

/// Remove the friend edge from `{id}` to `userID`, if present.
#[utoipa::path(
    put,
    path = "/user/{id}/remove",
    params(("id" = String, Path, description = "User losing the friend")),
    request_body = FriendRequest,
    responses(
        (status = 200, description = "Friend removed", body = FriendRemovedAck),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "Unknown user", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "removeFriend"
)]
#[put("/user/{id}/remove")]
pub async fn remove_friend(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<FriendRequest>,
) -> ApiResult<web::Json<FriendRemovedAck>> {
    let subject = parse_entity_id(&path, ID_FIELD)?;
    let friend = friend_id(payload.into_inner())?;
    state.users.remove_friend(&subject, &friend).await?;
    Ok(web::Json(FriendRemovedAck {
        removed: friend.to_string(),
    }))
}

/// Register every user route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(add_friend)
        .service(remove_friend);
}

#[cfg(test)]
mod tests;
