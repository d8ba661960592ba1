//! Posts API handlers.
//!
//! ```text
//! POST   /post            {"content":"1234567890","author":"66db..."}
//! GET    /post/{id}
//! PUT    /post/{id}       {"content":"edited content"}
//! DELETE /post/{id}
//! GET    /posts
//! GET    /post/user/{id}
//! ```

use actix_web::{delete, get, post, put, web};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CreatePostParams, Post, UpdatePostParams};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DeletedAck, ErrorBody, UpdatedAck};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_entity_id};

const ID_FIELD: FieldName = FieldName::new("id");

/// Request payload for `POST /post`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreatePostRequest {
    #[schema(example = "1234567890")]
    pub content: String,
    #[schema(example = "66db2c856699531daa9abc16")]
    pub author: String,
}

impl From<CreatePostRequest> for CreatePostParams {
    fn from(value: CreatePostRequest) -> Self {
        Self {
            content: value.content,
            author: value.author,
        }
    }
}

/// Request payload for `PUT /post/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for UpdatePostParams {
    fn from(value: UpdatePostRequest) -> Self {
        Self {
            content: value.content,
        }
    }
}

/// Post as returned to clients. Timestamps are RFC 3339 in UTC.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PostResponse {
    #[schema(example = "66db2d1f6699531daa9abc17")]
    pub id: String,
    pub content: String,
    #[schema(example = "66db2c856699531daa9abc16")]
    pub author: String,
    #[schema(example = "2024-09-06T15:04:05.000Z")]
    pub created_at: String,
    #[schema(example = "2024-09-06T15:04:05.000Z")]
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(value: Post) -> Self {
        Self {
            id: value.id.to_string(),
            content: value.content,
            author: value.author.to_string(),
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: value.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn into_responses(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(PostResponse::from).collect()
}

/// Publish a post and notify the author's friends.
#[utoipa::path(
    post,
    path = "/post",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Created post", body = PostResponse),
        (status = 400, description = "Validation failed or malformed author", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/post")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<web::Json<PostResponse>> {
    let post = state
        .posts
        .create_post(payload.into_inner().into())
        .await?;
    Ok(web::Json(PostResponse::from(post)))
}

#[utoipa::path(
    get,
    path = "/post/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "Unknown post", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/post/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostResponse>> {
    let id = parse_entity_id(&path, ID_FIELD)?;
    let post = state.posts_query.get_post(&id).await?;
    Ok(web::Json(PostResponse::from(post)))
}

#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "Posts", body = [PostResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let posts = state.posts_query.list_posts().await?;
    Ok(web::Json(into_responses(posts)))
}

/// List posts written by one user. An unknown author yields an empty list.
#[utoipa::path(
    get,
    path = "/post/user/{id}",
    params(("id" = String, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Posts by author", body = [PostResponse]),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "listPostsByAuthor"
)]
#[get("/post/user/{id}")]
pub async fn list_posts_by_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PostResponse>>> {
    let author = parse_entity_id(&path, ID_FIELD)?;
    let posts = state.posts_query.list_posts_by_author(&author).await?;
    Ok(web::Json(into_responses(posts)))
}

/// Replace a post's content and refresh `updated_at`.
#[utoipa::path(
    put,
    path = "/post/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated", body = UpdatedAck),
        (status = 400, description = "Malformed identifier or body", body = ErrorBody),
        (status = 404, description = "Unknown post", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/post/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
) -> ApiResult<web::Json<UpdatedAck>> {
    let id = parse_entity_id(&path, ID_FIELD)?;
    state
        .posts
        .update_post(&id, payload.into_inner().into())
        .await?;
    Ok(web::Json(UpdatedAck {
        updated: id.to_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/post/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Deleted", body = DeletedAck),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/post/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedAck>> {
    let id = parse_entity_id(&path, ID_FIELD)?;
    state.posts.delete_post(&id).await?;
    Ok(web::Json(DeletedAck {
        deleted: id.to_string(),
    }))
}

/// Register every post route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_post)
        .service(list_posts)
        .service(list_posts_by_author)
        .service(get_post)
        .service(update_post)
        .service(delete_post);
}
