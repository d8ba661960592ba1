//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler in the inbound layer together with
//! the request and response envelopes they exchange. Domain types never derive
//! `ToSchema`; the wire structs in `inbound::http` carry the definitions.
//!
//! The generated document backs Swagger UI in debug builds and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::posts::{CreatePostRequest, PostResponse, UpdatePostRequest};
use crate::inbound::http::schemas::{
    DeletedAck, ErrorBody, FriendAddedAck, FriendRemovedAck, UpdatedAck,
};
use crate::inbound::http::users::{
    CreateUserRequest, FriendRequest, UpdateUserRequest, UserResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Note backend API",
        description = "Users, posts and a friend graph with push fan-out on new posts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::add_friend,
        crate::inbound::http::users::remove_friend,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::list_posts_by_author,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorBody,
        UpdatedAck,
        DeletedAck,
        FriendAddedAck,
        FriendRemovedAck,
        CreateUserRequest,
        UpdateUserRequest,
        FriendRequest,
        UserResponse,
        CreatePostRequest,
        UpdatePostRequest,
        PostResponse,
    )),
    tags(
        (name = "users", description = "User accounts and the friend graph"),
        (name = "posts", description = "Posts and friend notifications"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("ErrorBody", "code")]
    #[case("ErrorBody", "traceId")]
    #[case("UserResponse", "fcmToken")]
    #[case("PostResponse", "created_at")]
    #[case("FriendAddedAck", "add friend")]
    #[case("FriendRequest", "userID")]
    fn schemas_expose_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[test]
    fn user_schema_never_mentions_password() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserResponse").expect("UserResponse schema");
        match user {
            RefOr::T(Schema::Object(obj)) => assert!(!obj.properties.contains_key("password")),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/user")]
    #[case("/user/{id}")]
    #[case("/user/{id}/add")]
    #[case("/user/{id}/remove")]
    #[case("/users")]
    #[case("/post")]
    #[case("/post/{id}")]
    #[case("/post/user/{id}")]
    #[case("/posts")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
