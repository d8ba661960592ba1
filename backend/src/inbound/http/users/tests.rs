//! Tests for users API handlers.

use super::*;
use crate::domain::ports::{
    MockPostsCommand, MockPostsQuery, MockUsersCommand, MockUsersQuery,
};
use crate::domain::{EntityId, Error, PasswordHash};
use crate::inbound::http::error::json_error_handler;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use std::sync::Arc;

const SUBJECT: &str = "66db2c856699531daa9abc16";
const FRIEND: &str = "66db21cdb5d96466fa5f3c3c";

fn id(raw: &str) -> EntityId {
    EntityId::parse(raw).expect("fixture id")
}

#[fixture]
fn stored_user() -> User {
    User {
        id: id(SUBJECT),
        first_name: "Jo".into(),
        last_name: "Do".into(),
        email: "a@b.com".into(),
        password: PasswordHash::new("$2b$12$hash"),
        fcm_token: "device-1".into(),
        friends: vec![id(FRIEND)],
    }
}

fn test_app(
    users: MockUsersCommand,
    users_query: MockUsersQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(users),
        Arc::new(users_query),
        Arc::new(MockPostsCommand::new()),
        Arc::new(MockPostsQuery::new()),
    );
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .configure(configure)
}

async fn read_json(
    res: actix_web::dev::ServiceResponse,
    expected: StatusCode,
) -> Value {
    assert_eq!(res.status(), expected);
    let body = actix_test::read_body(res).await;
    serde_json::from_slice(&body).expect("json body")
}

#[rstest]
#[actix_web::test]
async fn get_user_omits_password(stored_user: User) {
    let mut query = MockUsersQuery::new();
    let expected = stored_user.clone();
    query
        .expect_get_user()
        .withf(|requested| requested.to_string() == SUBJECT)
        .return_once(move |_| Ok(expected));
    let app = actix_test::init_service(test_app(MockUsersCommand::new(), query)).await;

    let req = actix_test::TestRequest::get()
        .uri(&format!("/user/{SUBJECT}"))
        .to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(
        body,
        json!({
            "id": SUBJECT,
            "firstName": "Jo",
            "lastName": "Do",
            "email": "a@b.com",
            "fcmToken": "device-1",
            "friends": [FRIEND],
        })
    );
}

#[rstest]
#[case::get(actix_test::TestRequest::get())]
#[case::delete(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn malformed_path_id_is_bad_request(#[case] req: actix_test::TestRequest) {
    let app =
        actix_test::init_service(test_app(MockUsersCommand::new(), MockUsersQuery::new())).await;

    let res = actix_test::call_service(&app, req.uri("/user/not-an-id").to_request()).await;
    let body = read_json(res, StatusCode::BAD_REQUEST).await;

    assert_eq!(body["code"], 400);
    assert_eq!(body["details"]["field"], "id");
    assert_eq!(body["details"]["value"], "not-an-id");
}

#[actix_web::test]
async fn unknown_user_is_not_found() {
    let mut query = MockUsersQuery::new();
    query
        .expect_get_user()
        .return_once(|_| Err(Error::not_found("user not found")));
    let app = actix_test::init_service(test_app(MockUsersCommand::new(), query)).await;

    let req = actix_test::TestRequest::get()
        .uri(&format!("/user/{SUBJECT}"))
        .to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::NOT_FOUND).await;

    assert_eq!(body["code"], 404);
    assert_eq!(body["error"], "user not found");
}

#[rstest]
#[actix_web::test]
async fn create_user_maps_body_to_params(stored_user: User) {
    let mut command = MockUsersCommand::new();
    command
        .expect_create_user()
        .withf(|params| {
            params.first_name == "Jo"
                && params.email == "a@b.com"
                && params.password == "longenough"
                && params.fcm_token.is_empty()
        })
        .return_once(move |_| Ok(stored_user));
    let app = actix_test::init_service(test_app(command, MockUsersQuery::new())).await;

    let req = actix_test::TestRequest::post()
        .uri("/user")
        .set_json(json!({
            "firstName": "Jo",
            "lastName": "Do",
            "email": "a@b.com",
            "password": "longenough",
        }))
        .to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body["id"], SUBJECT);
    assert!(body.get("password").is_none());
}

#[actix_web::test]
async fn create_user_reports_validation_map() {
    let mut command = MockUsersCommand::new();
    command.expect_create_user().return_once(|_| {
        Err(Error::validation_failed("user validation failed")
            .with_details(json!({ "firstName": "firstName length should be at least 2 characters" })))
    });
    let app = actix_test::init_service(test_app(command, MockUsersQuery::new())).await;

    let req = actix_test::TestRequest::post()
        .uri("/user")
        .set_json(json!({ "firstName": "J" }))
        .to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;

    assert_eq!(
        body["details"]["firstName"],
        "firstName length should be at least 2 characters"
    );
}

#[actix_web::test]
async fn malformed_json_body_is_bad_request() {
    let app =
        actix_test::init_service(test_app(MockUsersCommand::new(), MockUsersQuery::new())).await;

    let req = actix_test::TestRequest::post()
        .uri("/user")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;

    assert_eq!(body["code"], 400);
}

#[actix_web::test]
async fn update_user_acknowledges_id() {
    let mut command = MockUsersCommand::new();
    command
        .expect_update_user()
        .withf(|_, params| params.first_name.as_deref() == Some("Jonathan"))
        .return_once(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(command, MockUsersQuery::new())).await;

    let req = actix_test::TestRequest::put()
        .uri(&format!("/user/{SUBJECT}"))
        .set_json(json!({ "firstName": "Jonathan" }))
        .to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body, json!({ "updated": SUBJECT }));
}

#[actix_web::test]
async fn delete_user_acknowledges_id() {
    let mut command = MockUsersCommand::new();
    command.expect_delete_user().return_once(|_| Ok(()));
    let app = actix_test::init_service(test_app(command, MockUsersQuery::new())).await;

    let req = actix_test::TestRequest::delete()
        .uri(&format!("/user/{SUBJECT}"))
        .to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body, json!({ "deleted": SUBJECT }));
}

#[rstest]
#[case("add", json!({ "add friend": FRIEND }))]
#[case("remove", json!({ "remove friend": FRIEND }))]
#[actix_web::test]
async fn friend_endpoints_echo_friend_id(#[case] action: &str, #[case] expected: Value) {
    let mut command = MockUsersCommand::new();
    command
        .expect_add_friend()
        .withf(|subject, friend| subject.to_string() == SUBJECT && friend.to_string() == FRIEND)
        .returning(|_, _| Ok(()));
    command
        .expect_remove_friend()
        .withf(|subject, friend| subject.to_string() == SUBJECT && friend.to_string() == FRIEND)
        .returning(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(command, MockUsersQuery::new())).await;

    let req = actix_test::TestRequest::put()
        .uri(&format!("/user/{SUBJECT}/{action}"))
        .set_json(json!({ "userID": FRIEND }))
        .to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body, expected);
}

#[rstest]
#[case(json!({}), "missing_field")]
#[case(json!({ "userID": "zz" }), "invalid_id")]
#[actix_web::test]
async fn friend_request_requires_valid_user_id(#[case] payload: Value, #[case] code: &str) {
    let app =
        actix_test::init_service(test_app(MockUsersCommand::new(), MockUsersQuery::new())).await;

    let req = actix_test::TestRequest::put()
        .uri(&format!("/user/{SUBJECT}/add"))
        .set_json(payload)
        .to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::BAD_REQUEST).await;

    assert_eq!(body["details"]["field"], "userID");
    assert_eq!(body["details"]["code"], code);
}

#[actix_web::test]
async fn list_users_returns_every_user() {
    let mut query = MockUsersQuery::new();
    query
        .expect_list_users()
        .return_once(|| Ok(vec![stored_user()]));
    let app = actix_test::init_service(test_app(MockUsersCommand::new(), query)).await;

    let req = actix_test::TestRequest::get().uri("/users").to_request();
    let body = read_json(actix_test::call_service(&app, req).await, StatusCode::OK).await;

    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["id"], SUBJECT);
}
