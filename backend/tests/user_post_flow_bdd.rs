//! Behavioural tests for registration, friendship and post notifications.

use std::cell::RefCell;
use std::collections::HashMap;

use actix_web::{App, test::{self}, web};
use backend::Trace;
use backend::domain::NOTIFICATION_MARKER;
use backend::inbound::http;
use backend::inbound::http::error::json_error_handler;
use backend::test_support::InMemoryBackend;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

struct FlowWorld {
    backend: InMemoryBackend,
    user_ids: RefCell<HashMap<String, String>>,
    last_status: RefCell<Option<u16>>,
    last_body: RefCell<Option<Value>>,
}

impl FlowWorld {
    fn new() -> Self {
        Self {
            backend: InMemoryBackend::new(),
            user_ids: RefCell::new(HashMap::new()),
            last_status: RefCell::new(None),
            last_body: RefCell::new(None),
        }
    }

    /// Drive one request through a freshly built app sharing the world's
    /// repositories.
    fn send(&self, req: test::TestRequest) -> (u16, Value) {
        let state = self.backend.http_state();
        actix_rt::System::new().block_on(async move {
            let app = test::init_service(
                App::new()
                    .app_data(web::Data::new(state))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .wrap(Trace)
                    .configure(http::configure),
            )
            .await;
            let res = test::call_service(&app, req.to_request()).await;
            let status = res.status().as_u16();
            let body = test::read_body(res).await;
            (status, serde_json::from_slice(&body).expect("json body"))
        })
    }

    fn record(&self, (status, body): (u16, Value)) {
        *self.last_status.borrow_mut() = Some(status);
        *self.last_body.borrow_mut() = Some(body);
    }

    fn user_id(&self, name: &str) -> String {
        self.user_ids
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("unknown user {name}"))
    }

    fn last_body(&self) -> Value {
        self.last_body.borrow().clone().expect("response body")
    }
}

#[fixture]
fn world() -> FlowWorld {
    FlowWorld::new()
}

#[given("a registered user {name} with device token {token}")]
fn a_registered_user(world: &FlowWorld, name: String, token: String) {
    let (status, body) = world.send(test::TestRequest::post().uri("/user").set_json(json!({
        "firstName": name,
        "lastName": "Tester",
        "email": format!("{}@example.com", name.to_lowercase()),
        "password": "longenough",
        "fcmToken": token,
    })));
    assert_eq!(status, 200, "registration failed: {body}");
    let id = body["id"].as_str().expect("user id").to_owned();
    world.user_ids.borrow_mut().insert(name, id);
}

#[given("{subject} has added {friend} as a friend")]
fn has_added_friend(world: &FlowWorld, subject: String, friend: String) {
    let subject_id = world.user_id(&subject);
    let friend_id = world.user_id(&friend);
    let (status, _) = world.send(
        test::TestRequest::put()
            .uri(&format!("/user/{subject_id}/add"))
            .set_json(json!({ "userID": friend_id })),
    );
    assert_eq!(status, 200);
}

#[when("{author} publishes a post with content {content}")]
fn publishes_a_post(world: &FlowWorld, author: String, content: String) {
    let author_id = world.user_id(&author);
    let response = world.send(
        test::TestRequest::post()
            .uri("/post")
            .set_json(json!({ "content": content, "author": author_id })),
    );
    world.record(response);
}

#[when("a user registers with first name {first}")]
fn a_user_registers_with_first_name(world: &FlowWorld, first: String) {
    let response = world.send(test::TestRequest::post().uri("/user").set_json(json!({
        "firstName": first,
        "lastName": "Do",
        "email": "a@b.com",
        "password": "longenough",
    })));
    world.record(response);
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &FlowWorld, status: u16) {
    assert_eq!(*world.last_status.borrow(), Some(status));
}

#[then("the post is attributed to {author}")]
fn the_post_is_attributed_to(world: &FlowWorld, author: String) {
    let body = world.last_body();
    assert_eq!(body["author"], world.user_id(&author));
    assert_eq!(body["content"], "1234567890");
    assert_eq!(body["created_at"], body["updated_at"]);
}

#[then("one notification reached {token}")]
fn one_notification_reached(world: &FlowWorld, token: String) {
    let messages = world.backend.dispatcher.messages();
    assert_eq!(messages.len(), 1);
    let message = messages.first().expect("one message");
    assert_eq!(message.tokens, vec![token]);
    assert_eq!(
        message.data.get(NOTIFICATION_MARKER).map(String::as_str),
        Some(NOTIFICATION_MARKER)
    );
}

#[then("no notification was sent")]
fn no_notification_was_sent(world: &FlowWorld) {
    assert!(world.backend.dispatcher.messages().is_empty());
}

#[then("the error details name the field {field}")]
fn the_error_details_name_the_field(world: &FlowWorld, field: String) {
    let body = world.last_body();
    let details = body["details"].as_object().expect("details map");
    assert!(details.contains_key(&field), "details: {details:?}");
}

#[then("no users are stored")]
fn no_users_are_stored(world: &FlowWorld) {
    let (status, body) = world.send(test::TestRequest::get().uri("/users"));
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[scenario(
    path = "tests/features/user_post_flow.feature",
    name = "A new post notifies the author's friends"
)]
fn a_new_post_notifies_friends(world: FlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_post_flow.feature",
    name = "A post without friends sends nothing"
)]
fn a_post_without_friends_sends_nothing(world: FlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_post_flow.feature",
    name = "Short post content is rejected"
)]
fn short_post_content_is_rejected(world: FlowWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_post_flow.feature",
    name = "Invalid registration is rejected without persisting"
)]
fn invalid_registration_is_rejected(world: FlowWorld) {
    drop(world);
}
