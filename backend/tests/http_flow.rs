//! End-to-end HTTP flows over the in-memory adapters.

use std::sync::{Arc, Mutex};

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use backend::Trace;
use backend::domain::ports::UserRepository;
use backend::domain::{TRACE_ID_HEADER, UserId};
use backend::inbound::http;
use backend::inbound::http::error::json_error_handler;
use backend::test_support::InMemoryBackend;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

/// Clock that only moves when told to.
struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

struct Harness {
    backend: InMemoryBackend,
    clock: Arc<SteppingClock>,
}

#[fixture]
fn harness() -> Harness {
    let clock = Arc::new(SteppingClock {
        now: Mutex::new(
            Utc.with_ymd_and_hms(2024, 9, 6, 12, 0, 0)
                .single()
                .expect("valid time"),
        ),
    });
    Harness {
        backend: InMemoryBackend::with_clock(clock.clone()),
        clock,
    }
}

async fn app(
    backend: &InMemoryBackend,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(backend.http_state()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Trace)
            .configure(http::configure),
    )
    .await
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    req: test::TestRequest,
) -> (StatusCode, Value) {
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, serde_json::from_slice(&body).expect("json body"))
}

fn user_payload(first: &str, token: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": "Tester",
        "email": format!("{}@example.com", first.to_lowercase()),
        "password": "longenough",
        "fcmToken": token,
    })
}

async fn create_user(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    first: &str,
    token: &str,
) -> String {
    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/user")
            .set_json(user_payload(first, token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create user: {body}");
    body["id"].as_str().expect("user id").to_owned()
}

#[rstest]
#[actix_web::test]
async fn user_round_trip_stores_only_the_hash(harness: Harness) {
    let app = app(&harness.backend).await;
    let id = create_user(&app, "Jo", "").await;

    let (status, body) = send(&app, test::TestRequest::get().uri(&format!("/user/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Jo");
    assert_eq!(body["friends"], json!([]));
    assert!(body.get("password").is_none());

    let stored = harness
        .backend
        .users
        .find_by_id(&UserId::parse(&id).expect("id"))
        .await
        .expect("lookup")
        .expect("stored user");
    assert_ne!(stored.password.as_str(), "longenough");
}

#[rstest]
#[actix_web::test]
async fn invalid_registration_persists_nothing(harness: Harness) {
    let app = app(&harness.backend).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/user").set_json(json!({
            "firstName": "J",
            "lastName": "D",
            "email": "Upper@Example.com",
            "password": "short",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["details"].as_object().expect("field map");
    for field in ["firstName", "lastName", "email", "password"] {
        assert!(details.contains_key(field), "missing {field}");
    }
    let (_, users) = send(&app, test::TestRequest::get().uri("/users")).await;
    assert_eq!(users, json!([]));
}

#[rstest]
#[actix_web::test]
async fn friend_edges_are_directed_and_idempotent(harness: Harness) {
    let app = app(&harness.backend).await;
    let alice = create_user(&app, "Alice", "device-alice").await;
    let bob = create_user(&app, "Bob", "device-bob").await;

    for _ in 0..2 {
        let (status, body) = send(
            &app,
            test::TestRequest::put()
                .uri(&format!("/user/{alice}/add"))
                .set_json(json!({ "userID": bob })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "add friend": bob }));
    }

    let (_, alice_body) = send(&app, test::TestRequest::get().uri(&format!("/user/{alice}"))).await;
    let (_, bob_body) = send(&app, test::TestRequest::get().uri(&format!("/user/{bob}"))).await;
    assert_eq!(alice_body["friends"], json!([bob]));
    assert_eq!(bob_body["friends"], json!([]));

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            test::TestRequest::put()
                .uri(&format!("/user/{alice}/remove"))
                .set_json(json!({ "userID": bob })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, alice_body) = send(&app, test::TestRequest::get().uri(&format!("/user/{alice}"))).await;
    assert_eq!(alice_body["friends"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn self_friendship_is_rejected(harness: Harness) {
    let app = app(&harness.backend).await;
    let alice = create_user(&app, "Alice", "").await;

    let (status, _) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/user/{alice}/add"))
            .set_json(json!({ "userID": alice })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn sparse_post_update_keeps_author_and_creation_time(harness: Harness) {
    let app = app(&harness.backend).await;
    let author = create_user(&app, "Alice", "").await;
    let (status, created) = send(
        &app,
        test::TestRequest::post()
            .uri("/post")
            .set_json(json!({ "content": "1234567890", "author": author })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["created_at"], created["updated_at"]);
    let post_id = created["id"].as_str().expect("post id").to_owned();

    harness.clock.advance(Duration::minutes(5));
    for content in ["edited content", ""] {
        let (status, body) = send(
            &app,
            test::TestRequest::put()
                .uri(&format!("/post/{post_id}"))
                .set_json(json!({ "content": content })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "updated": post_id }));
    }

    let (_, fetched) = send(&app, test::TestRequest::get().uri(&format!("/post/{post_id}"))).await;
    assert_eq!(fetched["content"], "edited content");
    assert_eq!(fetched["author"], author);
    assert_eq!(fetched["created_at"], "2024-09-06T12:00:00.000Z");
    assert_eq!(fetched["updated_at"], "2024-09-06T12:05:00.000Z");

    let (_, by_author) = send(
        &app,
        test::TestRequest::get().uri(&format!("/post/user/{author}")),
    )
    .await;
    assert_eq!(by_author.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case("/user/66db2c856699531daa9abc16", StatusCode::NOT_FOUND)]
#[case("/user/not-hex", StatusCode::BAD_REQUEST)]
#[case("/post/66db2c856699531daa9abc16", StatusCode::NOT_FOUND)]
#[case("/post/66db2c85", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn absent_and_malformed_ids_are_distinguished(
    harness: Harness,
    #[case] uri: &str,
    #[case] expected: StatusCode,
) {
    let app = app(&harness.backend).await;
    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), expected);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], expected.as_u16());
    assert_eq!(body["traceId"], header);
}

#[rstest]
#[actix_web::test]
async fn deleting_unknown_ids_succeeds(harness: Harness) {
    let app = app(&harness.backend).await;
    for uri in ["/user/66db2c856699531daa9abc16", "/post/66db2c856699531daa9abc16"] {
        let (status, body) = send(&app, test::TestRequest::delete().uri(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], "66db2c856699531daa9abc16");
    }
}
