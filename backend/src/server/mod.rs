//! Server construction and adapter wiring.

mod config;

pub use config::AppSettings;

use std::io;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::{NoOpNotificationDispatcher, NotificationDispatcher};
use backend::domain::{PostService, UserService};
use backend::inbound::http;
use backend::inbound::http::error::json_error_handler;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::notifications::{FcmHttpDispatcher, ServiceAccountKey};
use backend::outbound::persistence::{MongoPostRepository, MongoStore, MongoUserRepository};
use backend::outbound::security::BcryptPasswordHasher;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Load push credentials, falling back to a no-op dispatcher when they are
/// missing or unusable so the rest of the API keeps working.
fn build_dispatcher(settings: &AppSettings, clock: Arc<dyn Clock>) -> Arc<dyn NotificationDispatcher> {
    let path = settings.fcm_credentials_path();
    let dispatcher = ServiceAccountKey::load(&path)
        .and_then(|key| FcmHttpDispatcher::new(key, settings.fcm_timeout(), clock));
    match dispatcher {
        Ok(dispatcher) => {
            info!(path = %path.display(), "push notifications enabled");
            Arc::new(dispatcher)
        }
        Err(error) => {
            warn!(
                path = %path.display(),
                %error,
                "push notifications disabled; new posts will not notify friends"
            );
            Arc::new(NoOpNotificationDispatcher)
        }
    }
}

/// Connect to MongoDB and assemble the services behind the HTTP ports.
///
/// # Errors
/// Returns [`io::Error`] when the settings are invalid or the store cannot be
/// reached.
pub async fn build_http_state(settings: &AppSettings) -> io::Result<HttpState> {
    let cost = settings.bcrypt_cost().map_err(io::Error::other)?;
    let store = MongoStore::connect(settings.mongo_url(), settings.mongo_db_name())
        .await
        .map_err(io::Error::other)?;
    store.ping().await.map_err(io::Error::other)?;
    info!(database = settings.mongo_db_name(), "connected to MongoDB");

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let users_repo = Arc::new(MongoUserRepository::new(&store));
    let posts_repo = Arc::new(MongoPostRepository::new(&store));

    let users = Arc::new(UserService::new(
        users_repo.clone(),
        Arc::new(BcryptPasswordHasher::new(cost)),
    ));
    let posts = Arc::new(PostService::new(
        posts_repo,
        users_repo,
        build_dispatcher(settings, clock.clone()),
        clock,
    ));
    Ok(HttpState::new(users.clone(), users, posts.clone(), posts))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .configure(http::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    settings: &AppSettings,
) -> io::Result<Server> {
    let bind_addr = settings.listen_address().map_err(io::Error::other)?;
    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
