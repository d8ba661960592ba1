//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod posts;
pub mod schemas;
pub mod state;
pub mod users;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the user and post resources on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http;
///
/// let app = App::new().configure(http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(users::configure).configure(posts::configure);
}
