//! In-memory repository adapters.
//!
//! These back the HTTP integration tests and local experiments. Each
//! collection sits behind one `std::sync::Mutex`; no lock is held across an
//! await point.

mod ids;
mod posts;
mod users;

pub use ids::IdGenerator;
pub use posts::InMemoryPostRepository;
pub use users::InMemoryUserRepository;
