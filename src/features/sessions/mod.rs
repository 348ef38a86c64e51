pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod store;
pub mod sweeper;

pub use middleware::{session_middleware, SessionContext};
pub use routes::routes;
pub use store::{SessionState, SessionStore};
pub use sweeper::SessionSweeper;
