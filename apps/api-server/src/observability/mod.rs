//! Observability - request ID propagation.

mod request_id;

pub use request_id::RequestIdMiddleware;
