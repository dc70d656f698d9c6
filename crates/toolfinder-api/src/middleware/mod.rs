//! Request middleware: correlation IDs and rate limiting.

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::{build_rate_limiter, rate_limit_middleware};
pub use request_id::MakeRequestUuidV7;
