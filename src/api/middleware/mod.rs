pub mod access_log;
pub mod request_id;

pub use access_log::AccessLog;
pub use request_id::RequestIdMiddleware;
