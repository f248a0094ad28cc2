pub mod admin;
pub mod health;
pub mod redirect;
pub mod shorten;
pub mod types;

pub use admin::AdminService;
pub use health::{AppStartTime, HealthService, health_routes};
pub use redirect::RedirectService;
pub use shorten::ShortenApi;
