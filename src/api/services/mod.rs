pub mod health;
pub mod index;
pub mod redirect;
pub mod shorten;

pub use health::{AppStartTime, HealthService};
pub use index::IndexService;
pub use redirect::RedirectService;
pub use shorten::{ShortenResponse, ShortenService};
