mod health;
mod login;
mod metrics;
mod site;

pub use health::health_handler;
pub use login::login_handler;
pub use metrics::metrics_handler;
pub use site::{index_handler, not_found_handler, stylesheet_handler};
