mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_session;
pub use models::SessionConfig;
