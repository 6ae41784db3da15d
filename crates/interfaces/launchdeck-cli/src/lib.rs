pub mod commands;
pub mod entries;
pub mod session;

pub use session::Session;
