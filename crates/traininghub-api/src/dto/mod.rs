//! Request and response DTOs

mod account;
mod auth;
mod content;

pub use account::*;
pub use auth::*;
pub use content::*;
