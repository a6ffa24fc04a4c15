pub mod error;
pub mod identity;
pub mod repository;
pub mod session;

pub use error::Error;
pub use identity::{Identity, IdentityStore, NewUser, User};
pub use session::SessionAuthority;
