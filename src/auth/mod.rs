//! Authentication module: session persistence and the login/logout facade.
//!
//! The session is just the presence of a token in the `SessionStore`;
//! there is no expiry or identity cached client-side. The server is the
//! only judge of token validity, on the next authenticated request.

pub mod facade;
pub mod session;

pub use facade::Auth;
pub use session::SessionStore;
