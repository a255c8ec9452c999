pub mod events;
pub mod session;
pub mod validator;

pub use events::*;
pub use session::*;
pub use validator::*;
