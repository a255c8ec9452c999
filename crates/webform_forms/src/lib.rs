pub mod attrs;
pub mod builder;
pub mod control;
pub mod descriptor;
pub mod serialization;

pub use attrs::*;
pub use builder::*;
pub use control::*;
pub use descriptor::*;
