pub mod actor;
pub mod film;
pub mod user;

pub use actor::*;
pub use film::*;
pub use user::*;
