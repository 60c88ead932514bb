pub mod gender;
pub mod role;
pub mod sort;

pub use gender::*;
pub use role::*;
pub use sort::*;
