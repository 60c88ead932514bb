pub mod password;

pub use password::{HmacSha256Hasher, PasswordHasher, generate_salt};
