pub mod user;

pub use user::{Credentials, LoginResult, User};
