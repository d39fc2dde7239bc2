pub mod loader;
pub mod models;
pub mod replay;
pub mod validator;
