//! Configuration sources, lowest precedence first: user file, explicit file, environment.

pub mod environment;
pub mod user_file;
