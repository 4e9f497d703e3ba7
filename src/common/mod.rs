//! Types and errors shared by every exchange client

pub mod errors;
pub mod types;
