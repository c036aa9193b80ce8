mod client;
mod resources;

pub use client::{Client, Error, Result, DEFAULT_BASE_URL};
