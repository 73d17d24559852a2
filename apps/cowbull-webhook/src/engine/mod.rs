//! Remote game engine: the trait the services talk to, and its HTTP client.

pub mod client;
pub mod dto;
pub mod trait_def;

pub use client::CowbullClient;
pub use trait_def::GameEngine;
