//! Bluesky XRPC implementation of [`crate::account::AccountClient`].

mod client;
pub mod types;

pub use client::BskyClient;
