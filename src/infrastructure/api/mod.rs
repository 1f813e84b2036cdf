//! HTTP adapter for the streaming backend.

mod client;
mod dto;

pub use client::{ApiClient, DEFAULT_API_BASE};
