//! Cross-cutting helpers: configuration and transport error mapping.

pub mod config;
pub mod transport;
