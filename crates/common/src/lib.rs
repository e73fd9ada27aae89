//! Cross-cutting helpers shared by the library binaries and services.

pub mod env;
pub mod utils;
