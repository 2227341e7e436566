//! Infrastructure layer - External service implementations

pub mod auth;
pub mod batch;
pub mod email;
pub mod logging;
pub mod render;
pub mod roster;
