//! API endpoint handlers, one module per screen or feature.

pub mod assessment;
pub mod chat;
pub mod guidance;
pub mod health;
pub mod history;
pub mod session;
pub mod symptoms;
