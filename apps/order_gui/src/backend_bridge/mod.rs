//! Bridge between the UI thread and the backend worker that talks to the order service.

pub mod commands;
pub mod runtime;
