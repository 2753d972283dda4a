//! Application services: the commit workflow and read-side views.

pub mod query_handlers;
pub mod workflow;
