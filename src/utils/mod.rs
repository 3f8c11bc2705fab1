//! Utility modules shared by the processors and the delivery server.

pub mod exec;
pub mod html;
pub mod mime;
