//! HTTP protocol implementation
//!
//! This module provides HTTP/1.1 request parsing, JSON response encoding and
//! routing of `/store` requests onto store commands.

pub mod collection;
pub mod command;
pub mod handler;
pub mod http;
pub mod item;
pub mod response;
pub mod write;

pub use handler::{Handler, StoreHandler};
pub use http::Parser;
pub use response::{Response, Status};
