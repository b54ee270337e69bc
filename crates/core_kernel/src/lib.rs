//! Core Kernel - Foundational types for the lending submission client
//!
//! This crate provides the fundamental building blocks used across the
//! workspace:
//! - Strongly-typed identifiers for remote entities
//! - The transport port abstraction over HTTP request execution
//! - Network-layer error classes that distinguish client, server, and
//!   transport failures

pub mod identifiers;
pub mod ports;

pub use identifiers::CaseId;
pub use ports::{
    HttpMethod, HttpRequest, HttpResponse, MultipartPart, PortError, RequestBody, Transport,
};
