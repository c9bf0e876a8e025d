//! # Blogdesk Core
//!
//! The domain layer of the blog admin backend.
//! Records, validation and derived-field rules, the ports that infrastructure
//! implements, and the resource services the HTTP layer calls into.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
