//! Device mockup generator.
//!
//! Detects which iPhone model a screenshot was taken on and composites the
//! screenshot into a device frame image. Exposed as a library so the CLI,
//! the HTTP server and the tests share one implementation.
//!
//! # Modules
//!
//! - `catalog`: Supported models and resolution-based detection
//! - `compose`: Viewport geometry, rounded mask and compositing
//! - `frames`: Frame asset lookup on disk
//! - `service`: Detect/generate pipeline used by both front ends
//! - `server`: HTTP API
//! - `config`: Configuration file handling
//! - `error`: Error types with user-recoverable hints
//! - `output`: Output mode abstraction (robot/human)
#![forbid(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod frames;
pub mod image_ops;
pub mod logging;
pub mod output;
pub mod server;
pub mod service;
