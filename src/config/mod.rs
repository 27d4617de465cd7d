// ABOUTME: Configuration module for environment-driven tracker settings
// ABOUTME: Re-exports the tracker configuration and its error type
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Tracker Contributors

/// Environment variable loading and validation
pub mod environment;
/// Configuration error types
pub mod error;

pub use environment::{parse_value, StrideConfig};
pub use error::ConfigError;
