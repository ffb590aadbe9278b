//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, refresh period > 0)
//! - Check that seed addresses parse as URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use url::Url;

use crate::config::schema::ClientConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn valid_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.servers.is_empty() && config.discovery.dns_host.is_none() {
        errors.push(ValidationError::new(
            "servers",
            "at least one seed server is required when no discovery host is set",
        ));
    }

    for (i, server) in config.servers.iter().enumerate() {
        match Url::parse(server) {
            Ok(url) if !valid_scheme(url.scheme()) => errors.push(ValidationError::new(
                format!("servers[{}]", i),
                format!("unsupported scheme '{}'", url.scheme()),
            )),
            Ok(url) if url.host_str().is_none() => errors.push(ValidationError::new(
                format!("servers[{}]", i),
                format!("'{}' has no host", server),
            )),
            Ok(_) => {}
            Err(e) => errors.push(ValidationError::new(
                format!("servers[{}]", i),
                format!("'{}' is not a valid URL: {}", server, e),
            )),
        }
    }

    if config.refresh_period_secs == 0 {
        errors.push(ValidationError::new("refresh_period_secs", "must be greater than zero"));
    }
    if config.timeouts.request_ms == 0 {
        errors.push(ValidationError::new("timeouts.request_ms", "must be greater than zero"));
    }
    if config.timeouts.connect_ms == 0 {
        errors.push(ValidationError::new("timeouts.connect_ms", "must be greater than zero"));
    }

    if let Some(host) = &config.discovery.dns_host {
        if host.trim().is_empty() {
            errors.push(ValidationError::new("discovery.dns_host", "must not be blank"));
        }
        if config.discovery.port == 0 {
            errors.push(ValidationError::new("discovery.port", "must be greater than zero"));
        }
    }
    if !valid_scheme(&config.discovery.scheme) {
        errors.push(ValidationError::new(
            "discovery.scheme",
            format!("unsupported scheme '{}'", config.discovery.scheme),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
