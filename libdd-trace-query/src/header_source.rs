// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Extraction of a single value from the client request that carried the telemetry, used to
//! fill outgoing headers.
//!
//! A [`ContextSource`] names a request metadata key. Keys prefixed with `auth.` name an
//! attribute set by the authenticator instead, which takes precedence over metadata when it
//! holds a string or a list of strings.

use crate::error::SourceError;
use http::HeaderMap;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

const AUTH_PREFIX: &str = "auth.";

/// An attribute exposed by an authenticator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAttribute {
    String(String),
    StringList(Vec<String>),
    /// Any other shape. Never used as a header value.
    Other,
}

/// Data attached to a request by the authenticator that accepted it.
pub trait AuthData {
    fn get_attribute(&self, name: &str) -> Option<AuthAttribute>;
}

impl AuthData for HashMap<String, AuthAttribute> {
    fn get_attribute(&self, name: &str) -> Option<AuthAttribute> {
        self.get(name).cloned()
    }
}

/// What is known about the client that sent the current request.
#[derive(Default)]
pub struct ClientInfo {
    /// Request metadata, e.g. the incoming HTTP headers or gRPC metadata.
    pub metadata: HeaderMap,
    pub auth: Option<Box<dyn AuthData + Send + Sync>>,
}

impl ClientInfo {
    pub fn new(metadata: HeaderMap) -> Self {
        ClientInfo {
            metadata,
            auth: None,
        }
    }

    pub fn with_auth(mut self, auth: impl AuthData + Send + Sync + 'static) -> Self {
        self.auth = Some(Box::new(auth));
        self
    }
}

impl std::fmt::Debug for ClientInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInfo")
            .field("metadata", &self.metadata)
            .field("auth", &self.auth.is_some())
            .finish()
    }
}

/// Produces a header value for a request.
pub trait Source {
    fn get(&self, client: &ClientInfo) -> Result<String, SourceError>;
}

/// Takes the value from the request metadata or the authenticator, falling back to a default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ContextSource {
    pub key: String,
    #[serde(default)]
    pub default_value: String,
}

impl ContextSource {
    pub fn new(key: impl Into<String>, default_value: impl Into<String>) -> Self {
        ContextSource {
            key: key.into(),
            default_value: default_value.into(),
        }
    }
}

impl Source for ContextSource {
    fn get(&self, client: &ClientInfo) -> Result<String, SourceError> {
        let mut candidates: Vec<String> = client
            .metadata
            .get_all(self.key.as_str())
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(str::to_owned)
            .collect();

        if let (Some(name), Some(auth)) = (self.key.strip_prefix(AUTH_PREFIX), &client.auth) {
            match auth.get_attribute(name) {
                Some(AuthAttribute::String(value)) => candidates = vec![value],
                Some(AuthAttribute::StringList(values)) => candidates = values,
                Some(AuthAttribute::Other) | None => {}
            }
        }

        match candidates.len() {
            0 => {
                debug!(key = %self.key, "No source value found, using the default");
                Ok(self.default_value.clone())
            }
            1 => Ok(candidates.swap_remove(0)),
            n => Err(SourceError::AmbiguousValues(n)),
        }
    }
}
