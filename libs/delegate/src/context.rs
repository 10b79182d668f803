//! The resolution context passed into every hook invocation.

use std::collections::BTreeMap;
use std::net::IpAddr;

use pictor_meta_id::MetaIdentifier;
use serde::{Deserialize, Serialize};

/// Request-derived values available to every hook.
///
/// The decoded identifier is the primary lookup key; the remaining fields
/// are ancillary request data a delegate may consult when deciding. The
/// context is immutable for the duration of a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The decoded resource identifier.
    pub identifier: String,

    /// The full structured meta-identifier, when the request carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_identifier: Option<MetaIdentifier>,

    /// The URI the client requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_uri: Option<String>,

    /// The client's IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_ip: Option<IpAddr>,

    /// Request headers.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub request_headers: BTreeMap<String, String>,

    /// Request cookies.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cookies: BTreeMap<String, String>,
}

impl RequestContext {
    /// Creates a context for the given decoded identifier.
    pub fn new<S: Into<String>>(identifier: S) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }

    /// Creates a context from a structured meta-identifier. The context's
    /// `identifier` is the meta-identifier's identifier field.
    pub fn from_meta_identifier(meta_identifier: MetaIdentifier) -> Self {
        Self {
            identifier: meta_identifier.identifier.clone(),
            meta_identifier: Some(meta_identifier),
            ..Self::default()
        }
    }

    /// Sets the request URI.
    #[must_use]
    pub fn with_request_uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.request_uri = Some(uri.into());
        self
    }

    /// Sets the client IP address.
    #[must_use]
    pub fn with_client_ip(mut self, ip: IpAddr) -> Self {
        self.client_ip = Some(ip);
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.request_headers.insert(name.into(), value.into());
        self
    }

    /// Adds a cookie.
    #[must_use]
    pub fn with_cookie<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Renders the context as a JSON object, for hosts that hand contexts
    /// across a serialization boundary.
    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            // A struct always serializes to an object.
            _ => serde_json::Map::new(),
        }
    }
}
