//! Hook result shapes.
//!
//! These are the values hooks hand back to the host. They serialize to the
//! same shapes the host's wire format uses: an authorization is a bare
//! boolean or a `{status_code, location}` object, a resource descriptor may
//! be a bare URI string, an overlay is keyed by its `image` or `string`
//! field.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Authorization
// =============================================================================

/// The outcome of an authorization hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// Access is granted.
    Allowed,

    /// Access is denied outright.
    Denied,

    /// Access is denied with a redirect, e.g. to a degraded or public copy.
    Redirect {
        /// HTTP status code for the redirect response.
        status_code: u16,
        /// Redirect target.
        location: String,
    },
}

impl Authorization {
    /// Returns true if access was granted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl From<bool> for Authorization {
    fn from(allowed: bool) -> Self {
        if allowed {
            Self::Allowed
        } else {
            Self::Denied
        }
    }
}

impl Serialize for Authorization {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        match self {
            Self::Allowed => serializer.serialize_bool(true),
            Self::Denied => serializer.serialize_bool(false),
            Self::Redirect {
                status_code,
                location,
            } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("status_code", status_code)?;
                map.serialize_entry("location", location)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Authorization {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Decision(bool),
            Redirect { status_code: u16, location: String },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Decision(allowed) => Self::from(allowed),
            Repr::Redirect {
                status_code,
                location,
            } => Self::Redirect {
                status_code,
                location,
            },
        })
    }
}

// =============================================================================
// Source resolution
// =============================================================================

/// Descriptor for a resource served by a remote source adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ResourceInfoRepr")]
pub struct ResourceInfo {
    /// URI of the resource.
    pub uri: String,

    /// Extra request headers to send when fetching the resource.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl ResourceInfo {
    /// Creates a descriptor with just a URI.
    pub fn from_uri<S: Into<String>>(uri: S) -> Self {
        Self {
            uri: uri.into(),
            headers: BTreeMap::new(),
        }
    }
}

/// Accepts either a bare URI string or a full descriptor object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ResourceInfoRepr {
    Uri(String),
    Full {
        uri: String,
        #[serde(default)]
        headers: BTreeMap<String, String>,
    },
}

impl From<ResourceInfoRepr> for ResourceInfo {
    fn from(repr: ResourceInfoRepr) -> Self {
        match repr {
            ResourceInfoRepr::Uri(uri) => Self::from_uri(uri),
            ResourceInfoRepr::Full { uri, headers } => Self { uri, headers },
        }
    }
}

// =============================================================================
// Overlays and redactions
// =============================================================================

/// An overlay to composite onto the output image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Overlay {
    /// An image overlay, keyed by its `image` field.
    Image(ImageOverlay),

    /// A text overlay, keyed by its `string` field.
    Text(TextOverlay),
}

/// An image composited onto the output at a given position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOverlay {
    /// Path of the overlay image.
    pub image: PathBuf,

    /// Inset from the output edge, in pixels.
    #[serde(default)]
    pub inset: i32,

    /// Position name, e.g. `bottom left`.
    pub position: String,
}

/// A string drawn onto the output at a given position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    /// The text to draw. May contain newlines.
    pub string: String,

    /// Inset from the output edge, in pixels.
    #[serde(default)]
    pub inset: i32,

    /// Position name, e.g. `bottom left`.
    pub position: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,

    /// Smallest size the font may shrink to when fitting the text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_min_size: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph_spacing: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_wrap: Option<bool>,
}

/// A rectangular region to redact from the output image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redaction {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,

    /// Fill color name.
    pub color: String,
}

// =============================================================================
// Information responses
// =============================================================================

/// Protocol version family of an information response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoApiVersion {
    V1,
    V2,
    V3,
}
