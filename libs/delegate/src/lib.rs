//! # pictor-delegate
//!
//! The delegate hook boundary: the extension points a host application
//! invokes to resolve, authorize, and transform named resources.
//!
//! ## Design Principles
//!
//! - Hooks are pure functions over an immutable [`RequestContext`]; no
//!   inheritance or shared mutable state
//! - The decoded identifier is the primary lookup key for every hook
//! - Hook return shapes are plain serde values a host can consume directly
//! - Delegates are `Send + Sync` so one instance can serve all request
//!   handlers
//!
//! ## Pieces
//!
//! - [`Delegate`] — the hook trait, with default implementations that
//!   allow everything and customize nothing
//! - [`StaticDelegate`] — a table-backed delegate driven by a [`RuleSet`]
//!   loaded from a JSON file
//! - [`Traced`] — a wrapper that logs every hook invocation with `tracing`
//! - Result shapes: [`Authorization`], [`ResourceInfo`], [`Overlay`],
//!   [`Redaction`], [`InfoApiVersion`]

mod context;
mod delegate;
mod error;
mod ruleset;
mod types;

pub use context::RequestContext;
pub use delegate::{Delegate, Traced};
pub use error::DelegateError;
pub use ruleset::{RuleSet, StaticDelegate};
pub use types::*;

/// Re-export the codec for consumers that work with structured identifiers.
pub use pictor_meta_id::{MalformedMetaIdentifier, MetaIdentifier, ScaleConstraint};
