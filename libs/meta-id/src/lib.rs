//! # pictor-meta-id
//!
//! The meta-identifier codec: a bidirectional mapping between the flat wire
//! string used in URLs and config, and a structured record of
//! `{identifier, page number, scale constraint}`.
//!
//! ## Wire Format
//!
//! ```text
//! identifier[;page_number][;numerator:denominator]
//! ```
//!
//! Fields are joined with `;`, present left-to-right only when the
//! corresponding structured value is present. No characters are escaped or
//! forbidden in the identifier portion.
//!
//! ## Design Principles
//!
//! - Decoding is a right-anchored strip of trailing structured fields; the
//!   remainder, verbatim, is the identifier
//! - The identifier may itself contain `;` and `:`; only the rightmost
//!   trailing fields are structural
//! - Encoding never emits empty placeholder fields
//! - Both operations are pure and stateless
//!
//! ## Example
//!
//! ```
//! use pictor_meta_id::MetaIdentifier;
//!
//! let meta_id = MetaIdentifier::new("paintings/spring.tif")
//!     .with_page_number(3)
//!     .with_scale_constraint(1, 2);
//! assert_eq!(meta_id.encode(), "paintings/spring.tif;3;1:2");
//!
//! let decoded = MetaIdentifier::decode("paintings/spring.tif;3;1:2").unwrap();
//! assert_eq!(decoded, meta_id);
//! ```

mod codec;
mod error;

pub use codec::{MetaIdentifier, ScaleConstraint};
pub use error::MalformedMetaIdentifier;
