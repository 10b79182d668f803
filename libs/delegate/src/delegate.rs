//! The delegate trait and the tracing wrapper.

use std::path::PathBuf;
use std::time::Instant;

use pictor_meta_id::MetaIdentifier;
use tracing::debug;

use crate::{
    Authorization, DelegateError, InfoApiVersion, Overlay, Redaction, RequestContext, ResourceInfo,
};

/// The hook surface a host invokes to resolve, authorize, and transform
/// named resources.
///
/// Every hook receives the immutable [`RequestContext`] and uses its decoded
/// identifier as the primary lookup key. All hooks have defaults: a unit
/// struct implementing `Delegate` allows everything, resolves nothing, and
/// customizes nothing, so implementations override only the hooks they care
/// about.
///
/// Hooks are fallible: an implementation that cannot evaluate (a lookup
/// backend is down, a rule is unreadable) surfaces
/// [`DelegateError::Evaluation`] rather than guessing an answer.
pub trait Delegate: Send + Sync {
    /// Decodes a flat meta-identifier into its structured record.
    ///
    /// The default implementation applies the standard wire format; override
    /// only when the host is configured with a custom identifier layout.
    fn deserialize_meta_identifier(&self, flat: &str) -> Result<MetaIdentifier, DelegateError> {
        Ok(MetaIdentifier::decode(flat)?)
    }

    /// Encodes a structured record back into its flat wire form, e.g. when
    /// rewriting links.
    fn serialize_meta_identifier(
        &self,
        meta_identifier: &MetaIdentifier,
    ) -> Result<String, DelegateError> {
        Ok(meta_identifier.encode())
    }

    /// Authorization check performed before any source access.
    fn authorize_before_access(
        &self,
        context: &RequestContext,
    ) -> Result<Authorization, DelegateError> {
        let _ = context;
        Ok(Authorization::Allowed)
    }

    /// Full authorization check, performed once the resource is known to
    /// exist.
    fn authorize(&self, context: &RequestContext) -> Result<Authorization, DelegateError> {
        let _ = context;
        Ok(Authorization::Allowed)
    }

    /// Names the source adapter to use for the resource, or `None` when the
    /// resource does not exist.
    fn source(&self, context: &RequestContext) -> Result<Option<String>, DelegateError> {
        let _ = context;
        Ok(None)
    }

    /// Filesystem path of the resource, for the filesystem source adapter.
    /// `None` means not found.
    fn filesystem_source_pathname(
        &self,
        context: &RequestContext,
    ) -> Result<Option<PathBuf>, DelegateError> {
        let _ = context;
        Ok(None)
    }

    /// Descriptor of the resource, for the HTTP source adapter. `None` means
    /// not found.
    fn http_source_resource_info(
        &self,
        context: &RequestContext,
    ) -> Result<Option<ResourceInfo>, DelegateError> {
        let _ = context;
        Ok(None)
    }

    /// Overlay to composite onto the output, if any.
    fn overlay(&self, context: &RequestContext) -> Result<Option<Overlay>, DelegateError> {
        let _ = context;
        Ok(None)
    }

    /// Regions to redact from the output, in application order.
    fn redactions(&self, context: &RequestContext) -> Result<Vec<Redaction>, DelegateError> {
        let _ = context;
        Ok(Vec::new())
    }

    /// Metadata payload to merge into output metadata, if any.
    fn metadata(&self, context: &RequestContext) -> Result<Option<String>, DelegateError> {
        let _ = context;
        Ok(None)
    }

    /// Augments an information response with additional fields.
    fn customize_info_response(
        &self,
        version: InfoApiVersion,
        context: &RequestContext,
        info: &mut serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), DelegateError> {
        let _ = (version, context, info);
        Ok(())
    }
}

/// Wraps a delegate and logs every hook invocation and its outcome.
///
/// Emits one `debug` event per call with the hook name, the context's
/// identifier, elapsed time, and whether evaluation succeeded.
pub struct Traced<D>(pub D);

/// Forwards a context-keyed hook to the inner delegate, logging the call.
macro_rules! traced_hook {
    ($(#[$meta:meta])* $hook:ident -> $ret:ty) => {
        $(#[$meta])*
        fn $hook(&self, context: &RequestContext) -> Result<$ret, DelegateError> {
            let start = Instant::now();
            let result = self.0.$hook(context);
            debug!(
                hook = stringify!($hook),
                identifier = %context.identifier,
                elapsed = ?start.elapsed(),
                ok = result.is_ok(),
                "delegate hook invoked"
            );
            result
        }
    };
}

impl<D: Delegate> Delegate for Traced<D> {
    fn deserialize_meta_identifier(&self, flat: &str) -> Result<MetaIdentifier, DelegateError> {
        let start = Instant::now();
        let result = self.0.deserialize_meta_identifier(flat);
        debug!(
            hook = "deserialize_meta_identifier",
            input = %flat,
            elapsed = ?start.elapsed(),
            ok = result.is_ok(),
            "delegate hook invoked"
        );
        result
    }

    fn serialize_meta_identifier(
        &self,
        meta_identifier: &MetaIdentifier,
    ) -> Result<String, DelegateError> {
        let start = Instant::now();
        let result = self.0.serialize_meta_identifier(meta_identifier);
        debug!(
            hook = "serialize_meta_identifier",
            identifier = %meta_identifier.identifier,
            elapsed = ?start.elapsed(),
            ok = result.is_ok(),
            "delegate hook invoked"
        );
        result
    }

    traced_hook!(authorize_before_access -> Authorization);
    traced_hook!(authorize -> Authorization);
    traced_hook!(source -> Option<String>);
    traced_hook!(filesystem_source_pathname -> Option<PathBuf>);
    traced_hook!(http_source_resource_info -> Option<ResourceInfo>);
    traced_hook!(overlay -> Option<Overlay>);
    traced_hook!(redactions -> Vec<Redaction>);
    traced_hook!(metadata -> Option<String>);

    fn customize_info_response(
        &self,
        version: InfoApiVersion,
        context: &RequestContext,
        info: &mut serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), DelegateError> {
        let start = Instant::now();
        let result = self.0.customize_info_response(version, context, info);
        debug!(
            hook = "customize_info_response",
            version = ?version,
            identifier = %context.identifier,
            elapsed = ?start.elapsed(),
            ok = result.is_ok(),
            "delegate hook invoked"
        );
        result
    }
}
