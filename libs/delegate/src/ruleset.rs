//! A table-backed delegate driven by declarative rules.
//!
//! Most deployments don't need programmable hooks; they need a lookup table
//! keyed by identifier. [`RuleSet`] is that table as data, deserializable
//! from a JSON file, and [`StaticDelegate`] is the [`Delegate`] that answers
//! every hook from it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    Authorization, Delegate, DelegateError, InfoApiVersion, Overlay, Redaction, RequestContext,
    ResourceInfo,
};

/// Declarative hook answers, keyed by resource identifier.
///
/// Every table is optional. In the `sources` and `pathnames` tables an
/// explicit `null` value means "not found" and is distinct from the key
/// being absent, which falls through to the table's default behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Authorization answers for the pre-access check. Absent means allowed.
    pub authorize_before_access: BTreeMap<String, Authorization>,

    /// Authorization answers for the full check. Absent means allowed.
    pub authorize: BTreeMap<String, Authorization>,

    /// Identifiers for which the full authorization check reports an
    /// evaluation failure, with the failure message.
    pub authorize_failures: BTreeMap<String, String>,

    /// Source adapter per identifier. Explicit `null` means not found.
    pub sources: BTreeMap<String, Option<String>>,

    /// Source adapter for identifiers with no `sources` entry.
    pub default_source: Option<String>,

    /// Filesystem path per identifier. Explicit `null` means not found;
    /// identifiers with no entry resolve to their own identifier as a path.
    pub pathnames: BTreeMap<String, Option<PathBuf>>,

    /// Remote-resource descriptors. Values may be bare URI strings.
    pub resource_info: BTreeMap<String, ResourceInfo>,

    /// Overlays per identifier.
    pub overlays: BTreeMap<String, Overlay>,

    /// Redactions per identifier, in application order.
    pub redactions: BTreeMap<String, Vec<Redaction>>,

    /// Metadata payloads per identifier.
    pub metadata: BTreeMap<String, String>,

    /// Extra fields merged into information responses, per protocol version.
    pub info_extras: BTreeMap<InfoApiVersion, serde_json::Map<String, serde_json::Value>>,
}

/// A [`Delegate`] that answers every hook from a [`RuleSet`].
#[derive(Debug, Clone, Default)]
pub struct StaticDelegate {
    rules: RuleSet,
}

impl StaticDelegate {
    /// Creates a delegate over the given rules.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Loads the rules from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not parse as a rule set.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DelegateError> {
        let content = fs::read_to_string(path)?;
        let rules: RuleSet = serde_json::from_str(&content)?;
        Ok(Self::new(rules))
    }

    /// The rules this delegate answers from.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Delegate for StaticDelegate {
    fn authorize_before_access(
        &self,
        context: &RequestContext,
    ) -> Result<Authorization, DelegateError> {
        Ok(self
            .rules
            .authorize_before_access
            .get(&context.identifier)
            .cloned()
            .unwrap_or(Authorization::Allowed))
    }

    fn authorize(&self, context: &RequestContext) -> Result<Authorization, DelegateError> {
        if let Some(message) = self.rules.authorize_failures.get(&context.identifier) {
            return Err(DelegateError::Evaluation(message.clone()));
        }
        Ok(self
            .rules
            .authorize
            .get(&context.identifier)
            .cloned()
            .unwrap_or(Authorization::Allowed))
    }

    fn source(&self, context: &RequestContext) -> Result<Option<String>, DelegateError> {
        match self.rules.sources.get(&context.identifier) {
            Some(entry) => Ok(entry.clone()),
            None => Ok(self.rules.default_source.clone()),
        }
    }

    fn filesystem_source_pathname(
        &self,
        context: &RequestContext,
    ) -> Result<Option<PathBuf>, DelegateError> {
        match self.rules.pathnames.get(&context.identifier) {
            Some(entry) => Ok(entry.clone()),
            None => Ok(Some(PathBuf::from(&context.identifier))),
        }
    }

    fn http_source_resource_info(
        &self,
        context: &RequestContext,
    ) -> Result<Option<ResourceInfo>, DelegateError> {
        Ok(self.rules.resource_info.get(&context.identifier).cloned())
    }

    fn overlay(&self, context: &RequestContext) -> Result<Option<Overlay>, DelegateError> {
        Ok(self.rules.overlays.get(&context.identifier).cloned())
    }

    fn redactions(&self, context: &RequestContext) -> Result<Vec<Redaction>, DelegateError> {
        Ok(self
            .rules
            .redactions
            .get(&context.identifier)
            .cloned()
            .unwrap_or_default())
    }

    fn metadata(&self, context: &RequestContext) -> Result<Option<String>, DelegateError> {
        Ok(self.rules.metadata.get(&context.identifier).cloned())
    }

    fn customize_info_response(
        &self,
        version: InfoApiVersion,
        _context: &RequestContext,
        info: &mut serde_json::Map<String, serde_json::Value>,
    ) -> Result<(), DelegateError> {
        if let Some(extras) = self.rules.info_extras.get(&version) {
            for (key, value) in extras {
                info.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }
}
