//! Process-wide binding specifications
//!
//! A replay list: every spec stored here is applied, in order, to each
//! newly activated registry. The set never holds live bindings and
//! registries never hold a live reference back — changes here are only
//! seen by the next activation.

use crate::binding::BindingSpec;
use crate::registry::BindingRegistry;

/// Ordered set of binding specifications with process-wide lifetime
#[derive(Debug, Default)]
pub struct GlobalBindingSet {
    specs: Vec<BindingSpec>,
}

impl GlobalBindingSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self { specs: Vec::new() }
    }

    /// Number of stored specs
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The stored specs, in registration order
    pub fn specs(&self) -> &[BindingSpec] {
        &self.specs
    }

    /// Append a spec unless an equal one is already stored
    ///
    /// Set semantics key on full spec equality, not just the pattern.
    pub fn register(&mut self, spec: BindingSpec) {
        if !self.specs.contains(&spec) {
            self.specs.push(spec);
        }
    }

    /// Remove the first spec equal to `spec`, returning it
    pub fn unregister(&mut self, spec: &BindingSpec) -> Option<BindingSpec> {
        let idx = self.specs.iter().position(|s| s == spec)?;
        Some(self.specs.remove(idx))
    }

    /// Remove and return the most-recently-added spec, or the
    /// earliest-added when `from_start` is set
    pub fn pop(&mut self, from_start: bool) -> Option<BindingSpec> {
        if self.specs.is_empty() {
            None
        } else if from_start {
            Some(self.specs.remove(0))
        } else {
            self.specs.pop()
        }
    }

    /// Empty the set
    pub fn clear(&mut self) {
        self.specs.clear();
    }

    /// Apply every stored spec to a registry, in stored order
    ///
    /// Specs are copied by value; the registry keeps no reference to
    /// this set.
    pub fn replay_into(&self, registry: &mut BindingRegistry) {
        for spec in &self.specs {
            registry.set(spec.clone());
        }
    }
}
