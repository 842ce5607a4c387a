//! Document activation lifecycle
//!
//! `ModeManager` owns one registry per activated document. Activation
//! builds a fresh registry, replays the global binding set into it, and
//! pushes everything to the document's rendering engine; deactivation
//! tears the registry down completely — no binding survives it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::Config;
use crate::engine::RenderEngine;
use crate::error::{HotspotError, Result};
use crate::global::GlobalBindingSet;
use crate::registry::BindingRegistry;

/// Per-document lifecycle manager
#[derive(Default)]
pub struct ModeManager {
    /// Active registries (document id -> registry)
    registries: HashMap<usize, BindingRegistry>,
    /// Specs replayed into every newly activated registry
    globals: GlobalBindingSet,
    /// Activation filtering
    config: Config,
}

impl ModeManager {
    /// Create a manager with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager with explicit configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The global binding set
    pub fn globals(&self) -> &GlobalBindingSet {
        &self.globals
    }

    /// Mutable access to the global binding set
    pub fn globals_mut(&mut self) -> &mut GlobalBindingSet {
        &mut self.globals
    }

    /// The configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a document is currently activated
    pub fn is_active(&self, doc_id: usize) -> bool {
        self.registries.contains_key(&doc_id)
    }

    /// The registry for an activated document
    pub fn registry(&self, doc_id: usize) -> Option<&BindingRegistry> {
        self.registries.get(&doc_id)
    }

    /// Mutable registry access for an activated document
    pub fn registry_mut(&mut self, doc_id: usize) -> Option<&mut BindingRegistry> {
        self.registries.get_mut(&doc_id)
    }

    /// Activate for a document
    ///
    /// Skipped (returns false) when the configuration excludes the
    /// document's name or mode. Otherwise constructs a fresh registry,
    /// replays the global set into it in stored order, and synchronizes
    /// the engine. Re-activating an already-active document is a no-op.
    pub fn activate(
        &mut self,
        doc_id: usize,
        doc_name: &str,
        mode_name: &str,
        engine: Rc<RefCell<dyn RenderEngine>>,
    ) -> bool {
        if self.config.is_excluded(doc_name, mode_name) {
            return false;
        }
        if self.registries.contains_key(&doc_id) {
            return true;
        }

        let mut registry = BindingRegistry::with_engine(engine);
        self.globals.replay_into(&mut registry);
        registry.activate();
        self.registries.insert(doc_id, registry);
        true
    }

    /// Deactivate a document, returning how many bindings were removed
    ///
    /// Clears every binding, withdraws every rule from the engine, and
    /// drops the registry.
    pub fn deactivate(&mut self, doc_id: usize) -> Result<usize> {
        let mut registry = self
            .registries
            .remove(&doc_id)
            .ok_or(HotspotError::NoSuchDocument(doc_id))?;
        let count = registry.clear_all();
        registry.deactivate();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{AnnotationKey, AnnotationSource};
    use crate::binding::BindingSpec;
    use crate::engine::RegexEngine;
    use crate::event::Handler;
    use crate::extent::find_clickable_extent;

    fn engine(text: &str) -> Rc<RefCell<RegexEngine>> {
        Rc::new(RefCell::new(RegexEngine::new(text)))
    }

    #[test]
    fn test_activation_replays_globals() {
        let mut manager = ModeManager::new();
        manager
            .globals_mut()
            .register(BindingSpec::new(r"http://\S+", Handler::named("visit")));

        let e = engine("see http://x.io here");
        assert!(manager.activate(1, "notes.org", "text", e.clone()));

        assert_eq!(manager.registry(1).unwrap().len(), 1);
        assert_eq!(find_clickable_extent(&*e.borrow(), 8), Some((4, 15)));
    }

    #[test]
    fn test_excluded_document_is_skipped() {
        let mut manager = ModeManager::new();
        let e = engine("text");

        assert!(!manager.activate(1, " *internal*", "text", e.clone()));
        assert!(!manager.is_active(1));
        assert!(e.borrow().rules().is_empty());
    }

    #[test]
    fn test_deactivation_is_complete_teardown() {
        let mut manager = ModeManager::new();
        manager
            .globals_mut()
            .register(BindingSpec::new(r"http://\S+", Handler::named("visit")));

        let e = engine("see http://x.io here");
        manager.activate(1, "notes.org", "text", e.clone());
        assert_eq!(manager.deactivate(1).unwrap(), 1);

        assert!(!manager.is_active(1));
        let e = e.borrow();
        assert!(e.rules().is_empty());
        assert!(!e.store().has_annotation(4, &AnnotationKey::Clickable));
    }

    #[test]
    fn test_deactivate_unknown_document_errors() {
        let mut manager = ModeManager::new();
        assert!(matches!(
            manager.deactivate(7),
            Err(HotspotError::NoSuchDocument(7))
        ));
    }

    #[test]
    fn test_global_changes_seen_at_next_activation_only() {
        let mut manager = ModeManager::new();
        manager
            .globals_mut()
            .register(BindingSpec::new(r"one", Handler::named("a")));

        let e1 = engine("one two");
        manager.activate(1, "a.txt", "text", e1);

        manager
            .globals_mut()
            .register(BindingSpec::new(r"two", Handler::named("b")));

        // Already-active registry is untouched
        assert_eq!(manager.registry(1).unwrap().len(), 1);

        // The next activation sees both
        let e2 = engine("one two");
        manager.activate(2, "b.txt", "text", e2);
        assert_eq!(manager.registry(2).unwrap().len(), 2);
    }

    #[test]
    fn test_documents_have_independent_registries() {
        let mut manager = ModeManager::new();
        let e1 = engine("abc");
        let e2 = engine("abc");
        manager.activate(1, "a.txt", "text", e1.clone());
        manager.activate(2, "b.txt", "text", e2.clone());

        manager
            .registry_mut(1)
            .unwrap()
            .set(BindingSpec::new(r"abc", Handler::named("visit")));

        assert_eq!(manager.registry(1).unwrap().len(), 1);
        assert_eq!(manager.registry(2).unwrap().len(), 0);
        assert_eq!(e1.borrow().rules().len(), 1);
        assert!(e2.borrow().rules().is_empty());
    }

    #[test]
    fn test_reactivation_is_noop() {
        let mut manager = ModeManager::new();
        let e = engine("abc");
        manager.activate(1, "a.txt", "text", e.clone());
        manager
            .registry_mut(1)
            .unwrap()
            .set(BindingSpec::new(r"abc", Handler::named("visit")));

        assert!(manager.activate(1, "a.txt", "text", e.clone()));
        assert_eq!(manager.registry(1).unwrap().len(), 1);
        assert_eq!(e.borrow().rules().len(), 1);
    }
}
