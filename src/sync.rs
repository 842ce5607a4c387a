//! Engine synchronization adapter
//!
//! `HighlightSync` pushes registry changes to the rendering engine and
//! triggers re-renders. The engine's view is kept at most one binding
//! out of date: every mutation is an unregister-old/register-new pair,
//! never an in-place rule edit.

use std::cell::RefCell;
use std::rc::Rc;

use crate::annotations::AnnotationKey;
use crate::binding::PatternBinding;
use crate::engine::RenderEngine;

/// Annotation keys stripped by the unbuttonify workaround
const STRIPPED_KEYS: [AnnotationKey; 5] = [
    AnnotationKey::Clickable,
    AnnotationKey::Keymap,
    AnnotationKey::MouseFace,
    AnnotationKey::HelpText,
    AnnotationKey::RearNonsticky,
];

/// Adapter between a registry and one rendering engine
#[derive(Clone)]
pub struct HighlightSync {
    engine: Rc<RefCell<dyn RenderEngine>>,
}

impl HighlightSync {
    /// Create an adapter over a shared engine
    pub fn new(engine: Rc<RefCell<dyn RenderEngine>>) -> Self {
        Self { engine }
    }

    /// The shared engine handle
    pub fn engine(&self) -> &Rc<RefCell<dyn RenderEngine>> {
        &self.engine
    }

    /// Register one binding's rule and mark its keys engine-managed
    pub fn register(&self, binding: &PatternBinding) {
        let mut engine = self.engine.borrow_mut();
        engine.manage_keys(&binding.managed_keys());
        engine.register_rule(binding.rule());
    }

    /// Unregister one binding's rule; false if the engine had no match
    pub fn unregister(&self, binding: &PatternBinding) -> bool {
        self.engine.borrow_mut().unregister_rule(&binding.rule())
    }

    /// Unregister-then-register one binding's rule
    pub fn sync_one(&self, binding: &PatternBinding) {
        let mut engine = self.engine.borrow_mut();
        engine.unregister_rule(&binding.rule());
        engine.manage_keys(&binding.managed_keys());
        engine.register_rule(binding.rule());
    }

    /// Register every binding and request a render
    pub fn activate(&self, bindings: &[Rc<PatternBinding>]) {
        for binding in bindings {
            self.register(binding);
        }
        self.request_render();
    }

    /// Unregister every binding, plus any foreign rule tagged with the
    /// clickable marker in case of external interference
    pub fn deactivate(&self, bindings: &[Rc<PatternBinding>]) {
        {
            let mut engine = self.engine.borrow_mut();
            for binding in bindings {
                engine.unregister_rule(&binding.rule());
            }
            engine.unregister_rules_with(&AnnotationKey::Clickable);
        }
        self.force_unbuttonify();
        self.request_render();
    }

    /// Ask the engine to recompute annotations, but only if it is
    /// already active for the document — never force-activate it
    pub fn request_render(&self) {
        let mut engine = self.engine.borrow_mut();
        if engine.is_active() {
            engine.request_rerender();
        }
    }

    /// Workaround for engines with an overridden unfontify hook
    ///
    /// Such engines fail to strip stale annotations on re-render, so
    /// run the default-clearing pass over the binding keys explicitly.
    pub fn force_unbuttonify(&self) {
        let mut engine = self.engine.borrow_mut();
        if engine.has_custom_unfontify() {
            for key in &STRIPPED_KEYS {
                engine.strip_annotations(key);
            }
        }
    }
}
