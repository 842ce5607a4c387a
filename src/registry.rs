//! Per-document binding registry
//!
//! An ordered collection of pattern bindings scoped to one document
//! session. Patterns are unique within a registry; a duplicate `set`
//! replaces the existing binding unless the caller asked not to. Every
//! mutation keeps the rendering engine reconciled through the
//! `HighlightSync` adapter.

use std::cell::RefCell;
use std::rc::Rc;

use crate::binding::{BindingSpec, PatternBinding};
use crate::engine::RenderEngine;
use crate::error::{HotspotError, Result};
use crate::event::{Handler, InputEvent};
use crate::sync::HighlightSync;

/// Ordered collection of bindings for one document
pub struct BindingRegistry {
    bindings: Vec<Rc<PatternBinding>>,
    sync: HighlightSync,
    active: bool,
}

impl BindingRegistry {
    /// Create an empty, inactive registry over a sync adapter
    pub fn new(sync: HighlightSync) -> Self {
        Self {
            bindings: Vec::new(),
            sync,
            active: false,
        }
    }

    /// Create an empty registry directly over a shared engine
    pub fn with_engine(engine: Rc<RefCell<dyn RenderEngine>>) -> Self {
        Self::new(HighlightSync::new(engine))
    }

    /// Number of bindings held
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the registry holds no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The bindings, in insertion order
    pub fn bindings(&self) -> &[Rc<PatternBinding>] {
        &self.bindings
    }

    /// Look up a binding by pattern
    pub fn get(&self, pattern: &str) -> Option<&Rc<PatternBinding>> {
        self.bindings.iter().find(|b| b.pattern() == pattern)
    }

    /// Whether the registry is synchronized with the engine
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The sync adapter
    pub fn sync(&self) -> &HighlightSync {
        &self.sync
    }

    /// Push every held binding to the engine and start mirroring changes
    pub fn activate(&mut self) {
        self.active = true;
        self.sync.activate(&self.bindings);
    }

    /// Withdraw every rule from the engine and stop mirroring
    ///
    /// Bindings stay in the registry; full teardown is `clear_all`
    /// followed by this.
    pub fn deactivate(&mut self) {
        self.sync.deactivate(&self.bindings);
        self.active = false;
    }

    /// Add a binding for `spec.pattern`, replacing any existing one
    ///
    /// Honors the `no_replace` and `remove` call options. Returns the
    /// binding now active for the pattern, or `None` when the call was
    /// solely a removal.
    pub fn set(&mut self, spec: BindingSpec) -> Option<Rc<PatternBinding>> {
        if spec.config.remove {
            self.remove(&spec.pattern);
            return None;
        }

        if let Some(existing) = self.get(&spec.pattern).cloned() {
            if spec.config.no_replace {
                return Some(existing);
            }
            // Replacement is removal then insertion, so the replaced
            // rule lands at the end of the engine's active rule set
            self.remove(&spec.pattern);
        }

        let binding = Rc::new(PatternBinding::from_spec(&spec));
        self.bindings.push(binding.clone());
        if self.active {
            self.sync.register(&binding);
            self.sync.request_render();
        }
        Some(binding)
    }

    /// Remove the binding for `pattern`; `None` if there is none
    pub fn remove(&mut self, pattern: &str) -> Option<Rc<PatternBinding>> {
        let idx = self.bindings.iter().position(|b| b.pattern() == pattern)?;
        let binding = self.bindings.remove(idx);
        if self.active {
            self.sync.unregister(&binding);
            self.sync.force_unbuttonify();
            self.sync.request_render();
        }
        Some(binding)
    }

    /// Remove a binding given the binding itself
    pub fn remove_binding(&mut self, binding: &Rc<PatternBinding>) -> Option<Rc<PatternBinding>> {
        if self.bindings.iter().any(|b| Rc::ptr_eq(b, binding)) {
            self.remove(binding.pattern())
        } else {
            None
        }
    }

    /// Add one more event mapping to an already-registered binding
    ///
    /// The keymap object is mutated in place, so other holders of the
    /// binding observe the new mapping. The engine sees the change as an
    /// unregister/register pair. Fails with `NoSuchBinding` if the
    /// binding is not currently in this registry; nothing is mutated.
    pub fn extend(
        &mut self,
        binding: &Rc<PatternBinding>,
        handler: Handler,
        event: InputEvent,
        keyboard_event: Option<InputEvent>,
    ) -> Result<()> {
        if !self.bindings.iter().any(|b| Rc::ptr_eq(b, binding)) {
            return Err(HotspotError::NoSuchBinding(binding.pattern().to_string()));
        }

        if self.active {
            self.sync.unregister(binding);
        }
        binding.events().bind(event, handler.clone());
        if let Some(extra) = keyboard_event {
            binding.events().bind(extra, handler);
        }
        if self.active {
            self.sync.register(binding);
            self.sync.request_render();
        }
        Ok(())
    }

    /// Remove every binding, returning how many were removed
    pub fn clear_all(&mut self) -> usize {
        let count = self.bindings.len();
        if self.active {
            for binding in &self.bindings {
                self.sync.unregister(binding);
            }
        }
        self.bindings.clear();
        if self.active {
            self.sync.force_unbuttonify();
            self.sync.request_render();
        }
        count
    }
}
