//! Rendering-engine contract and the regex reference engine
//!
//! The core never paints anything: it hands `HighlightRule`s to an
//! external engine and asks for re-renders. `RenderEngine` is that
//! contract. `RegexEngine` is a self-contained implementation that
//! evaluates rules over a document text and materializes annotations
//! into an `AnnotationStore`; it is what the tests run against and what
//! a host without its own highlighter can embed.

use regex::Regex;

use crate::annotations::{AnnotationKey, AnnotationSource, AnnotationStore, AnnotationValue};
use crate::style::{Face, OverridePolicy};

/// One pattern rule as the engine sees it
///
/// Rules are indexed by value identity: updating a binding always means
/// unregister-old then register-new, never editing a rule in place.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightRule {
    /// Regular expression, uncompiled; evaluated lazily at render time
    pub pattern: String,
    /// Capture group whose span receives the annotations (0 = whole match)
    pub grouping: usize,
    /// Annotations applied over each matched span
    pub properties: Vec<(AnnotationKey, AnnotationValue)>,
    /// How the rule's face composes with existing styling
    pub override_policy: OverridePolicy,
}

impl HighlightRule {
    /// Check if the rule applies a value under `key`
    pub fn has_key(&self, key: &AnnotationKey) -> bool {
        self.properties.iter().any(|(k, _)| k == key)
    }

    /// The face this rule applies, if any
    pub fn face(&self) -> Option<Face> {
        self.properties.iter().find_map(|(k, v)| match (k, v) {
            (AnnotationKey::Face, AnnotationValue::Face(face)) => Some(*face),
            _ => None,
        })
    }
}

/// The external rendering engine contract
///
/// The engine owns the active rule set and is the sole writer of
/// per-position annotation data.
pub trait RenderEngine {
    /// Add a rule to the active set (appended at the end)
    fn register_rule(&mut self, rule: HighlightRule);

    /// Remove the first rule equal to `rule`; false if none matched
    fn unregister_rule(&mut self, rule: &HighlightRule) -> bool;

    /// Remove every rule applying a value under `key`, returns the count
    fn unregister_rules_with(&mut self, key: &AnnotationKey) -> usize;

    /// Recompute annotations for the whole document
    fn request_rerender(&mut self);

    /// Whether the engine is currently active for the document
    fn is_active(&self) -> bool;

    /// Mark keys the engine must clear and reapply on each re-render
    fn manage_keys(&mut self, keys: &[AnnotationKey]);

    /// Whether the engine's unfontify hook has been overridden
    ///
    /// Such engines fail to strip stale annotations on re-render, so the
    /// caller must run an explicit default-clearing pass first.
    fn has_custom_unfontify(&self) -> bool;

    /// Default-clearing pass: drop `key` from every position
    fn strip_annotations(&mut self, key: &AnnotationKey);
}

/// Reference engine: evaluates rules with the `regex` crate
///
/// Owns the document text and its annotation store. Pattern and grouping
/// problems surface here, at render time, never at registration.
pub struct RegexEngine {
    text: String,
    store: AnnotationStore,
    rules: Vec<HighlightRule>,
    managed: Vec<AnnotationKey>,
    active: bool,
    custom_unfontify: bool,
    errors: Vec<String>,
}

impl RegexEngine {
    /// Create an engine over a document text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let store = AnnotationStore::new(text.len());
        Self {
            text,
            store,
            rules: Vec::new(),
            managed: Vec::new(),
            active: true,
            custom_unfontify: false,
            errors: Vec::new(),
        }
    }

    /// Replace the document text (annotations are resized, not recomputed)
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.store.resize(self.text.len());
    }

    /// The document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The active rule set, in registration order
    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    /// The annotation store
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Errors recorded during the last re-render
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Toggle whether the engine is active for the document
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Simulate an engine whose unfontify hook has been overridden
    pub fn set_custom_unfontify(&mut self, custom: bool) {
        self.custom_unfontify = custom;
    }

    /// Default unfontify: clear the face and every managed key
    fn default_unfontify(&mut self) {
        self.store.clear_key(&AnnotationKey::Face);
        let managed = self.managed.clone();
        self.store.clear_keys(&managed);
    }

    fn apply_rule(&mut self, rule: &HighlightRule, text: &str) {
        let regex = match Regex::new(&rule.pattern) {
            Ok(regex) => regex,
            Err(err) => {
                self.errors.push(format!("bad pattern {:?}: {}", rule.pattern, err));
                return;
            }
        };

        if rule.grouping >= regex.captures_len() {
            self.errors.push(format!(
                "pattern {:?} has no capture group {}",
                rule.pattern, rule.grouping
            ));
            return;
        }

        for caps in regex.captures_iter(text) {
            // Optional groups may not participate in a given match
            let m = match caps.get(rule.grouping) {
                Some(m) => m,
                None => continue,
            };
            let (start, end) = (m.start(), m.end());
            if start == end {
                continue;
            }

            if let Some(face) = rule.face() {
                self.apply_face(start, end, face, rule.override_policy);
            }
            for (key, value) in &rule.properties {
                if *key == AnnotationKey::Face {
                    continue;
                }
                self.store.set_range(start, end, key.clone(), value.clone());
            }
        }
    }

    fn apply_face(&mut self, start: usize, end: usize, face: Face, policy: OverridePolicy) {
        match policy {
            OverridePolicy::None => {
                // Skip the whole match if any position is already faced
                if (start..end).any(|pos| self.store.face_at(pos).is_some()) {
                    return;
                }
                self.store
                    .set_range(start, end, AnnotationKey::Face, AnnotationValue::Face(face));
            }
            OverridePolicy::Keep => {
                for pos in start..end {
                    if self.store.face_at(pos).is_none() {
                        self.store
                            .set(pos, AnnotationKey::Face, AnnotationValue::Face(face));
                    }
                }
            }
            OverridePolicy::Prepend => {
                for pos in start..end {
                    let merged = match self.store.face_at(pos) {
                        Some(existing) => face.over(existing),
                        None => face,
                    };
                    self.store
                        .set(pos, AnnotationKey::Face, AnnotationValue::Face(merged));
                }
            }
            OverridePolicy::Append => {
                for pos in start..end {
                    let merged = match self.store.face_at(pos) {
                        Some(existing) => existing.over(face),
                        None => face,
                    };
                    self.store
                        .set(pos, AnnotationKey::Face, AnnotationValue::Face(merged));
                }
            }
        }
    }
}

impl RenderEngine for RegexEngine {
    fn register_rule(&mut self, rule: HighlightRule) {
        self.rules.push(rule);
    }

    fn unregister_rule(&mut self, rule: &HighlightRule) -> bool {
        if let Some(idx) = self.rules.iter().position(|r| r == rule) {
            self.rules.remove(idx);
            true
        } else {
            false
        }
    }

    fn unregister_rules_with(&mut self, key: &AnnotationKey) -> usize {
        let before = self.rules.len();
        self.rules.retain(|rule| !rule.has_key(key));
        before - self.rules.len()
    }

    fn request_rerender(&mut self) {
        self.errors.clear();
        // Engines with an overridden unfontify hook skip the clearing
        // pass and leave stale annotations behind
        if !self.custom_unfontify {
            self.default_unfontify();
        }
        let text = self.text.clone();
        let rules = self.rules.clone();
        for rule in &rules {
            self.apply_rule(rule, &text);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn manage_keys(&mut self, keys: &[AnnotationKey]) {
        for key in keys {
            if !self.managed.contains(key) {
                self.managed.push(key.clone());
            }
        }
    }

    fn has_custom_unfontify(&self) -> bool {
        self.custom_unfontify
    }

    fn strip_annotations(&mut self, key: &AnnotationKey) {
        self.store.clear_key(key);
    }
}

impl AnnotationSource for RegexEngine {
    fn len(&self) -> usize {
        self.store.len()
    }

    fn annotation(&self, pos: usize, key: &AnnotationKey) -> Option<AnnotationValue> {
        self.store.annotation(pos, key)
    }
}
