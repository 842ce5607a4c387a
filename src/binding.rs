//! Pattern bindings and their configuration
//!
//! A `PatternBinding` maps one regular expression to an event keymap and
//! a render style. It is immutable once created, except that its keymap
//! is a shared object mutated in place by `extend`. `BindingSpec` is the
//! argument shape accepted by `BindingRegistry::set` and stored by the
//! global set.

use crate::annotations::{AnnotationKey, AnnotationValue};
use crate::engine::HighlightRule;
use crate::event::{EventMap, Handler, InputEvent};
use crate::style::{Face, OverridePolicy};

/// Configuration accepted by `set`, with the documented defaults
#[derive(Debug, Clone, PartialEq)]
pub struct BindingConfig {
    /// The event carrying the primary handler (default: primary click)
    pub event: InputEvent,
    /// Optional additional keyboard event bound to the same handler
    pub keyboard_event: Option<InputEvent>,
    /// Capture group receiving the annotation (0 = whole match)
    ///
    /// Not validated here; an out-of-range index surfaces lazily when
    /// the engine evaluates the pattern.
    pub grouping: usize,
    /// Base render face
    pub face: Face,
    /// Mouse-hover face
    pub mouse_face: Face,
    /// How the face composes with existing styling
    pub override_policy: OverridePolicy,
    /// Optional help/tooltip text
    pub help_text: Option<String>,
    /// Optional extra boolean annotation key set on matched text
    pub extra_key: Option<String>,
    /// Whether the annotation extends to text typed at its right edge
    pub rear_sticky: bool,
    /// On duplicate pattern, keep the existing binding instead of replacing
    pub no_replace: bool,
    /// Treat the call as a removal of `pattern`
    pub remove: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            event: InputEvent::primary_click(),
            keyboard_event: None,
            grouping: 0,
            face: Face::link(),
            mouse_face: Face::highlight(),
            override_policy: OverridePolicy::Append,
            help_text: None,
            extra_key: None,
            rear_sticky: false,
            no_replace: false,
            remove: false,
        }
    }
}

/// The full argument shape of `set`: pattern, handler, configuration
///
/// Equality is structural over all three parts, which is what the global
/// set's set-semantics key on.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingSpec {
    pub pattern: String,
    pub handler: Handler,
    pub config: BindingConfig,
}

impl BindingSpec {
    /// Create a spec with default configuration
    pub fn new(pattern: impl Into<String>, handler: Handler) -> Self {
        Self {
            pattern: pattern.into(),
            handler,
            config: BindingConfig::default(),
        }
    }

    /// Create a spec with explicit configuration
    pub fn with_config(
        pattern: impl Into<String>,
        handler: Handler,
        config: BindingConfig,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            handler,
            config,
        }
    }
}

/// One pattern-to-action mapping held by a registry
///
/// The pattern string is the unique key within a registry. The keymap is
/// shared: mutating it through `extend` is observed by every holder of
/// the binding, including the rule already registered with the engine.
#[derive(Debug)]
pub struct PatternBinding {
    pattern: String,
    grouping: usize,
    events: EventMap,
    face: Face,
    mouse_face: Face,
    override_policy: OverridePolicy,
    help_text: Option<String>,
    extra_key: Option<String>,
    rear_sticky: bool,
}

impl PatternBinding {
    /// Build a binding from a spec
    pub fn from_spec(spec: &BindingSpec) -> Self {
        let events = EventMap::with_binding(spec.config.event, spec.handler.clone());
        if let Some(extra) = spec.config.keyboard_event {
            events.bind(extra, spec.handler.clone());
        }
        Self {
            pattern: spec.pattern.clone(),
            grouping: spec.config.grouping,
            events,
            face: spec.config.face,
            mouse_face: spec.config.mouse_face,
            override_policy: spec.config.override_policy,
            help_text: spec.config.help_text.clone(),
            extra_key: spec.config.extra_key.clone(),
            rear_sticky: spec.config.rear_sticky,
        }
    }

    /// The pattern, the unique key within a registry
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Capture group receiving the annotation
    pub fn grouping(&self) -> usize {
        self.grouping
    }

    /// The shared event keymap
    pub fn events(&self) -> &EventMap {
        &self.events
    }

    /// Base render face
    pub fn face(&self) -> Face {
        self.face
    }

    /// Mouse-hover face
    pub fn mouse_face(&self) -> Face {
        self.mouse_face
    }

    /// Help text, if any
    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    /// Whether the annotation extends at its right edge
    pub fn rear_sticky(&self) -> bool {
        self.rear_sticky
    }

    /// The engine rule for this binding
    ///
    /// Stable across calls: the keymap inside is the binding's shared
    /// object, so two rules built from the same binding compare equal.
    pub fn rule(&self) -> HighlightRule {
        let mut properties = vec![
            (AnnotationKey::Clickable, AnnotationValue::Bool(true)),
            (AnnotationKey::Face, AnnotationValue::Face(self.face)),
            (
                AnnotationKey::Keymap,
                AnnotationValue::Keymap(self.events.clone()),
            ),
            (
                AnnotationKey::MouseFace,
                AnnotationValue::Face(self.mouse_face),
            ),
        ];
        if let Some(text) = &self.help_text {
            properties.push((AnnotationKey::HelpText, AnnotationValue::Text(text.clone())));
        }
        if let Some(name) = &self.extra_key {
            properties.push((
                AnnotationKey::Flag(name.clone()),
                AnnotationValue::Bool(true),
            ));
        }
        if !self.rear_sticky {
            properties.push((AnnotationKey::RearNonsticky, AnnotationValue::Bool(true)));
        }
        HighlightRule {
            pattern: self.pattern.clone(),
            grouping: self.grouping,
            properties,
            override_policy: self.override_policy,
        }
    }

    /// Annotation keys the engine must preserve across re-renders
    pub fn managed_keys(&self) -> Vec<AnnotationKey> {
        let mut keys = vec![
            AnnotationKey::Clickable,
            AnnotationKey::Keymap,
            AnnotationKey::MouseFace,
            AnnotationKey::HelpText,
        ];
        if let Some(name) = &self.extra_key {
            keys.push(AnnotationKey::Flag(name.clone()));
        }
        if !self.rear_sticky {
            keys.push(AnnotationKey::RearNonsticky);
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BindingConfig::default();
        assert_eq!(config.event, InputEvent::primary_click());
        assert_eq!(config.grouping, 0);
        assert_eq!(config.face, Face::link());
        assert_eq!(config.mouse_face, Face::highlight());
        assert_eq!(config.override_policy, OverridePolicy::Append);
        assert!(!config.rear_sticky);
        assert!(!config.no_replace);
        assert!(!config.remove);
    }

    #[test]
    fn test_binding_from_spec() {
        let spec = BindingSpec::new(r"http://\S+", Handler::named("visit"));
        let binding = PatternBinding::from_spec(&spec);

        assert_eq!(binding.pattern(), r"http://\S+");
        assert_eq!(binding.events().len(), 1);
        assert_eq!(
            binding.events().lookup(&InputEvent::primary_click()),
            Some(Handler::named("visit"))
        );
    }

    #[test]
    fn test_keyboard_event_bound_to_same_handler() {
        let spec = BindingSpec::with_config(
            r"\w+",
            Handler::named("visit"),
            BindingConfig {
                keyboard_event: Some(InputEvent::key('o')),
                ..Default::default()
            },
        );
        let binding = PatternBinding::from_spec(&spec);

        assert_eq!(binding.events().len(), 2);
        assert_eq!(
            binding.events().lookup(&InputEvent::key('o')),
            Some(Handler::named("visit"))
        );
    }

    #[test]
    fn test_rule_carries_fixed_marker_and_nonsticky() {
        let spec = BindingSpec::new(r"\w+", Handler::named("visit"));
        let binding = PatternBinding::from_spec(&spec);
        let rule = binding.rule();

        assert!(rule.has_key(&AnnotationKey::Clickable));
        assert!(rule.has_key(&AnnotationKey::Keymap));
        assert!(rule.has_key(&AnnotationKey::RearNonsticky));
    }

    #[test]
    fn test_rear_sticky_omits_nonsticky_key() {
        let spec = BindingSpec::with_config(
            r"\w+",
            Handler::named("visit"),
            BindingConfig {
                rear_sticky: true,
                ..Default::default()
            },
        );
        let binding = PatternBinding::from_spec(&spec);

        assert!(!binding.rule().has_key(&AnnotationKey::RearNonsticky));
        assert!(!binding.managed_keys().contains(&AnnotationKey::RearNonsticky));
    }

    #[test]
    fn test_extra_key_in_rule_and_managed_keys() {
        let spec = BindingSpec::with_config(
            r"\w+",
            Handler::named("visit"),
            BindingConfig {
                extra_key: Some("visited".into()),
                ..Default::default()
            },
        );
        let binding = PatternBinding::from_spec(&spec);

        let flag = AnnotationKey::Flag("visited".into());
        assert!(binding.rule().has_key(&flag));
        assert!(binding.managed_keys().contains(&flag));
    }

    #[test]
    fn test_rule_stable_across_calls() {
        let spec = BindingSpec::new(r"\w+", Handler::named("visit"));
        let binding = PatternBinding::from_spec(&spec);
        assert_eq!(binding.rule(), binding.rule());
    }

    #[test]
    fn test_spec_equality_is_full_shape() {
        let a = BindingSpec::new(r"\w+", Handler::named("visit"));
        let b = BindingSpec::new(r"\w+", Handler::named("visit"));
        let c = BindingSpec::new(r"\w+", Handler::named("copy"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
