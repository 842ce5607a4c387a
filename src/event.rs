//! Input events, handler references, and the shared keymap object
//!
//! An `InputEvent` names the gesture that can trigger a binding: a mouse
//! click (with modifiers) or a keyboard chord. A `Handler` is an opaque
//! reference to the action that runs; the core never validates that it
//! resolves to anything callable. An `EventMap` is the keymap attached to
//! a binding's matched text: a shared object, so every holder of a clone
//! observes mutations made through any other clone.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyModifiers, MouseButton};

/// An input gesture that can be bound to a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// A mouse button press, possibly modified
    Mouse {
        button: MouseButton,
        modifiers: KeyModifiers,
    },
    /// A keyboard chord
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
}

impl InputEvent {
    /// The primary click (left button, unmodified) — the default event
    pub fn primary_click() -> Self {
        Self::Mouse {
            button: MouseButton::Left,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// The secondary click (right button, unmodified)
    pub fn secondary_click() -> Self {
        Self::Mouse {
            button: MouseButton::Right,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Middle-button click
    pub fn middle_click() -> Self {
        Self::Mouse {
            button: MouseButton::Middle,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A click with explicit modifiers (e.g. C-mouse-1)
    pub fn modified_click(button: MouseButton, modifiers: KeyModifiers) -> Self {
        Self::Mouse { button, modifiers }
    }

    /// A keyboard chord (e.g. C-c, M-RET)
    pub fn chord(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::Key { code, modifiers }
    }

    /// An unmodified character key
    pub fn key(ch: char) -> Self {
        Self::Key {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Convert to a human-readable name (e.g. "mouse-1", "C-c", "M-RET")
    pub fn display_name(&self) -> String {
        let (modifiers, base) = match self {
            Self::Mouse { button, modifiers } => {
                let base = match button {
                    MouseButton::Left => "mouse-1".to_string(),
                    MouseButton::Right => "mouse-3".to_string(),
                    MouseButton::Middle => "mouse-2".to_string(),
                };
                (modifiers, base)
            }
            Self::Key { code, modifiers } => {
                let base = match code {
                    KeyCode::Char(' ') => "SPC".to_string(),
                    KeyCode::Char(ch) => ch.to_string(),
                    KeyCode::Enter => "RET".to_string(),
                    KeyCode::Tab => "TAB".to_string(),
                    KeyCode::Backspace => "DEL".to_string(),
                    KeyCode::Esc => "ESC".to_string(),
                    KeyCode::F(n) => format!("F{}", n),
                    other => format!("{:?}", other),
                };
                (modifiers, base)
            }
        };

        let mut result = String::new();
        if modifiers.contains(KeyModifiers::CONTROL) {
            result.push_str("C-");
        }
        if modifiers.contains(KeyModifiers::ALT) {
            result.push_str("M-");
        }
        if modifiers.contains(KeyModifiers::SHIFT) {
            result.push_str("S-");
        }
        result.push_str(&base);
        result
    }
}

/// An opaque handler reference
///
/// Either a shared closure invoked with the triggering event, or a name
/// the host resolves at invocation time. A name that resolves to nothing
/// silently does nothing when triggered; the core never checks.
#[derive(Clone)]
pub enum Handler {
    /// A name resolved by the host when the event fires
    Named(String),
    /// A directly invocable action
    Func(Rc<dyn Fn(&InputEvent)>),
}

impl Handler {
    /// Create a named handler reference
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Create a handler from a closure
    pub fn func(f: impl Fn(&InputEvent) + 'static) -> Self {
        Self::Func(Rc::new(f))
    }

    /// Invoke the handler for an event
    ///
    /// Named references are the host's to resolve; here they do nothing.
    pub fn invoke(&self, event: &InputEvent) {
        if let Self::Func(f) = self {
            f(event);
        }
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Named(a), Self::Named(b)) => a == b,
            (Self::Func(a), Self::Func(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "Handler::Named({:?})", name),
            Self::Func(_) => write!(f, "Handler::Func(..)"),
        }
    }
}

/// The event-to-handler keymap carried by a binding's matched text
///
/// Clones share the underlying map. Mutating through one clone is
/// observed by all others, which is what lets `extend` update a keymap
/// that the rendering engine already holds.
#[derive(Clone)]
pub struct EventMap {
    inner: Rc<RefCell<HashMap<InputEvent, Handler>>>,
}

impl EventMap {
    /// Create an empty keymap
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Create a keymap with one initial entry
    pub fn with_binding(event: InputEvent, handler: Handler) -> Self {
        let map = Self::new();
        map.bind(event, handler);
        map
    }

    /// Add or replace an entry (in place; all clones observe it)
    pub fn bind(&self, event: InputEvent, handler: Handler) {
        self.inner.borrow_mut().insert(event, handler);
    }

    /// Look up the handler for an event
    pub fn lookup(&self, event: &InputEvent) -> Option<Handler> {
        self.inner.borrow().get(event).cloned()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Check if the keymap has no entries
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// All bound events
    pub fn events(&self) -> Vec<InputEvent> {
        self.inner.borrow().keys().copied().collect()
    }
}

impl Default for EventMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for EventMap {
    /// Identity equality: two maps are equal when they share storage
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for EventMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .inner
            .borrow()
            .keys()
            .map(|e| e.display_name())
            .collect();
        write!(f, "EventMap({})", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(InputEvent::primary_click().display_name(), "mouse-1");
        assert_eq!(InputEvent::secondary_click().display_name(), "mouse-3");
        assert_eq!(
            InputEvent::modified_click(MouseButton::Left, KeyModifiers::CONTROL).display_name(),
            "C-mouse-1"
        );
        assert_eq!(
            InputEvent::chord(KeyCode::Enter, KeyModifiers::ALT).display_name(),
            "M-RET"
        );
        assert_eq!(InputEvent::key(' ').display_name(), "SPC");
    }

    #[test]
    fn test_handler_equality() {
        assert_eq!(Handler::named("visit"), Handler::named("visit"));
        assert_ne!(Handler::named("visit"), Handler::named("copy"));

        let f = Handler::func(|_| {});
        let g = Handler::func(|_| {});
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
        assert_ne!(f, Handler::named("visit"));
    }

    #[test]
    fn test_event_map_shared_mutation() {
        let map = EventMap::with_binding(InputEvent::primary_click(), Handler::named("visit"));
        let alias = map.clone();

        alias.bind(InputEvent::secondary_click(), Handler::named("menu"));

        assert_eq!(map.len(), 2);
        assert_eq!(
            map.lookup(&InputEvent::secondary_click()),
            Some(Handler::named("menu"))
        );
        assert_eq!(map, alias);
    }

    #[test]
    fn test_event_map_identity_equality() {
        let a = EventMap::new();
        let b = EventMap::new();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_invoke_func_handler() {
        use std::cell::Cell;
        let hits = Rc::new(Cell::new(0));
        let hits2 = hits.clone();
        let handler = Handler::func(move |_| hits2.set(hits2.get() + 1));

        handler.invoke(&InputEvent::primary_click());
        assert_eq!(hits.get(), 1);

        // Named handlers are resolved by the host; here they do nothing
        Handler::named("missing").invoke(&InputEvent::primary_click());
        assert_eq!(hits.get(), 1);
    }
}
