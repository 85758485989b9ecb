//! Edge action types: the UI interactions that move the app between scenes.
//!
//! Actions are declared on a scene's outbound edges and replayed by the
//! navigator, one per hop. The core never interprets what an action touches;
//! it hands the action to the [`UiDriver`](crate::driver::UiDriver) and the
//! driver performs the real interaction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::driver::UiDriver;

/// Opaque reference to a UI element, resolved by the driver.
///
/// The engine treats the identifier as a black box: a driver may interpret it
/// as an accessibility identifier, a CSS selector, a view tag, or anything
/// else it can locate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    /// Driver-interpreted element identifier
    pub id: String,
}

impl ElementRef {
    /// Create a new element reference
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Direction of a swipe gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    /// Swipe up
    Up,
    /// Swipe down
    Down,
    /// Swipe left
    Left,
    /// Swipe right
    Right,
}

impl SwipeDirection {
    /// Get the direction name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A custom gesture procedure, opaque to the engine.
///
/// Receives the driver so it can perform arbitrary interactions.
pub type GestureFn = Arc<dyn Fn(&mut dyn UiDriver) + Send + Sync>;

/// One declared UI interaction backing a scene transition.
#[derive(Clone)]
pub enum EdgeAction {
    /// Tap an element
    Tap(ElementRef),
    /// Type text into an element
    TypeText {
        /// Element to receive the text
        target: ElementRef,
        /// Text to type
        text: String,
    },
    /// Swipe in a direction, optionally anchored on an element
    Swipe {
        /// Element to swipe on; the driver picks a default surface if absent
        target: Option<ElementRef>,
        /// Swipe direction
        direction: SwipeDirection,
    },
    /// Custom gesture procedure
    Gesture(GestureFn),
    /// Transition that requires no interaction (the app moves on its own)
    Noop,
}

impl EdgeAction {
    /// Create a tap action
    #[must_use]
    pub fn tap(target: ElementRef) -> Self {
        Self::Tap(target)
    }

    /// Create a type-text action
    #[must_use]
    pub fn type_text(target: ElementRef, text: impl Into<String>) -> Self {
        Self::TypeText {
            target,
            text: text.into(),
        }
    }

    /// Create a swipe action
    #[must_use]
    pub fn swipe(target: Option<ElementRef>, direction: SwipeDirection) -> Self {
        Self::Swipe { target, direction }
    }

    /// Create a custom gesture action
    pub fn gesture(f: impl Fn(&mut dyn UiDriver) + Send + Sync + 'static) -> Self {
        Self::Gesture(Arc::new(f))
    }

    /// Execute this action against the driver.
    ///
    /// Interaction failures are the driver's to surface; from the engine's
    /// view an action always runs to completion.
    pub fn execute(&self, driver: &mut dyn UiDriver) {
        match self {
            Self::Gesture(f) => f(driver),
            other => driver.perform(other),
        }
    }

    /// Human-readable description for logs and failure messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Tap(target) => format!("tap {target}"),
            Self::TypeText { target, text } => format!("type {text:?} into {target}"),
            Self::Swipe {
                target: Some(t),
                direction,
            } => format!("swipe {direction} on {t}"),
            Self::Swipe {
                target: None,
                direction,
            } => format!("swipe {direction}"),
            Self::Gesture(_) => "custom gesture".to_string(),
            Self::Noop => "noop".to_string(),
        }
    }
}

impl fmt::Debug for EdgeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EdgeAction({})", self.describe())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod element_ref_tests {
        use super::*;

        #[test]
        fn test_new() {
            let el = ElementRef::new("login_button");
            assert_eq!(el.id, "login_button");
            assert_eq!(el.to_string(), "login_button");
        }

        #[test]
        fn test_equality() {
            assert_eq!(ElementRef::new("a"), ElementRef::new("a"));
            assert_ne!(ElementRef::new("a"), ElementRef::new("b"));
        }

        #[test]
        fn test_serde_round_trip() {
            let el = ElementRef::new("menu");
            let json = serde_json::to_string(&el).unwrap();
            let back: ElementRef = serde_json::from_str(&json).unwrap();
            assert_eq!(el, back);
        }
    }

    mod swipe_direction_tests {
        use super::*;

        #[test]
        fn test_as_str() {
            assert_eq!(SwipeDirection::Up.as_str(), "up");
            assert_eq!(SwipeDirection::Down.as_str(), "down");
            assert_eq!(SwipeDirection::Left.as_str(), "left");
            assert_eq!(SwipeDirection::Right.as_str(), "right");
        }

        #[test]
        fn test_display() {
            assert_eq!(format!("{}", SwipeDirection::Left), "left");
        }
    }

    mod edge_action_tests {
        use super::*;

        #[test]
        fn test_describe_tap() {
            let action = EdgeAction::tap(ElementRef::new("ok"));
            assert_eq!(action.describe(), "tap ok");
        }

        #[test]
        fn test_describe_type_text() {
            let action = EdgeAction::type_text(ElementRef::new("search"), "cats");
            assert_eq!(action.describe(), "type \"cats\" into search");
        }

        #[test]
        fn test_describe_swipe() {
            let action = EdgeAction::swipe(None, SwipeDirection::Up);
            assert_eq!(action.describe(), "swipe up");

            let action = EdgeAction::swipe(Some(ElementRef::new("list")), SwipeDirection::Down);
            assert_eq!(action.describe(), "swipe down on list");
        }

        #[test]
        fn test_describe_noop_and_gesture() {
            assert_eq!(EdgeAction::Noop.describe(), "noop");
            let action = EdgeAction::gesture(|_| {});
            assert_eq!(action.describe(), "custom gesture");
        }

        #[test]
        fn test_debug_format() {
            let action = EdgeAction::tap(ElementRef::new("ok"));
            assert_eq!(format!("{action:?}"), "EdgeAction(tap ok)");
        }

        #[test]
        fn test_clone_shares_gesture() {
            let action = EdgeAction::gesture(|_| {});
            let cloned = action.clone();
            match (&action, &cloned) {
                (EdgeAction::Gesture(a), EdgeAction::Gesture(b)) => {
                    assert!(Arc::ptr_eq(a, b));
                }
                _ => panic!("expected gesture variants"),
            }
        }
    }
}
