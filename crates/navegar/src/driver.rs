//! UiDriver - Abstract UI Automation Trait
//!
//! The engine is driver-agnostic: it replays [`EdgeAction`]s and polls element
//! existence through this trait, and never performs real interaction itself.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  UiDriver (Abstract Trait)                                       │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌────────────────┐  ┌────────────────┐  ┌───────────────────┐  │
//! │  │ Device/emulator│  │ Browser bridge │  │ ScriptedDriver    │  │
//! │  │ automation     │  │                │  │ (unit tests)      │  │
//! │  └────────────────┘  └────────────────┘  └───────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{HashMap, HashSet};

use crate::action::{EdgeAction, ElementRef};

/// Abstract UI automation driver.
///
/// Implementations perform the real taps, swipes, and text entry, and answer
/// element-existence probes. Interaction failures are the implementation's to
/// surface (through its own assertion/reporting channel); the engine assumes
/// `perform` runs to completion.
pub trait UiDriver {
    /// Perform one UI interaction
    fn perform(&mut self, action: &EdgeAction);

    /// Check whether an element is currently observable.
    ///
    /// Polled by the engine when a scene declares an existence guard; must be
    /// cheap and side-effect free.
    fn exists(&mut self, element: &ElementRef) -> bool;
}

/// In-memory driver for deterministic unit tests.
///
/// Records every performed action as its description and answers existence
/// probes from a scripted set of visible elements. Elements can be scheduled
/// to appear only after a number of probes, to exercise guard waits.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    performed: Vec<String>,
    visible: HashSet<String>,
    appear_after: HashMap<String, u32>,
}

impl ScriptedDriver {
    /// Create a new scripted driver with nothing visible
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an element as visible
    pub fn show(&mut self, id: impl Into<String>) {
        let _ = self.visible.insert(id.into());
    }

    /// Mark an element as not visible
    pub fn hide(&mut self, id: &str) {
        let _ = self.visible.remove(id);
        let _ = self.appear_after.remove(id);
    }

    /// Schedule an element to become visible after `polls` existence probes
    pub fn show_after_polls(&mut self, id: impl Into<String>, polls: u32) {
        let id = id.into();
        if polls == 0 {
            let _ = self.visible.insert(id);
        } else {
            let _ = self.appear_after.insert(id, polls);
        }
    }

    /// Descriptions of the actions performed so far, in order
    #[must_use]
    pub fn performed(&self) -> &[String] {
        &self.performed
    }

    /// Forget the recorded actions
    pub fn clear_log(&mut self) {
        self.performed.clear();
    }
}

impl UiDriver for ScriptedDriver {
    fn perform(&mut self, action: &EdgeAction) {
        self.performed.push(action.describe());
    }

    fn exists(&mut self, element: &ElementRef) -> bool {
        if self.visible.contains(&element.id) {
            return true;
        }
        let appeared = match self.appear_after.get_mut(&element.id) {
            Some(remaining) => {
                *remaining -= 1;
                *remaining == 0
            }
            None => false,
        };
        if appeared {
            let _ = self.appear_after.remove(&element.id);
            let _ = self.visible.insert(element.id.clone());
        }
        appeared
    }
}
