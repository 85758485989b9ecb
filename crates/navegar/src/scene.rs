//! Scene nodes: named application states and their declared transitions.
//!
//! A scene declares where the app can go from it (one edge per distinct
//! destination, each backed by an [`EdgeAction`]), an optional back action
//! used to synthesize temporary return edges at traversal time, a
//! dismiss-on-use flag, and an optional existence guard checked on arrival.
//!
//! Scenes never own each other: the graph owns every node, and scenes refer
//! to one another by name only.

use std::collections::HashMap;

use crate::action::{EdgeAction, ElementRef, SwipeDirection};
use crate::driver::UiDriver;
use crate::reporter::CallSite;

/// A single named application state and its outbound transitions.
#[derive(Debug)]
pub struct SceneNode {
    name: String,
    edges: HashMap<String, EdgeAction>,
    back_action: Option<EdgeAction>,
    dismiss_on_use: bool,
    exists_when: Option<ElementRef>,
    /// Target of the live synthesized back edge, if any. Set and cleared by
    /// the navigator as back edges are grafted and consumed.
    return_anchor: Option<String>,
    declared_at: CallSite,
}

impl SceneNode {
    /// Create an empty scene, capturing the declaration site
    #[must_use]
    #[track_caller]
    pub fn new(name: impl Into<String>) -> Self {
        Self::declared_at(name, CallSite::caller())
    }

    /// Create an empty scene attributed to an explicit site
    #[must_use]
    pub fn declared_at(name: impl Into<String>, site: CallSite) -> Self {
        Self {
            name: name.into(),
            edges: HashMap::new(),
            back_action: None,
            dismiss_on_use: false,
            exists_when: None,
            return_anchor: None,
            declared_at: site,
        }
    }

    // =========================================================================
    // Declaration API (used inside scene builders)
    // =========================================================================

    /// Declare an edge with an explicit action
    pub fn edge(&mut self, destination: impl Into<String>, action: EdgeAction) {
        let _ = self.edges.insert(destination.into(), action);
    }

    /// Declare an edge performed by tapping an element
    pub fn tap(&mut self, destination: impl Into<String>, element: ElementRef) {
        self.edge(destination, EdgeAction::tap(element));
    }

    /// Declare an edge performed by typing text into an element
    pub fn type_text(
        &mut self,
        destination: impl Into<String>,
        element: ElementRef,
        text: impl Into<String>,
    ) {
        self.edge(destination, EdgeAction::type_text(element, text));
    }

    /// Declare an edge performed by swiping up
    pub fn swipe_up(&mut self, destination: impl Into<String>, element: Option<ElementRef>) {
        self.edge(destination, EdgeAction::swipe(element, SwipeDirection::Up));
    }

    /// Declare an edge performed by swiping down
    pub fn swipe_down(&mut self, destination: impl Into<String>, element: Option<ElementRef>) {
        self.edge(destination, EdgeAction::swipe(element, SwipeDirection::Down));
    }

    /// Declare an edge performed by swiping left
    pub fn swipe_left(&mut self, destination: impl Into<String>, element: Option<ElementRef>) {
        self.edge(destination, EdgeAction::swipe(element, SwipeDirection::Left));
    }

    /// Declare an edge performed by swiping right
    pub fn swipe_right(&mut self, destination: impl Into<String>, element: Option<ElementRef>) {
        self.edge(destination, EdgeAction::swipe(element, SwipeDirection::Right));
    }

    /// Declare an edge performed by a custom gesture
    pub fn gesture(
        &mut self,
        destination: impl Into<String>,
        f: impl Fn(&mut dyn UiDriver) + Send + Sync + 'static,
    ) {
        self.edge(destination, EdgeAction::gesture(f));
    }

    /// Declare an edge that requires no interaction
    pub fn noop(&mut self, destination: impl Into<String>) {
        self.edge(destination, EdgeAction::Noop);
    }

    /// Set the action used to synthesize return edges from this scene
    pub fn back(&mut self, action: EdgeAction) {
        self.back_action = Some(action);
    }

    /// Mark this scene as never becoming a return anchor once departed
    /// (one-shot dialogs, onboarding interstitials)
    pub fn dismiss_on_use(&mut self) {
        self.dismiss_on_use = true;
    }

    /// Require `element` to become observable after arriving at this scene
    pub fn exists_when(&mut self, element: ElementRef) {
        self.exists_when = Some(element);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Scene name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where this scene was declared
    #[must_use]
    pub fn declaration_site(&self) -> CallSite {
        self.declared_at
    }

    /// Names of the declared destinations, in no particular order
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Number of declared edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether this scene is dismissed once departed
    #[must_use]
    pub fn is_dismiss_on_use(&self) -> bool {
        self.dismiss_on_use
    }

    /// The existence guard, if declared
    #[must_use]
    pub fn guard(&self) -> Option<&ElementRef> {
        self.exists_when.as_ref()
    }

    /// Whether a back action was declared
    #[must_use]
    pub fn has_back_action(&self) -> bool {
        self.back_action.is_some()
    }

    /// Target of the live synthesized back edge, if one exists
    #[must_use]
    pub fn return_anchor(&self) -> Option<&str> {
        self.return_anchor.as_deref()
    }

    /// Resolve the action for a hop to `destination`.
    ///
    /// Declared edges win over the synthesized back edge, so a graft can
    /// never shadow declared topology.
    #[must_use]
    pub fn action_for(&self, destination: &str) -> Option<&EdgeAction> {
        if let Some(action) = self.edges.get(destination) {
            return Some(action);
        }
        match (self.return_anchor.as_deref(), self.back_action.as_ref()) {
            (Some(anchor), Some(back)) if anchor == destination => Some(back),
            _ => None,
        }
    }

    pub(crate) fn set_return_anchor(&mut self, anchor: String) {
        self.return_anchor = Some(anchor);
    }

    pub(crate) fn clear_return_anchor(&mut self) {
        self.return_anchor = None;
    }
}
