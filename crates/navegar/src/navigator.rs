//! Navigator: position tracking, routing, and hop replay.
//!
//! A navigator binds one compiled [`SceneGraph`] to a UI driver and a failure
//! reporter for the duration of a single test. `goto` asks the path-search
//! primitive for a shortest route from the current scene to the destination
//! and replays one declared action per hop, updating position as it goes.
//!
//! # Back edges
//!
//! A scene reachable from several parents cannot fix its "back" target at
//! declaration time; where its back action lands depends on how the scene was
//! reached. The navigator therefore grafts a temporary return edge when it
//! enters a scene with a back action, aimed at the most recently departed
//! non-dismissible scene, and prunes that edge again the moment it is
//! traversed. The routable graph's shape is a function of actual navigation
//! history, never a static superset of every possible back.
//!
//! # Failure model
//!
//! Non-fatal conditions (unknown destination, no route, guard timeout,
//! unknown resync target) are recorded through the [`FailureReporter`] and
//! the call returns normally; they never poison the graph or later calls.
//! Only navigator construction can fail, and graph-definition bugs panic at
//! compile time.

use std::collections::HashSet;

use crate::driver::UiDriver;
use crate::graph::SceneGraph;
use crate::reporter::{CallSite, FailureReporter};
use crate::result::{NavegarError, NavegarResult};
use crate::route::{PathSearch, UnitCostSearch};
use crate::wait::{wait_for_element, WaitOptions};

/// Callback observing scene departures during navigation.
///
/// Invoked once per hop with the name of the scene being left, not the scene
/// being entered.
pub type SceneVisitor<'v> = dyn FnMut(&str) + 'v;

/// Drives the app through the scene graph for one test's lifetime.
pub struct Navigator<'a> {
    graph: &'a mut SceneGraph,
    driver: &'a mut dyn UiDriver,
    reporter: &'a mut dyn FailureReporter,
    search: Box<dyn PathSearch>,
    current: String,
    return_anchor: Option<String>,
    guard_wait: WaitOptions,
}

impl std::fmt::Debug for Navigator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current)
            .field("return_anchor", &self.return_anchor)
            .finish_non_exhaustive()
    }
}

impl SceneGraph {
    /// Create a navigator positioned at `starting_at`, or at the designated
    /// initial scene when `starting_at` is `None`.
    ///
    /// Triggers compilation on first use. Construction fails (after
    /// recording the failure) when no starting scene can be resolved; a
    /// test cannot reasonably continue without a known position.
    ///
    /// # Panics
    ///
    /// As for [`SceneGraph::compile`].
    #[track_caller]
    pub fn navigator<'a>(
        &'a mut self,
        driver: &'a mut dyn UiDriver,
        reporter: &'a mut dyn FailureReporter,
        starting_at: Option<&str>,
    ) -> NavegarResult<Navigator<'a>> {
        let site = CallSite::caller();
        self.compile();

        let Some(start) = starting_at.or(self.initial()).map(ToString::to_string) else {
            let message = "navigator requested but no starting scene is designated";
            reporter.record(message, site, false);
            return Err(NavegarError::NoStartingScene {
                message: message.to_string(),
            });
        };
        if !self.contains(&start) {
            let message = format!("starting scene {start:?} is not declared");
            reporter.record(&message, site, false);
            return Err(NavegarError::NoStartingScene { message });
        }

        Ok(Navigator {
            graph: self,
            driver,
            reporter,
            search: Box::new(UnitCostSearch),
            current: start,
            return_anchor: None,
            guard_wait: WaitOptions::default(),
        })
    }
}

impl Navigator<'_> {
    /// Scene the test believes the app is presently in
    #[must_use]
    pub fn current_scene(&self) -> &str {
        &self.current
    }

    /// The scene a newly grafted back edge would return to
    #[must_use]
    pub fn return_anchor(&self) -> Option<&str> {
        self.return_anchor.as_deref()
    }

    /// Replace the guard-wait budget
    #[must_use]
    pub fn with_guard_wait(mut self, options: WaitOptions) -> Self {
        self.guard_wait = options;
        self
    }

    /// Swap in a different path-search implementation
    #[must_use]
    pub fn with_path_search(mut self, search: impl PathSearch + 'static) -> Self {
        self.search = Box::new(search);
        self
    }

    /// Navigate to `destination`, replaying one action per hop.
    ///
    /// Unknown destinations and unreachable destinations record exactly one
    /// failure and leave the position unchanged.
    #[track_caller]
    pub fn goto(&mut self, destination: &str) {
        self.navigate(destination, None, CallSite::caller());
    }

    /// Navigate to `destination`, invoking `visitor` with each departed scene
    #[track_caller]
    pub fn goto_with(&mut self, destination: &str, visitor: &mut SceneVisitor<'_>) {
        self.navigate(destination, Some(visitor), CallSite::caller());
    }

    /// Forcibly resync the position after the app moved by outside means.
    ///
    /// Executes no actions and leaves back edges untouched. An unknown scene
    /// name records a failure and leaves the position unchanged.
    #[track_caller]
    pub fn now_at(&mut self, name: &str) {
        if !self.graph.contains(name) {
            self.reporter.record(
                &format!("cannot resync to unknown scene {name:?}"),
                CallSite::caller(),
                false,
            );
            return;
        }
        tracing::debug!(from = %self.current, to = name, "resync");
        self.current = name.to_string();
    }

    /// Navigate back to the designated initial scene; no-op if none is set
    #[track_caller]
    pub fn revert(&mut self) {
        let site = CallSite::caller();
        if let Some(initial) = self.graph.initial().map(ToString::to_string) {
            self.navigate(&initial, None, site);
        }
    }

    /// Visit each requested scene once, de-duplicating shared path prefixes.
    ///
    /// Duplicate names are skipped after the first encounter. Scenes departed
    /// on the way to a target count as visited even when they are not in
    /// `names`, so later targets on the same path cost nothing extra;
    /// `visitor` fires only for requested scenes, once each.
    #[track_caller]
    pub fn visit_nodes(&mut self, names: &[&str], visitor: &mut SceneVisitor<'_>) {
        let site = CallSite::caller();

        let mut requested: Vec<String> = Vec::new();
        for name in names {
            if !requested.iter().any(|n| n == name) {
                requested.push((*name).to_string());
            }
        }
        let wanted: HashSet<String> = requested.iter().cloned().collect();

        let mut visited: HashSet<String> = HashSet::new();
        for target in &requested {
            if visited.contains(target) {
                continue;
            }
            self.navigate(
                target,
                Some(&mut |departed: &str| {
                    if visited.insert(departed.to_string()) && wanted.contains(departed) {
                        visitor(departed);
                    }
                }),
                site,
            );
        }

        // The visitor observes departures, so the scene the walk ends on has
        // not fired yet; flush it if it was requested.
        if wanted.contains(&self.current) && !visited.contains(&self.current) {
            visitor(&self.current);
        }
    }

    /// Visit every declared scene once; traversal order is unspecified
    #[track_caller]
    pub fn visit_all(&mut self, visitor: &mut SceneVisitor<'_>) {
        let names: Vec<String> = self.graph.scene_names().map(ToString::to_string).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        self.visit_nodes(&refs, visitor);
    }

    fn navigate(
        &mut self,
        destination: &str,
        mut visitor: Option<&mut SceneVisitor<'_>>,
        site: CallSite,
    ) {
        if !self.graph.contains(destination) {
            self.reporter
                .record(&format!("unknown scene {destination:?}"), site, false);
            return;
        }

        let Some(path) = self
            .search
            .find_path(self.graph.routes(), &self.current, destination)
        else {
            self.reporter.record(
                &format!("no route from {:?} to {destination:?}", self.current),
                site,
                false,
            );
            return;
        };

        // The first vertex is the current scene, not a hop.
        for next in path.into_iter().skip(1) {
            self.hop(&next, visitor.as_deref_mut());
        }
    }

    /// Execute one hop from the current scene to `to`.
    fn hop(&mut self, to: &str, visitor: Option<&mut SceneVisitor<'_>>) {
        let from = self.current.clone();

        // A dismissed scene is never a return target; keep the previous
        // anchor in that case.
        let departing_dismissible = self
            .graph
            .scene(&from)
            .is_some_and(crate::scene::SceneNode::is_dismiss_on_use);
        if !departing_dismissible {
            self.return_anchor = Some(from.clone());
        }

        let Some(action) = self.graph.scene(&from).and_then(|n| n.action_for(to)) else {
            panic!("no action registered for hop {from:?} -> {to:?}");
        };
        let action = action.clone();
        tracing::debug!(%from, %to, action = %action.describe(), "hop");
        action.execute(self.driver);

        self.await_guard(to);
        self.graft_back_edge(to);

        // Hopping onto our own anchor means the back edge was just consumed.
        if self.graph.scene(&from).and_then(|n| n.return_anchor()) == Some(to) {
            if let Some(node) = self.graph.scene_mut(&from) {
                node.clear_return_anchor();
            }
            let _ = self.graph.routes_mut().remove_arc(&from, to);
            tracing::debug!(%from, %to, "back edge consumed");
        }

        if let Some(v) = visitor {
            v(&from);
        }
        self.current = to.to_string();
    }

    /// Block until the destination's existence guard is observable.
    ///
    /// Expiry is soft: one failure attributed to the scene's declaration
    /// site, then traversal continues.
    fn await_guard(&mut self, scene: &str) {
        let Some(node) = self.graph.scene(scene) else {
            return;
        };
        let Some(guard) = node.guard().cloned() else {
            return;
        };
        let declared_at = node.declaration_site();

        let result = wait_for_element(self.driver, &guard, &self.guard_wait);
        if !result.success {
            self.reporter.record(
                &format!(
                    "scene {scene:?} not observable: element {guard} did not appear within {}ms",
                    self.guard_wait.timeout_ms
                ),
                declared_at,
                false,
            );
        }
    }

    /// Graft a temporary return edge onto a freshly entered scene.
    fn graft_back_edge(&mut self, entered: &str) {
        let Some(anchor) = self.return_anchor.clone() else {
            return;
        };
        let needs_graft = self
            .graph
            .scene(entered)
            .is_some_and(|n| n.has_back_action() && n.return_anchor().is_none());
        if !needs_graft {
            return;
        }

        if let Some(node) = self.graph.scene_mut(entered) {
            node.set_return_anchor(anchor.clone());
        }
        let _ = self.graph.routes_mut().add_arc(entered, &anchor);
        tracing::debug!(scene = entered, %anchor, "back edge grafted");
    }
}
