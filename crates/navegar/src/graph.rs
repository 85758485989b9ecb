//! Scene graph: registration, lazy compilation, and analysis.
//!
//! Scenes are registered eagerly with [`SceneGraph::create_scene`], but their
//! edges are collected lazily: each registered builder runs once, against its
//! own node, when the graph compiles. Compilation happens at most once per
//! graph, triggered by the first navigator request, and materializes one
//! routable vertex per scene and one directed arc per declared edge.
//!
//! Edges are one-directional by design; reachability from A to B never
//! implies B to A unless declared.

use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::reporter::CallSite;
use crate::result::{NavegarError, NavegarResult};
use crate::route::RouteGraph;
use crate::scene::SceneNode;

/// Deferred edge-declaration closure, run once at compile time
type SceneBuilderFn = Box<dyn FnOnce(&mut SceneNode)>;

/// The declared set of scenes and the routable graph compiled from them.
pub struct SceneGraph {
    nodes: HashMap<String, SceneNode>,
    builders: HashMap<String, SceneBuilderFn>,
    initial: Option<String>,
    compiled: bool,
    routes: RouteGraph,
}

impl std::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneGraph")
            .field("scenes", &self.nodes.len())
            .field("initial", &self.initial)
            .field("compiled", &self.compiled)
            .finish_non_exhaustive()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Create an empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            builders: HashMap::new(),
            initial: None,
            compiled: false,
            routes: RouteGraph::new(),
        }
    }

    /// Register a scene and the builder that will declare its edges.
    ///
    /// The node is created now (capturing the declaration site); the builder
    /// runs only when the graph compiles.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already registered: two scenes with one name is a
    /// graph-definition bug, not a runtime condition.
    #[track_caller]
    pub fn create_scene(
        &mut self,
        name: impl Into<String>,
        builder: impl FnOnce(&mut SceneNode) + 'static,
    ) {
        let name = name.into();
        assert!(
            !self.nodes.contains_key(&name),
            "scene {name:?} declared twice"
        );
        let node = SceneNode::declared_at(name.clone(), CallSite::caller());
        let _ = self.nodes.insert(name.clone(), node);
        let _ = self.builders.insert(name, Box::new(builder));
    }

    /// Designate the starting scene for navigators and `revert()`
    pub fn set_initial(&mut self, name: impl Into<String>) {
        self.initial = Some(name.into());
    }

    /// The designated starting scene, if any
    #[must_use]
    pub fn initial(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    /// Whether a scene with this name is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Number of registered scenes
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.nodes.len()
    }

    /// Registered scene names, in no particular order
    pub fn scene_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Look up a scene
    #[must_use]
    pub fn scene(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.get(name)
    }

    pub(crate) fn scene_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.nodes.get_mut(name)
    }

    /// Whether the routable graph has been materialized
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Compile the routable graph from the declared scenes.
    ///
    /// Runs every registered builder, then adds one directed arc per declared
    /// edge. Idempotent: re-entrant calls are a no-op.
    ///
    /// # Panics
    ///
    /// Panics if any edge names a destination that was never registered.
    pub fn compile(&mut self) {
        if self.compiled {
            return;
        }

        for name in self.nodes.keys() {
            let _ = self.routes.add_vertex(name);
        }

        let builders = std::mem::take(&mut self.builders);
        for (name, builder) in builders {
            if let Some(node) = self.nodes.get_mut(&name) {
                builder(node);
            }
        }

        for node in self.nodes.values() {
            for destination in node.destinations() {
                assert!(
                    self.nodes.contains_key(destination),
                    "scene {:?} (declared at {}) has an edge to undeclared scene {:?}",
                    node.name(),
                    node.declaration_site(),
                    destination,
                );
                let _ = self.routes.add_arc(node.name(), destination);
            }
        }

        self.compiled = true;
        tracing::debug!(
            scenes = self.routes.vertex_count(),
            edges = self.routes.arc_count(),
            "scene graph compiled"
        );
    }

    pub(crate) fn routes(&self) -> &RouteGraph {
        &self.routes
    }

    pub(crate) fn routes_mut(&mut self) -> &mut RouteGraph {
        &mut self.routes
    }

    /// Compute which scenes are reachable from `from` over declared edges.
    ///
    /// Compiles the graph if needed. Synthesized back edges are traversal
    /// state, not declared topology, and are ignored here.
    ///
    /// # Panics
    ///
    /// As for [`SceneGraph::compile`].
    pub fn reachability(&mut self, from: &str) -> NavegarResult<ReachabilityReport> {
        self.compile();
        if !self.contains(from) {
            return Err(NavegarError::UnknownScene {
                name: from.to_string(),
            });
        }

        let mut reachable = HashSet::new();
        let mut queue = VecDeque::new();
        let _ = reachable.insert(from.to_string());
        queue.push_back(from.to_string());

        while let Some(current) = queue.pop_front() {
            if let Some(node) = self.nodes.get(&current) {
                for destination in node.destinations() {
                    if !reachable.contains(destination) {
                        let _ = reachable.insert(destination.to_string());
                        queue.push_back(destination.to_string());
                    }
                }
            }
        }

        let orphaned: HashSet<String> = self
            .nodes
            .keys()
            .filter(|name| !reachable.contains(*name))
            .cloned()
            .collect();

        // A reachable scene with no declared way out and no back action
        // strands the walk.
        let dead_ends: HashSet<String> = reachable
            .iter()
            .filter(|name| {
                self.nodes
                    .get(*name)
                    .is_some_and(|n| n.edge_count() == 0 && !n.has_back_action())
            })
            .cloned()
            .collect();

        Ok(ReachabilityReport {
            reachable,
            orphaned,
            dead_ends,
        })
    }

    /// Render the declared graph in DOT format for visualization.
    ///
    /// Compiles the graph if needed. Dismiss-on-use scenes are dashed; the
    /// initial scene gets an entry marker.
    ///
    /// # Panics
    ///
    /// As for [`SceneGraph::compile`].
    pub fn to_dot(&mut self) -> String {
        self.compile();
        let mut dot = String::new();
        dot.push_str("digraph SceneGraph {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=ellipse];\n");

        if let Some(initial) = &self.initial {
            dot.push_str(&format!(
                "  __start [shape=point];\n  __start -> \"{initial}\";\n"
            ));
        }

        let mut names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        for name in &names {
            if let Some(node) = self.nodes.get(*name) {
                if node.is_dismiss_on_use() {
                    dot.push_str(&format!("  \"{name}\" [style=dashed];\n"));
                } else {
                    dot.push_str(&format!("  \"{name}\";\n"));
                }
            }
        }

        for name in &names {
            if let Some(node) = self.nodes.get(*name) {
                let mut destinations: Vec<&str> = node.destinations().collect();
                destinations.sort_unstable();
                for destination in destinations {
                    dot.push_str(&format!("  \"{name}\" -> \"{destination}\";\n"));
                }
            }
        }

        dot.push_str("}\n");
        dot
    }
}

/// Result of a reachability analysis over declared edges
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReachabilityReport {
    /// Scenes reachable from the analysis origin
    pub reachable: HashSet<String>,
    /// Scenes that cannot be reached
    pub orphaned: HashSet<String>,
    /// Reachable scenes with no declared way out and no back action
    pub dead_ends: HashSet<String>,
}

impl ReachabilityReport {
    /// Whether every declared scene is reachable and none is a dead end
    #[must_use]
    pub fn is_fully_navigable(&self) -> bool {
        self.orphaned.is_empty() && self.dead_ends.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::action::ElementRef;
    use std::cell::Cell;
    use std::rc::Rc;

    fn three_scene_graph() -> SceneGraph {
        let mut graph = SceneGraph::new();
        graph.create_scene("Home", |scene| {
            scene.tap("Settings", ElementRef::new("gear"));
        });
        graph.create_scene("Settings", |scene| {
            scene.tap("About", ElementRef::new("about_row"));
        });
        graph.create_scene("About", |_| {});
        graph.set_initial("Home");
        graph
    }

    #[test]
    fn test_registration_is_eager() {
        let graph = three_scene_graph();
        assert_eq!(graph.scene_count(), 3);
        assert!(graph.contains("Home"));
        assert!(!graph.contains("Nowhere"));
        assert_eq!(graph.initial(), Some("Home"));
    }

    #[test]
    fn test_builders_run_only_at_compile() {
        let ran = Rc::new(Cell::new(false));
        let ran_clone = Rc::clone(&ran);

        let mut graph = SceneGraph::new();
        graph.create_scene("Home", move |scene| {
            ran_clone.set(true);
            scene.noop("Home");
        });

        assert!(!ran.get());
        assert_eq!(graph.scene("Home").unwrap().edge_count(), 0);

        graph.compile();
        assert!(ran.get());
        assert_eq!(graph.scene("Home").unwrap().edge_count(), 1);
    }

    #[test]
    fn test_compile_is_idempotent() {
        let mut graph = three_scene_graph();
        graph.compile();
        let arcs = graph.routes().arc_count();
        graph.compile();
        assert!(graph.is_compiled());
        assert_eq!(graph.routes().arc_count(), arcs);
    }

    #[test]
    fn test_compile_materializes_declared_arcs() {
        let mut graph = three_scene_graph();
        graph.compile();
        assert_eq!(graph.routes().vertex_count(), 3);
        assert!(graph.routes().has_arc("Home", "Settings"));
        assert!(graph.routes().has_arc("Settings", "About"));
        // One-directional by design
        assert!(!graph.routes().has_arc("Settings", "Home"));
    }

    #[test]
    #[should_panic(expected = "declared twice")]
    fn test_duplicate_scene_panics() {
        let mut graph = SceneGraph::new();
        graph.create_scene("Home", |_| {});
        graph.create_scene("Home", |_| {});
    }

    #[test]
    #[should_panic(expected = "edge to undeclared scene")]
    fn test_edge_to_undeclared_scene_panics_at_compile() {
        let mut graph = SceneGraph::new();
        graph.create_scene("Home", |scene| {
            scene.noop("Atlantis");
        });
        graph.compile();
    }

    #[test]
    fn test_reachability_report() {
        let mut graph = three_scene_graph();
        graph.create_scene("Orphan", |_| {});
        let report = graph.reachability("Home").unwrap();

        assert!(report.reachable.contains("Home"));
        assert!(report.reachable.contains("About"));
        assert_eq!(report.orphaned.len(), 1);
        assert!(report.orphaned.contains("Orphan"));
        // About has no edges and no back action
        assert!(report.dead_ends.contains("About"));
        assert!(!report.is_fully_navigable());
    }

    #[test]
    fn test_back_action_is_not_a_dead_end() {
        let mut graph = SceneGraph::new();
        graph.create_scene("Home", |scene| {
            scene.tap("Detail", ElementRef::new("row"));
        });
        graph.create_scene("Detail", |scene| {
            scene.back(crate::action::EdgeAction::tap(ElementRef::new("back")));
        });
        let report = graph.reachability("Home").unwrap();
        assert!(report.dead_ends.is_empty());
    }

    #[test]
    fn test_reachability_unknown_origin() {
        let mut graph = three_scene_graph();
        let err = graph.reachability("Nowhere").unwrap_err();
        assert!(matches!(err, NavegarError::UnknownScene { .. }));
    }

    #[test]
    fn test_to_dot() {
        let mut graph = three_scene_graph();
        graph.create_scene("CookieDialog", |scene| {
            scene.dismiss_on_use();
        });
        let dot = graph.to_dot();

        assert!(dot.contains("digraph SceneGraph"));
        assert!(dot.contains("__start -> \"Home\""));
        assert!(dot.contains("\"Home\" -> \"Settings\""));
        assert!(dot.contains("\"CookieDialog\" [style=dashed]"));
    }
}
