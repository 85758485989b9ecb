//! Navegar: Scene-Graph Navigation for End-to-End UI Tests
//!
//! Navegar (Spanish: "to navigate") removes navigation boilerplate from E2E
//! suites: tests declare the app's reachable states ("scenes") and
//! transitions ("edges") once, and a navigator computes how to get from
//! wherever the test is to wherever it needs to be, replaying the minimal
//! sequence of UI actions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    NAVEGAR Architecture                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Scene      │    │ Compiled   │    │ Navigator  │            │
//! │   │ declaration│───►│ route      │───►│ (goto /    │            │
//! │   │ (builders) │    │ graph      │    │  visit)    │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │                   │
//! │                            ┌────────────────┴───────────┐       │
//! │                            ▼                            ▼       │
//! │                      ┌────────────┐             ┌────────────┐  │
//! │                      │ UiDriver   │             │ Failure    │  │
//! │                      │ (taps etc.)│             │ reporter   │  │
//! │                      └────────────┘             └────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use jugar_navegar::{CollectingReporter, EdgeAction, ElementRef, SceneGraph, ScriptedDriver};
//!
//! let mut graph = SceneGraph::new();
//! graph.create_scene("Home", |scene| {
//!     scene.tap("Settings", ElementRef::new("gear"));
//! });
//! graph.create_scene("Settings", |scene| {
//!     scene.back(EdgeAction::tap(ElementRef::new("back_button")));
//! });
//! graph.set_initial("Home");
//!
//! let mut driver = ScriptedDriver::new();
//! let mut reporter = CollectingReporter::new();
//! let mut nav = graph.navigator(&mut driver, &mut reporter, None)?;
//! nav.goto("Settings");
//! assert_eq!(nav.current_scene(), "Settings");
//! # Ok::<(), jugar_navegar::NavegarError>(())
//! ```
//!
//! # Execution model
//!
//! Single-threaded, synchronous, one navigator per test: a hop completes
//! fully (action, guard wait, graph mutation, visitor callback) before the
//! next begins, and the only suspension point is the bounded guard wait.
//! Graphs are not safe to share across concurrently running tests.

#![warn(missing_docs)]

mod action;
mod driver;
mod graph;
mod navigator;
mod reporter;
mod result;
mod route;
mod scene;
mod wait;

pub use action::{EdgeAction, ElementRef, GestureFn, SwipeDirection};
pub use driver::{ScriptedDriver, UiDriver};
pub use graph::{ReachabilityReport, SceneGraph};
pub use navigator::{Navigator, SceneVisitor};
pub use reporter::{CallSite, CollectingReporter, FailureEntry, FailureReporter};
pub use result::{NavegarError, NavegarResult};
pub use route::{PathSearch, RouteGraph, UnitCostSearch};
pub use scene::SceneNode;
pub use wait::{
    wait_for_element, WaitOptions, WaitResult, DEFAULT_GUARD_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
};
