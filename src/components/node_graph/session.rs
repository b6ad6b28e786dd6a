//! Graph session: the explicit state machine owning one rendering-engine
//! instance per view. The engine handle is exclusively owned; the only
//! operations permitted on it after creation are wholesale data and
//! option replacement, and both are gated on the handle existing.

use log::debug;

use super::model::build_model;
use super::options::EngineOptions;
use super::types::Graph;

/// Seam between the session and the rendering engine. The canvas engine
/// implements this; tests substitute a recording fake.
pub trait GraphEngine: Sized {
	/// Whatever the engine draws into; a canvas element in production.
	type Container;

	/// Instantiate the engine against a container. `None` means the
	/// container was unusable and the session stays engine-less.
	fn create(container: &Self::Container, data: &Graph, options: &EngineOptions) -> Option<Self>;

	/// Replace the engine's graph wholesale. Never a node-by-node diff.
	fn set_data(&mut self, data: &Graph);

	/// Replace the engine's options wholesale.
	fn set_options(&mut self, options: &EngineOptions);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
	Unmounted,
	/// Mount ran but the container was missing or unusable; the engine
	/// was silently skipped for that pass.
	MountedNoEngine,
	EngineBound,
}

/// One session per graph view: holds the decorated model, the active
/// options value and at most one engine instance.
pub struct GraphSession<E: GraphEngine> {
	model: Graph,
	options: EngineOptions,
	engine: Option<E>,
	phase: SessionPhase,
}

impl<E: GraphEngine> GraphSession<E> {
	pub fn new(graph: &Graph) -> Self {
		GraphSession {
			model: build_model(graph),
			options: EngineOptions::baseline(),
			engine: None,
			phase: SessionPhase::Unmounted,
		}
	}

	pub fn phase(&self) -> SessionPhase {
		self.phase
	}

	pub fn model(&self) -> &Graph {
		&self.model
	}

	pub fn options(&self) -> &EngineOptions {
		&self.options
	}

	/// Mount transition. Instantiates the engine at most once per
	/// session; a missing container skips instantiation for this pass
	/// (the surrounding view decides whether another pass happens).
	pub fn mount(&mut self, container: Option<&E::Container>) {
		if self.engine.is_some() {
			return;
		}
		self.phase = SessionPhase::MountedNoEngine;
		let Some(container) = container else {
			debug!("graph container not available, skipping engine instantiation");
			return;
		};
		self.options = self.options.for_mount();
		self.engine = E::create(container, &self.model, &self.options);
		if self.engine.is_some() {
			self.phase = SessionPhase::EngineBound;
		}
	}

	/// Upstream graph changed: rebuild the decorated model and push it to
	/// the engine in one `set_data` call.
	pub fn replace_graph(&mut self, graph: &Graph) {
		self.model = build_model(graph);
		if let Some(engine) = self.engine.as_mut() {
			engine.set_data(&self.model);
		}
	}

	/// Swap in a new options value and reapply it wholesale.
	pub fn replace_options(&mut self, options: EngineOptions) {
		self.options = options;
		if let Some(engine) = self.engine.as_mut() {
			engine.set_options(&self.options);
		}
	}

	pub fn engine_mut(&mut self) -> Option<&mut E> {
		self.engine.as_mut()
	}

	/// Unmount: drop the engine handle so rendering resources are not
	/// leaked past the owning view.
	pub fn release(&mut self) {
		self.engine = None;
		self.phase = SessionPhase::Unmounted;
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::node_graph::model::graph_from_text;

	#[derive(Clone, Debug, PartialEq)]
	enum Call {
		Create { nodes: usize, edges: usize },
		SetData { nodes: usize, edges: usize },
		SetOptions { gravity: f64 },
	}

	#[derive(Clone, Default)]
	struct CallLog(Rc<RefCell<Vec<Call>>>);

	impl CallLog {
		fn calls(&self) -> Vec<Call> {
			self.0.borrow().clone()
		}
	}

	struct FakeEngine {
		log: CallLog,
	}

	impl GraphEngine for FakeEngine {
		type Container = CallLog;

		fn create(container: &CallLog, data: &Graph, options: &EngineOptions) -> Option<Self> {
			assert!(options.configure.is_some(), "mounted options lack configure");
			container.0.borrow_mut().push(Call::Create {
				nodes: data.nodes.len(),
				edges: data.edges.len(),
			});
			Some(FakeEngine {
				log: container.clone(),
			})
		}

		fn set_data(&mut self, data: &Graph) {
			self.log.0.borrow_mut().push(Call::SetData {
				nodes: data.nodes.len(),
				edges: data.edges.len(),
			});
		}

		fn set_options(&mut self, options: &EngineOptions) {
			self.log.0.borrow_mut().push(Call::SetOptions {
				gravity: options.physics.gravitational_constant,
			});
		}
	}

	fn two_node_graph() -> Graph {
		graph_from_text(r#"{"nodes":[{"id":"a"},{"id":"b"}],"edges":[{"from":"a","to":"b"}]}"#)
	}

	#[test]
	fn starts_unmounted_with_decorated_model() {
		let session = GraphSession::<FakeEngine>::new(&two_node_graph());
		assert_eq!(session.phase(), SessionPhase::Unmounted);
		assert_eq!(session.model().nodes[0].border_width, 2.0);
	}

	#[test]
	fn missing_container_skips_engine_silently() {
		let mut session = GraphSession::<FakeEngine>::new(&Graph::empty());
		session.mount(None);
		assert_eq!(session.phase(), SessionPhase::MountedNoEngine);
		assert!(session.engine_mut().is_none());
	}

	#[test]
	fn no_engine_calls_before_mount() {
		let log = CallLog::default();
		let mut session = GraphSession::<FakeEngine>::new(&Graph::empty());

		// both replacements run before the engine exists
		session.replace_graph(&two_node_graph());
		session.replace_options(EngineOptions::baseline());
		assert_eq!(log.calls(), vec![]);

		session.mount(Some(&log));
		assert_eq!(session.phase(), SessionPhase::EngineBound);
		assert_eq!(log.calls(), vec![Call::Create { nodes: 2, edges: 1 }]);
	}

	#[test]
	fn mount_runs_at_most_once() {
		let log = CallLog::default();
		let mut session = GraphSession::<FakeEngine>::new(&Graph::empty());
		session.mount(Some(&log));
		session.mount(Some(&log));
		session.mount(None);
		assert_eq!(log.calls().len(), 1);
		assert_eq!(session.phase(), SessionPhase::EngineBound);
	}

	#[test]
	fn graph_change_triggers_exactly_one_set_data() {
		let log = CallLog::default();
		let mut session =
			GraphSession::<FakeEngine>::new(&graph_from_text(r#"{"nodes":[{"id":"a"}],"edges":[]}"#));
		session.mount(Some(&log));

		session.replace_graph(&two_node_graph());
		assert_eq!(
			log.calls(),
			vec![
				Call::Create { nodes: 1, edges: 0 },
				Call::SetData { nodes: 2, edges: 1 },
			]
		);
	}

	#[test]
	fn options_change_is_applied_wholesale() {
		let log = CallLog::default();
		let mut session = GraphSession::<FakeEngine>::new(&Graph::empty());
		session.mount(Some(&log));

		let next = session
			.options()
			.set("gravitationalConstant", &["physics", "barnesHut"], -100.0);
		session.replace_options(next);

		assert_eq!(
			log.calls()[1..],
			[Call::SetOptions { gravity: -100.0 }]
		);
		assert_eq!(session.options().physics.gravitational_constant, -100.0);
	}

	#[test]
	fn release_drops_the_engine() {
		let log = CallLog::default();
		let mut session = GraphSession::<FakeEngine>::new(&Graph::empty());
		session.mount(Some(&log));
		session.release();
		assert_eq!(session.phase(), SessionPhase::Unmounted);

		// replacements after release must not reach the dropped engine
		session.replace_graph(&two_node_graph());
		assert_eq!(log.calls().len(), 1);
	}
}
