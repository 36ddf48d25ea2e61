//! Circular dependency detection for a single resolution walk
//!
//! The depth budget alone cannot tell a deep but finite graph from a cycle
//! until the budget runs out. Tracking the identifiers currently being
//! resolved catches a cycle on its first repetition and lets the error show
//! the exact path that closed it.
//!
//! ## Features
//!
//! - **O(1) Circular Detection**: lookup through a `HashSet` of in-flight identifiers
//! - **Ordered Path**: kept alongside the set for error messages (`A -> B -> A`)
//! - **RAII**: Automatic cleanup via `ResolutionGuard`
//! - **Optional**: when disabled only the depth budget guards the walk

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Frames {
	/// Identifiers currently being resolved
	in_progress: HashSet<String>,
	/// Resolution path, outermost first
	path: Vec<String>,
}

/// In-flight identifiers of one resolution walk.
#[derive(Debug, Default)]
pub struct ResolutionStack {
	detect_cycles: bool,
	frames: Rc<RefCell<Frames>>,
}

impl ResolutionStack {
	pub fn new(detect_cycles: bool) -> Self {
		Self {
			detect_cycles,
			frames: Rc::default(),
		}
	}

	/// Whether resolving `identifier` now would close a cycle.
	pub fn closes_cycle(&self, identifier: &str) -> bool {
		self.detect_cycles && self.frames.borrow().in_progress.contains(identifier)
	}

	/// Records the start of a resolution.
	///
	/// The identifier stays in flight until the returned guard is dropped.
	pub fn enter(&self, identifier: &str) -> ResolutionGuard {
		let mut frames = self.frames.borrow_mut();
		frames.in_progress.insert(identifier.to_string());
		frames.path.push(identifier.to_string());

		ResolutionGuard {
			frames: Rc::clone(&self.frames),
			identifier: identifier.to_string(),
		}
	}

	pub fn depth(&self) -> usize {
		self.frames.borrow().path.len()
	}

	/// Renders the path that leads back to `next` (format: `A -> B -> A`).
	///
	/// When `next` is not part of the current path the whole path is shown,
	/// which is the case when the depth budget ran out first.
	pub fn path_to(&self, next: &str) -> String {
		let frames = self.frames.borrow();
		let start = frames
			.path
			.iter()
			.position(|id| id == next)
			.unwrap_or(0);
		let mut segments: Vec<&str> = frames.path[start..].iter().map(String::as_str).collect();
		segments.push(next);
		segments.join(" -> ")
	}
}

/// RAII guard: removes its identifier from the walk on drop
#[derive(Debug)]
pub struct ResolutionGuard {
	frames: Rc<RefCell<Frames>>,
	identifier: String,
}

impl Drop for ResolutionGuard {
	fn drop(&mut self) {
		let mut frames = self.frames.borrow_mut();
		if let Some(pos) = frames.path.iter().rposition(|id| *id == self.identifier) {
			frames.path.remove(pos);
		}
		// Nested entries of the same identifier keep it in flight
		if !frames.path.iter().any(|id| *id == self.identifier) {
			frames.in_progress.remove(&self.identifier);
		}
	}
}
