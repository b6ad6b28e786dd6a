//! Engine options: the fixed baseline configuration plus the filter
//! deciding which option paths the live settings panel exposes.

/// Arrowhead drawn at the target end of every edge.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowOptions {
	pub enabled: bool,
	pub scale_factor: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmoothOptions {
	pub enabled: bool,
	pub roundness: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeOptions {
	pub arrow_to: ArrowOptions,
	/// Edges never inherit endpoint colors; they use their own explicit
	/// color or the engine default.
	pub color_inherit: bool,
	pub width: f64,
	pub smooth: SmoothOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsOptions {
	pub enabled: bool,
	pub gravitational_constant: f64,
}

/// Live-panel descriptor, attached when options are derived for a mounted
/// session. The filter decides which paths the panel renders.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigureOptions {
	pub filter: fn(&str, &[&str]) -> bool,
}

/// The full configuration bag handed to the rendering engine. Exactly one
/// value is active per session; replacing it reapplies everything.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineOptions {
	pub edges: EdgeOptions,
	pub physics: PhysicsOptions,
	pub height: String,
	pub width: String,
	pub configure: Option<ConfigureOptions>,
}

impl EngineOptions {
	/// The fixed baseline every session starts from.
	pub fn baseline() -> Self {
		EngineOptions {
			edges: EdgeOptions {
				arrow_to: ArrowOptions {
					enabled: true,
					scale_factor: 1.5,
				},
				color_inherit: false,
				width: 4.0,
				smooth: SmoothOptions {
					enabled: true,
					roundness: 0.5,
				},
			},
			physics: PhysicsOptions {
				enabled: true,
				gravitational_constant: -50000.0,
			},
			height: "100%".into(),
			width: "100%".into(),
			configure: None,
		}
	}

	/// Derive the mounted value: same options with the configure
	/// descriptor attached. Pure; the baseline is left untouched.
	pub fn for_mount(&self) -> Self {
		let mut mounted = self.clone();
		mounted.configure = Some(ConfigureOptions {
			filter: configure_filter,
		});
		mounted
	}

	/// Read one configurable parameter. Booleans read as 0.0/1.0.
	pub fn get(&self, option: &str, path: &[&str]) -> Option<f64> {
		match (path, option) {
			(["physics"], "enabled") => Some(self.physics.enabled as u8 as f64),
			(["physics", "barnesHut"], "gravitationalConstant") => {
				Some(self.physics.gravitational_constant)
			}
			(["edges", "smooth"], "enabled") => Some(self.edges.smooth.enabled as u8 as f64),
			(["edges", "smooth"], "roundness") => Some(self.edges.smooth.roundness),
			(["edges"], "width") => Some(self.edges.width),
			(["edges", "arrows", "to"], "scaleFactor") => Some(self.edges.arrow_to.scale_factor),
			_ => None,
		}
	}

	/// Derive a new options value with one parameter changed. Unknown
	/// paths leave the value untouched.
	pub fn set(&self, option: &str, path: &[&str], value: f64) -> Self {
		let mut next = self.clone();
		match (path, option) {
			(["physics"], "enabled") => next.physics.enabled = value != 0.0,
			(["physics", "barnesHut"], "gravitationalConstant") => {
				next.physics.gravitational_constant = value
			}
			(["edges", "smooth"], "enabled") => next.edges.smooth.enabled = value != 0.0,
			(["edges", "smooth"], "roundness") => next.edges.smooth.roundness = value,
			(["edges"], "width") => next.edges.width = value,
			(["edges", "arrows", "to"], "scaleFactor") => {
				next.edges.arrow_to.scale_factor = value
			}
			_ => {}
		}
		next
	}
}

/// Every parameter the panel could edit, as `(option, path)` pairs. The
/// configure filter prunes this list down to physics and smoothing.
pub const CONFIGURABLE: &[(&str, &[&str])] = &[
	("enabled", &["physics"]),
	("gravitationalConstant", &["physics", "barnesHut"]),
	("enabled", &["edges", "smooth"]),
	("roundness", &["edges", "smooth"]),
	("width", &["edges"]),
	("scaleFactor", &["edges", "arrows", "to"]),
];

/// Panel filter: only physics and smoothing options are live-editable.
pub fn configure_filter(option: &str, path: &[&str]) -> bool {
	if path.contains(&"physics") {
		return true;
	}
	if path.contains(&"smooth") || option == "smooth" {
		return true;
	}
	false
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn baseline_matches_fixed_configuration() {
		let options = EngineOptions::baseline();
		assert!(options.edges.arrow_to.enabled);
		assert_eq!(options.edges.arrow_to.scale_factor, 1.5);
		assert!(!options.edges.color_inherit);
		assert_eq!(options.edges.width, 4.0);
		assert!(options.physics.enabled);
		assert_eq!(options.physics.gravitational_constant, -50000.0);
		assert_eq!(options.height, "100%");
		assert_eq!(options.width, "100%");
		assert_eq!(options.configure, None);
	}

	#[test]
	fn filter_accepts_physics_paths() {
		assert!(configure_filter("enabled", &["physics"]));
		assert!(configure_filter(
			"gravitationalConstant",
			&["physics", "barnesHut"]
		));
		assert!(configure_filter("anything", &["layout", "physics", "x"]));
	}

	#[test]
	fn filter_accepts_smooth_paths_and_option() {
		assert!(configure_filter("roundness", &["edges", "smooth"]));
		assert!(configure_filter("smooth", &["edges"]));
	}

	#[test]
	fn filter_rejects_everything_else() {
		assert!(!configure_filter("width", &["edges"]));
		assert!(!configure_filter("scaleFactor", &["edges", "arrows", "to"]));
		assert!(!configure_filter("height", &[]));
		assert!(!configure_filter("color", &["nodes"]));
	}

	#[test]
	fn for_mount_attaches_configure_and_preserves_baseline() {
		let baseline = EngineOptions::baseline();
		let mounted = baseline.for_mount();
		assert_eq!(baseline.configure, None);
		let configure = mounted.configure.expect("configure attached");
		assert!((configure.filter)("enabled", &["physics"]));
		assert!(!(configure.filter)("width", &["edges"]));
	}

	#[test]
	fn get_and_set_cover_every_configurable_path() {
		let options = EngineOptions::baseline();
		for (option, path) in CONFIGURABLE {
			let current = options.get(option, path);
			assert!(current.is_some(), "unreadable path {path:?} {option}");
			let next = options.set(option, path, 7.0);
			assert_eq!(next.get(option, path), Some(7.0));
		}
		// untouched paths do not change the value
		assert_eq!(options.set("bogus", &["nowhere"], 1.0), options);
	}

	#[test]
	fn set_toggles_booleans_through_zero() {
		let options = EngineOptions::baseline();
		let off = options.set("enabled", &["physics"], 0.0);
		assert!(!off.physics.enabled);
		let on = off.set("enabled", &["physics"], 1.0);
		assert!(on.physics.enabled);
	}
}
