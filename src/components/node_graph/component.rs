use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

use super::engine::CanvasEngine;
use super::options::{CONFIGURABLE, configure_filter};
use super::session::{GraphSession, SessionPhase};
use super::types::Graph;

/// Interactive node-graph panel. Owns one [`GraphSession`] for its
/// lifetime: the engine is instantiated once when the canvas exists and
/// afterwards only patched through wholesale data/option replacement.
#[component]
pub fn NodeGraph(
	#[prop(into)] graph: Signal<Graph>,
	/// Close-button callback; the close button is omitted when absent.
	#[prop(into, optional)]
	on_graph_toggle: Option<Callback<()>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let session: Rc<RefCell<GraphSession<CanvasEngine>>> =
		Rc::new(RefCell::new(GraphSession::new(&graph.get_untracked())));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (settings_open, set_settings_open) = signal(false);
	// bumped after every options replacement so the panel re-reads values
	let (options_version, set_options_version) = signal(0u32);

	// mount once, then one wholesale set_data per upstream graph change
	let session_sync = session.clone();
	Effect::new(move |_| {
		let current = graph.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let mut session = session_sync.borrow_mut();
		match session.phase() {
			SessionPhase::EngineBound => session.replace_graph(&current),
			_ => {
				session.replace_graph(&current);
				let canvas: HtmlCanvasElement = canvas.into();
				session.mount(Some(&canvas));
			}
		}
	});

	// frame loop
	let (session_anim, animate_init) = (session.clone(), animate.clone());
	Effect::new(move |_| {
		if canvas_ref.get().is_none() || animate_init.borrow().is_some() {
			return;
		}
		let session_frame = session_anim.clone();
		let animate_inner = animate_init.clone();
		let mut last = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let now = js_sys::Date::now();
			let dt = (((now - last) / 1000.0) as f32).min(0.1);
			last = now;
			if let Some(engine) = session_frame.borrow_mut().engine_mut() {
				engine.tick(dt);
				engine.render();
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = web_sys::window()
				.unwrap()
				.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// unmount: stop scheduling frames and drop the engine handle
	let (session_cleanup, animate_cleanup) = (
		leptos::__reexports::send_wrapper::SendWrapper::new(session.clone()),
		leptos::__reexports::send_wrapper::SendWrapper::new(animate.clone()),
	);
	on_cleanup(move || {
		*animate_cleanup.borrow_mut() = None;
		session_cleanup.borrow_mut().release();
	});

	let pointer_position = move |ev: &MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let session_md = session.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let (x, y) = pointer_position(&ev);
		if let Some(engine) = session_md.borrow_mut().engine_mut() {
			engine.pointer_down(x, y);
		}
	};

	let session_mm = session.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = pointer_position(&ev);
		if let Some(engine) = session_mm.borrow_mut().engine_mut() {
			engine.pointer_move(x, y);
		}
	};

	let session_mu = session.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(engine) = session_mu.borrow_mut().engine_mut() {
			engine.pointer_up();
		}
	};

	let session_ml = session.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(engine) = session_ml.borrow_mut().engine_mut() {
			engine.pointer_leave();
		}
	};

	let session_wh = session.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = ev.as_ref();
		let (x, y) = pointer_position(mouse);
		if let Some(engine) = session_wh.borrow_mut().engine_mut() {
			engine.zoom(x, y, ev.delta_y());
		}
	};

	// panel chrome only; graph data and physics are untouched by this
	let toggle_settings = move |_: MouseEvent| {
		set_settings_open.update(|open| *open = !*open);
	};

	let settings_style = move || {
		if settings_open.get() {
			"width: 20%; visibility: visible;"
		} else {
			"width: 0px; visibility: hidden;"
		}
	};

	// live panel: exactly the configurable paths the mounted configure
	// descriptor lets through
	let session_panel = leptos::__reexports::send_wrapper::SendWrapper::new(session.clone());
	let panel_rows = move || {
		options_version.get();
		let filter = session_panel
			.borrow()
			.options()
			.configure
			.as_ref()
			.map(|c| c.filter)
			.unwrap_or(configure_filter);
		CONFIGURABLE
			.iter()
			.copied()
			.filter(|&(option, path)| filter(option, path))
			.map(|(option, path)| {
				let value = session_panel
					.borrow()
					.options()
					.get(option, path)
					.unwrap_or(0.0);
				let session_edit = session_panel.clone();
				view! {
					<label class="graph-setting">
						{format!("{}.{option}", path.join("."))}
						<input
							type="number"
							step="any"
							prop:value=value.to_string()
							on:change=move |ev| {
								if let Ok(parsed) = event_target_value(&ev).parse::<f64>() {
									let mut session = session_edit.borrow_mut();
									let next = session.options().set(option, path, parsed);
									session.replace_options(next);
									set_options_version.update(|n| *n += 1);
								}
							}
						/>
					</label>
				}
			})
			.collect_view()
	};

	view! {
		<div class="graph-area">
			{on_graph_toggle
				.map(|callback| {
					view! {
						<button
							class="graph-close"
							on:click=move |_| {
								info!("closing graph");
								callback.run(());
							}
						>
							"\u{2715}"
						</button>
					}
				})}
			<button class="graph-settings-toggle" on:click=toggle_settings>
				"settings"
			</button>
			<div class="graph-settings" style=settings_style>
				{panel_rows}
			</div>
			<div class="graph-canvas-wrap">
				<canvas
					node_ref=canvas_ref
					class="graph-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
				/>
			</div>
		</div>
	}
}
