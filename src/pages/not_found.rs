use leptos::prelude::*;

/// 404 fallback.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<h1>"Not Found"</h1>
		<a href="/">"Back to the dashboard"</a>
	}
}
