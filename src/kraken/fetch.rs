//! Best-effort fetch helpers. Every failure mode (network error, bad
//! status, unparseable body) degrades to `None`; retries, if any, belong
//! to the caller.

use log::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::node::Node;

async fn fetch_response(url: &str) -> Option<Response> {
	let window = web_sys::window()?;
	let response = JsFuture::from(window.fetch_with_str(url)).await.ok()?;
	let response: Response = response.dyn_into().ok()?;
	if !response.ok() {
		debug!("fetch of {url} returned status {}", response.status());
		return None;
	}
	Some(response)
}

/// Fetch raw text from a url.
pub async fn fetch_text(url: &str) -> Option<String> {
	let response = fetch_response(url).await?;
	let text = JsFuture::from(response.text().ok()?).await.ok()?;
	text.as_string()
}

/// Fetch a JSON value from a url.
pub async fn fetch_json(url: &str) -> Option<serde_json::Value> {
	let text = fetch_text(url).await?;
	match serde_json::from_str(&text) {
		Ok(value) => Some(value),
		Err(err) => {
			debug!("fetch of {url} returned invalid JSON: {err}");
			None
		}
	}
}

/// Fetch the configuration and discovery node lists together; `None` if
/// either endpoint fails.
pub async fn fetch_all_node_lists(
	cfg_url: &str,
	dsc_url: &str,
) -> Option<(Vec<Node>, Vec<Node>)> {
	let cfg = fetch_node_list(cfg_url).await?;
	let dsc = fetch_node_list(dsc_url).await?;
	Some((cfg, dsc))
}

/// Fetch the node list from a Kraken state endpoint (`{"nodes": [...]}`).
pub async fn fetch_node_list(url: &str) -> Option<Vec<Node>> {
	let json = fetch_json(url).await?;
	let nodes = json.get("nodes")?.clone();
	match serde_json::from_value(nodes) {
		Ok(list) => Some(list),
		Err(err) => {
			debug!("node list from {url} failed to deserialize: {err}");
			None
		}
	}
}
