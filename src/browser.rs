//! Thin wrappers over the Blob and object URL browser APIs.

use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

pub fn js_error(err: JsValue) -> String {
	err.as_string()
		.or_else(|| js_sys::JSON::stringify(&err).ok().and_then(|s| s.as_string()))
		.unwrap_or_else(|| format!("{err:?}"))
}

fn options(mime: &str) -> BlobPropertyBag {
	let opts = BlobPropertyBag::new();
	opts.set_type(mime);
	opts
}

pub fn blob_from_str(contents: &str, mime: &str) -> Result<Blob, String> {
	let parts = js_sys::Array::of1(&JsValue::from_str(contents));
	Blob::new_with_str_sequence_and_options(&parts, &options(mime)).map_err(js_error)
}

pub fn blob_from_bytes(bytes: &[u8], mime: &str) -> Result<Blob, String> {
	let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
	Blob::new_with_u8_array_sequence_and_options(&parts, &options(mime)).map_err(js_error)
}

pub fn object_url(blob: &Blob) -> Result<String, String> {
	Url::create_object_url_with_blob(blob).map_err(js_error)
}

pub fn revoke(url: &str) {
	if let Err(err) = Url::revoke_object_url(url) {
		log::warn!("failed to revoke {url}: {}", js_error(err));
	}
}

pub fn now_ms() -> f64 {
	js_sys::Date::now()
}
