//! Fetches the one static resource the page depends on: the project list.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::gallery::{Gallery, GalleryError};

pub async fn fetch_gallery(url: &str) -> Result<Gallery, GalleryError> {
    let window = web_sys::window().ok_or_else(|| GalleryError::Request("no window".into()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|err| GalleryError::Request(format!("{err:?}")))?;
    let response: Response = response
        .dyn_into()
        .map_err(|err| GalleryError::Request(format!("{err:?}")))?;

    if !response.ok() {
        return Err(GalleryError::Fetch {
            status: response.status(),
        });
    }

    let body = response
        .text()
        .map_err(|err| GalleryError::Request(format!("{err:?}")))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|err| GalleryError::Request(format!("{err:?}")))?;
    let payload = body
        .as_string()
        .ok_or_else(|| GalleryError::Request("response body is not text".into()))?;

    Gallery::from_json(&payload)
}
