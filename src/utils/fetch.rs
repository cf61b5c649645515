//! Network utilities for the listing and upload endpoints.
//!
//! Listings go through `gloo-net` with an abort-based timeout. Uploads use
//! `XMLHttpRequest` directly because the Fetch API reports no upload progress.

use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use js_sys::Promise;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, FormData, ProgressEvent, XmlHttpRequest};

use crate::config::{PATH_QUERY_PARAM, UPLOAD_FIELD};
use crate::core::error::{FetchError, UploadError};
use crate::utils::url::endpoint_url;

// =============================================================================
// Listing
// =============================================================================

/// GET `endpoint?path=<path>` and decode the JSON body.
///
/// The request is aborted after `timeout_ms`; that case is reported as
/// [`FetchError::Timeout`].
pub async fn fetch_listing<T: DeserializeOwned>(
    endpoint: &str,
    path: &str,
    timeout_ms: u32,
) -> Result<T, FetchError> {
    let controller = AbortController::new().map_err(|_| FetchError::RequestCreationFailed)?;
    let timed_out = Rc::new(Cell::new(false));

    // Dropping the timer at the end of this function cancels it.
    let _timer = {
        let controller = controller.clone();
        let timed_out = Rc::clone(&timed_out);
        Timeout::new(timeout_ms, move || {
            timed_out.set(true);
            controller.abort();
        })
    };

    let signal = controller.signal();
    let response = Request::get(endpoint)
        .query([(PATH_QUERY_PARAM, path)])
        .abort_signal(Some(&signal))
        .send()
        .await
        .map_err(|e| or_timeout(timed_out.get(), FetchError::NetworkError(e.to_string())))?;

    if !response.ok() {
        return Err(FetchError::HttpError(response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| or_timeout(timed_out.get(), FetchError::JsonParseError(e.to_string())))
}

/// The abort fires mid-request or mid-body; either way it is a timeout.
fn or_timeout(timed_out: bool, error: FetchError) -> FetchError {
    if timed_out { FetchError::Timeout } else { error }
}

// =============================================================================
// Upload
// =============================================================================

/// POST `files` as multipart form data to `endpoint?path=<path>`.
///
/// Each file goes into its own `file` field. `on_progress` receives the
/// upload percentage whenever the browser reports progress.
pub async fn upload_files(
    endpoint: &str,
    path: &str,
    files: &[web_sys::File],
    on_progress: Box<dyn Fn(f64)>,
) -> Result<(), UploadError> {
    let url = endpoint_url(endpoint, path).map_err(UploadError::InvalidUrl)?;

    let form = FormData::new().map_err(|_| UploadError::RequestCreationFailed)?;
    for file in files {
        form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
            .map_err(|_| UploadError::RequestCreationFailed)?;
    }

    let xhr = XmlHttpRequest::new().map_err(|_| UploadError::RequestCreationFailed)?;
    xhr.open_with_async("POST", &url, true)
        .map_err(|_| UploadError::RequestCreationFailed)?;

    let progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
        if event.length_computable() && event.total() > 0.0 {
            on_progress(event.loaded() / event.total() * 100.0);
        }
    });
    xhr.upload()
        .map_err(|_| UploadError::RequestCreationFailed)?
        .set_onprogress(Some(progress.as_ref().unchecked_ref()));

    let done = Promise::new(&mut |resolve, reject| {
        xhr.set_onload(Some(&resolve));
        xhr.set_onerror(Some(&reject));
        xhr.set_onabort(Some(&reject));
    });

    xhr.send_with_opt_form_data(Some(&form))
        .map_err(|_| UploadError::NetworkError)?;
    let outcome = JsFuture::from(done).await;

    // The closure must outlive every progress event, so it is only dropped here.
    drop(progress);
    outcome.map_err(|_| UploadError::NetworkError)?;

    let status = xhr.status().map_err(|_| UploadError::NetworkError)?;
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(UploadError::HttpError(status))
    }
}
