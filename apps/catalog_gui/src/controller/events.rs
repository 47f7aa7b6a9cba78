//! Events delivered from the backend worker to the UI thread.

use client_core::ServiceResponse;

#[derive(Debug)]
pub enum UiEvent {
    BackendReady,
    BackendFailed(String),
    Service(ServiceResponse),
}
