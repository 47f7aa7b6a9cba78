//! Client side of the departamento catalog: the remote service contract, the
//! record form, notifications, and the screen state machine that ties them
//! together.

pub mod config;
pub mod error;
pub mod form;
pub mod notify;
pub mod request;
pub mod screen;
pub mod service;
pub mod state;

pub use config::{load_settings, ClientSettings};
pub use error::RemoteError;
pub use form::{FormError, FormMode, FormSubmission, RecordForm};
pub use notify::{
    Notification, NotificationChannel, PromptActions, PromptHandle, RecordingNotifications,
};
pub use request::{execute, RequestId, ServiceOp, ServiceOutcome, ServiceRequest, ServiceResponse};
pub use screen::{CatalogScreen, Phase, ScreenError, ScreenEvent};
pub use service::{HttpCatalogService, RemoteCatalogService};
pub use state::CatalogState;

/// Runs every queued request to completion against `service`, feeding each
/// response back into the screen, including follow-up refreshes.
pub async fn drive<N: NotificationChannel>(
    screen: &mut CatalogScreen<N>,
    service: &dyn RemoteCatalogService,
    requests: Vec<ServiceRequest>,
) {
    let mut queue = std::collections::VecDeque::from(requests);
    while let Some(request) = queue.pop_front() {
        let response = execute(service, request).await;
        queue.extend(screen.apply(response));
    }
}
