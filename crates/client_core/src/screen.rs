//! The departamento catalog screen: a reducer over user events and service
//! completions.
//!
//! Operations that need the network return [`ServiceRequest`]s instead of doing
//! I/O. The host runs them against a [`crate::RemoteCatalogService`] and feeds
//! each [`ServiceResponse`] back through [`CatalogScreen::apply`], on the same
//! thread that delivers user events.

use std::collections::BTreeSet;

use shared::{
    domain::{Departamento, DepartamentoId, DepartamentoPayload},
    protocol::messages,
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::{
    error::RemoteError,
    form::{FormError, FormMode, RecordForm},
    notify::{NotificationChannel, PromptActions, PromptHandle},
    request::{RequestId, ServiceOp, ServiceOutcome, ServiceRequest, ServiceResponse},
    state::CatalogState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    ModalOpen(FormMode),
    ConfirmingDelete(DepartamentoId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    Refresh,
    Search(String),
    OpenCreate,
    OpenEdit(Departamento),
    CloseModal,
    /// Validate the open form and submit it.
    SubmitForm,
    RequestDelete(Departamento),
    ConfirmDelete(DepartamentoId),
    CancelDelete,
}

impl ScreenEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ScreenEvent::Refresh => "refresh",
            ScreenEvent::Search(_) => "search",
            ScreenEvent::OpenCreate => "open_create",
            ScreenEvent::OpenEdit(_) => "open_edit",
            ScreenEvent::CloseModal => "close_modal",
            ScreenEvent::SubmitForm => "submit",
            ScreenEvent::RequestDelete(_) => "request_delete",
            ScreenEvent::ConfirmDelete(_) => "confirm_delete",
            ScreenEvent::CancelDelete => "cancel_delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("{event} is not allowed while {phase:?}")]
    InvalidTransition { phase: Phase, event: &'static str },
    #[error("a {0} request is already in flight")]
    RequestInFlight(&'static str),
    #[error("deletion of {requested} requested but {pending} is awaiting confirmation")]
    DeletionMismatch {
        requested: DepartamentoId,
        pending: DepartamentoId,
    },
    #[error(transparent)]
    Form(#[from] FormError),
    #[error("catalog screen is unmounted")]
    Unmounted,
}

#[derive(Debug)]
enum Overlay {
    None,
    Modal {
        form: RecordForm,
        submitting: Option<RequestId>,
    },
    ConfirmDelete {
        id: DepartamentoId,
        prompt: PromptHandle,
        deleting: Option<RequestId>,
    },
}

pub struct CatalogScreen<N: NotificationChannel> {
    state: CatalogState,
    overlay: Overlay,
    notifier: N,
    next_request: u64,
    lists_in_flight: BTreeSet<RequestId>,
    last_applied_list: Option<RequestId>,
    mounted: bool,
}

impl<N: NotificationChannel> CatalogScreen<N> {
    /// Creates the screen in `Loading` together with the initial list request.
    pub fn mount(notifier: N) -> (Self, Vec<ServiceRequest>) {
        let mut screen = Self {
            state: CatalogState::default(),
            overlay: Overlay::None,
            notifier,
            next_request: 0,
            lists_in_flight: BTreeSet::new(),
            last_applied_list: None,
            mounted: true,
        };
        let initial = screen.refresh();
        (screen, vec![initial])
    }

    /// Later completions become no-ops.
    pub fn unmount(&mut self) {
        self.mounted = false;
        debug!("catalog screen unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn phase(&self) -> Phase {
        match &self.overlay {
            Overlay::Modal { form, .. } => Phase::ModalOpen(form.mode()),
            Overlay::ConfirmDelete { id, .. } => Phase::ConfirmingDelete(*id),
            Overlay::None if !self.lists_in_flight.is_empty() => Phase::Loading,
            Overlay::None => Phase::Idle,
        }
    }

    pub fn all_records(&self) -> &[Departamento] {
        self.state.all_records()
    }

    pub fn visible_records(&self) -> &[Departamento] {
        self.state.visible_records()
    }

    pub fn search_query(&self) -> &str {
        self.state.search_query()
    }

    pub fn modal_open(&self) -> bool {
        matches!(self.overlay, Overlay::Modal { .. })
    }

    pub fn selected_record(&self) -> Option<&Departamento> {
        match &self.overlay {
            Overlay::Modal { form, .. } => form.record(),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&RecordForm> {
        match &self.overlay {
            Overlay::Modal { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut RecordForm> {
        match &mut self.overlay {
            Overlay::Modal { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            self.overlay,
            Overlay::Modal {
                submitting: Some(_),
                ..
            }
        )
    }

    pub fn pending_deletion(&self) -> Option<DepartamentoId> {
        match self.overlay {
            Overlay::ConfirmDelete { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_deleting(&self) -> bool {
        matches!(
            self.overlay,
            Overlay::ConfirmDelete {
                deleting: Some(_),
                ..
            }
        )
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn handle(&mut self, event: ScreenEvent) -> Result<Vec<ServiceRequest>, ScreenError> {
        if !self.mounted {
            return Err(ScreenError::Unmounted);
        }
        let name = event.name();
        debug!(event = name, phase = ?self.phase(), "screen event");

        let result = match event {
            ScreenEvent::Refresh => Ok(vec![self.refresh()]),
            ScreenEvent::Search(text) => {
                self.state.set_search(&text);
                Ok(Vec::new())
            }
            ScreenEvent::OpenCreate => self.open_form(RecordForm::create(), name),
            ScreenEvent::OpenEdit(record) => self.open_form(RecordForm::edit(record), name),
            ScreenEvent::CloseModal => self.close_modal(),
            ScreenEvent::SubmitForm => self.submit_form(),
            ScreenEvent::RequestDelete(record) => self.request_delete(&record),
            ScreenEvent::ConfirmDelete(id) => self.confirm_delete(id),
            ScreenEvent::CancelDelete => self.cancel_delete(),
        };

        match &result {
            Err(ScreenError::Form(err)) => debug!(event = name, %err, "form rejected"),
            Err(err) => warn!(event = name, %err, "screen event rejected"),
            Ok(_) => {}
        }
        result
    }

    /// Submits an already validated payload; updates when `existing_id` is set.
    pub fn submit(
        &mut self,
        payload: DepartamentoPayload,
        existing_id: Option<DepartamentoId>,
    ) -> Result<Vec<ServiceRequest>, ScreenError> {
        if !self.mounted {
            return Err(ScreenError::Unmounted);
        }
        let phase = self.phase();
        match &self.overlay {
            Overlay::Modal {
                submitting: Some(_),
                ..
            } => return Err(ScreenError::RequestInFlight("submit")),
            Overlay::Modal { .. } => {}
            _ => {
                return Err(ScreenError::InvalidTransition {
                    phase,
                    event: "submit",
                })
            }
        }

        let op = match existing_id {
            Some(id) => ServiceOp::Update(id, payload),
            None => ServiceOp::Create(payload),
        };
        let request = self.issue(op);
        if let Overlay::Modal { submitting, .. } = &mut self.overlay {
            *submitting = Some(request.id);
        }
        Ok(vec![request])
    }

    /// Applies a completed service call. Returns follow-up requests (a refresh
    /// after a successful write).
    pub fn apply(&mut self, response: ServiceResponse) -> Vec<ServiceRequest> {
        let ServiceResponse { request, outcome } = response;
        if !self.mounted {
            debug!(request = request.0, "dropping completion for unmounted screen");
            return Vec::new();
        }

        match outcome {
            ServiceOutcome::Listed(result) => {
                self.apply_list(request, result);
                Vec::new()
            }
            ServiceOutcome::Created(result) => {
                self.apply_write(request, result.map(drop), messages::RECORD_CREATED)
            }
            ServiceOutcome::Updated(result) => {
                self.apply_write(request, result.map(drop), messages::RECORD_UPDATED)
            }
            ServiceOutcome::Deleted(result) => self.apply_delete(request, result),
        }
    }

    fn issue(&mut self, op: ServiceOp) -> ServiceRequest {
        self.next_request += 1;
        let id = RequestId(self.next_request);
        debug!(request = id.0, op = op.name(), "queued catalog request");
        ServiceRequest { id, op }
    }

    fn refresh(&mut self) -> ServiceRequest {
        let request = self.issue(ServiceOp::List);
        self.lists_in_flight.insert(request.id);
        request
    }

    fn open_form(
        &mut self,
        form: RecordForm,
        event: &'static str,
    ) -> Result<Vec<ServiceRequest>, ScreenError> {
        if !matches!(self.overlay, Overlay::None) {
            return Err(ScreenError::InvalidTransition {
                phase: self.phase(),
                event,
            });
        }
        self.overlay = Overlay::Modal {
            form,
            submitting: None,
        };
        Ok(Vec::new())
    }

    fn close_modal(&mut self) -> Result<Vec<ServiceRequest>, ScreenError> {
        match self.overlay {
            Overlay::Modal { submitting, .. } => {
                if let Some(request) = submitting {
                    debug!(request = request.0, "modal closed with submit in flight");
                }
                self.overlay = Overlay::None;
                Ok(Vec::new())
            }
            _ => Err(ScreenError::InvalidTransition {
                phase: self.phase(),
                event: "close_modal",
            }),
        }
    }

    fn submit_form(&mut self) -> Result<Vec<ServiceRequest>, ScreenError> {
        let phase = self.phase();
        let submission = match &mut self.overlay {
            Overlay::Modal {
                submitting: Some(_),
                ..
            } => return Err(ScreenError::RequestInFlight("submit")),
            Overlay::Modal { form, .. } => form.confirm()?,
            _ => {
                return Err(ScreenError::InvalidTransition {
                    phase,
                    event: "submit",
                })
            }
        };
        self.submit(submission.payload, submission.id)
    }

    fn request_delete(&mut self, record: &Departamento) -> Result<Vec<ServiceRequest>, ScreenError> {
        if !matches!(self.overlay, Overlay::None) {
            return Err(ScreenError::InvalidTransition {
                phase: self.phase(),
                event: "request_delete",
            });
        }
        let actions = PromptActions {
            confirm: ScreenEvent::ConfirmDelete(record.id),
            cancel: ScreenEvent::CancelDelete,
        };
        let prompt = self
            .notifier
            .prompt_confirmation(messages::CONFIRM_DELETE, actions);
        self.overlay = Overlay::ConfirmDelete {
            id: record.id,
            prompt,
            deleting: None,
        };
        Ok(Vec::new())
    }

    fn confirm_delete(&mut self, id: DepartamentoId) -> Result<Vec<ServiceRequest>, ScreenError> {
        let pending = match self.overlay {
            Overlay::ConfirmDelete {
                deleting: Some(_), ..
            } => return Err(ScreenError::RequestInFlight("delete")),
            Overlay::ConfirmDelete { id: pending, .. } => pending,
            _ => {
                return Err(ScreenError::InvalidTransition {
                    phase: self.phase(),
                    event: "confirm_delete",
                })
            }
        };
        if pending != id {
            return Err(ScreenError::DeletionMismatch {
                requested: id,
                pending,
            });
        }

        let request = self.issue(ServiceOp::Delete(id));
        if let Overlay::ConfirmDelete { deleting, .. } = &mut self.overlay {
            *deleting = Some(request.id);
        }
        Ok(vec![request])
    }

    fn cancel_delete(&mut self) -> Result<Vec<ServiceRequest>, ScreenError> {
        match self.overlay {
            Overlay::ConfirmDelete {
                deleting: Some(_), ..
            } => Err(ScreenError::RequestInFlight("delete")),
            Overlay::ConfirmDelete { prompt, .. } => {
                self.notifier.dismiss(prompt);
                self.overlay = Overlay::None;
                Ok(Vec::new())
            }
            _ => Err(ScreenError::InvalidTransition {
                phase: self.phase(),
                event: "cancel_delete",
            }),
        }
    }

    fn apply_list(&mut self, request: RequestId, result: Result<Vec<Departamento>, RemoteError>) {
        self.lists_in_flight.remove(&request);

        match result {
            Ok(records) => {
                if self.last_applied_list.is_some_and(|last| last > request) {
                    debug!(request = request.0, "discarding stale list response");
                    return;
                }
                self.last_applied_list = Some(request);
                self.state.replace_records(records);
                debug!(
                    total = self.state.all_records().len(),
                    visible = self.state.visible_records().len(),
                    "catalog list replaced"
                );
            }
            Err(err) => {
                // Prior records stay on screen; load failures are not surfaced to the user.
                error!(request = request.0, %err, "Error al obtener Departamentos");
            }
        }
    }

    fn apply_write(
        &mut self,
        request: RequestId,
        result: Result<(), RemoteError>,
        success_message: &str,
    ) -> Vec<ServiceRequest> {
        let owns_modal = matches!(
            self.overlay,
            Overlay::Modal { submitting: Some(id), .. } if id == request
        );

        match result {
            Ok(()) => {
                self.notifier.notify_success(success_message);
                if owns_modal {
                    self.overlay = Overlay::None;
                }
                vec![self.refresh()]
            }
            Err(err) => {
                error!(request = request.0, %err, "Error al guardar departamento");
                self.notifier.notify_error(messages::WRITE_FAILED);
                if let Overlay::Modal { submitting, .. } = &mut self.overlay {
                    if owns_modal {
                        *submitting = None;
                    }
                }
                Vec::new()
            }
        }
    }

    fn apply_delete(
        &mut self,
        request: RequestId,
        result: Result<(), RemoteError>,
    ) -> Vec<ServiceRequest> {
        let prompt = match self.overlay {
            Overlay::ConfirmDelete {
                prompt,
                deleting: Some(id),
                ..
            } if id == request => Some(prompt),
            _ => None,
        };
        if let Some(prompt) = prompt {
            self.notifier.dismiss(prompt);
            self.overlay = Overlay::None;
        }

        match result {
            Ok(()) => {
                self.notifier.notify_success(messages::RECORD_DELETED);
                vec![self.refresh()]
            }
            Err(err) => {
                error!(request = request.0, %err, "Error al eliminar departamento");
                self.notifier.notify_error(messages::DELETE_FAILED);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
