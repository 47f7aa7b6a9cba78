//! Input collection for one departamento. Holds the draft, validates it, never
//! talks to the service.

use shared::domain::{Departamento, DepartamentoId, DepartamentoPayload, PayloadError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(DepartamentoId),
}

impl FormMode {
    pub fn existing_id(self) -> Option<DepartamentoId> {
        match self {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("El nombre es obligatorio")]
    NombreRequired,
}

impl From<PayloadError> for FormError {
    fn from(value: PayloadError) -> Self {
        match value {
            PayloadError::NombreRequired => FormError::NombreRequired,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub payload: DepartamentoPayload,
    pub id: Option<DepartamentoId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    mode: FormMode,
    record: Option<Departamento>,
    pub nombre: String,
    pub descripcion: String,
    last_error: Option<FormError>,
}

impl RecordForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            record: None,
            nombre: String::new(),
            descripcion: String::new(),
            last_error: None,
        }
    }

    pub fn edit(record: Departamento) -> Self {
        Self {
            mode: FormMode::Edit(record.id),
            nombre: record.nombre.clone(),
            descripcion: record.descripcion_or_empty().to_string(),
            record: Some(record),
            last_error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The record being edited; `None` in create mode.
    pub fn record(&self) -> Option<&Departamento> {
        self.record.as_ref()
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Agregar Departamento",
            FormMode::Edit(_) => "Editar Departamento",
        }
    }

    pub fn last_error(&self) -> Option<FormError> {
        self.last_error
    }

    pub fn can_submit(&self) -> bool {
        !self.nombre.trim().is_empty()
    }

    pub fn confirm(&mut self) -> Result<FormSubmission, FormError> {
        match DepartamentoPayload::new(self.nombre.as_str(), self.descripcion.as_str()) {
            Ok(payload) => {
                self.last_error = None;
                Ok(FormSubmission {
                    payload,
                    id: self.mode.existing_id(),
                })
            }
            Err(err) => {
                let err = FormError::from(err);
                self.last_error = Some(err);
                Err(err)
            }
        }
    }
}
