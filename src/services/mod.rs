//! Application service layer.
//!
//! Services orchestrate the encoder, the delivery layer and the backend
//! client behind a trait so views can depend on `dyn ExportService`.

mod export_service;

pub use export_service::{ExportReport, ExportResult, ExportService, ExportServiceImpl};
