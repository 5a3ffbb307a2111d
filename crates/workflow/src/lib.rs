//! # sheetmorph-workflow
//!
//! The workflow state machine behind a spreadsheet transformation
//! session: file selection gated by an extension allow-list, an
//! immediate input preview, a guarded two-phase submission (upload,
//! then transform) against the remote service, and a result preview
//! loaded from the produced artifact.
//!
//! One [`Workflow`] value owns the whole session. Phases move along
//! `Idle → FileSelected → PreviewReady/PreviewFailed →
//! Submitting(Uploading → Transforming) → ResultReady/Failed`, and
//! [`Workflow::reset`] is the single path back to `Idle`. Every
//! failure is normalized into [`WorkflowError`] and recorded as one
//! human-readable message; result-preview failures degrade only the
//! preview, never the result itself.

mod error;
mod job;
mod loader;
mod state;

pub use error::{Result, WorkflowError};
pub use job::{SubmissionJob, TransformResult};
pub use loader::{fetch_result_preview, RESULT_SHEET_NAME};
pub use state::{SelectedFile, SubmitPhase, Workflow, WorkflowPhase};
