use crate::error::{Result, WorkflowError};
use crate::job::{SubmissionJob, TransformResult};
use crate::loader;
use sheetmorph_client::TransformClient;
use sheetmorph_sheet::{decode_first_sheet, validate_file_name, PreviewModel};

/// Sub-phase of an in-flight submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Uploading,
    Transforming,
}

/// The workflow's single source of truth for its current phase.
///
/// Exactly one phase is active at any time; the submission sub-phases
/// are variants of `Submitting` rather than independent flags, so
/// invalid combinations cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    Idle,
    FileSelected,
    PreviewReady,
    PreviewFailed,
    Submitting(SubmitPhase),
    ResultReady,
    Failed,
}

/// A file admitted into the pipeline, with its raw bytes.
///
/// Retained even when the preview decode fails, so a submission can
/// still upload the original bytes.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Controller owning the whole selection → preview → transform →
/// result workflow.
///
/// All derived values (previews, result, error message, form inputs)
/// hang off this one value and are mutated only through its transition
/// methods. Each submission and each reset takes a fresh run id;
/// completions that come back carrying a stale id are dropped, which
/// is how an in-flight run is "cancelled" after a reset.
#[derive(Debug, Default)]
pub struct Workflow {
    phase: WorkflowPhase,
    selected: Option<SelectedFile>,
    input_preview: Option<PreviewModel>,
    result_preview: Option<PreviewModel>,
    prompt: String,
    tab_name: String,
    result: Option<TransformResult>,
    error: Option<String>,
    run: u64,
}

impl Workflow {
    #[must_use]
    pub fn new() -> Self {
        Workflow::default()
    }

    #[must_use]
    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    /// The human-readable message of the most recent error, if any
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn input_preview(&self) -> Option<&PreviewModel> {
        self.input_preview.as_ref()
    }

    #[must_use]
    pub fn result_preview(&self) -> Option<&PreviewModel> {
        self.result_preview.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&TransformResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    #[must_use]
    pub fn tab_name(&self) -> &str {
        &self.tab_name
    }

    pub fn set_tab_name(&mut self, tab_name: impl Into<String>) {
        self.tab_name = tab_name.into();
    }

    /// Admit a file into the pipeline and decode its first sheet.
    ///
    /// Starts from a clean slate (an earlier selection, result or
    /// error is discarded). An unsupported extension leaves the
    /// workflow `Idle` with nothing selected. A decode failure leaves
    /// the file selected with its bytes intact and the workflow in
    /// `PreviewFailed`; it does not force a reset.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::InvalidFileType`] or
    /// [`WorkflowError::DecodePreview`]; both are also recorded in the
    /// error slot.
    pub fn select_file(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> Result<()> {
        self.reset();
        let name = name.into();

        if validate_file_name(&name).is_err() {
            return Err(self.record(WorkflowError::InvalidFileType { name }));
        }

        let decoded = decode_first_sheet(&bytes);
        let size = bytes.len() as u64;
        self.selected = Some(SelectedFile {
            name: name.clone(),
            bytes,
        });
        self.phase = WorkflowPhase::FileSelected;

        match decoded {
            Ok(decoded) => {
                self.input_preview = Some(
                    PreviewModel::build(decoded.sheet, decoded.used_range).with_source(name, size),
                );
                self.phase = WorkflowPhase::PreviewReady;
                Ok(())
            }
            Err(source) => {
                self.phase = WorkflowPhase::PreviewFailed;
                Err(self.record(WorkflowError::DecodePreview { source }))
            }
        }
    }

    /// Whether a submission may be started: a file is selected, no run
    /// is in flight, and no result exists yet. Surfaces use this to
    /// gate the submit control and its keyboard shortcut.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.selected.is_some()
            && self.result.is_none()
            && !matches!(self.phase, WorkflowPhase::Submitting(_))
    }

    /// Start a submission: check the guards, snapshot the inputs into
    /// a [`SubmissionJob`] and move to `Submitting(Uploading)`.
    ///
    /// The guard is local: when it rejects, no network call has been
    /// made and the phase is unchanged.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::EmptySubmission`] when no file is selected or
    /// the prompt is blank after trimming.
    pub fn begin_submission(&mut self) -> Result<SubmissionJob> {
        let prompt = self.prompt.trim();
        let Some(file) = &self.selected else {
            return Err(self.record(WorkflowError::EmptySubmission));
        };
        if prompt.is_empty() {
            return Err(self.record(WorkflowError::EmptySubmission));
        }

        let tab_name = self.tab_name.trim();
        let tab_name = (!tab_name.is_empty()).then(|| tab_name.to_string());

        self.run += 1;
        let job = SubmissionJob::new(
            self.run,
            file.name.clone(),
            file.bytes.clone(),
            prompt.to_string(),
            tab_name,
        );

        self.error = None;
        self.result = None;
        self.result_preview = None;
        self.phase = WorkflowPhase::Submitting(SubmitPhase::Uploading);
        Ok(job)
    }

    /// Record that the given run finished uploading and is now waiting
    /// on the transform call. Ignored for stale runs.
    pub fn note_transforming(&mut self, run: u64) {
        if run == self.run
            && self.phase == WorkflowPhase::Submitting(SubmitPhase::Uploading)
        {
            self.phase = WorkflowPhase::Submitting(SubmitPhase::Transforming);
        }
    }

    /// Apply a finished run's outcome. Outcomes whose run id no longer
    /// matches (the workflow was reset while the run was in flight)
    /// are dropped. Either way the `Submitting` indication is gone
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Passes the run's failure through after recording it and moving
    /// to `Failed`.
    pub fn finish_submission(&mut self, run: u64, outcome: Result<TransformResult>) -> Result<()> {
        if run != self.run {
            tracing::debug!(run, current = self.run, "dropping stale submission outcome");
            return Ok(());
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.phase = WorkflowPhase::ResultReady;
                Ok(())
            }
            Err(err) => {
                self.phase = WorkflowPhase::Failed;
                Err(self.record(err))
            }
        }
    }

    /// Drive one full pipeline run: upload, then transform, with an
    /// early return on upload failure so the transform endpoint is
    /// never reached after a failed upload.
    ///
    /// # Errors
    ///
    /// Guard rejections and run failures, all normalized into
    /// [`WorkflowError`] and recorded in the error slot.
    pub async fn submit(&mut self, client: &TransformClient) -> Result<()> {
        let job = self.begin_submission()?;
        let run = job.run_id();

        let upload = match job.upload(client).await {
            Ok(upload) => upload,
            Err(err) => return self.finish_submission(run, Err(err)),
        };

        self.note_transforming(run);
        let result = job.transform(client, upload).await;
        self.finish_submission(run, result)
    }

    /// Fetch the transformed artifact and decode it into the result
    /// preview. A failure degrades only the preview: it is logged and
    /// returned, but the phase stays `ResultReady` and the result with
    /// its download URL and generated code remains available.
    ///
    /// # Errors
    ///
    /// See [`loader::fetch_result_preview`].
    pub async fn load_result_preview(&mut self, client: &TransformClient) -> Result<()> {
        let Some(result) = self.result.clone() else {
            return Ok(());
        };
        let run = self.run;

        match loader::fetch_result_preview(client, &result).await {
            Ok(preview) => {
                if run == self.run {
                    self.result_preview = Some(preview);
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "result preview unavailable");
                Err(err)
            }
        }
    }

    /// The single reset path: unconditionally back to `Idle` with
    /// every derived value cleared, including the selected file so the
    /// same file can be selected again. Bumps the run id so anything
    /// still in flight is dropped when it completes.
    pub fn reset(&mut self) {
        self.phase = WorkflowPhase::Idle;
        self.selected = None;
        self.input_preview = None;
        self.result_preview = None;
        self.prompt.clear();
        self.tab_name.clear();
        self.result = None;
        self.error = None;
        self.run += 1;
    }

    fn record(&mut self, err: WorkflowError) -> WorkflowError {
        self.error = Some(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetmorph_client::{ChangeSummary, ColumnChanges, RowChanges, TransformResponse};

    fn fake_result() -> TransformResult {
        TransformResult::from_response(
            TransformResponse {
                output_url: "https://files.example/out.xlsx".to_string(),
                transformation_code: "code".to_string(),
                changes: ChangeSummary {
                    rows: RowChanges {
                        original: 2,
                        transformed: 2,
                    },
                    columns: ColumnChanges {
                        original: 2,
                        transformed: 2,
                        added: Vec::new(),
                    },
                },
            },
            100,
        )
    }

    // select with undecodable bytes: the extension gate passes, the
    // decode fails, the file stays selected
    fn select_undecodable(workflow: &mut Workflow) {
        let err = workflow
            .select_file("report.xlsx", b"garbage".to_vec())
            .unwrap_err();
        assert!(matches!(err, WorkflowError::DecodePreview { .. }));
    }

    #[test]
    fn test_starts_idle() {
        let workflow = Workflow::new();
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert!(workflow.error_message().is_none());
        assert!(!workflow.can_submit());
    }

    #[test]
    fn test_invalid_extension_stays_idle() {
        let mut workflow = Workflow::new();
        let err = workflow
            .select_file("report.csv", b"a,b\n1,2".to_vec())
            .unwrap_err();

        assert!(matches!(err, WorkflowError::InvalidFileType { .. }));
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert!(workflow.selected_file().is_none());
        assert!(workflow.error_message().is_some());
    }

    #[test]
    fn test_decode_failure_keeps_file_selected() {
        let mut workflow = Workflow::new();
        select_undecodable(&mut workflow);

        assert_eq!(workflow.phase(), WorkflowPhase::PreviewFailed);
        let file = workflow.selected_file().expect("file stays selected");
        assert_eq!(file.name, "report.xlsx");
        assert_eq!(file.bytes, b"garbage");
        assert!(workflow.input_preview().is_none());
    }

    #[test]
    fn test_submission_guard_without_file() {
        let mut workflow = Workflow::new();
        workflow.set_prompt("do things");

        let err = workflow.begin_submission().unwrap_err();
        assert!(matches!(err, WorkflowError::EmptySubmission));
        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
    }

    #[test]
    fn test_submission_guard_blank_prompt() {
        let mut workflow = Workflow::new();
        select_undecodable(&mut workflow);
        workflow.set_prompt("   ");

        let err = workflow.begin_submission().unwrap_err();
        assert!(matches!(err, WorkflowError::EmptySubmission));
        // guard rejection leaves the phase untouched
        assert_eq!(workflow.phase(), WorkflowPhase::PreviewFailed);
    }

    #[test]
    fn test_begin_submission_enters_uploading() {
        let mut workflow = Workflow::new();
        select_undecodable(&mut workflow);
        workflow.set_prompt("  filter rows  ");
        workflow.set_tab_name("   ");

        let job = workflow.begin_submission().unwrap();
        assert_eq!(
            workflow.phase(),
            WorkflowPhase::Submitting(SubmitPhase::Uploading)
        );
        assert!(workflow.error_message().is_none());
        assert!(!workflow.can_submit());
        assert_eq!(job.run_id(), 2); // one reset from select, one submission
    }

    #[test]
    fn test_note_transforming_ignores_stale_run() {
        let mut workflow = Workflow::new();
        select_undecodable(&mut workflow);
        workflow.set_prompt("p");
        let job = workflow.begin_submission().unwrap();

        workflow.note_transforming(job.run_id() + 1);
        assert_eq!(
            workflow.phase(),
            WorkflowPhase::Submitting(SubmitPhase::Uploading)
        );

        workflow.note_transforming(job.run_id());
        assert_eq!(
            workflow.phase(),
            WorkflowPhase::Submitting(SubmitPhase::Transforming)
        );
    }

    #[test]
    fn test_finish_submission_success() {
        let mut workflow = Workflow::new();
        select_undecodable(&mut workflow);
        workflow.set_prompt("p");
        let job = workflow.begin_submission().unwrap();

        workflow
            .finish_submission(job.run_id(), Ok(fake_result()))
            .unwrap();

        assert_eq!(workflow.phase(), WorkflowPhase::ResultReady);
        assert_eq!(workflow.result().unwrap().size, 100);
        assert!(!workflow.can_submit());
    }

    #[test]
    fn test_finish_submission_failure() {
        let mut workflow = Workflow::new();
        select_undecodable(&mut workflow);
        workflow.set_prompt("p");
        let job = workflow.begin_submission().unwrap();

        let err = workflow
            .finish_submission(
                job.run_id(),
                Err(WorkflowError::UploadFailed {
                    detail: "500 Internal Server Error".to_string(),
                }),
            )
            .unwrap_err();

        assert!(matches!(err, WorkflowError::UploadFailed { .. }));
        assert_eq!(workflow.phase(), WorkflowPhase::Failed);
        assert!(workflow.error_message().unwrap().contains("upload failed"));
        // failed runs may be retried
        assert!(workflow.can_submit());
    }

    #[test]
    fn test_stale_outcome_is_dropped_after_reset() {
        let mut workflow = Workflow::new();
        select_undecodable(&mut workflow);
        workflow.set_prompt("p");
        let job = workflow.begin_submission().unwrap();

        workflow.reset();
        workflow
            .finish_submission(job.run_id(), Ok(fake_result()))
            .unwrap();

        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert!(workflow.result().is_none());
        assert!(workflow.error_message().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut workflow = Workflow::new();
        select_undecodable(&mut workflow);
        workflow.set_prompt("a prompt");
        workflow.set_tab_name("Q3");
        let job = workflow.begin_submission().unwrap();
        workflow
            .finish_submission(job.run_id(), Ok(fake_result()))
            .unwrap();

        workflow.reset();

        assert_eq!(workflow.phase(), WorkflowPhase::Idle);
        assert!(workflow.selected_file().is_none());
        assert!(workflow.input_preview().is_none());
        assert!(workflow.result_preview().is_none());
        assert!(workflow.result().is_none());
        assert!(workflow.error_message().is_none());
        assert!(workflow.prompt().is_empty());
        assert!(workflow.tab_name().is_empty());
    }

    #[test]
    fn test_selecting_again_after_reset_works() {
        let mut workflow = Workflow::new();
        select_undecodable(&mut workflow);
        workflow.reset();
        select_undecodable(&mut workflow);
        assert_eq!(workflow.phase(), WorkflowPhase::PreviewFailed);
    }
}
