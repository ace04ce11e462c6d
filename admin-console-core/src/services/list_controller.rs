//! 列表管理控制器

use std::sync::Arc;
use std::time::{Duration, Instant};

use admin_console_client::{ClientError, Record, ResourceClient, Result as ClientResult};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::form::{to_payload, validate, FormState};
use crate::services::Mutation;
use crate::types::{
    FormMode, Notice, PageView, ResourceSchema, Submission, ViewState, Workflow,
    DEFAULT_PAGE_SIZE,
};
use crate::view::derive_view;

/// How long a success notice stays visible.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

/// Controller tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub page_size: usize,
    pub notice_ttl: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }
}

/// State owner for one list page.
///
/// Holds the loaded record set, the view state, the add/edit/delete
/// workflow and the status messages. The visible page is never stored; it is
/// derived from current state by [`ListController::view`].
///
/// Network calls come in two shapes. The async methods (`load`, `submit`,
/// `confirm_delete`) run a whole cycle. The `begin_*` / `finish_*` pairs
/// split a cycle around the call so a host event loop can run it elsewhere.
pub struct ListController {
    client: Arc<dyn ResourceClient>,
    schema: ResourceSchema,
    settings: ControllerSettings,
    records: Vec<Record>,
    view_state: ViewState,
    workflow: Workflow,
    form: FormState,
    notice: Option<Notice>,
    error_banner: Option<String>,
    pending_loads: usize,
}

impl ListController {
    /// 创建控制器（默认设置）
    #[must_use]
    pub fn new(client: Arc<dyn ResourceClient>, schema: ResourceSchema) -> Self {
        Self::with_settings(client, schema, ControllerSettings::default())
    }

    #[must_use]
    pub fn with_settings(
        client: Arc<dyn ResourceClient>,
        schema: ResourceSchema,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            client,
            schema,
            settings,
            records: Vec::new(),
            view_state: ViewState::default(),
            workflow: Workflow::Idle,
            form: FormState::blank(),
            notice: None,
            error_banner: None,
            pending_loads: 0,
        }
    }

    // ===== 查询 =====

    /// The visible page, derived from current state.
    pub fn view(&self) -> PageView<'_> {
        derive_view(
            &self.records,
            &self.schema,
            &self.view_state,
            self.settings.page_size,
        )
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// The current success notice.
    ///
    /// Notices do not clear on their own: the host must call
    /// [`expire_notice`](Self::expire_notice) from its tick or timer so the
    /// notice disappears once `notice_ttl` has passed.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// Whether a `get_all` is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn client(&self) -> &Arc<dyn ResourceClient> {
        &self.client
    }

    // ===== 视图 =====

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view_state.set_search_term(term);
        log::debug!(
            "[{}] search term set to {:?}",
            self.schema.resource,
            self.view_state.search_term
        );
    }

    pub fn toggle_sort(&mut self, key: &str) -> CoreResult<()> {
        if !self.schema.is_sortable(key) {
            return Err(CoreError::NotSortable(key.to_string()));
        }
        self.view_state.toggle_sort(key);
        Ok(())
    }

    /// Jump to `page`, clamped into `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: usize) {
        self.view_state.current_page = page;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.view_state.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.view_state.current_page.saturating_sub(1));
    }

    fn clamp_page(&mut self) {
        self.view_state.current_page = self.view().current_page;
    }

    // ===== 加载 =====

    /// Mark a `get_all` as started.
    pub fn begin_load(&mut self) {
        self.pending_loads += 1;
    }

    /// Apply a `get_all` result.
    ///
    /// Success replaces the whole record set; whichever response arrives last
    /// wins. Failure keeps the previous records and raises the error banner.
    pub fn finish_load(&mut self, result: ClientResult<Vec<Record>>) -> CoreResult<()> {
        self.pending_loads = self.pending_loads.saturating_sub(1);
        match result {
            Ok(records) => {
                log::debug!(
                    "[{}] loaded {} records",
                    self.schema.resource,
                    records.len()
                );
                self.records = records;
                self.clamp_page();
                Ok(())
            }
            Err(e) => Err(self.raise(e)),
        }
    }

    /// Fetch the full collection.
    pub async fn load(&mut self) -> CoreResult<()> {
        self.begin_load();
        let result = self.client.get_all().await;
        self.finish_load(result)
    }

    // ===== 增删改流程 =====

    fn ensure_can_open(&self) -> CoreResult<()> {
        if self.workflow.is_submitting() {
            return Err(CoreError::SubmitInProgress);
        }
        if self.workflow.has_modal() {
            return Err(CoreError::ModalAlreadyOpen);
        }
        Ok(())
    }

    /// Primary key of a listed record, as passed to
    /// [`open_edit`](Self::open_edit) and [`open_delete`](Self::open_delete).
    pub fn record_key(&self, record: &Record) -> CoreResult<String> {
        record
            .key_string(&self.schema.key_field)
            .ok_or_else(|| CoreError::MissingKey(self.schema.key_field.clone()))
    }

    fn find_record(&self, key: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|r| self.record_key(r).is_ok_and(|k| k == key))
    }

    /// Open the add modal with an empty draft.
    pub fn open_add(&mut self) -> CoreResult<()> {
        self.ensure_can_open()?;
        self.form = FormState::blank();
        self.workflow = Workflow::ModalOpen(FormMode::Add);
        Ok(())
    }

    /// Open the edit modal prefilled from the record with `key`.
    pub fn open_edit(&mut self, key: &str) -> CoreResult<()> {
        self.ensure_can_open()?;
        let form = self
            .find_record(key)
            .map(FormState::from_record)
            .ok_or_else(|| CoreError::RecordNotFound(key.to_string()))?;
        self.form = form;
        self.workflow = Workflow::ModalOpen(FormMode::Edit {
            key: key.to_string(),
        });
        Ok(())
    }

    /// Ask for confirmation before deleting the record with `key`.
    pub fn open_delete(&mut self, key: &str) -> CoreResult<()> {
        self.ensure_can_open()?;
        if self.find_record(key).is_none() {
            return Err(CoreError::RecordNotFound(key.to_string()));
        }
        self.workflow = Workflow::ConfirmingDelete {
            key: key.to_string(),
        };
        Ok(())
    }

    /// Update one draft field.
    pub fn set_field(&mut self, field: &str, value: impl Into<Value>) -> CoreResult<()> {
        match &self.workflow {
            Workflow::ModalOpen(_) => {
                self.form.set_field(field, value);
                Ok(())
            }
            Workflow::Submitting(_) => Err(CoreError::SubmitInProgress),
            _ => Err(CoreError::InvalidState("no form is open".to_string())),
        }
    }

    /// Close whichever modal is open and discard the draft.
    pub fn cancel(&mut self) -> CoreResult<()> {
        if self.workflow.is_submitting() {
            return Err(CoreError::SubmitInProgress);
        }
        self.workflow = Workflow::Idle;
        self.form = FormState::blank();
        Ok(())
    }

    /// Validate and move to `Submitting`.
    ///
    /// Returns the call to send. On validation failure the per-field errors
    /// land in [`form`](Self::form), the modal stays open and nothing is
    /// returned to send.
    pub fn begin_submit(&mut self) -> CoreResult<Mutation> {
        let mutation = match &self.workflow {
            Workflow::Submitting(_) => return Err(CoreError::SubmitInProgress),
            Workflow::Idle => {
                return Err(CoreError::InvalidState("nothing to submit".to_string()))
            }
            Workflow::ConfirmingDelete { key } => Mutation::Delete { key: key.clone() },
            Workflow::ModalOpen(mode) => {
                if let Err(errors) = validate(&self.schema, &self.form.draft) {
                    log::debug!(
                        "[{}] validation failed: {errors}",
                        self.schema.resource
                    );
                    self.form.errors = errors.clone();
                    return Err(CoreError::Validation(errors));
                }
                self.form.errors = Default::default();
                let payload = to_payload(&self.schema, &self.form.draft, mode);
                match mode {
                    FormMode::Add => Mutation::Create(payload),
                    FormMode::Edit { key } => Mutation::Update {
                        key: key.clone(),
                        record: payload,
                    },
                }
            }
        };
        self.workflow = Workflow::Submitting(mutation.submission());
        Ok(mutation)
    }

    /// Apply the outcome of the call started by [`begin_submit`](Self::begin_submit).
    ///
    /// Success closes the modal, clears the draft and raises a notice at
    /// `now`. The caller re-fetches afterwards. Failure returns to the state
    /// named by [`Submission::on_failure`] with the draft intact and the
    /// banner set.
    pub fn finish_submit(
        &mut self,
        submission: Submission,
        result: ClientResult<()>,
        now: Instant,
    ) -> CoreResult<()> {
        if self.workflow != Workflow::Submitting(submission.clone()) {
            return Err(CoreError::InvalidState(format!(
                "no {} in flight",
                submission.verb()
            )));
        }
        match result {
            Ok(()) => {
                let message = format!(
                    "{} {} successfully",
                    self.schema.display_name,
                    submission.verb()
                );
                log::info!("[{}] {message}", self.schema.resource);
                self.workflow = Workflow::Idle;
                self.form = FormState::blank();
                self.error_banner = None;
                self.notice = Some(Notice::new(message, now));
                Ok(())
            }
            Err(e) => {
                self.workflow = submission.on_failure();
                Err(self.raise(e))
            }
        }
    }

    /// Validate, send and re-fetch. The add/edit modal must be open.
    pub async fn submit(&mut self) -> CoreResult<()> {
        if !matches!(self.workflow, Workflow::ModalOpen(_)) {
            return Err(match self.workflow {
                Workflow::Submitting(_) => CoreError::SubmitInProgress,
                _ => CoreError::InvalidState("no form is open".to_string()),
            });
        }
        self.run_submission().await
    }

    /// Delete the record awaiting confirmation and re-fetch.
    pub async fn confirm_delete(&mut self) -> CoreResult<()> {
        if !matches!(self.workflow, Workflow::ConfirmingDelete { .. }) {
            return Err(match self.workflow {
                Workflow::Submitting(_) => CoreError::SubmitInProgress,
                _ => CoreError::InvalidState("no delete awaiting confirmation".to_string()),
            });
        }
        self.run_submission().await
    }

    async fn run_submission(&mut self) -> CoreResult<()> {
        let mutation = self.begin_submit()?;
        let result = mutation.apply(self.client.as_ref()).await;
        self.finish_submit(mutation.submission(), result, Instant::now())?;

        // The mutation itself succeeded; a failed refresh only shows the banner.
        if let Err(e) = self.load().await {
            log::debug!("[{}] refresh after mutation failed: {e}", self.schema.resource);
        }
        Ok(())
    }

    // ===== 状态消息 =====

    pub fn dismiss_error(&mut self) {
        self.error_banner = None;
    }

    /// Clear the notice once its TTL has elapsed at `now`.
    ///
    /// Returns `true` if a notice was cleared.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|n| n.is_expired(now, self.settings.notice_ttl));
        if expired {
            self.notice = None;
        }
        expired
    }

    fn raise(&mut self, e: ClientError) -> CoreError {
        if e.is_expected() {
            log::warn!("[{}] {e}", self.schema.resource);
        } else {
            log::error!("[{}] {e}", self.schema.resource);
        }
        self.error_banner = Some(e.user_message());
        CoreError::Client(e)
    }
}
