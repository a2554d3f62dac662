//! Dashboard controller.
//!
//! Owns the render target and drives every request/render cycle: health and
//! monitor refreshes, create/edit/delete, and the periodic poll.

use super::fence::RefreshFence;
use super::prompt::{EditOutcome, Prompter};
use super::render::RenderTarget;
use super::view::{HealthView, Notice, TableView};
use crate::client::{ApiError, MonitorApi};
use crate::config::{UptimeConfig, DEFAULT_POLL_INTERVAL_MS};
use crate::monitor::{FormError, MonitorForm, MonitorId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Controller behaviour knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Time between poll cycles
    pub poll_interval: Duration,
    /// Abandon edits with an empty field without a notice
    pub silent_abandon: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            silent_abandon: false,
        }
    }
}

impl From<&UptimeConfig> for ControllerSettings {
    fn from(config: &UptimeConfig) -> Self {
        Self {
            poll_interval: config.polling.interval(),
            silent_abandon: config.edit.silent_abandon,
        }
    }
}

/// What happened to a create, edit or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The API accepted the change
    Applied,
    /// The user cancelled the prompt or declined the confirmation
    Declined,
    /// An edit had an empty or zero field; nothing was sent
    Abandoned(FormError),
    /// The create form could not be turned into a request; nothing was sent
    Rejected(FormError),
    /// The request was sent and failed
    Failed(ApiError),
}

impl MutationOutcome {
    /// True when the user's intent was carried out or deliberately dropped.
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Applied | MutationOutcome::Declined)
    }
}

/// Coordinates the API client, the render target and the prompter.
pub struct DashboardController<A, R, P> {
    api: Arc<A>,
    target: Mutex<R>,
    prompter: P,
    settings: ControllerSettings,
    health_fence: RefreshFence,
    monitors_fence: RefreshFence,
}

impl<A, R, P> DashboardController<A, R, P>
where
    A: MonitorApi,
    R: RenderTarget,
    P: Prompter,
{
    pub fn new(api: Arc<A>, target: R, prompter: P) -> Self {
        Self {
            api,
            target: Mutex::new(target),
            prompter,
            settings: ControllerSettings::default(),
            health_fence: RefreshFence::new(),
            monitors_fence: RefreshFence::new(),
        }
    }

    pub fn with_settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Lock the render target, e.g. to inspect or fill it.
    pub async fn target(&self) -> MutexGuard<'_, R> {
        self.target.lock().await
    }

    pub fn into_target(self) -> R {
        self.target.into_inner()
    }

    /// Probe `GET /health` and update the health pill.
    ///
    /// Never fails: any error renders as [`HealthView::Degraded`].
    pub async fn refresh_health(&self) -> HealthView {
        let generation = self.health_fence.issue();
        let result = self.api.check_health().await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Health check failed");
        }
        let health = HealthView::from_result(&result);

        let mut target = self.target.lock().await;
        if self.health_fence.admit(generation) {
            target.render_health(health);
        } else {
            tracing::debug!(generation, "Discarding stale health response");
        }
        health
    }

    /// Fetch `GET /monitors` and replace the table body.
    ///
    /// Never fails: any error renders the "Unable to load monitors" row.
    pub async fn refresh_monitors(&self) -> TableView {
        let generation = self.monitors_fence.issue();
        let result = self.api.list_monitors().await;
        match &result {
            Ok(monitors) => tracing::debug!(count = monitors.len(), "Fetched monitors"),
            Err(e) => tracing::debug!(error = %e, "Monitor fetch failed"),
        }
        let table = TableView::from_result(result);

        let mut target = self.target.lock().await;
        if self.monitors_fence.admit(generation) {
            target.render_monitors(&table);
        } else {
            tracing::debug!(generation, "Discarding stale monitor list");
        }
        table
    }

    /// Manual refresh: health and monitors concurrently.
    pub async fn refresh(&self) -> (HealthView, TableView) {
        tokio::join!(self.refresh_health(), self.refresh_monitors())
    }

    /// Submit the create form.
    ///
    /// On success the form is cleared and the list re-fetched. On failure the
    /// form keeps its values and an error notice is shown.
    pub async fn create_monitor(&self, form: &MonitorForm) -> MutationOutcome {
        let payload = match form.to_create_payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.notify(Notice::error(format!("Cannot create monitor: {e}")))
                    .await;
                return MutationOutcome::Rejected(e);
            }
        };

        match self.api.create_monitor(&payload).await {
            Ok(()) => {
                tracing::info!(name = %payload.name, url = %payload.url, "Monitor created");
                self.target.lock().await.reset_create_form();
                self.refresh_monitors().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, "Monitor create failed");
                self.notify(Notice::error(format!("Create failed: {e}"))).await;
                MutationOutcome::Failed(e)
            }
        }
    }

    /// Edit a monitor through the prompter.
    ///
    /// A cancelled prompt or a falsy field sends nothing. Otherwise the PUT
    /// is sent and the list re-fetched whatever the outcome.
    pub async fn edit_monitor(&self, id: &MonitorId) -> MutationOutcome {
        let current = match self.api.get_monitor(id).await {
            Ok(monitor) => Some(monitor),
            Err(e) => {
                tracing::debug!(monitor_id = %id, error = %e, "Could not load current values");
                None
            }
        };

        let form = match self.prompter.edit_monitor(id, current.as_ref()) {
            EditOutcome::Submitted(form) => form,
            EditOutcome::Cancelled => return MutationOutcome::Declined,
        };

        let payload = match form.to_edit_payload() {
            Ok(payload) => payload,
            Err(e) => {
                if !self.settings.silent_abandon {
                    self.notify(Notice::warning(format!("Edit abandoned: {e}")))
                        .await;
                }
                return MutationOutcome::Abandoned(e);
            }
        };

        let result = self.api.update_monitor(id, &payload).await;
        let outcome = match result {
            Ok(()) => {
                tracing::info!(monitor_id = %id, "Monitor updated");
                MutationOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(monitor_id = %id, error = %e, "Monitor update failed");
                self.notify(Notice::error(format!("Update of monitor {id} failed: {e}")))
                    .await;
                MutationOutcome::Failed(e)
            }
        };

        self.refresh_monitors().await;
        outcome
    }

    /// Delete a monitor after confirmation.
    ///
    /// Declining sends nothing. Otherwise the list is re-fetched whatever the
    /// DELETE returned.
    pub async fn delete_monitor(&self, id: &MonitorId) -> MutationOutcome {
        if !self.prompter.confirm_delete(id) {
            return MutationOutcome::Declined;
        }

        let outcome = match self.api.delete_monitor(id).await {
            Ok(()) => {
                tracing::info!(monitor_id = %id, "Monitor deleted");
                MutationOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(monitor_id = %id, error = %e, "Monitor delete failed");
                self.notify(Notice::error(format!("Delete of monitor {id} failed: {e}")))
                    .await;
                MutationOutcome::Failed(e)
            }
        };

        self.refresh_monitors().await;
        outcome
    }

    async fn notify(&self, notice: Notice) {
        self.target.lock().await.notify(notice);
    }

    /// Start the poll loop.
    ///
    /// Refreshes immediately, then once per poll interval until `cancel_token`
    /// fires. Each cycle runs as its own task so a slow response does not
    /// shift the cadence. The handle resolves after in-flight cycles finish.
    pub fn start_polling(self: Arc<Self>, cancel_token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.settings.poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let cycles = TaskTracker::new();

            tracing::info!(
                interval_ms = self.settings.poll_interval.as_millis() as u64,
                "Dashboard polling started"
            );

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::info!("Dashboard polling stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        let controller = Arc::clone(&self);
                        cycles.spawn(async move {
                            let (health, table) = controller.refresh().await;
                            tracing::debug!(
                                health = health.label(),
                                rows = table.row_count(),
                                "Refresh cycle completed"
                            );
                        });
                    }
                }
            }

            cycles.close();
            cycles.wait().await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::html::HtmlRenderer;
    use crate::dashboard::prompt::NonInteractive;
    use crate::monitor::{Monitor, MonitorPayload};
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    /// In-memory API double recording every mutating call.
    #[derive(Default)]
    struct FakeApi {
        healthy: bool,
        monitors: StdMutex<Option<Vec<Monitor>>>,
        fail_mutations: bool,
        calls: StdMutex<Vec<String>>,
    }

    impl FakeApi {
        fn with_monitors(monitors: Vec<Monitor>) -> Self {
            Self {
                healthy: true,
                monitors: StdMutex::new(Some(monitors)),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn mutation_result(&self) -> Result<(), ApiError> {
            if self.fail_mutations {
                Err(ApiError::Upstream {
                    status: 500,
                    message: "boom".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl MonitorApi for FakeApi {
        async fn check_health(&self) -> Result<(), ApiError> {
            if self.healthy {
                Ok(())
            } else {
                Err(ApiError::Network("refused".to_string()))
            }
        }

        async fn list_monitors(&self) -> Result<Vec<Monitor>, ApiError> {
            self.record("GET /monitors".to_string());
            self.monitors
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| ApiError::Upstream {
                    status: 500,
                    message: "db down".to_string(),
                })
        }

        async fn get_monitor(&self, id: &MonitorId) -> Result<Monitor, ApiError> {
            self.monitors
                .lock()
                .unwrap()
                .iter()
                .flatten()
                .find(|m| &m.id == id)
                .cloned()
                .ok_or_else(|| ApiError::Upstream {
                    status: 404,
                    message: "Monitor not found".to_string(),
                })
        }

        async fn create_monitor(&self, payload: &MonitorPayload) -> Result<(), ApiError> {
            self.record(format!("POST /monitors {}", serde_json::to_string(payload).unwrap()));
            self.mutation_result()
        }

        async fn update_monitor(
            &self,
            id: &MonitorId,
            payload: &MonitorPayload,
        ) -> Result<(), ApiError> {
            self.record(format!(
                "PUT /monitors/{id} {}",
                serde_json::to_string(payload).unwrap()
            ));
            self.mutation_result()
        }

        async fn delete_monitor(&self, id: &MonitorId) -> Result<(), ApiError> {
            self.record(format!("DELETE /monitors/{id}"));
            self.mutation_result()
        }
    }

    /// Prompter returning canned answers.
    struct Scripted {
        edit: EditOutcome,
        confirm: bool,
    }

    impl Prompter for Scripted {
        fn edit_monitor(&self, _id: &MonitorId, _current: Option<&Monitor>) -> EditOutcome {
            self.edit.clone()
        }

        fn confirm_delete(&self, _id: &MonitorId) -> bool {
            self.confirm
        }
    }

    fn monitor(id: &str) -> Monitor {
        Monitor {
            id: MonitorId::new(id),
            name: format!("site-{id}"),
            url: format!("https://{id}.example"),
            interval_seconds: 60,
        }
    }

    fn controller<P: Prompter>(
        api: FakeApi,
        prompter: P,
    ) -> (Arc<FakeApi>, DashboardController<FakeApi, HtmlRenderer, P>) {
        let api = Arc::new(api);
        let controller = DashboardController::new(Arc::clone(&api), HtmlRenderer::new(), prompter);
        (api, controller)
    }

    #[tokio::test]
    async fn test_refresh_health_renders_degraded() {
        let (_, controller) = controller(FakeApi::default(), NonInteractive);
        assert_eq!(controller.refresh_health().await, HealthView::Degraded);
        assert_eq!(controller.target().await.dom().health_text, "Degraded");
    }

    #[tokio::test]
    async fn test_refresh_monitors_failure_placeholder() {
        let (_, controller) = controller(FakeApi::default(), NonInteractive);
        assert_eq!(controller.refresh_monitors().await, TableView::Unavailable);
        let target = controller.target().await;
        assert_eq!(target.dom().row_count(), 1);
        assert!(target.dom().monitors_body.contains("Unable to load monitors"));
    }

    #[tokio::test]
    async fn test_refresh_runs_both() {
        let (_, controller) = controller(FakeApi::with_monitors(vec![monitor("1")]), NonInteractive);
        let (health, table) = controller.refresh().await;
        assert!(health.is_operational());
        assert_eq!(table.row_count(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_interval_without_request() {
        let (api, controller) = controller(FakeApi::with_monitors(vec![]), NonInteractive);
        let form = MonitorForm::new("Site A", "https://a.example", "soon");

        let outcome = controller.create_monitor(&form).await;

        assert!(matches!(outcome, MutationOutcome::Rejected(FormError::InvalidInterval(_))));
        assert!(api.calls().is_empty());
        assert_eq!(controller.target().await.dom().notices.len(), 1);
    }

    #[tokio::test]
    async fn test_create_success_clears_form_and_refetches() {
        let (api, controller) = controller(FakeApi::with_monitors(vec![]), NonInteractive);
        let form = MonitorForm::new("Site A", "https://a.example", "30");
        controller.target().await.fill_create_form(form.clone());

        let outcome = controller.create_monitor(&form).await;

        assert_eq!(outcome, MutationOutcome::Applied);
        assert_eq!(
            api.calls(),
            vec![
                r#"POST /monitors {"name":"Site A","url":"https://a.example","interval_seconds":30}"#
                    .to_string(),
                "GET /monitors".to_string(),
            ]
        );
        assert_eq!(controller.target().await.dom().create_form, MonitorForm::default());
    }

    #[tokio::test]
    async fn test_create_failure_keeps_form() {
        let api = FakeApi {
            fail_mutations: true,
            ..FakeApi::with_monitors(vec![])
        };
        let (api, controller) = controller(api, NonInteractive);
        let form = MonitorForm::new("Site A", "https://a.example", "30");
        controller.target().await.fill_create_form(form.clone());

        let outcome = controller.create_monitor(&form).await;

        assert!(matches!(outcome, MutationOutcome::Failed(_)));
        assert_eq!(api.calls().len(), 1); // no re-fetch
        let target = controller.target().await;
        assert_eq!(target.dom().create_form, form);
        assert!(target.dom().notices[0].message.contains("Create failed"));
    }

    #[tokio::test]
    async fn test_edit_cancelled_sends_nothing() {
        let prompter = Scripted {
            edit: EditOutcome::Cancelled,
            confirm: false,
        };
        let (api, controller) = controller(FakeApi::with_monitors(vec![monitor("1")]), prompter);

        let outcome = controller.edit_monitor(&MonitorId::new("1")).await;

        assert_eq!(outcome, MutationOutcome::Declined);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_edit_with_empty_field_abandons() {
        let prompter = Scripted {
            edit: EditOutcome::Submitted(MonitorForm::new("", "https://a.example", "30")),
            confirm: false,
        };
        let (api, controller) = controller(FakeApi::with_monitors(vec![monitor("1")]), prompter);

        let outcome = controller.edit_monitor(&MonitorId::new("1")).await;

        assert_eq!(outcome, MutationOutcome::Abandoned(FormError::MissingField("name")));
        assert!(api.calls().is_empty());
        assert_eq!(controller.target().await.dom().notices.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_silent_abandon_shows_nothing() {
        let prompter = Scripted {
            edit: EditOutcome::Submitted(MonitorForm::new("Site", "https://a.example", "0")),
            confirm: false,
        };
        let (api, controller) = controller(FakeApi::with_monitors(vec![monitor("1")]), prompter);
        let controller = controller.with_settings(ControllerSettings {
            silent_abandon: true,
            ..ControllerSettings::default()
        });

        let outcome = controller.edit_monitor(&MonitorId::new("1")).await;

        assert_eq!(outcome, MutationOutcome::Abandoned(FormError::ZeroInterval));
        assert!(api.calls().is_empty());
        assert!(controller.target().await.dom().notices.is_empty());
    }

    #[tokio::test]
    async fn test_edit_failure_still_refetches() {
        let prompter = Scripted {
            edit: EditOutcome::Submitted(MonitorForm::new("Site B", "https://b.example", "90")),
            confirm: false,
        };
        let api = FakeApi {
            fail_mutations: true,
            ..FakeApi::with_monitors(vec![monitor("1")])
        };
        let (api, controller) = controller(api, prompter);

        let outcome = controller.edit_monitor(&MonitorId::new("1")).await;

        assert!(matches!(outcome, MutationOutcome::Failed(ref e) if e.status() == Some(500)));
        assert_eq!(
            api.calls(),
            vec![
                r#"PUT /monitors/1 {"name":"Site B","url":"https://b.example","interval_seconds":90}"#
                    .to_string(),
                "GET /monitors".to_string(),
            ]
        );
        assert_eq!(controller.target().await.dom().notices.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let prompter = Scripted {
            edit: EditOutcome::Cancelled,
            confirm: false,
        };
        let (api, controller) = controller(FakeApi::with_monitors(vec![monitor("1")]), prompter);

        assert_eq!(
            controller.delete_monitor(&MonitorId::new("1")).await,
            MutationOutcome::Declined
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_still_refetches() {
        let prompter = Scripted {
            edit: EditOutcome::Cancelled,
            confirm: true,
        };
        let api = FakeApi {
            fail_mutations: true,
            ..FakeApi::with_monitors(vec![monitor("1")])
        };
        let (api, controller) = controller(api, prompter);

        let outcome = controller.delete_monitor(&MonitorId::new("1")).await;

        assert!(!outcome.is_success());
        assert_eq!(
            api.calls(),
            vec!["DELETE /monitors/1".to_string(), "GET /monitors".to_string()]
        );
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = UptimeConfig::default();
        config.polling.interval_ms = 2_000;
        config.edit.silent_abandon = true;

        let settings = ControllerSettings::from(&config);
        assert_eq!(settings.poll_interval, Duration::from_secs(2));
        assert!(settings.silent_abandon);
    }

    #[test]
    fn test_outcome_success() {
        assert!(MutationOutcome::Applied.is_success());
        assert!(MutationOutcome::Declined.is_success());
        assert!(!MutationOutcome::Abandoned(FormError::ZeroInterval).is_success());
        assert!(!MutationOutcome::Failed(ApiError::Timeout(5)).is_success());
    }
}
