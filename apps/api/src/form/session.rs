use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::form::profile::{Field, Profile};
use crate::form::state::FormState;
use crate::form::FormError;
use crate::gateway::models::GatewayResult;
use crate::gateway::Gateway;

/// The most recent submission outcome. Replaced wholesale by the next submit.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    pub submission_id: Uuid,
    pub result: GatewayResult,
    pub completed_at: DateTime<Utc>,
}

/// One form plus its single-flight submit. While a submission is in flight
/// further submits are rejected with `FormError::Busy` and never reach the
/// gateway.
#[derive(Debug, Default)]
pub struct FormSession {
    form: Mutex<FormState>,
    busy: AtomicBool,
    latest: Mutex<Option<SubmissionRecord>>,
}

/// Clears the busy flag when dropped, so every exit path releases it once.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl FormSession {
    pub fn new(profile: Profile) -> Self {
        Self {
            form: Mutex::new(FormState::new(profile)),
            busy: AtomicBool::new(false),
            latest: Mutex::new(None),
        }
    }

    pub async fn current(&self) -> Profile {
        self.form.lock().await.current()
    }

    pub async fn update(&self, field: Field, value: String) -> Profile {
        let mut form = self.form.lock().await;
        form.update(field, value);
        form.current()
    }

    pub async fn append_token(&self, field: Field, token: &str) -> Result<Profile, FormError> {
        let mut form = self.form.lock().await;
        form.append_token(field, token)?;
        Ok(form.current())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn latest(&self) -> Option<SubmissionRecord> {
        self.latest.lock().await.clone()
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }

    /// Submits the current form through `gateway`.
    ///
    /// The profile is snapshotted when the submit starts; edits made while the
    /// request is in flight apply to the next submission.
    pub async fn submit(&self, gateway: &Gateway) -> Result<SubmissionRecord, FormError> {
        let _guard = self.try_begin().ok_or(FormError::Busy)?;

        let profile = self.current().await;
        profile.validate()?;

        let submission_id = Uuid::new_v4();
        let result = gateway
            .submit(&profile)
            .instrument(info_span!("form_submit", %submission_id))
            .await;

        let record = SubmissionRecord {
            submission_id,
            result,
            completed_at: Utc::now(),
        };
        info!(
            %submission_id,
            success = record.result.is_success(),
            "Submission completed"
        );
        *self.latest.lock().await = Some(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::models::RecommendRequest;
    use crate::gateway::{GatewayError, RecommendationSource};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::sync::Notify;

    /// Holds every request until released, counting calls.
    #[derive(Default)]
    struct HeldSource {
        calls: AtomicUsize,
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl RecommendationSource for HeldSource {
        async fn recommend(&self, request: &RecommendRequest) -> Result<String, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.release.notified().await;
            Ok(format!("## Plans for age {}", request.age))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RecommendationSource for FailingSource {
        async fn recommend(&self, _request: &RecommendRequest) -> Result<String, GatewayError> {
            Err(GatewayError::MissingRecommendations)
        }
    }

    #[tokio::test]
    async fn test_second_submit_while_busy_is_rejected() {
        let source = Arc::new(HeldSource::default());
        let gateway = Gateway::with_source(source.clone());
        let session = Arc::new(FormSession::default());

        let first = {
            let session = session.clone();
            let gateway = gateway.clone();
            tokio::spawn(async move { session.submit(&gateway).await })
        };
        source.started.notified().await;
        assert!(session.is_busy());

        let second = session.submit(&gateway).await;
        assert_eq!(second.unwrap_err(), FormError::Busy);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        source.release.notify_one();
        let record = first.await.unwrap().unwrap();
        assert!(record.result.is_success());
        assert!(!session.is_busy());
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_busy_flag_clears_after_fallback() {
        let gateway = Gateway::with_source(Arc::new(FailingSource));
        let session = FormSession::default();

        let record = session.submit(&gateway).await.unwrap();
        assert!(!record.result.is_success());
        assert!(!session.is_busy());
        assert!(session.submit(&gateway).await.is_ok());
    }

    #[tokio::test]
    async fn test_busy_flag_clears_after_validation_failure() {
        let gateway = Gateway::with_source(Arc::new(FailingSource));
        let session = FormSession::default();
        session.update(Field::Needs, String::new()).await;

        assert_eq!(
            session.submit(&gateway).await.unwrap_err(),
            FormError::MissingFields(vec![Field::Needs])
        );
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_latest_result_is_replaced() {
        let gateway = Gateway::with_source(Arc::new(FailingSource));
        let session = FormSession::default();
        assert!(session.latest().await.is_none());

        let first = session.submit(&gateway).await.unwrap();
        let second = session.submit(&gateway).await.unwrap();
        let latest = session.latest().await.unwrap();
        assert_ne!(first.submission_id, second.submission_id);
        assert_eq!(latest.submission_id, second.submission_id);
    }

    #[tokio::test]
    async fn test_submit_uses_current_form_values() {
        let source = Arc::new(HeldSource::default());
        let gateway = Gateway::with_source(source.clone());
        let session = FormSession::default();
        session.update(Field::Age, "41".to_string()).await;

        source.release.notify_one();
        let record = session.submit(&gateway).await.unwrap();
        assert_eq!(record.result.content(), "## Plans for age 41");
    }
}
