use crate::domain::errors::DeliveryError;
use crate::ports::outbound::DeliveryClient;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{LocalId, QueueKind, QueuedSubmission, QueuedVote};
use std::collections::HashMap;

/// What a scripted endpoint answers for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Accept,
    /// Non-2xx answer with the given status.
    Reject(u16),
    /// No answer at all.
    Offline,
}

impl DeliveryOutcome {
    fn into_result(self) -> Result<(), DeliveryError> {
        match self {
            DeliveryOutcome::Accept => Ok(()),
            DeliveryOutcome::Reject(status) => Err(DeliveryError::Rejected {
                status,
                message: None,
            }),
            DeliveryOutcome::Offline => {
                Err(DeliveryError::Transport("network unreachable".to_string()))
            }
        }
    }
}

/// Delivery client with per-record scripted answers.
///
/// Records without a script get the default outcome. Every attempt is
/// recorded, accepted or not.
pub struct ScriptedDelivery {
    default: Mutex<DeliveryOutcome>,
    scripts: Mutex<HashMap<(QueueKind, LocalId), DeliveryOutcome>>,
    attempts: Mutex<Vec<(QueueKind, LocalId)>>,
    accepted_votes: Mutex<Vec<QueuedVote>>,
    accepted_submissions: Mutex<Vec<QueuedSubmission>>,
}

impl ScriptedDelivery {
    pub fn new(default: DeliveryOutcome) -> Self {
        Self {
            default: Mutex::new(default),
            scripts: Mutex::new(HashMap::new()),
            attempts: Mutex::new(Vec::new()),
            accepted_votes: Mutex::new(Vec::new()),
            accepted_submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn accepting() -> Self {
        Self::new(DeliveryOutcome::Accept)
    }

    pub fn offline() -> Self {
        Self::new(DeliveryOutcome::Offline)
    }

    pub fn set_default(&self, outcome: DeliveryOutcome) {
        *self.default.lock() = outcome;
    }

    pub fn script(&self, kind: QueueKind, local_id: LocalId, outcome: DeliveryOutcome) {
        self.scripts.lock().insert((kind, local_id), outcome);
    }

    pub fn clear_scripts(&self) {
        self.scripts.lock().clear();
    }

    /// Every attempt so far, in order.
    pub fn attempts(&self) -> Vec<(QueueKind, LocalId)> {
        self.attempts.lock().clone()
    }

    pub fn accepted_votes(&self) -> Vec<QueuedVote> {
        self.accepted_votes.lock().clone()
    }

    pub fn accepted_submissions(&self) -> Vec<QueuedSubmission> {
        self.accepted_submissions.lock().clone()
    }

    fn answer(&self, kind: QueueKind, local_id: LocalId) -> Result<(), DeliveryError> {
        self.attempts.lock().push((kind, local_id));
        let outcome = self
            .scripts
            .lock()
            .get(&(kind, local_id))
            .cloned()
            .unwrap_or_else(|| self.default.lock().clone());
        outcome.into_result()
    }
}

impl Default for ScriptedDelivery {
    fn default() -> Self {
        Self::accepting()
    }
}

#[async_trait]
impl DeliveryClient for ScriptedDelivery {
    async fn deliver_vote(&self, vote: &QueuedVote) -> Result<(), DeliveryError> {
        self.answer(QueueKind::Votes, vote.local_id)?;
        self.accepted_votes.lock().push(vote.clone());
        Ok(())
    }

    async fn deliver_submission(
        &self,
        submission: &QueuedSubmission,
    ) -> Result<(), DeliveryError> {
        self.answer(QueueKind::Submissions, submission.local_id)?;
        self.accepted_submissions.lock().push(submission.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn vote(local_id: LocalId) -> QueuedVote {
        QueuedVote {
            local_id,
            submission_id: format!("s{}", local_id),
            rating_payload: json!(5),
            enqueued_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_script_overrides_default() {
        let delivery = ScriptedDelivery::accepting();
        delivery.script(QueueKind::Votes, 2, DeliveryOutcome::Reject(500));

        assert!(delivery.deliver_vote(&vote(1)).await.is_ok());
        assert!(delivery.deliver_vote(&vote(2)).await.is_err());

        assert_eq!(
            delivery.attempts(),
            vec![(QueueKind::Votes, 1), (QueueKind::Votes, 2)]
        );
        assert_eq!(delivery.accepted_votes().len(), 1);
    }

    #[tokio::test]
    async fn test_offline_is_transport_failure() {
        let delivery = ScriptedDelivery::offline();
        assert!(matches!(
            delivery.deliver_vote(&vote(1)).await,
            Err(DeliveryError::Transport(_))
        ));
    }
}
