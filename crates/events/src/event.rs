use streamify_core::queues;

/// One entry popped from the broker: the list it came from and its raw
/// payload, kept verbatim so it can be dead-lettered unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionEvent {
    pub key: String,
    pub payload: String,
}

impl IngestionEvent {
    pub fn new(key: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Succeeded,
    Failed,
    Unknown,
}

/// The list keys the worker consumes from and dead-letters to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadQueues {
    pub succeeded: String,
    pub failed: String,
    pub dead_letter: String,
}

impl Default for UploadQueues {
    fn default() -> Self {
        Self {
            succeeded: queues::UPLOAD_SUCCEEDED.to_string(),
            failed: queues::UPLOAD_FAILED.to_string(),
            dead_letter: queues::DEAD_LETTER.to_string(),
        }
    }
}

impl UploadQueues {
    /// Keys to block on, success list first.
    pub fn inbound(&self) -> Vec<String> {
        vec![self.succeeded.clone(), self.failed.clone()]
    }

    pub fn outcome(&self, key: &str) -> UploadOutcome {
        if key == self.succeeded {
            UploadOutcome::Succeeded
        } else if key == self.failed {
            UploadOutcome::Failed
        } else {
            UploadOutcome::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_match_the_upload_service() {
        let queues = UploadQueues::default();
        assert_eq!(queues.outcome("spring:content:upload:success"), UploadOutcome::Succeeded);
        assert_eq!(queues.outcome("spring:content:upload:error"), UploadOutcome::Failed);
        assert_eq!(queues.outcome("flask:metadata:save:rollback"), UploadOutcome::Unknown);
    }

    #[test]
    fn inbound_lists_success_first() {
        let queues = UploadQueues {
            succeeded: "ok".into(),
            failed: "ko".into(),
            dead_letter: "dlq".into(),
        };
        assert_eq!(queues.inbound(), vec!["ok".to_string(), "ko".to_string()]);
    }
}
