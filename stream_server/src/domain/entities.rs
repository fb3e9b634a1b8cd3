// Connection record stored per issued token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub stream_group_id: String,
    // ARN of the GameLift Streams session this token grants access to.
    pub stream_session_arn: String,
    pub created_at_ms: u64,
}

impl SessionRecord {
    // True once more than `timeout_ms` has passed since the record was created.
    pub fn is_expired(&self, now_ms: u64, timeout_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_at_ms) > timeout_ms
    }
}
