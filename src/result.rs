//! Per-address remediation outcome. Plain data, one entry per display address visited
//! during a run.

#[derive(Debug, Clone)]
pub struct RemediationResult {
    pub mailbox_type: String,
    pub success: bool,
    pub message: Option<String>,
    pub owner: Option<String>,
    pub members: Vec<String>,
    pub forwards: Vec<String>,
}

impl RemediationResult {
    pub fn new(mailbox_type: impl Into<String>) -> Self {
        RemediationResult {
            mailbox_type: mailbox_type.into(),
            success: true,
            message: None,
            owner: None,
            members: Vec::new(),
            forwards: Vec::new(),
        }
    }

    pub fn record_success(&mut self, message: impl Into<String>) {
        self.success = true;
        self.message = Some(message.into());
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.success = false;
        self.message = Some(message.into());
    }
}
