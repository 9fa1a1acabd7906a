//! Polling protocol for job-based providers
//!
//! A submitted job is read back through its status URL until it reaches a
//! terminal state or the poll budget runs out. The interval is fixed and
//! there is no backoff.

use super::types::{ProviderError, non_empty};
use crate::constants::{DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Poll budget: `max_polls` status reads, `interval` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingPolicy {
    pub max_polls: u32,
    pub interval: Duration,
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self {
            max_polls: DEFAULT_MAX_POLLS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl PollingPolicy {
    /// Hard bound on the whole polling loop, reads included.
    pub fn ceiling(&self) -> Duration {
        self.interval * self.max_polls
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Succeeded,
    Failed,
    Canceled,
}

impl JobStatus {
    /// Map a provider status string. Anything not terminal counts as pending
    /// (`starting`, `processing`, ...).
    pub fn from_wire(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "succeeded" => JobStatus::Succeeded,
            "failed" => JobStatus::Failed,
            "canceled" | "cancelled" => JobStatus::Canceled,
            _ => JobStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Canceled => "canceled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Pending)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One status read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub output: Option<String>,
}

impl JobSnapshot {
    pub fn pending() -> Self {
        Self {
            status: JobStatus::Pending,
            output: None,
        }
    }

    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Succeeded,
            output: Some(output.into()),
        }
    }
}

/// A provider-side generation task owned by a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncJob {
    pub status_url: String,
    pub status: JobStatus,
    pub output: Option<String>,
}

impl AsyncJob {
    pub fn new(status_url: impl Into<String>) -> Self {
        Self {
            status_url: status_url.into(),
            status: JobStatus::Pending,
            output: None,
        }
    }

    fn apply(&mut self, snapshot: JobSnapshot) {
        self.status = snapshot.status;
        self.output = snapshot.output;
    }
}

/// Reads the current state of a job from its status URL.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    async fn read_status(&self, status_url: &str) -> Result<JobSnapshot, ProviderError>;
}

/// Drive `job` to a terminal state.
///
/// Issues at most `policy.max_polls` reads and sleeps `policy.interval`
/// between consecutive reads only. The whole loop is also bounded by
/// `policy.ceiling()`, so slow status reads cannot stretch it. A failed read
/// ends the job with that read's error.
pub async fn poll_job<S>(
    source: &S,
    job: AsyncJob,
    policy: &PollingPolicy,
) -> Result<String, ProviderError>
where
    S: JobStatusSource + ?Sized,
{
    let ceiling = policy.ceiling();
    match tokio::time::timeout(ceiling, poll_until_settled(source, job, policy)).await {
        Ok(result) => result,
        Err(_) => {
            debug!(ceiling_ms = ceiling.as_millis() as u64, "Polling ceiling reached");
            Err(ProviderError::Timeout)
        }
    }
}

async fn poll_until_settled<S>(
    source: &S,
    mut job: AsyncJob,
    policy: &PollingPolicy,
) -> Result<String, ProviderError>
where
    S: JobStatusSource + ?Sized,
{
    for poll in 1..=policy.max_polls {
        let snapshot = source.read_status(&job.status_url).await?;
        job.apply(snapshot);
        debug!(poll, status = job.status.as_str(), "Polled job status");

        match job.status {
            JobStatus::Succeeded => return non_empty(job.output.take(), ProviderError::EmptyOutput),
            JobStatus::Failed | JobStatus::Canceled => {
                return Err(ProviderError::JobEnded { status: job.status });
            }
            JobStatus::Pending if poll < policy.max_polls => tokio::time::sleep(policy.interval).await,
            JobStatus::Pending => {}
        }
    }
    Err(ProviderError::Timeout)
}
