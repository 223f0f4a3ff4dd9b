//! Job progress tracker: in-flight units of log-file processing work.
//!
//! Jobs are created by the external processor service, report file-level
//! progress, and end in a terminal state (`completed` or `failed`). A job
//! references its instance by id only and never mutates the registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::types::{JobStatus, LogType};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One processing job, tied to one instance and one log type.
///
/// Invariants: `files_processed <= total_files` and
/// `progress == round(100 * files_processed / total_files)` (0 when
/// `total_files == 0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub instance_id: String,
    pub log_type: LogType,
    pub status: JobStatus,
    pub started_at: DateTime<Utc>,
    pub files_processed: u64,
    pub total_files: u64,
    /// Integer percent, derived from the file counters.
    pub progress: u8,
}

/// Terminal outcome for [`JobTracker::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobOutcome {
    Completed,
    Failed,
}

impl From<JobOutcome> for JobStatus {
    fn from(outcome: JobOutcome) -> Self {
        match outcome {
            JobOutcome::Completed => JobStatus::Completed,
            JobOutcome::Failed => JobStatus::Failed,
        }
    }
}

/// Integer percent for `files_processed` out of `total_files`, rounded to
/// nearest. Zero total files means zero percent.
fn compute_progress(files_processed: u64, total_files: u64) -> u8 {
    if total_files == 0 {
        return 0;
    }
    ((files_processed as f64 / total_files as f64) * 100.0).round() as u8
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// The tracker aggregate. Listing preserves creation order.
#[derive(Debug, Default)]
pub struct JobTracker {
    jobs: Vec<Job>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a job the processor has started.
    pub fn start(
        &mut self,
        instance_id: impl Into<String>,
        log_type: LogType,
        total_files: u64,
    ) -> &Job {
        self.jobs.push(Job {
            id: Uuid::now_v7().to_string(),
            instance_id: instance_id.into(),
            log_type,
            status: JobStatus::Processing,
            started_at: Utc::now(),
            files_processed: 0,
            total_files,
            progress: 0,
        });
        self.jobs.last().expect("just pushed")
    }

    /// All jobs in creation order.
    pub fn list(&self) -> &[Job] {
        &self.jobs
    }

    /// Look up one job by id.
    pub fn get(&self, id: &str) -> CoreResult<&Job> {
        self.jobs
            .iter()
            .find(|j| j.id == id)
            .ok_or_else(|| CoreError::not_found("Job", id))
    }

    /// Update the processed-file counter and recompute `progress`.
    ///
    /// Rejected with `InvalidArgument` when `files_processed` exceeds
    /// `total_files` and with `Conflict` on a job already in a terminal
    /// state. Progress never auto-completes a job; the processor reports
    /// the terminal transition explicitly via [`JobTracker::finish`].
    pub fn update_progress(&mut self, id: &str, files_processed: u64) -> CoreResult<&Job> {
        let job = self.find_mut(id)?;
        if job.status.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "Job '{id}' is already {}",
                status_word(job.status)
            )));
        }
        if files_processed > job.total_files {
            return Err(CoreError::InvalidArgument(format!(
                "files_processed ({files_processed}) exceeds total_files ({})",
                job.total_files
            )));
        }
        job.files_processed = files_processed;
        job.progress = compute_progress(files_processed, job.total_files);
        Ok(job)
    }

    /// Move a job to its terminal state. Terminal states are single-shot:
    /// finishing an already-finished job is a conflict, because completed
    /// and failed are distinct outcomes.
    pub fn finish(&mut self, id: &str, outcome: JobOutcome) -> CoreResult<&Job> {
        let job = self.find_mut(id)?;
        if job.status.is_terminal() {
            return Err(CoreError::Conflict(format!(
                "Job '{id}' is already {}",
                status_word(job.status)
            )));
        }
        job.status = outcome.into();
        Ok(job)
    }

    /// Number of jobs still processing.
    pub fn active_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.status == JobStatus::Processing)
            .count()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    fn find_mut(&mut self, id: &str) -> CoreResult<&mut Job> {
        self.jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| CoreError::not_found("Job", id))
    }
}

fn status_word(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Processing => "processing",
        JobStatus::Completed => "completed",
        JobStatus::Failed => "failed",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- compute_progress -----------------------------------------------------

    #[test]
    fn progress_matches_rounded_percentage() {
        assert_eq!(compute_progress(8, 12), 67);
        assert_eq!(compute_progress(5, 11), 45);
        assert_eq!(compute_progress(0, 12), 0);
        assert_eq!(compute_progress(12, 12), 100);
    }

    #[test]
    fn zero_total_files_means_zero_progress() {
        assert_eq!(compute_progress(0, 0), 0);
    }

    // -- start / list ---------------------------------------------------------

    #[test]
    fn start_creates_processing_job_at_zero_progress() {
        let mut tracker = JobTracker::new();
        let job = tracker.start("aurora-prod-mysql-1", LogType::ErrorLogs, 12);
        assert_eq!(job.status, JobStatus::Processing);
        assert_eq!(job.files_processed, 0);
        assert_eq!(job.total_files, 12);
        assert_eq!(job.progress, 0);
    }

    #[test]
    fn list_preserves_creation_order() {
        let mut tracker = JobTracker::new();
        let a = tracker.start("db-1", LogType::ErrorLogs, 1).id.clone();
        let b = tracker.start("db-2", LogType::SlowQueryLogs, 1).id.clone();
        let ids: Vec<_> = tracker.list().iter().map(|j| j.id.clone()).collect();
        assert_eq!(ids, vec![a, b]);
    }

    // -- update_progress ------------------------------------------------------

    #[test]
    fn update_progress_recomputes_percent() {
        let mut tracker = JobTracker::new();
        let id = tracker.start("db-1", LogType::ErrorLogs, 12).id.clone();

        let job = tracker.update_progress(&id, 8).unwrap();
        assert_eq!(job.files_processed, 8);
        assert_eq!(job.progress, 67);
    }

    #[test]
    fn progress_invariant_holds_after_any_successful_update() {
        let mut tracker = JobTracker::new();
        let id = tracker.start("db-1", LogType::ErrorLogs, 11).id.clone();

        for files in 0..=11 {
            let job = tracker.update_progress(&id, files).unwrap();
            let expected = ((files as f64 / 11.0) * 100.0).round() as u8;
            assert_eq!(job.progress, expected, "files={files}");
        }
    }

    #[test]
    fn files_processed_beyond_total_rejected() {
        let mut tracker = JobTracker::new();
        let id = tracker.start("db-1", LogType::ErrorLogs, 12).id.clone();
        assert_matches!(
            tracker.update_progress(&id, 13),
            Err(CoreError::InvalidArgument(_))
        );
        // The failed update must not have touched the job.
        assert_eq!(tracker.get(&id).unwrap().files_processed, 0);
    }

    #[test]
    fn update_progress_unknown_job_is_not_found() {
        let mut tracker = JobTracker::new();
        assert_matches!(
            tracker.update_progress("missing", 1),
            Err(CoreError::NotFound { entity: "Job", .. })
        );
    }

    #[test]
    fn full_progress_does_not_auto_complete() {
        let mut tracker = JobTracker::new();
        let id = tracker.start("db-1", LogType::ErrorLogs, 12).id.clone();
        let job = tracker.update_progress(&id, 12).unwrap();
        assert_eq!(job.progress, 100);
        assert_eq!(job.status, JobStatus::Processing);
    }

    // -- finish ---------------------------------------------------------------

    #[test]
    fn finish_moves_to_terminal_state() {
        let mut tracker = JobTracker::new();
        let id = tracker.start("db-1", LogType::ErrorLogs, 12).id.clone();
        let job = tracker.finish(&id, JobOutcome::Completed).unwrap();
        assert_eq!(job.status, JobStatus::Completed);
    }

    #[test]
    fn finishing_twice_is_a_conflict() {
        let mut tracker = JobTracker::new();
        let id = tracker.start("db-1", LogType::ErrorLogs, 12).id.clone();
        tracker.finish(&id, JobOutcome::Failed).unwrap();
        assert_matches!(
            tracker.finish(&id, JobOutcome::Failed),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn terminal_job_rejects_progress_updates() {
        let mut tracker = JobTracker::new();
        let id = tracker.start("db-1", LogType::ErrorLogs, 12).id.clone();
        tracker.finish(&id, JobOutcome::Completed).unwrap();
        assert_matches!(
            tracker.update_progress(&id, 5),
            Err(CoreError::Conflict(_))
        );
    }

    // -- active_count ---------------------------------------------------------

    #[test]
    fn active_count_excludes_terminal_jobs() {
        let mut tracker = JobTracker::new();
        let a = tracker.start("db-1", LogType::ErrorLogs, 1).id.clone();
        tracker.start("db-2", LogType::SlowQueryLogs, 1);
        assert_eq!(tracker.active_count(), 2);

        tracker.finish(&a, JobOutcome::Completed).unwrap();
        assert_eq!(tracker.active_count(), 1);
    }
}
