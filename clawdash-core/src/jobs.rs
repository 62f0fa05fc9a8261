//! Jobs panel state

use crate::command::Command;
use crate::types::{JobInfo, JobSummaryResponse};

#[derive(Debug, Default)]
pub struct JobsPanel {
    summary: JobSummaryResponse,
    jobs: Vec<JobInfo>,
    loading: bool,
    loaded: bool,
}

impl JobsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> &JobSummaryResponse {
        &self.summary
    }

    pub fn jobs(&self) -> &[JobInfo] {
        &self.jobs
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn job(&self, id: &str) -> Option<&JobInfo> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn refresh(&mut self) -> Command {
        self.loading = true;
        Command::LoadJobs
    }

    /// Cancel a job if it is still pending or running.
    pub fn cancel(&self, id: &str) -> Option<Command> {
        let job = self.job(id)?;
        job.is_cancellable().then(|| Command::CancelJob { id: job.id.clone() })
    }

    /// Summary and list arrive together. On failure the previous data stays.
    pub fn apply_loaded(&mut self, result: Result<(JobSummaryResponse, Vec<JobInfo>), String>) {
        self.loading = false;
        match result {
            Ok((summary, jobs)) => {
                self.summary = summary;
                self.jobs = jobs;
                self.loaded = true;
            }
            Err(error) => tracing::warn!(error = %error, "Failed to load jobs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, state: &str) -> JobInfo {
        JobInfo {
            id: id.to_string(),
            title: format!("job {}", id),
            state: state.to_string(),
            user_id: String::new(),
            created_at: None,
            started_at: None,
        }
    }

    fn loaded_panel() -> JobsPanel {
        let mut panel = JobsPanel::new();
        assert_eq!(panel.refresh(), Command::LoadJobs);
        panel.apply_loaded(Ok((
            JobSummaryResponse {
                total: 2,
                in_progress: 1,
                completed: 1,
                ..Default::default()
            },
            vec![job("run-1", "in_progress"), job("done-1", "completed")],
        )));
        panel
    }

    #[test]
    fn test_only_active_jobs_are_cancellable() {
        let panel = loaded_panel();
        assert_eq!(
            panel.cancel("run-1"),
            Some(Command::CancelJob {
                id: "run-1".to_string()
            })
        );
        assert_eq!(panel.cancel("done-1"), None);
        assert_eq!(panel.cancel("missing"), None);
    }

    #[test]
    fn test_failed_reload_keeps_previous_data() {
        let mut panel = loaded_panel();
        panel.refresh();
        assert!(panel.is_loading());
        panel.apply_loaded(Err("502 Bad Gateway".to_string()));
        assert!(!panel.is_loading());
        assert_eq!(panel.jobs().len(), 2);
        assert_eq!(panel.summary().total, 2);
    }
}
