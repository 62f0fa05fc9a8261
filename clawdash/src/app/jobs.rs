use super::*;

impl App {
    // ========== Jobs Tab ==========

    pub(super) fn handle_jobs_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let len = self.dashboard.jobs().jobs().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => step_selection(&mut self.jobs_state, len, 1),
            KeyCode::Up | KeyCode::Char('k') => step_selection(&mut self.jobs_state, len, -1),
            KeyCode::Char('r') => return vec![self.dashboard.refresh_jobs()],
            KeyCode::Char('x') => return self.cancel_selected_job(),
            _ => {}
        }
        Vec::new()
    }

    fn cancel_selected_job(&mut self) -> Vec<Command> {
        let Some(job) = self
            .jobs_state
            .selected()
            .and_then(|idx| self.dashboard.jobs().jobs().get(idx))
        else {
            return Vec::new();
        };
        tracing::info!(job_id = %job.id, "Cancelling job");
        self.dashboard.cancel_job(&job.id).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{app, key};
    use super::*;
    use clawdash_core::{JobInfo, JobSummaryResponse, Update};

    fn job(id: &str, state: &str) -> JobInfo {
        JobInfo {
            id: id.to_string(),
            title: "t".to_string(),
            state: state.to_string(),
            user_id: String::new(),
            created_at: None,
            started_at: None,
        }
    }

    #[test]
    fn test_cancel_only_targets_active_selection() {
        let mut app = app();
        app.switch_tab(Tab::Jobs);
        app.dashboard.apply(Update::JobsLoaded(Ok((
            JobSummaryResponse::default(),
            vec![job("a", "completed"), job("b", "pending")],
        ))));

        assert!(app.handle_key(key(KeyCode::Char('x'))).is_empty());

        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.jobs_state.selected(), Some(0));
        assert!(app.handle_key(key(KeyCode::Char('x'))).is_empty());

        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(
            app.handle_key(key(KeyCode::Char('x'))),
            vec![Command::CancelJob { id: "b".to_string() }]
        );
    }
}
