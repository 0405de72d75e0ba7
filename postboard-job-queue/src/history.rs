//! Bounded, insertion-ordered log of job runs.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::types::JobRun;

#[derive(Debug)]
pub(crate) struct RunHistory {
    runs: VecDeque<JobRun>,
    capacity: usize,
}

impl RunHistory {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a run, evicting the oldest ones past capacity.
    pub(crate) fn record(&mut self, run: JobRun) {
        self.runs.push_back(run);
        while self.runs.len() > self.capacity {
            self.runs.pop_front();
        }
    }

    /// Apply `f` to the run with `id`. Returns false if it has been evicted.
    pub(crate) fn update(&mut self, id: Uuid, f: impl FnOnce(&mut JobRun)) -> bool {
        // Recent runs are the ones still being updated.
        match self.runs.iter_mut().rev().find(|run| run.id == id) {
            Some(run) => {
                f(run);
                true
            }
            None => false,
        }
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<&JobRun> {
        self.runs.iter().rev().find(|run| run.id == id)
    }

    pub(crate) fn newest_first<'a>(
        &'a self,
        job_name: Option<&'a str>,
    ) -> impl Iterator<Item = &'a JobRun> + 'a {
        self.runs
            .iter()
            .rev()
            .filter(move |run| job_name.map_or(true, |name| run.job_name == name))
    }

    pub(crate) fn count(&self, job_name: Option<&str>) -> usize {
        match job_name {
            Some(_) => self.newest_first(job_name).count(),
            None => self.runs.len(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.runs.clear();
    }
}
