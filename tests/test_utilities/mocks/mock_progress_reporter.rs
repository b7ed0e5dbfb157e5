use std::sync::{Arc, Mutex};
use whatsaterminal::prelude::*;

/// How a captured line reached the reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Report,
    Progress,
    Error,
    Completion,
}

/// ProgressReporter that records every line, shareable across the
/// concurrent sheet reads of an export
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    lines: Arc<Mutex<Vec<(Channel, String)>>>,
}

#[allow(dead_code)]
impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, channel: Channel, line: String) {
        self.lines.lock().unwrap().push((channel, line));
    }

    /// Rendered lines; errors and completions carry an `Error: ` / `Completed: ` prefix
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|(channel, line)| match channel {
                Channel::Error => format!("Error: {}", line),
                Channel::Completion => format!("Completed: {}", line),
                Channel::Report | Channel::Progress => line.clone(),
            })
            .collect()
    }

    pub fn on(&self, channel: Channel) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(Channel::Report, message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let line = match message {
            Some(sheet) => format!("Progress: {}/{} - {}", current, total, sheet),
            None => format!("Progress: {}/{}", current, total),
        };
        self.record(Channel::Progress, line);
    }

    fn report_error(&self, message: &str) {
        self.record(Channel::Error, message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.record(Channel::Completion, message.to_string());
    }
}
