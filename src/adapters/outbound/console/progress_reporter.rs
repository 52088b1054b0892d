use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 120;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Each step gets an indicatif spinner that stays on screen until the next
/// step starts or the run ends. Output of child processes (git, npm, mvn)
/// goes straight to the terminal and is not captured here.
pub struct StderrProgressReporter {
    spinner: RefCell<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: RefCell::new(None),
        }
    }

    fn step_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.dim} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Stops the running spinner, leaving its last line on screen
    fn finish_current(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        match self.spinner.borrow().as_ref() {
            Some(pb) => pb.println(message),
            None => eprintln!("{}", message),
        }
    }

    fn report_step(&self, current: usize, total: usize, message: &str) {
        self.finish_current();

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::step_style());
        pb.set_prefix(format!("[{}/{}]", current, total));
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        *self.spinner.borrow_mut() = Some(pb);
    }

    fn report_error(&self, message: &str) {
        self.finish_current();
        eprintln!("{}", message);
    }

    fn report_completion(&self, message: &str) {
        self.finish_current();
        eprintln!();
        eprintln!("{}", message);
    }
}

impl Drop for StderrProgressReporter {
    fn drop(&mut self) {
        self.finish_current();
    }
}
