use chrono::Local;
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter;

use super::history::History;

/// TensorBoard logger for training metrics
pub struct TensorBoardLogger {
    writer: SummaryWriter,
    step: usize,
}

impl TensorBoardLogger {
    /// Logs go to `runs/{timestamp}`.
    pub fn new() -> Self {
        let timestamp = Local::now().format("%Y%m%d-%H%M%S");
        Self::with_log_dir(format!("runs/{timestamp}"))
    }

    pub fn with_log_dir(log_dir: impl AsRef<Path>) -> Self {
        let writer = SummaryWriter::new(log_dir.as_ref());
        Self { writer, step: 0 }
    }

    /// Log a scalar value at the current step
    pub fn log_scalar(&mut self, tag: &str, value: f64) {
        self.writer.add_scalar(tag, value as f32, self.step);
    }

    /// Writes every metric of `history`, one step per epoch, after the
    /// current step. Leaves the step at the last epoch written.
    pub fn log_history(&mut self, history: &History) {
        for epoch in 0..history.epochs() {
            self.next_step();
            for (name, values) in history.metrics() {
                if let Some(value) = values.get(epoch) {
                    self.log_scalar(name, *value);
                }
            }
        }
        self.flush();
    }

    pub fn next_step(&mut self) {
        self.step += 1;
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn flush(&mut self) {
        self.writer.flush();
    }
}

impl Default for TensorBoardLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TensorBoardLogger {
    fn drop(&mut self) {
        self.writer.flush();
    }
}
