//! Progress display for training loops.
//!
//! With the `progress` feature the display is an `indicatif` bar; without it
//! a single line is redrawn on stdout.

use std::time::Instant;

const DEFAULT_COLUMNS: usize = 100;

/// Bar characters from empty to full, in eighths.
const BAR_CHARS: [char; 9] = [' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Tracks how many epochs of a training run are done.
pub struct EpochTracker {
    num_epochs: usize,
    n_cols: usize,
    start: Instant,
    #[cfg(feature = "progress")]
    bar: indicatif::ProgressBar,
}

impl EpochTracker {
    pub fn new(num_epochs: usize) -> Self {
        Self::with_columns(num_epochs, DEFAULT_COLUMNS)
    }

    pub fn with_columns(num_epochs: usize, n_cols: usize) -> Self {
        #[cfg(feature = "progress")]
        let bar = {
            let bar = indicatif::ProgressBar::new(num_epochs as u64);
            let style = indicatif::ProgressStyle::with_template(
                "Epochs completed: {percent:>3}%|{wide_bar}| {pos}/{len} [{elapsed_precise}<{eta_precise}, {per_sec}] {msg}",
            )
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar());
            bar.set_style(style);
            bar
        };

        Self {
            num_epochs,
            n_cols,
            start: Instant::now(),
            #[cfg(feature = "progress")]
            bar,
        }
    }

    pub fn num_epochs(&self) -> usize {
        self.num_epochs
    }

    /// Seconds since the tracker was created.
    pub fn elapsed(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Marks `epoch` as done and redraws the display.
    #[cfg(feature = "progress")]
    pub fn update(&mut self, epoch: usize, loss: f64) {
        self.bar.set_position(epoch as u64);
        self.bar.set_message(format!("loss: {loss:.4}"));
    }

    /// Marks `epoch` as done and redraws the display.
    #[cfg(not(feature = "progress"))]
    pub fn update(&mut self, epoch: usize, loss: f64) {
        use std::io::Write;

        print!("\r{} loss: {loss:.4}", self.render(epoch, self.elapsed()));
        std::io::stdout().flush().ok();
    }

    #[cfg(feature = "progress")]
    pub fn finish(self) {
        self.bar.finish();
    }

    #[cfg(not(feature = "progress"))]
    pub fn finish(self) {
        println!();
    }

    /// The status line after `n` epochs, `elapsed` seconds into training.
    pub fn render(&self, n: usize, elapsed: f64) -> String {
        let rate = if elapsed > 0.0 { Some(n as f64 / elapsed) } else { None };
        let rate_str = match rate {
            Some(rate) if rate > 0.0 && 1.0 / rate > 1.0 => format!("{:5.2}s/epoch", 1.0 / rate),
            Some(rate) if rate > 0.0 => format!("{rate:5.2}epoch/s"),
            _ => "?epoch/s".to_string(),
        };

        let fraction = if self.num_epochs == 0 {
            1.0
        } else {
            n as f64 / self.num_epochs as f64
        };
        let remaining = match rate {
            Some(rate) if rate > 0.0 => {
                format_interval(self.num_epochs.saturating_sub(n) as f64 / rate)
            }
            _ => "?".to_string(),
        };

        let digits = self.num_epochs.to_string().len();
        let prefix = format!("Epochs completed: {:3.0}%|", fraction * 100.0);
        let postfix = format!(
            "| {n:>digits$}/{} [{}<{remaining}, {rate_str}]",
            self.num_epochs,
            format_interval(elapsed),
        );

        let used = prefix.chars().count() + postfix.chars().count();
        let bar_len = self.n_cols.saturating_sub(used).max(1);
        format!("{prefix}{}{postfix}", render_bar(bar_len, fraction))
    }
}

/// A bar `bar_len` characters wide, filled to `fraction` in eighths of a cell.
pub fn render_bar(bar_len: usize, fraction: f64) -> String {
    let steps = BAR_CHARS.len() - 1;
    let filled = (fraction.clamp(0.0, 1.0) * (bar_len * steps) as f64) as usize;
    let (full, partial) = (filled / steps, filled % steps);

    let mut bar = BAR_CHARS[steps].to_string().repeat(full);
    if full < bar_len {
        bar.push(BAR_CHARS[partial]);
        bar.push_str(&BAR_CHARS[0].to_string().repeat(bar_len - full - 1));
    }
    bar
}

/// Seconds as `MM:SS`, or `H:MM:SS` from one hour on.
pub fn format_interval(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (minutes, s) = (total / 60, total % 60);
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}
