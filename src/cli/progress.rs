use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown on stderr while a request is in flight.
pub struct RequestProgress {
    bar: ProgressBar,
}

impl RequestProgress {
    pub fn start(enabled: bool, what: &str) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(format!("Fetching {}...", what));
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
