use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar tracking for batch level generation
pub struct BatchProgress {
    progress_bar: ProgressBar,
}

impl BatchProgress {
    /// Creates a progress tracker over `levels` levels
    pub fn new(levels: usize, visible: bool) -> Self {
        let pb = if visible {
            ProgressBar::new(levels as u64)
        } else {
            ProgressBar::hidden()
        };

        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} levels",
        ) {
            pb.set_style(style.progress_chars("##-"));
        }

        Self { progress_bar: pb }
    }

    /// Increment progress
    pub fn increment(&self) {
        self.progress_bar.inc(1);
    }

    /// Number of levels completed so far
    #[cfg(test)]
    pub fn completed(&self) -> u64 {
        self.progress_bar.position()
    }

    /// Finish and clear progress display
    pub fn finish(self) {
        self.progress_bar.finish_and_clear();
    }
}
