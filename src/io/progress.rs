//! Terminal progress display for randomized parameter searches

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::search::executor::{Rejection, RejectionTally};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SEARCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Attempts: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single bar over search attempts with a running rejection summary
pub struct SearchProgress {
    bar: ProgressBar,
    tally: RejectionTally,
}

impl SearchProgress {
    /// Create a bar sized for `max_attempts`
    pub fn new(max_attempts: usize) -> Self {
        let bar = ProgressBar::new(max_attempts as u64);
        bar.set_style(SEARCH_STYLE.clone());
        Self {
            bar,
            tally: RejectionTally::default(),
        }
    }

    /// Record the outcome of one attempt
    pub fn observe(&mut self, attempt: usize, rejection: Option<Rejection>) {
        if let Some(rejection) = rejection {
            self.tally.record(rejection);
        }
        self.bar.set_position(attempt as u64);
        self.bar.set_message(format!(
            "collision {} bounds {} invalid {}",
            self.tally.collision,
            self.tally.out_of_bounds,
            self.tally.invalid + self.tally.degenerate + self.tally.geometry,
        ));
    }

    /// Rejections observed so far
    pub const fn tally(&self) -> &RejectionTally {
        &self.tally
    }

    /// Close the bar with a final message
    pub fn finish(&self, accepted: bool) {
        let message = if accepted {
            "accepted candidate found"
        } else {
            "no candidate accepted"
        };
        self.bar.finish_with_message(message);
    }
}
