use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar over the pipeline stages
pub struct ProgressReporter {
    stage_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            stage_progress: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_stages(&mut self, total_stages: usize) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(total_stages as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb.set_message("Running pipeline");
        self.stage_progress = Some(pb);
    }

    pub fn advance_stage(&self, stage: &str) {
        if let Some(ref pb) = self.stage_progress {
            pb.set_message(stage.to_string());
            pb.inc(1);
        }
    }

    pub fn finish_stages(&self, passed: usize, total: usize) {
        if let Some(ref pb) = self.stage_progress {
            pb.finish_with_message(format!("✓ Pipeline complete ({passed}/{total} passed)"));
        }
    }

    pub fn position(&self) -> u64 {
        self.stage_progress
            .as_ref()
            .map_or(0, ProgressBar::position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_is_a_no_op() {
        let mut progress = ProgressReporter::new(false);
        progress.start_stages(4);
        progress.advance_stage("one");
        progress.finish_stages(1, 2);

        assert!(!progress.is_enabled());
        assert_eq!(progress.position(), 0);
    }

    #[test]
    fn test_enabled_reporter_tracks_stages() {
        let mut progress = ProgressReporter::new(true);
        progress.start_stages(4);
        progress.advance_stage("one");
        progress.advance_stage("two");

        assert_eq!(progress.position(), 2);
        progress.finish_stages(1, 30);
    }
}
