use crate::core::constants::TIMESTAMP_FORMAT;
use crate::core::error::{Result, XRayError};
use crate::core::types::{CandidateEvaluation, StepRecord};
use crate::reporting::logging;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use std::fs;
use std::path::{Path, PathBuf};

/// Records pipeline steps and keeps the log file in sync with them.
///
/// Every call to [`XRay::record_step`] rewrites the whole file, so the file
/// always reflects the last successful append.
#[derive(Debug)]
pub struct XRay {
    steps: Vec<StepRecord>,
    log_file: PathBuf,
}

impl XRay {
    pub fn new<P: Into<PathBuf>>(log_file: P) -> Self {
        Self {
            steps: Vec::new(),
            log_file: log_file.into(),
        }
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Append a step stamped with the current local time and flush the log.
    ///
    /// An empty evaluation list is treated the same as no evaluations.
    pub fn record_step(
        &mut self,
        name: &str,
        input: Value,
        output: Value,
        reasoning: &str,
        evaluations: Option<Vec<CandidateEvaluation>>,
    ) -> Result<&StepRecord> {
        let step = StepRecord {
            step: name.to_string(),
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            input,
            output,
            reasoning: reasoning.to_string(),
            evaluations: evaluations.filter(|evals| !evals.is_empty()),
        };
        self.push(step)
    }

    /// Append an already built step and flush the log
    pub fn push(&mut self, step: StepRecord) -> Result<&StepRecord> {
        self.steps.push(step);
        save_steps(&self.log_file, &self.steps)?;

        let index = self.steps.len() - 1;
        logging::log_step_recorded(&self.steps[index].step, self.steps.len(), &self.log_file);
        Ok(&self.steps[index])
    }

    /// End the run and hand back everything that was recorded
    pub fn finish(self) -> Vec<StepRecord> {
        self.steps
    }
}

/// Serialize steps the way they are stored on disk: four-space indented JSON
pub fn to_log_bytes(steps: &[StepRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    steps.serialize(&mut serializer)?;
    Ok(buf)
}

/// Overwrite `path` with the given steps
pub fn save_steps(path: &Path, steps: &[StepRecord]) -> Result<()> {
    let content = to_log_bytes(steps)?;
    fs::write(path, content)?;
    Ok(())
}

/// Read a persisted step log back
pub fn load_steps<P: AsRef<Path>>(path: P) -> Result<Vec<StepRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(XRayError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let steps: Vec<StepRecord> = serde_json::from_str(&content)?;
    Ok(steps)
}
