//! Sequential conversion of several inputs.

use std::path::PathBuf;
use tracing::{error, info};

use super::ffmpeg::FfmpegConverter;
use super::types::{BatchReport, ConversionRequest, QualityPreset};
use crate::process::ProcessRunner;

impl<R: ProcessRunner> FfmpegConverter<R> {
    /// Converts each input in turn with the same preset.
    ///
    /// A failing file is recorded and the remaining files are still
    /// attempted.
    pub async fn convert_all(&self, inputs: &[PathBuf], preset: QualityPreset) -> BatchReport {
        let mut report = BatchReport::default();
        let total = inputs.len();

        for (index, input) in inputs.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, total, input.display());

            match self
                .convert(ConversionRequest::new(input.clone(), preset))
                .await
            {
                Ok(output) => report.succeeded.push(output),
                Err(e) => {
                    error!("Failed to convert {} [{}]: {}", input.display(), e.kind(), e);
                    report.failed.push((input.clone(), e));
                }
            }
        }

        info!(
            "Successfully converted: {}/{} files",
            report.succeeded.len(),
            report.total()
        );
        report
    }
}
