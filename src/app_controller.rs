use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::AppError;
use crate::evaluation::report::{self, ExportFormat};
use crate::evaluation::text;
use crate::evaluation::{BatchEvaluator, FeedbackGenerator, LengthAnalysis, SpeechEvaluator};
use crate::file_utils::{FileManager, REPORT_SUFFIX};

// @module: Application controller for speech evaluation

/// Main application controller: loads inputs, runs evaluations, writes reports
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn evaluator(&self) -> Result<SpeechEvaluator, AppError> {
        SpeechEvaluator::with_rubric(self.config.rubric.clone()).map_err(|e| AppError::Config(e.to_string()))
    }

    // @reads: Slide text, normalised when configured
    fn load_slides(&self, path: &Path) -> Result<String, AppError> {
        let raw = read_input(path)?;
        if !self.config.slides.clean_text {
            return Ok(raw);
        }

        let cleaned = text::clean_slide_text(&raw);
        debug!(
            "Cleaned slide text: {} -> {} characters",
            raw.chars().count(),
            cleaned.chars().count()
        );
        Ok(cleaned)
    }

    /// Evaluate one speech and render it; the report is also written to `output` when given
    pub fn run_evaluate(
        &self,
        slides_path: &Path,
        speech_path: &Path,
        format: ExportFormat,
        output: Option<&Path>,
    ) -> Result<String, AppError> {
        let slides = self.load_slides(slides_path)?;
        let payload = read_input(speech_path)?;

        let evaluator = self.evaluator()?;
        let result = evaluator.evaluate(&slides, &payload).inspect_err(|e| {
            warn!("Failed to evaluate {:?}: {}", speech_path, e);
        })?;
        let feedback = FeedbackGenerator::new().generate(&result);

        let rendered = report::render(format, &result, &feedback, &self.config.report)?;

        if let Some(output) = output {
            write_output(output, &rendered)?;
            info!("Report written to {:?}", output);
        }

        Ok(rendered)
    }

    /// Evaluate several speeches against one deck and render the comparison
    pub async fn run_compare(
        &self,
        slides_path: &Path,
        inputs: &[PathBuf],
        output: Option<&Path>,
        write_reports: bool,
    ) -> Result<String, AppError> {
        let start_time = Instant::now();

        let slides = self.load_slides(slides_path)?;
        let files = FileManager::collect_speech_files(inputs, Some(slides_path))
            .map_err(|e| AppError::File(format!("{:#}", e)))?;
        if files.is_empty() {
            return Err(AppError::File(format!("No speech files found in {:?}", inputs)));
        }
        let candidates = FileManager::load_candidates(&files).map_err(|e| AppError::File(format!("{:#}", e)))?;

        let progress_bar = ProgressBar::new(candidates.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} speeches ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar.set_message("Evaluating");

        let batch = BatchEvaluator::new(self.evaluator()?, self.config.batch.max_concurrent_evaluations);
        let pb = progress_bar.clone();
        let outcomes = batch
            .evaluate_all(&slides, candidates, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await;

        progress_bar.finish_and_clear();

        if write_reports {
            for (outcome, path) in outcomes.iter().zip(&files) {
                let Ok(evaluated) = &outcome.evaluation else {
                    continue;
                };
                let report_path = FileManager::generate_output_path(path, REPORT_SUFFIX, ExportFormat::Text.extension());
                let rendered = report::render_text(&evaluated.result, &evaluated.feedback, &self.config.report);
                write_output(&report_path, &rendered)?;
                info!("Report written to {:?}", report_path);
            }
        }

        let failed = outcomes.iter().filter(|o| o.evaluation.is_err()).count();
        if failed > 0 {
            warn!("{} of {} speeches could not be evaluated", failed, outcomes.len());
        }

        let comparison = report::render_comparison(&outcomes);
        if let Some(output) = output {
            write_output(output, &comparison)?;
            info!("Comparison report written to {:?}", output);
        }

        info!(
            "Compared {} speeches in {:.2}s",
            outcomes.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(comparison)
    }

    /// Length analysis of the slides and one speech
    pub fn run_analyze(&self, slides_path: &Path, speech_path: &Path) -> Result<String, AppError> {
        let slides = self.load_slides(slides_path)?;
        let payload = read_input(speech_path)?;

        let analysis = LengthAnalysis::analyze(&slides, &payload)?;

        Ok(report::render_analysis(&analysis))
    }
}

fn read_input(path: &Path) -> Result<String, AppError> {
    FileManager::read_to_string(path).map_err(|e| AppError::File(format!("{:#}", e)))
}

fn write_output(path: &Path, content: &str) -> Result<(), AppError> {
    FileManager::write_to_file(path, content).map_err(|e| AppError::File(format!("{:#}", e)))
}
