use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Diagnostics for a single normalization run
///
/// Tracks how long each stage took and where tokens were lost.
#[derive(Debug, Clone, Default)]
pub struct NormalizationMetrics {
    /// Total duration of the whole pipeline
    pub total_duration: Duration,

    /// Duration of each stage by name
    pub stage_durations: HashMap<String, Duration>,

    /// Platform keys whose noise rules were applied
    pub matched_platforms: Vec<String>,

    /// Tokens produced by the tokenizer, before any token stage
    pub raw_token_count: usize,

    /// Tokens in the final query
    pub output_token_count: usize,

    /// Tokens removed by each token stage
    pub tokens_dropped: HashMap<String, usize>,

    /// Model code moved to the front of the query, if any
    pub promoted_model_code: Option<String>,
}

impl NormalizationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_dropped(&self) -> usize {
        self.tokens_dropped.values().sum()
    }

    /// Percentage of raw tokens that made it into the query
    pub fn retention_rate(&self) -> f32 {
        if self.raw_token_count == 0 {
            return 0.0;
        }

        (self.output_token_count as f32 / self.raw_token_count as f32) * 100.0
    }

    /// Generate a human-readable report
    pub fn report(&self) -> String {
        let mut lines = vec![
            "=== Normalization Metrics ===".to_string(),
            format!("Total Duration: {}us", self.total_duration.as_micros()),
            format!(
                "Platforms: {}",
                if self.matched_platforms.is_empty() {
                    "-".to_string()
                } else {
                    self.matched_platforms.join(", ")
                }
            ),
            format!("Raw Tokens: {}", self.raw_token_count),
            format!("Output Tokens: {}", self.output_token_count),
            format!("Retention: {:.1}%", self.retention_rate()),
            format!(
                "Model Code: {}",
                self.promoted_model_code.as_deref().unwrap_or("-")
            ),
            "".to_string(),
            "Dropped Tokens:".to_string(),
        ];

        let mut dropped: Vec<_> = self.tokens_dropped.iter().collect();
        dropped.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (stage, count) in dropped {
            lines.push(format!("  {}: {}", stage, count));
        }

        lines.push("".to_string());
        lines.push("Stage Durations:".to_string());

        // Sort stages by duration (slowest first)
        let mut stages: Vec<_> = self.stage_durations.iter().collect();
        stages.sort_by(|a, b| b.1.cmp(a.1));

        for (stage, duration) in stages {
            lines.push(format!("  {}: {}us", stage, duration.as_micros()));
        }

        lines.join("\n")
    }
}

/// Helper for timing pipeline stages
pub struct StageTimer {
    stage_name: &'static str,
    start: Instant,
}

impl StageTimer {
    pub fn start(stage_name: &'static str) -> Self {
        Self {
            stage_name,
            start: Instant::now(),
        }
    }

    /// Stop timing and record the duration in the builder
    pub fn stop(self, builder: &mut MetricsBuilder) -> Duration {
        let duration = self.start.elapsed();
        builder.add_stage(self.stage_name, duration);
        duration
    }

    pub fn stage_name(&self) -> &str {
        self.stage_name
    }
}

/// Builder for constructing metrics incrementally
#[derive(Default)]
pub struct MetricsBuilder {
    metrics: NormalizationMetrics,
    pipeline_start: Option<Instant>,
}

impl MetricsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_pipeline(&mut self) {
        self.pipeline_start = Some(Instant::now());
    }

    pub fn stop_pipeline(&mut self) {
        if let Some(start) = self.pipeline_start {
            self.metrics.total_duration = start.elapsed();
        }
    }

    pub fn matched_platform(&mut self, key: impl Into<String>) {
        self.metrics.matched_platforms.push(key.into());
    }

    pub fn raw_token_count(&mut self, count: usize) {
        self.metrics.raw_token_count = count;
    }

    pub fn output_token_count(&mut self, count: usize) {
        self.metrics.output_token_count = count;
    }

    /// Record tokens removed by a stage; stages that removed nothing are skipped
    pub fn tokens_dropped(&mut self, stage: &str, count: usize) {
        if count > 0 {
            *self
                .metrics
                .tokens_dropped
                .entry(stage.to_string())
                .or_insert(0) += count;
        }
    }

    pub fn promoted_model_code(&mut self, code: impl Into<String>) {
        self.metrics.promoted_model_code = Some(code.into());
    }

    pub fn add_stage(&mut self, name: impl Into<String>, duration: Duration) {
        self.metrics.stage_durations.insert(name.into(), duration);
    }

    pub fn build(self) -> NormalizationMetrics {
        self.metrics
    }
}
