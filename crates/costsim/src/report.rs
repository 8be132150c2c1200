//! Fixed-width text reports and the JSON run summary

use std::fmt;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, eyre};
use costsim_core::summary::{ConfidenceInterval, DistributionSummary, PercentileSet};
use costsim_core::TitledSamples;
use jiff::Timestamp;
use serde::Serialize;

use crate::util::io::{atomic_write, sanitize_file_stem};

/// Width of every report line
pub const REPORT_WIDTH: usize = 50;
/// Width of the label column
const LABEL_WIDTH: usize = 30;

pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// Everything reported for one titled sample array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub title: String,
    pub summary: DistributionSummary,
    pub percentiles: PercentileSet,
    pub expected: Option<f64>,
    pub bands: [ConfidenceInterval; 3],
}

impl StageReport {
    /// `None` when the array holds no trials
    pub fn from_titled(titled: &TitledSamples) -> Option<Self> {
        let summary = titled.samples.summary()?;
        let percentiles = titled.samples.percentiles()?;
        Some(Self {
            title: titled.title.clone(),
            bands: summary.sigma_bands(),
            summary,
            percentiles,
            expected: titled.expected,
        })
    }

    pub fn render(&self, generated: Timestamp) -> String {
        ReportText {
            report: self,
            generated,
        }
        .to_string()
    }
}

/// Text layout of a stage report stamped with its generation time
struct ReportText<'a> {
    report: &'a StageReport,
    generated: Timestamp,
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let rule = "=".repeat(REPORT_WIDTH);
        let thin = "-".repeat(REPORT_WIDTH);
        let value_width = REPORT_WIDTH - LABEL_WIDTH;

        writeln!(
            f,
            "{:^REPORT_WIDTH$}",
            format!("{} output Report", report.title)
        )?;
        writeln!(f, "{rule}")?;

        writeln!(
            f,
            "{:<LABEL_WIDTH$}{:>value_width$}",
            "Number of simulations:", report.summary.trials
        )?;
        let mut stats = vec![
            ("Mean of distribution:", report.summary.mean),
            ("Standard deviation:", report.summary.std_dev),
        ];
        if let Some(expected) = report.expected {
            stats.push(("Expected value (PERT):", expected));
        }
        for (label, value) in stats {
            writeln!(f, "{label:<LABEL_WIDTH$}{value:>value_width$.2}")?;
        }

        writeln!(f)?;
        writeln!(f, "Confidence Intervals for {}:", report.title)?;
        writeln!(f, "{thin}")?;
        for band in &report.bands {
            let label = format!("{} ({} sigma)", band.coverage_label(), band.sigmas);
            writeln!(
                f,
                "{label:<LABEL_WIDTH$}{:>8.2} - {:<9.2}",
                band.lower, band.upper
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Percentiles for {}:", report.title)?;
        writeln!(f, "{thin}")?;
        for (label, value) in [
            ("P5", report.percentiles.p5),
            ("P50 (median)", report.percentiles.p50),
            ("P95", report.percentiles.p95),
        ] {
            writeln!(f, "{label:<LABEL_WIDTH$}{value:>value_width$.2}")?;
        }

        writeln!(f, "{rule}")?;
        writeln!(f, "{:^REPORT_WIDTH$}", "End of Report")?;
        writeln!(
            f,
            "{:^REPORT_WIDTH$}",
            self.generated.strftime("%Y-%m-%d %H:%M:%S UTC").to_string()
        )
    }
}

/// `<dir>/<title>_output.txt`
pub fn report_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}_output.txt", sanitize_file_stem(title)))
}

/// Render and atomically write the report for one titled array
pub fn write_report(
    dir: &Path,
    titled: &TitledSamples,
    generated: Timestamp,
) -> color_eyre::Result<PathBuf> {
    let report = StageReport::from_titled(titled)
        .ok_or_else(|| eyre!("no samples to report for {}", titled.title))?;
    let path = report_path(dir, &titled.title);
    atomic_write(&path, &report.render(generated))
        .wrap_err_with(|| format!("failed to write report {}", path.display()))?;
    tracing::debug!(path = %path.display(), "report written");
    Ok(path)
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    generated: Timestamp,
    seed: u64,
    trials: usize,
    stages: &'a [StageReport],
}

/// Write `summary.json` with every titled summary
pub fn write_json_summary(
    dir: &Path,
    seed: u64,
    trials: usize,
    titled: &[TitledSamples],
    generated: Timestamp,
) -> color_eyre::Result<PathBuf> {
    let stages: Vec<StageReport> = titled.iter().filter_map(StageReport::from_titled).collect();
    let summary = RunSummary {
        generated,
        seed,
        trials,
        stages: &stages,
    };

    let json = serde_json::to_string_pretty(&summary)?;
    let path = dir.join(SUMMARY_FILE_NAME);
    atomic_write(&path, &json)
        .wrap_err_with(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use costsim_core::SampleArray;
    use tempfile::tempdir;

    fn titled(values: Vec<f64>) -> TitledSamples {
        TitledSamples::new("Risks impact in cost", SampleArray::from_vec(values))
    }

    #[test]
    fn test_report_lines_fit_width() {
        let report = StageReport::from_titled(&titled(vec![10.0, 20.0, 30.0]).with_expected(21.0))
            .unwrap();
        let text = report.render(Timestamp::UNIX_EPOCH);

        for line in text.lines() {
            assert!(line.chars().count() <= REPORT_WIDTH, "too wide: {line:?}");
        }
        assert!(text.contains("Risks impact in cost output Report"));
        assert!(text.contains("Expected value (PERT):"));
        assert!(text.contains("End of Report"));
        assert!(text.contains("1970-01-01 00:00:00 UTC"));
    }

    #[test]
    fn test_report_contains_trials_and_floored_bounds() {
        // mean 100, population sigma 60
        let report = StageReport::from_titled(&titled(vec![40.0, 160.0])).unwrap();
        let text = report.render(Timestamp::UNIX_EPOCH);

        let trials_line = text
            .lines()
            .find(|l| l.starts_with("Number of simulations:"))
            .unwrap();
        assert!(trials_line.trim_end().ends_with('2'));

        let two_sigma = text.lines().find(|l| l.starts_with("95% (2 sigma)")).unwrap();
        assert!(two_sigma.contains("    0.00 - 220.00"));
        let one_sigma = text.lines().find(|l| l.starts_with("68% (1 sigma)")).unwrap();
        assert!(one_sigma.contains("40.00 - 160.00"));
        assert!(!text.contains("Expected value"));
    }

    #[test]
    fn test_empty_samples_have_no_report() {
        assert!(StageReport::from_titled(&titled(Vec::new())).is_none());
    }

    #[test]
    fn test_write_report() {
        let dir = tempdir().unwrap();
        let path = write_report(dir.path(), &titled(vec![1.0, 2.0]), Timestamp::UNIX_EPOCH).unwrap();

        assert_eq!(path, dir.path().join("Risks impact in cost_output.txt"));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with(&format!(
            "{:^50}\n",
            "Risks impact in cost output Report"
        )));
    }

    #[test]
    fn test_write_json_summary() {
        let dir = tempdir().unwrap();
        let arrays = vec![
            TitledSamples::new("Costs", SampleArray::from_vec(vec![5.0, 7.0])).with_expected(6.0),
            titled(vec![0.0, 2.0]),
        ];
        let path = write_json_summary(dir.path(), 42, 2, &arrays, Timestamp::UNIX_EPOCH).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["seed"], 42);
        assert_eq!(value["trials"], 2);
        assert_eq!(value["stages"][0]["title"], "Costs");
        assert_eq!(value["stages"][0]["summary"]["mean"], 6.0);
        assert_eq!(value["stages"][0]["expected"], 6.0);
        assert!(value["stages"][1]["expected"].is_null());
        assert_eq!(value["stages"][1]["bands"].as_array().unwrap().len(), 3);
    }
}
