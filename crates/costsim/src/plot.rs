//! Text histograms of trial totals
//!
//! One line per bin, horizontal bars with eighth-block precision. The bins
//! holding the mean and mean ± σ are tagged on the right.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{WrapErr, eyre};
use costsim_core::TitledSamples;
use costsim_core::summary::DistributionSummary;

use crate::util::format::{format_amount_short, format_compact_amount};
use crate::util::io::{atomic_write, sanitize_file_stem};

/// Eighth-block characters, thinnest first
const BAR_CHARS: [char; 8] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];

/// Width of the longest bar in characters
pub const BAR_WIDTH: usize = 40;

/// Equal-width bin counts over `[min, max]`
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `None` for empty input or zero bins. A constant sample set gets a single bin.
    pub fn from_samples(samples: &[f64], bins: usize) -> Option<Self> {
        if samples.is_empty() || bins == 0 {
            return None;
        }

        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });

        let bins = if max > min { bins } else { 1 };
        let mut hist = Self {
            min,
            max,
            counts: vec![0; bins],
        };
        for &x in samples {
            if let Some(i) = hist.bin_of(x) {
                hist.counts[i] += 1;
            }
        }
        Some(hist)
    }

    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }

    /// Lower edge of bin `i`
    pub fn bin_start(&self, i: usize) -> f64 {
        self.min + i as f64 * self.bin_width()
    }

    /// Bin holding `value`; the last bin is closed on the right
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if !(self.min..=self.max).contains(&value) {
            return None;
        }
        let width = self.bin_width();
        if width == 0.0 {
            return Some(0);
        }
        let i = ((value - self.min) / width) as usize;
        Some(i.min(self.counts.len() - 1))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bar of `count / peak` scaled to `width` characters
fn bar(count: usize, peak: usize, width: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    let eighths = (count * width * 8 + peak / 2) / peak;
    let mut s = "█".repeat(eighths / 8);
    if eighths % 8 > 0 {
        s.push(BAR_CHARS[eighths % 8 - 1]);
    }
    s
}

pub fn render_histogram(title: &str, hist: &Histogram, summary: &DistributionSummary) -> String {
    let peak = hist.counts.iter().copied().max().unwrap_or(0);
    let (mean, std) = (summary.mean, summary.std_dev);

    let mut lines = vec![
        format!("{title} probability distribution"),
        format!(
            "Mean: {}   -1σ: {}   +1σ: {}",
            format_amount_short(mean),
            format_amount_short(mean - std),
            format_amount_short(mean + std)
        ),
        String::new(),
        format!("{:>10} | Frequency", "Sum"),
    ];

    let marked = [
        (hist.bin_of(mean - std), "-1σ"),
        (hist.bin_of(mean), "mean"),
        (hist.bin_of(mean + std), "+1σ"),
    ];

    for (i, &count) in hist.counts.iter().enumerate() {
        let bar = bar(count, peak, BAR_WIDTH);
        let mut line = format!(
            "{:>10} |{bar:<BAR_WIDTH$} {count}",
            format_compact_amount(hist.bin_start(i))
        );

        let markers: Vec<&str> = marked
            .iter()
            .filter(|(bin, _)| *bin == Some(i))
            .map(|&(_, label)| label)
            .collect();
        if !markers.is_empty() {
            line.push_str("  <- ");
            line.push_str(&markers.join(", "));
        }
        lines.push(line);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// `<dir>/<title>_histogram.txt`
pub fn histogram_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(format!("{}_histogram.txt", sanitize_file_stem(title)))
}

pub fn write_histogram(
    dir: &Path,
    titled: &TitledSamples,
    bins: usize,
) -> color_eyre::Result<PathBuf> {
    let samples = titled.samples.as_slice();
    let (hist, summary) = Histogram::from_samples(samples, bins)
        .zip(DistributionSummary::from_samples(samples))
        .ok_or_else(|| eyre!("nothing to plot for {}", titled.title))?;

    let path = histogram_path(dir, &titled.title);
    atomic_write(&path, &render_histogram(&titled.title, &hist, &summary))
        .wrap_err_with(|| format!("failed to write histogram {}", path.display()))?;
    Ok(path)
}
