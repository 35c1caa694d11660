//! Console reporter with colored output

use crate::{BatchSummary, CandidateReport, ScoreBreakdown};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show the per-rule breakdown
    verbose: bool,
    /// Candidates scoring below this are flagged
    threshold: Option<f64>,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
            threshold: None,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Flag candidates below a threshold
    pub fn with_threshold(mut self, threshold: Option<f64>) -> Self {
        self.threshold = threshold;
        self
    }

    /// Report a single scored candidate
    pub fn report(&self, report: &CandidateReport) {
        print!("{}", self.render(report));
    }

    /// Report multiple candidates with summary
    pub fn report_many(&self, reports: &[CandidateReport], summary: &BatchSummary) {
        for report in reports {
            self.report(report);
        }
        print!("{}", self.render_summary(summary));
    }

    /// Report in quiet mode (text and score only)
    pub fn report_quiet(&self, report: &CandidateReport) {
        println!("{}\t{:.2}", report.result.text, report.score());
    }

    /// Render one candidate (with breakdown when verbose)
    pub fn render(&self, report: &CandidateReport) -> String {
        let score = report.score();
        let mut out = format!(
            "{:<24} {} {}",
            format!("\"{}\"", report.result.text),
            self.create_score_bar(score),
            self.paint_score(score),
        );
        if self.is_below_threshold(score) {
            out.push_str(&format!("  {}", self.paint("below threshold", |s| s.red().bold())));
        }
        out.push('\n');

        if self.verbose {
            if let Some(ref breakdown) = report.breakdown {
                out.push_str(&self.render_breakdown(breakdown));
            }
        }
        out
    }

    fn render_breakdown(&self, breakdown: &ScoreBreakdown) -> String {
        let mut out = format!("    {:<32} {:>+5}\n", "Base score", breakdown.base);
        for c in breakdown.fired() {
            let points = format!("{:>+5}", c.points);
            let points = if c.points > 0 {
                self.paint(&points, |s| s.green())
            } else {
                self.paint(&points, |s| s.red())
            };
            out.push_str(&format!(
                "    {:<32} {}  ({})\n",
                c.rule.description(),
                points,
                c.rule
            ));
        }
        out.push_str(&format!(
            "    {:<32} {:>5} -> {} / 100\n",
            "Raw total", breakdown.raw, breakdown.clamped
        ));
        out
    }

    /// Render the batch summary footer
    pub fn render_summary(&self, summary: &BatchSummary) -> String {
        let mut out = format!(
            "\n{} {} candidate(s), mean score {:.2}",
            self.paint("Summary:", |s| s.bold()),
            summary.candidates,
            summary.mean_score
        );
        if let Some(t) = summary.threshold {
            out.push_str(&format!(
                ", {} below threshold {:.2}",
                summary.below_threshold, t
            ));
        }
        out.push('\n');
        out
    }

    fn is_below_threshold(&self, score: f64) -> bool {
        self.threshold.is_some_and(|t| score < t)
    }

    fn paint_score(&self, score: f64) -> String {
        let s = format!("{:.2}", score);
        if score >= 0.8 {
            self.paint(&s, |s| s.green().bold())
        } else if score >= 0.5 {
            self.paint(&s, |s| s.yellow())
        } else {
            self.paint(&s, |s| s.red())
        }
    }

    fn paint<F>(&self, s: &str, style: F) -> String
    where
        F: FnOnce(&str) -> colored::ColoredString,
    {
        if self.use_colors {
            style(s).to_string()
        } else {
            s.to_string()
        }
    }

    fn create_score_bar(&self, score: f64) -> String {
        let filled = ((score * 20.0).round() as usize).min(20);
        let empty = 20 - filled;
        format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
