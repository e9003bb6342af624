//! Human-friendly terminal output.

use console::{Style, style};

use crate::catalog::Catalog;
use crate::error::MockupError;
use crate::frames::FrameStore;
use crate::service::Detection;

use super::{GenerateSummary, Output};

/// Styled terminal output.
pub struct HumanOutput {
    color: bool,
}

impl HumanOutput {
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.color {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn label(&self, text: &str) -> String {
        self.paint(&Style::new().bold(), text)
    }

    fn accent(&self, text: &str) -> String {
        self.paint(&Style::new().green(), text)
    }
}

impl Output for HumanOutput {
    fn error(&self, err: &MockupError) {
        let head = if self.color {
            style("Error").red().bold().to_string()
        } else {
            "Error".to_string()
        };
        eprintln!("{head}: {err}");
        if let Some(hint) = err.suggestion() {
            eprintln!("{}: {hint}", self.paint(&Style::new().yellow(), "Hint"));
        }
    }

    fn models(&self, catalog: &Catalog, frames: &FrameStore, long: bool) {
        for spec in catalog {
            if !long {
                println!("{}", spec.name);
                continue;
            }

            let (w, h) = spec.portrait_resolution;
            let installed = frames.available(spec.name, spec.colors);
            println!(
                "{}: {w}x{h} (series {}, {} frames installed)",
                self.accent(spec.name),
                spec.series,
                installed.len()
            );
            println!("    colors: {}", spec.colors.join(", "));
        }
    }

    fn detection(&self, detection: &Detection) {
        let (w, h) = detection.resolution;
        println!("{}: {}", self.label("Model"), self.accent(&detection.detected_model));
        println!("{}: {}", self.label("Series"), detection.series);
        println!("{}: {w}x{h}", self.label("Resolution"));
        let others: Vec<&str> = detection
            .all_matches
            .iter()
            .map(String::as_str)
            .filter(|m| *m != detection.detected_model)
            .collect();
        if !others.is_empty() {
            println!("{}: {}", self.label("Also matches"), others.join(", "));
        }
        println!("{}: {}", self.label("Colors"), detection.colors.join(", "));
    }

    fn generated(&self, summary: &GenerateSummary) {
        println!(
            "{} {} ({} {}, {}, {}x{})",
            self.paint(&Style::new().green().bold(), "Wrote"),
            summary.output,
            summary.model,
            summary.color,
            summary.orientation,
            summary.width,
            summary.height
        );
    }

    fn serving(&self, addr: &str) {
        println!("Mockup API listening on {}", self.accent(&format!("http://{addr}")));
        println!("Press Ctrl+C to stop");
    }

    fn version_info(&self, version: &str) {
        println!("mockup {version}");
    }
}
