//! Console rendering of a [`ScanReport`].

use std::io::{self, Write};

use owo_colors::{OwoColorize, Stream};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::app::catalogue::RefreshOutcome;
use crate::app::scanner::ScanReport;
use crate::domain::Flip;

#[derive(Tabled)]
struct FlipRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Profit / hour")]
    profit_per_hour: String,
    #[tabled(rename = "Imbalance")]
    imbalance: String,
}

impl FlipRow {
    fn new(rank: usize, flip: &Flip) -> Self {
        Self {
            rank,
            product: flip.product_id().to_string(),
            profit_per_hour: format!("{:.2}", flip.profit_per_hour()),
            imbalance: flip
                .imbalance()
                .map_or_else(|| "undefined".to_string(), |label| label.to_string()),
        }
    }
}

impl ScanReport {
    /// Write the report as human-readable text.
    ///
    /// `colour` names the terminal stream `out` ends up on; styling is
    /// applied only when that stream supports it. `None` writes plain text.
    pub fn render<W: Write>(&self, out: &mut W, colour: Option<Stream>) -> io::Result<()> {
        match &self.outcome {
            RefreshOutcome::Failed(err) => {
                let line = format!("Could not refresh catalogue: {err}");
                match colour {
                    Some(stream) => writeln!(
                        out,
                        "⚠ {}",
                        line.if_supports_color(stream, |text| text.yellow())
                    )?,
                    None => writeln!(out, "⚠ {line}")?,
                }
            }
            RefreshOutcome::Empty => {
                writeln!(out, "⚠ Catalogue source returned no products")?;
            }
            RefreshOutcome::Fresh | RefreshOutcome::Refreshed { .. } => {}
        }

        if self.flips.is_empty() {
            writeln!(out, "No flips could be found!")?;
            return Ok(());
        }

        let title = format!("=== TOP {} BEST FLIPS ===", self.max_flips);
        match colour {
            Some(stream) => writeln!(
                out,
                "{}",
                title.if_supports_color(stream, |text| text.bold())
            )?,
            None => writeln!(out, "{title}")?,
        }

        let rows = self
            .flips
            .iter()
            .enumerate()
            .map(|(i, flip)| FlipRow::new(i + 1, flip));
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        writeln!(out, "{table}")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookImbalance, ProductId};
    use crate::error::SourceError;
    use chrono::Utc;

    fn report(outcome: RefreshOutcome, flips: Vec<Flip>) -> ScanReport {
        ScanReport {
            scanned_at: Utc::now(),
            outcome,
            tradeable: flips.len(),
            flips,
            max_flips: 10,
        }
    }

    fn rendered(report: &ScanReport) -> String {
        let mut out = Vec::new();
        report.render(&mut out, None).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_report_says_so() {
        let text = rendered(&report(
            RefreshOutcome::Failed(SourceError::Unavailable("offline".into())),
            vec![],
        ));
        assert!(text.contains("Could not refresh catalogue"));
        assert!(text.contains("No flips could be found!"));
    }

    #[test]
    fn lists_flips_in_order() {
        let text = rendered(&report(
            RefreshOutcome::Refreshed {
                inserted: 2,
                updated: 0,
                evicted: 0,
            },
            vec![
                Flip::new(ProductId::new("HIGH"), 38.6, Some(BookImbalance::HeavySell)),
                Flip::new(ProductId::new("MID"), 18.8, None),
            ],
        ));

        assert!(text.contains("TOP 10 BEST FLIPS"));
        assert!(text.contains("38.60"));
        assert!(text.contains("Heavy sell"));
        assert!(text.contains("undefined"));
        assert!(text.find("HIGH").unwrap() < text.find("MID").unwrap());
    }

    #[test]
    fn plain_render_has_no_escapes_even_when_colour_is_forced() {
        owo_colors::set_override(true);
        let text = rendered(&report(
            RefreshOutcome::Failed(SourceError::Timeout { timeout_ms: 10 }),
            vec![Flip::new(ProductId::new("WHEAT"), 18.8, None)],
        ));
        owo_colors::unset_override();

        assert!(!text.contains('\x1b'));
        assert!(text.contains("=== TOP 10 BEST FLIPS ==="));
    }
}
