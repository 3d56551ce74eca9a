//! Text and JSON rendering of an analysis.

use verdict_core::types::{IndicatorFamily, Signal};

use crate::analysis::Analysis;

const RULE: &str = "───────────────────────────────────────────────────────────\n";
const BANNER: &str = "═══════════════════════════════════════════════════════════\n";

impl Analysis {
    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str(BANNER);
        s.push_str(&format!("  {} TECHNICAL ANALYSIS\n", self.symbol));
        s.push_str(BANNER);
        s.push('\n');

        s.push_str(&format!("  Price:               {:.2}\n", self.price));
        s.push_str(&format!("  Latest Session:      {}\n", self.latest_date));
        s.push_str(&format!("  As Of:               {}", self.as_of));
        if self.stale_days > 0 {
            s.push_str(&format!("  ({} days old)", self.stale_days));
        }
        s.push_str("\n\n");

        for family in IndicatorFamily::all() {
            s.push_str(section_title(*family));
            s.push('\n');
            s.push_str(RULE);
            match self.signals.get(*family) {
                Some(signal) => push_signal(&mut s, signal),
                None => s.push_str("  Not enough history\n"),
            }
            s.push('\n');
        }

        s.push_str("RECOMMENDATIONS\n");
        s.push_str(RULE);
        s.push_str(&format!(
            "  Composite Score:     {:+.3}\n",
            self.verdict.composite_score
        ));
        for score in &self.verdict.scores {
            s.push_str(&format!(
                "    {:<10} {:<18} {:+.2} x {:.2}\n",
                score.family, score.label, score.score, score.weight
            ));
        }
        s.push('\n');
        for rec in &self.verdict.recommendations {
            s.push_str(&format!(
                "  {:<8} {:<12} confidence {:>5.1}%\n",
                rec.timeframe.to_string(),
                rec.action.to_string(),
                rec.confidence
            ));
        }
        s.push('\n');

        s.push_str(BANNER);
        s.push_str("  Technical indicators only. Not financial advice.\n");
        s.push_str(BANNER);

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn section_title(family: IndicatorFamily) -> &'static str {
    match family {
        IndicatorFamily::Trend => "TREND (SMA 20/50)",
        IndicatorFamily::Rsi => "RSI (14)",
        IndicatorFamily::Macd => "MACD (12/26/9)",
        IndicatorFamily::Bollinger => "BOLLINGER BANDS (20, 2)",
    }
}

fn push_signal(s: &mut String, signal: &Signal) {
    s.push_str(&format!("  Signal:              {}\n", signal.kind.label()));
    if let Some(value) = signal.value {
        s.push_str(&format!("  Value:               {:.2}\n", value));
    }
    s.push_str(&format!("  {}\n", signal.description));
}
