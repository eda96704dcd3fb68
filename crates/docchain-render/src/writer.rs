use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use docchain_registry::Tone;

use crate::render::RenderMode;
use crate::timeline::{AmountTone, Timeline, TimelineEntry};

/// Writes a [`Timeline`] as terminal text.
#[derive(Clone, Copy, Debug)]
pub struct TimelineWriter {
    /// Emit no ANSI colour codes.
    pub plain: bool,
    pub show_running_balance: bool,
}

impl Default for TimelineWriter {
    fn default() -> Self {
        Self {
            plain: false,
            show_running_balance: true,
        }
    }
}

impl TimelineWriter {
    pub fn plain() -> Self {
        Self {
            plain: true,
            ..Self::default()
        }
    }

    pub fn with_running_balance(mut self, show: bool) -> Self {
        self.show_running_balance = show;
        self
    }

    pub fn write(&self, timeline: &Timeline) -> String {
        let mut out = String::new();
        let last = timeline.entries.len().saturating_sub(1);

        for (i, entry) in timeline.entries.iter().enumerate() {
            self.write_entry(&mut out, entry);
            if i < last {
                let _ = writeln!(out, "  |");
            }
        }

        if let Some(summary) = &timeline.summary {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{} {}",
                self.paint_bold("Net balance:"),
                summary.balance_text
            );
            if let Some(vat) = &summary.vat_net_text {
                let _ = writeln!(out, "VAT impact:  {vat}");
            }
            if let Some(count) = summary.document_count {
                let _ = writeln!(out, "Documents:   {count}");
            }
        }

        if timeline.mode == RenderMode::Live && !self.plain {
            let _ = writeln!(out, "{}", "select an entry to open the document".dimmed());
        }
        out
    }

    fn write_entry(&self, out: &mut String, entry: &TimelineEntry) {
        let glyph = entry.icon.glyph();
        let reference = if entry.is_clickable() {
            self.paint_underline(&entry.reference)
        } else {
            entry.reference.clone()
        };
        let label = self.paint_tone(&entry.label, entry.tone);
        let _ = write!(out, "{glyph} {reference}  {label}");
        if let Some(status) = &entry.status {
            let _ = write!(out, "  [{status}]");
        }
        let _ = writeln!(out);

        if let Some(link) = &entry.link_label {
            let _ = writeln!(out, "  via {link}");
        }

        let amount = self.paint_amount(&entry.amount_text, entry.amount_tone);
        if self.show_running_balance {
            let _ = writeln!(out, "  {amount}  (balance {})", entry.running_balance_text);
        } else {
            let _ = writeln!(out, "  {amount}");
        }

        if let Some(reason) = &entry.reason {
            let _ = writeln!(out, "  {reason}");
        }
        if let Some(date) = &entry.date {
            let _ = writeln!(out, "  {date}");
        }
    }

    // ------------------------------------------------------------------
    // Styling
    // ------------------------------------------------------------------

    fn paint_amount(&self, text: &str, tone: AmountTone) -> String {
        if self.plain {
            return text.to_string();
        }
        match tone {
            AmountTone::Charge => text.green().to_string(),
            AmountTone::Reduction => text.red().to_string(),
        }
    }

    fn paint_tone(&self, text: &str, tone: Tone) -> String {
        if self.plain {
            return text.to_string();
        }
        tone_color(text, tone).to_string()
    }

    fn paint_bold(&self, text: &str) -> String {
        if self.plain {
            text.to_string()
        } else {
            text.bold().to_string()
        }
    }

    fn paint_underline(&self, text: &str) -> String {
        if self.plain {
            text.to_string()
        } else {
            text.underline().to_string()
        }
    }
}

fn tone_color(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Blue | Tone::Indigo => text.blue(),
        Tone::Red | Tone::Rose => text.red(),
        Tone::Amber | Tone::Orange => text.yellow(),
        Tone::Teal | Tone::Cyan => text.cyan(),
        Tone::Green => text.green(),
        Tone::Slate | Tone::Neutral => text.normal(),
    }
}
