//! Output formatters for extraction results

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::record::ExtractionResult;
use colored::{Color, Colorize};
use serde_json;

/// Trait for formatting extraction results
pub trait OutputFormatter {
    fn format_result(&self, result: &ExtractionResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and section headers
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and downstream tooling
pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!(
                "\n{} {}\n",
                prefix.color(color).bold(),
                title.color(color).bold()
            )
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn field_line(&self, label: &str, value: &str) -> String {
        let shown = if value.is_empty() { "-" } else { value };
        format!("{} {}\n", self.colorize(&format!("{}:", label), Color::Cyan), shown)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, result: &ExtractionResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 CV EXTRACTION", 1));
        output.push_str(&format!("File: {}\n", result.file));

        output.push_str(&self.format_header("📋 Extracted Information", 2));
        output.push_str(&self.field_line("Name", &result.record.name));
        output.push_str(&self.field_line("Nationality", &result.record.nationality));
        output.push_str(&self.field_line("Qualification", &result.record.qualification));
        if !result.record.position.is_empty() {
            output.push_str(&self.field_line("Position", &result.record.position));
        }
        if !result.record.source.is_empty() {
            output.push_str(&self.field_line("Source", &result.record.source));
        }

        output.push_str(&self.format_header("🗓 Work Experience", 2));
        output.push_str(&format!(
            "Total: {}\n",
            self.colorize(&result.experience.total, Color::Green)
        ));
        if !result.experience.merged_periods.is_empty() {
            output.push('\n');
            for period in &result.experience.merged_periods {
                output.push_str(&format!(
                    "  • {} - {}\n",
                    period.start.format("%b %Y"),
                    period.end.format("%b %Y")
                ));
            }
        }

        if self.detailed && !result.experience.raw_periods.is_empty() {
            output.push_str(&self.format_header("Raw Date Ranges", 3));
            for period in &result.experience.raw_periods {
                output.push_str(&format!(
                    "  • {} - {}\n",
                    period.start.format("%b %Y"),
                    period.end.format("%b %Y")
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, result: &ExtractionResult) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

/// Renderer that picks the right formatter for a requested format
pub struct ResultRenderer {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ResultRenderer {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
        }
    }

    pub fn render(&self, result: &ExtractionResult, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_result(result),
            OutputFormat::Json => self.json_formatter.format_result(result),
        }
    }
}

impl Default for ResultRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::CandidateFields;
    use crate::experience::{DateRange, ExperienceSummary};
    use crate::output::record::CandidateRecord;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn sample_result() -> ExtractionResult {
        let fields = CandidateFields {
            name: "Jane Doe".to_string(),
            nationality: "Irish".to_string(),
            qualification: "BSc".to_string(),
        };
        let range = DateRange::new(date(2015, 1, 1), date(2018, 6, 1)).unwrap();
        ExtractionResult {
            file: "cv.pdf".to_string(),
            record: CandidateRecord::from_extraction(&fields, "3 years 5 months", None, None),
            experience: ExperienceSummary {
                raw_periods: vec![range],
                merged_periods: vec![range],
                total: "3 years 5 months".to_string(),
            },
        }
    }

    #[test]
    fn console_output_lists_fields_and_periods() {
        let formatter = ConsoleFormatter::new(false, false);
        let output = formatter.format_result(&sample_result()).unwrap();

        assert!(output.contains("File: cv.pdf"));
        assert!(output.contains("Name: Jane Doe"));
        assert!(output.contains("Total: 3 years 5 months"));
        assert!(output.contains("Jan 2015 - Jun 2018"));
        assert!(!output.contains("Raw Date Ranges"));
    }

    #[test]
    fn detailed_console_output_includes_raw_ranges() {
        let formatter = ConsoleFormatter::new(false, true);
        let output = formatter.format_result(&sample_result()).unwrap();
        assert!(output.contains("Raw Date Ranges"));
    }

    #[test]
    fn empty_fields_show_a_placeholder() {
        let formatter = ConsoleFormatter::new(false, false);
        let mut result = sample_result();
        result.record.nationality.clear();
        let output = formatter.format_result(&result).unwrap();
        assert!(output.contains("Nationality: -"));
    }

    #[test]
    fn json_output_round_trips_through_serde() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_result(&sample_result()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["record"]["name"], "Jane Doe");
        assert_eq!(value["experience"]["total"], "3 years 5 months");
    }

    #[test]
    fn renderer_dispatches_on_format() {
        let renderer = ResultRenderer::with_options(false, false, false);
        let result = sample_result();

        let console = renderer.render(&result, &OutputFormat::Console).unwrap();
        let json = renderer.render(&result, &OutputFormat::Json).unwrap();

        assert!(console.contains("CV EXTRACTION"));
        assert!(json.starts_with('{'));
    }
}
