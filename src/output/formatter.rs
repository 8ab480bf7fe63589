//! Output formatters for offline analysis reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for piping into other tools
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing results
pub struct MarkdownFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
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
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_count(&self, count: usize) -> String {
        self.colorize(&format!("×{}", count), Color::Yellow)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("CHAT MESSAGE ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Model: {} | {} characters | {}ms\n",
            chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
                .format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.model,
            report.metadata.text_characters,
            report.metadata.processing_time_ms
        ));

        if report.data.is_empty() {
            output.push_str(&self.colorize("\nNo nouns, verbs or entities found\n", Color::Yellow));
            return Ok(output);
        }

        output.push_str(&self.format_header("Nouns", 2));
        if report.data.nouns.is_empty() {
            output.push_str("  (none)\n");
        }
        for noun in &report.data.nouns {
            output.push_str(&format!(
                "  • {} {}\n",
                self.colorize(&noun.noun, Color::Cyan),
                self.format_count(noun.count)
            ));
        }

        output.push_str(&self.format_header("Verbs", 2));
        if report.data.verbs.is_empty() {
            output.push_str("  (none)\n");
        }
        for verb in &report.data.verbs {
            output.push_str(&format!(
                "  • {} {}\n",
                self.colorize(&verb.verb, Color::Magenta),
                self.format_count(verb.count)
            ));
        }

        output.push_str(&self.format_header("Entities", 2));
        if report.data.entities.is_empty() {
            output.push_str("  (none)\n");
        }
        for entity in &report.data.entities {
            output.push_str(&format!(
                "  • {} {}: {}\n",
                self.colorize(&entity.entity, Color::Green),
                self.format_count(entity.count),
                entity.texts.join(", ")
            ));
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
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::from("# Chat Message Analysis\n\n");
        output.push_str(&format!(
            "_Model `{}`, {} characters, {}ms_\n",
            report.metadata.model, report.metadata.text_characters, report.metadata.processing_time_ms
        ));

        output.push_str("\n## Nouns\n\n| Noun | Count |\n|------|-------|\n");
        for noun in &report.data.nouns {
            output.push_str(&format!("| {} | {} |\n", noun.noun, noun.count));
        }

        output.push_str("\n## Verbs\n\n| Verb | Count |\n|------|-------|\n");
        for verb in &report.data.verbs {
            output.push_str(&format!("| {} | {} |\n", verb.verb, verb.count));
        }

        output.push_str("\n## Entities\n\n| Entity | Count | Texts |\n|--------|-------|-------|\n");
        for entity in &report.data.entities {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                entity.entity,
                entity.count,
                entity.texts.join(", ")
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::{AnalysisResponse, EntityAggregate, NounAggregate, VerbAggregate};
    use tempfile::TempDir;

    fn sample_report() -> AnalysisReport {
        let data = AnalysisResponse {
            nouns: vec![NounAggregate { noun: "el perro".to_string(), count: 1 }],
            verbs: vec![VerbAggregate { verb: "correr".to_string(), count: 1 }],
            entities: vec![EntityAggregate {
                entity: "LOC".to_string(),
                count: 2,
                texts: vec!["lima".to_string(), "perú".to_string()],
            }],
        };
        AnalysisReport::new("El perro corre en Lima, Perú", "es_core_lexicon", data, 1)
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false).format_report(&sample_report()).unwrap();
        assert!(output.contains("CHAT MESSAGE ANALYSIS"));
        assert!(output.contains("• el perro ×1"));
        assert!(output.contains("• LOC ×2: lima, perú"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_console_empty_analysis() {
        let report = AnalysisReport::new("¡hola!", "es_core_lexicon", AnalysisResponse::default(), 0);
        let output = ConsoleFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains("No nouns, verbs or entities found"));
        assert!(!output.contains("Nouns\n"));
    }

    #[test]
    fn test_json_contains_api_shape() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["data"]["nouns"][0]["noun"], "el perro");
        assert_eq!(value["data"]["entities"][0]["texts"][1], "perú");
        assert_eq!(value["metadata"]["model"], "es_core_lexicon");
    }

    #[test]
    fn test_markdown_tables() {
        let output = MarkdownFormatter.format_report(&sample_report()).unwrap();
        assert!(output.starts_with("# Chat Message Analysis"));
        assert!(output.contains("| correr | 1 |"));
        assert!(output.contains("| LOC | 2 | lima, perú |"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, true);
        let report = sample_report();
        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.contains("\n  \"metadata\""));
        assert_eq!(generator.json_formatter.supports_format(), OutputFormat::Json);
    }

    #[test]
    fn test_save_report_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports").join("analysis.md");
        save_report_to_file("contenido", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "contenido");
    }
}
