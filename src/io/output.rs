//! Summary output for analysis results

use colored::*;
use std::io::Write;

use crate::core::Severity;
use crate::result::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_result(&mut self, result: &AnalysisResult) -> anyhow::Result<()>;
}

pub fn create_writer<W: Write + 'static>(writer: W, format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_result(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(result)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn severity_label(severity: Severity) -> ColoredString {
        match severity {
            Severity::Error => "error".red().bold(),
            Severity::WarningHigh => "high".yellow().bold(),
            Severity::WarningNormal => "normal".yellow(),
            Severity::WarningLow => "low".normal(),
        }
    }

    fn write_counts(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} total, {} new, {} fixed",
            result.total_size(),
            result.new_size(),
            result.fixed_size()
        )?;

        for severity in Severity::descending() {
            let total = result.total_size_of(severity);
            let new = result.new_size_of(severity);
            if total == 0 && new == 0 {
                continue;
            }
            writeln!(
                self.writer,
                "  {:>8}: {} total, {} new",
                Self::severity_label(severity),
                total,
                new
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_result(&mut self, result: &AnalysisResult) -> anyhow::Result<()> {
        let headline = format!("{result}");
        writeln!(self.writer, "{}", headline.bold())?;
        self.write_counts(result)?;

        let outcome = if result.is_successful() {
            result.overall_result().to_string().green()
        } else {
            result.overall_result().to_string().red()
        };
        writeln!(self.writer, "Result: {outcome}")?;

        if let Some(since) = result.no_issues_since() {
            writeln!(self.writer, "No issues since build {since}")?;
        }
        if let Some(since) = result.successful_since() {
            writeln!(self.writer, "Successful since build {since}")?;
        }
        if let Some(reference) = result.reference() {
            writeln!(
                self.writer,
                "Reference: {} #{}",
                reference.job, reference.build
            )?;
        }

        for message in result.info_messages() {
            writeln!(self.writer, "{} {message}", "info:".blue())?;
        }
        for message in result.error_messages() {
            writeln!(self.writer, "{} {message}", "error:".red())?;
        }
        Ok(())
    }
}
