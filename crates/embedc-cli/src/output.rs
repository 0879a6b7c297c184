use std::io::Write;

use embedc_core::{Extraction, GeneratedResponse, MISRA_RULES};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print a generated response: dimmed header comment, then the code.
pub fn print_response(
    w: &mut dyn Write,
    response: &GeneratedResponse,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        write!(w, "{}", response.header.dimmed())?;
    } else {
        write!(w, "{}", response.header)?;
    }
    write!(w, "{}", response.code)?;
    Ok(())
}

/// One-line summary of an extraction run.
pub fn print_extraction_summary(
    w: &mut dyn Write,
    pdf_name: &str,
    extraction: &Extraction,
    color: ColorMode,
) -> std::io::Result<()> {
    let Some(backend) = extraction.backend else {
        if color.enabled() {
            writeln!(w, "{}", format!("{pdf_name}: no backend could open the document").red())?;
        } else {
            writeln!(w, "{pdf_name}: no backend could open the document")?;
        }
        return Ok(());
    };

    let summary = format!(
        "{pdf_name}: {} pages via {backend}, {} failed, {} characters",
        extraction.pages_total,
        extraction.pages_failed,
        extraction.text.len()
    );
    if color.enabled() && extraction.pages_failed > 0 {
        writeln!(w, "{}", summary.yellow())?;
    } else if color.enabled() {
        writeln!(w, "{}", summary.dimmed())?;
    } else {
        writeln!(w, "{summary}")?;
    }
    Ok(())
}

pub fn print_rules(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    for (i, rule) in MISRA_RULES.iter().enumerate() {
        if color.enabled() {
            writeln!(w, "{} {}", format!("{:>2}.", i + 1).bold(), rule)?;
        } else {
            writeln!(w, "{:>2}. {}", i + 1, rule)?;
        }
    }
    Ok(())
}

pub fn print_backends(w: &mut dyn Write, names: &[&str], color: ColorMode) -> std::io::Result<()> {
    if names.is_empty() {
        writeln!(w, "(no PDF backends compiled in)")?;
        return Ok(());
    }
    for (i, name) in names.iter().enumerate() {
        let role = if i == 0 { "primary" } else { "fallback" };
        if color.enabled() {
            writeln!(w, "{} {}", name.bold(), format!("({role})").dimmed())?;
        } else {
            writeln!(w, "{name} ({role})")?;
        }
    }
    Ok(())
}
