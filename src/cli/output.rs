use anyhow::Result;
use colored::Colorize;

use crate::privacy::{Category, MaskResult};
use crate::utils::{pad_display, truncate};

/// Width of the category column, in display columns
const CATEGORY_COLUMN: usize = 16;

fn nothing_found() -> String {
    "No personal information detected.".green().to_string()
}

/// Masked text, or a note that nothing changed
pub fn format_masked(input: &str, masked: &str) -> String {
    if masked == input {
        nothing_found()
    } else {
        format!("{}\n{}", "Masked output:".bold(), masked)
    }
}

/// One line per match: category label and a preview of the matched text
pub fn format_matches(matches: &[(Category, String)], preview_len: usize) -> String {
    if matches.is_empty() {
        return nothing_found();
    }

    let mut output = format!("{} {} found:\n", "Personal information".yellow(), matches.len());
    for (category, matched) in matches {
        output.push_str(&format!(
            "\n  {} {}",
            pad_display(category.label(), CATEGORY_COLUMN).cyan(),
            truncate(matched, preview_len).red()
        ));
    }
    output
}

/// Audit trail followed by the masked text
pub fn format_audit(result: &MaskResult) -> String {
    if result.mask_count == 0 {
        return nothing_found();
    }

    let mut output = format!("{} {} spans masked:\n\n", "Audit Trail:".bold(), result.mask_count);
    for event in &result.events {
        output.push_str(&format!(
            "  Category: {}  Chars: {:?}  Preview: {}  →  {}\n",
            pad_display(event.category.label(), CATEGORY_COLUMN).cyan(),
            event.char_range,
            event.preview.red(),
            event.replacement.green()
        ));
    }
    output.push_str(&format!("\n{}\n{}", "Masked output:".bold(), result.text));
    output
}

/// JSON document for `mask --json`
pub fn format_mask_json(input: &str, result: &MaskResult, audit: bool) -> Result<String> {
    let json = if audit {
        serde_json::to_value(result)?
    } else {
        serde_json::json!({
            "input_length": input.chars().count(),
            "output": result.text,
            "mask_count": result.mask_count,
            "categories": result.events.iter().map(|e| e.category).collect::<Vec<_>>(),
        })
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Table of every category and its placeholder
pub fn format_categories() -> String {
    let mut output = format!("{}\n{}\n", "Masked Categories".bold(), "=".repeat(60));
    for category in Category::ALL {
        output.push_str(&format!(
            "{} {} {}\n",
            pad_display(category.id(), CATEGORY_COLUMN).cyan(),
            pad_display(category.placeholder(), CATEGORY_COLUMN).green(),
            category.description()
        ));
    }
    output
}
