//! Mask, check and categories commands

use std::io::Read;
use std::process::ExitCode;

use anyhow::{Context, Result};

use super::output;
use crate::privacy::{Category, Masker, NikkiConfig};

/// Where the journal text comes from
#[derive(Debug, clap::Args)]
pub struct InputArgs {
    /// Text to mask
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File to read and mask
    #[arg(long, conflicts_with = "text")]
    pub file: Option<String>,
}

/// Arguments for the mask command
#[derive(Debug, clap::Args)]
pub struct MaskArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Show only matches without masking
    #[arg(long)]
    pub matches_only: bool,

    /// Show audit trail
    #[arg(long)]
    pub audit: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check command
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the categories command
#[derive(Debug, clap::Args)]
pub struct CategoriesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the mask command
pub fn run(args: MaskArgs, config: &NikkiConfig) -> Result<ExitCode> {
    let input = get_input(&args.input)?;
    let masker = Masker::new();
    let preview_len = config.output.preview_len;

    let rendered = if args.json {
        let result = masker.mask_with_audit_preview(&input, preview_len);
        output::format_mask_json(&input, &result, args.audit)?
    } else if args.matches_only {
        output::format_matches(&masker.find_personal_info(&input), preview_len)
    } else if args.audit || config.output.audit {
        output::format_audit(&masker.mask_with_audit_preview(&input, preview_len))
    } else {
        output::format_masked(&input, &masker.mask(&input))
    };

    println!("{}", rendered);
    Ok(ExitCode::SUCCESS)
}

/// Run the check command
///
/// Exits with status 1 when the text contains personal information, so it
/// can gate sharing in scripts.
pub fn run_check(args: CheckArgs, config: &NikkiConfig) -> Result<ExitCode> {
    let input = get_input(&args.input)?;
    let found = Masker::new().find_personal_info(&input);

    if args.json {
        let json = serde_json::json!({
            "contains_personal_info": !found.is_empty(),
            "match_count": found.len(),
            "categories": found.iter().map(|(c, _)| *c).collect::<Vec<Category>>(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!(
            "{}",
            output::format_matches(&found, config.output.preview_len)
        );
    }

    if found.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Run the categories command
pub fn run_categories(args: CategoriesArgs) -> Result<ExitCode> {
    if args.json {
        let categories: Vec<_> = Category::ALL
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.id(),
                    "label": c.label(),
                    "placeholder": c.placeholder(),
                    "description": c.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        println!("{}", output::format_categories());
    }

    Ok(ExitCode::SUCCESS)
}

fn get_input(args: &InputArgs) -> Result<String> {
    match (&args.text, &args.file) {
        (Some(text), None) => Ok(text.clone()),
        (None, Some(file)) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read file: {}", file)),
        (None, None) => {
            if atty::is(atty::Stream::Stdin) {
                anyhow::bail!("Either --text or --file is required (or pipe text on stdin)");
            }
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
        (Some(_), Some(_)) => {
            anyhow::bail!("Cannot specify both --text and --file")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_input_text() {
        let args = InputArgs {
            text: Some("東京都".to_string()),
            file: None,
        };
        assert_eq!(get_input(&args).unwrap(), "東京都");
    }

    #[test]
    fn test_get_input_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entry.txt");
        std::fs::write(&path, "博多に行った\n").unwrap();

        let args = InputArgs {
            text: None,
            file: Some(path.display().to_string()),
        };
        assert_eq!(get_input(&args).unwrap(), "博多に行った\n");
    }

    #[test]
    fn test_get_input_both_is_error() {
        let args = InputArgs {
            text: Some("a".to_string()),
            file: Some("b".to_string()),
        };
        assert!(get_input(&args).is_err());
    }

    #[test]
    fn test_get_input_missing_file() {
        let args = InputArgs {
            text: None,
            file: Some("/definitely/not/here.txt".to_string()),
        };
        let err = get_input(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read file"));
    }
}
