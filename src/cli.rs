use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::transform::ImportMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Import(ImportArgs),
    Help,
}

/// Overrides given on the command line. `None` falls back to the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportArgs {
    pub mode: Option<ImportMode>,
    pub file: Option<PathBuf>,
    pub categories: Option<Vec<String>>,
    pub name_template: Option<String>,
    pub dry_run: bool,
}

/// Parse the arguments that follow the program name.
///
/// Supported forms:
///   storyload
///   storyload --labeled -f stories.csv
///   storyload --labeled --categories api,web,qa
///   storyload --name-template "[{app}] {usecase}" --dry-run
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut parsed = ImportArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "help" | "-h" | "--help" => return Ok(Command::Help),
            "--single" => parsed.mode = Some(ImportMode::Single),
            "--labeled" => parsed.mode = Some(ImportMode::Labeled),
            "--dry-run" => parsed.dry_run = true,
            "-f" | "--file" => {
                parsed.file = Some(PathBuf::from(flag_value(args, &mut i)?));
            }
            "--categories" => {
                let categories: Vec<String> = flag_value(args, &mut i)?
                    .split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                if categories.is_empty() {
                    bail!("--categories needs at least one category");
                }
                parsed.categories = Some(categories);
            }
            "--name-template" => {
                parsed.name_template = Some(flag_value(args, &mut i)?.to_string());
            }
            other => bail!("Unknown argument: {other}\n\nRun `storyload --help` for usage."),
        }
        i += 1;
    }

    Ok(Command::Import(parsed))
}

fn flag_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value.as_str()),
        None => bail!("Missing value for {flag} flag"),
    }
}

pub fn print_help() {
    println!("storyload: create Pivotal Tracker stories from a CSV file\n");
    println!("USAGE:");
    println!("  PROJECT_ID=<id> storyload [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --single                One story per row, named 【app】usecase (default)");
    println!("  --labeled               One story per category per row, labeled [category, app]");
    println!("  -f, --file <path>       CSV file to read (default ./pivotalStories.csv)");
    println!("  --categories <a,b,c>    Categories for --labeled (default backend,frontend,style)");
    println!("  --name-template <tpl>   Story name, with {{app}} and {{usecase}} placeholders");
    println!("  --dry-run               Print the stories without sending them");
    println!();
    println!("ENVIRONMENT:");
    println!("  PROJECT_ID      Target project (required)");
    println!("  TRACKER_TOKEN   API token; prompted for when unset");
    println!();
    println!("CONFIG:");
    println!("  ~/.storyload/config.toml");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    fn import(strs: &[&str]) -> ImportArgs {
        match parse_args(&args(strs)).unwrap() {
            Command::Import(a) => a,
            Command::Help => panic!("expected import command"),
        }
    }

    #[test]
    fn parse_no_args_uses_defaults() {
        assert_eq!(import(&[]), ImportArgs::default());
    }

    #[test]
    fn parse_labeled_with_file() {
        let a = import(&["--labeled", "-f", "stories.csv"]);
        assert_eq!(a.mode, Some(ImportMode::Labeled));
        assert_eq!(a.file, Some(PathBuf::from("stories.csv")));
    }

    #[test]
    fn parse_last_mode_flag_wins() {
        let a = import(&["--labeled", "--single"]);
        assert_eq!(a.mode, Some(ImportMode::Single));
    }

    #[test]
    fn parse_categories_trims_and_drops_blanks() {
        let a = import(&["--categories", " api, web ,,qa"]);
        assert_eq!(
            a.categories,
            Some(vec!["api".to_string(), "web".to_string(), "qa".to_string()])
        );
    }

    #[test]
    fn parse_empty_categories_fails() {
        let result = parse_args(&args(&["--categories", " , "]));
        assert!(result.is_err());
    }

    #[test]
    fn parse_name_template_and_dry_run() {
        let a = import(&["--name-template", "[{app}] {usecase}", "--dry-run"]);
        assert_eq!(a.name_template.as_deref(), Some("[{app}] {usecase}"));
        assert!(a.dry_run);
    }

    #[test]
    fn parse_help_anywhere() {
        assert_eq!(
            parse_args(&args(&["--labeled", "--help"])).unwrap(),
            Command::Help
        );
        assert_eq!(parse_args(&args(&["help"])).unwrap(), Command::Help);
    }

    #[test]
    fn parse_missing_file_value_fails() {
        let result = parse_args(&args(&["--file"]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Missing value"));
    }

    #[test]
    fn parse_unknown_flag_fails() {
        let result = parse_args(&args(&["--parallel"]));
        assert!(result.unwrap_err().to_string().contains("--parallel"));
    }

    #[test]
    fn parse_preserves_unicode_paths() {
        let a = import(&["-f", "ストーリー.csv"]);
        assert_eq!(a.file, Some(PathBuf::from("ストーリー.csv")));
    }
}
