//! Command-line argument parsing.
//!
//! Hand-rolled over `std::env::args`, returning descriptive `Err(String)`s
//! for anything malformed. Threshold overrides stay `Option`s here; they are
//! merged into the config (and validated) by the binary.

use std::path::PathBuf;

use crate::types::{ColorMode, OutputMode, DEFAULT_TOP_N};

#[derive(Debug)]
pub struct ParsedArgs {
    pub input: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub departments: Vec<String>,
    pub top_n: usize,
    pub color: ColorMode,
    pub output: OutputMode,
    pub vanity_margin: Option<i32>,
    pub min_value: Option<i32>,
    pub recent_days: Option<u32>,
    pub moderate_days: Option<u32>,
    pub verbose: bool,
    pub show_help: bool,
    pub show_version: bool,
}

impl Default for ParsedArgs {
    fn default() -> Self {
        Self {
            input: None,
            config_path: None,
            departments: Vec::new(),
            top_n: DEFAULT_TOP_N,
            color: ColorMode::Auto,
            output: OutputMode::Human,
            vanity_margin: None,
            min_value: None,
            recent_days: None,
            moderate_days: None,
            verbose: false,
            show_help: false,
            show_version: false,
        }
    }
}

fn parse_color_mode(raw: &str) -> Result<ColorMode, String> {
    match raw {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err("--color expects auto|always|never".to_string()),
    }
}

fn parse_positive(raw: &str, flag: &str) -> Result<usize, String> {
    let value = raw
        .parse::<usize>()
        .map_err(|_| format!("{flag} expects a positive integer"))?;
    if value == 0 {
        Err(format!("{flag} expects a positive integer"))
    } else {
        Ok(value)
    }
}

fn next_value(
    iter: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<String, String> {
    iter.next().ok_or_else(|| format!("{flag} expects a value"))
}

pub fn parse_args() -> Result<ParsedArgs, String> {
    parse_from(std::env::args().skip(1))
}

pub fn parse_from(args: impl IntoIterator<Item = String>) -> Result<ParsedArgs, String> {
    let mut parsed = ParsedArgs::default();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => parsed.show_help = true,
            "--version" | "-V" => parsed.show_version = true,
            "--verbose" => parsed.verbose = true,
            "--json" => parsed.output = OutputMode::Json,
            "--color" => {
                let value = next_value(&mut iter, "--color")?;
                parsed.color = parse_color_mode(&value)?;
            }
            "--department" | "-d" => {
                let value = next_value(&mut iter, "--department")?;
                parsed.departments.push(value);
            }
            "--top" => {
                let value = next_value(&mut iter, "--top")?;
                parsed.top_n = parse_positive(&value, "--top")?;
            }
            "--config" => {
                let value = next_value(&mut iter, "--config")?;
                parsed.config_path = Some(PathBuf::from(value));
            }
            "--vanity-margin" => {
                let value = next_value(&mut iter, "--vanity-margin")?;
                parsed.vanity_margin = Some(
                    value
                        .parse()
                        .map_err(|_| "--vanity-margin expects an integer".to_string())?,
                );
            }
            "--min-value" => {
                let value = next_value(&mut iter, "--min-value")?;
                parsed.min_value = Some(
                    value
                        .parse()
                        .map_err(|_| "--min-value expects an integer".to_string())?,
                );
            }
            "--recent-days" => {
                let value = next_value(&mut iter, "--recent-days")?;
                parsed.recent_days = Some(
                    value
                        .parse()
                        .map_err(|_| "--recent-days expects a non-negative integer".to_string())?,
                );
            }
            "--moderate-days" => {
                let value = next_value(&mut iter, "--moderate-days")?;
                parsed.moderate_days = Some(
                    value
                        .parse()
                        .map_err(|_| "--moderate-days expects a non-negative integer".to_string())?,
                );
            }
            other if other.starts_with("--color=") => {
                let value = other.trim_start_matches("--color=");
                parsed.color = parse_color_mode(value)?;
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(format!(
                    "unknown option '{other}'; run `kpilens --help` for usage"
                ));
            }
            _ => {
                if parsed.input.is_some() {
                    return Err(format!(
                        "unexpected extra argument '{arg}'; one input CSV is expected"
                    ));
                }
                parsed.input = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ParsedArgs, String> {
        parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_without_args() {
        let parsed = parse(&[]).expect("parse");
        assert!(parsed.input.is_none());
        assert_eq!(parsed.top_n, DEFAULT_TOP_N);
        assert_eq!(parsed.output, OutputMode::Human);
        assert_eq!(parsed.color, ColorMode::Auto);
    }

    #[test]
    fn positional_is_the_input_csv() {
        let parsed = parse(&["metrics.csv", "--json"]).expect("parse");
        assert_eq!(parsed.input, Some(PathBuf::from("metrics.csv")));
        assert_eq!(parsed.output, OutputMode::Json);
    }

    #[test]
    fn two_positionals_are_rejected() {
        let err = parse(&["a.csv", "b.csv"]).unwrap_err();
        assert!(err.contains("one input CSV"));
    }

    #[test]
    fn departments_accumulate() {
        let parsed =
            parse(&["metrics.csv", "-d", "Sales", "--department", "Ops"]).expect("parse");
        assert_eq!(parsed.departments, vec!["Sales", "Ops"]);
    }

    #[test]
    fn color_accepts_both_spellings() {
        assert_eq!(
            parse(&["--color", "never"]).expect("parse").color,
            ColorMode::Never
        );
        assert_eq!(
            parse(&["--color=always"]).expect("parse").color,
            ColorMode::Always
        );
        assert!(parse(&["--color", "sometimes"]).is_err());
    }

    #[test]
    fn top_requires_a_positive_integer() {
        assert_eq!(parse(&["--top", "5"]).expect("parse").top_n, 5);
        assert!(parse(&["--top", "0"]).is_err());
        assert!(parse(&["--top", "many"]).is_err());
        assert!(parse(&["--top"]).is_err());
    }

    #[test]
    fn threshold_overrides_parse() {
        let parsed = parse(&[
            "metrics.csv",
            "--vanity-margin",
            "3",
            "--min-value",
            "1",
            "--recent-days",
            "14",
            "--moderate-days",
            "90",
        ])
        .expect("parse");
        assert_eq!(parsed.vanity_margin, Some(3));
        assert_eq!(parsed.min_value, Some(1));
        assert_eq!(parsed.recent_days, Some(14));
        assert_eq!(parsed.moderate_days, Some(90));
    }

    #[test]
    fn unknown_flags_are_descriptive_errors() {
        let err = parse(&["--frobnicate"]).unwrap_err();
        assert!(err.contains("--frobnicate"));
        assert!(err.contains("--help"));
    }
}
