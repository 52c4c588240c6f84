use std::any::Any;
use std::io::Write;
use std::panic;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use kpilens::args::{parse_args, ParsedArgs};
use kpilens::colors::Painter;
use kpilens::config::AuditConfig;
use kpilens::types::OutputMode;
use kpilens::{audit, ingest, output};

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn resolve_config(parsed: &ParsedArgs) -> Result<AuditConfig> {
    let mut config = match &parsed.config_path {
        Some(path) => AuditConfig::load_from_path(path).map_err(|e| anyhow!(e))?,
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            AuditConfig::load(&cwd).map_err(|e| anyhow!(e))?
        }
    };

    if let Some(margin) = parsed.vanity_margin {
        config.vanity_margin = margin;
    }
    if let Some(min_value) = parsed.min_value {
        config.min_value = min_value;
    }
    if let Some(days) = parsed.recent_days {
        config.recent_days = days;
    }
    if let Some(days) = parsed.moderate_days {
        config.moderate_days = days;
    }
    config.validate().map_err(|e| anyhow!(e))?;
    Ok(config)
}

fn run(parsed: ParsedArgs) -> Result<()> {
    let input = parsed
        .input
        .clone()
        .ok_or_else(|| anyhow!("missing input CSV path; run `kpilens --help` for usage"))?;

    let config = resolve_config(&parsed)?;
    let records = ingest::load_records(&input)?;

    let records = if parsed.departments.is_empty() {
        records
    } else {
        records
            .into_iter()
            .filter(|r| parsed.departments.iter().any(|d| d == &r.department))
            .collect()
    };

    let report = audit::run_audit(&records, &config, parsed.top_n);

    if parsed.verbose && report.skipped > 0 {
        eprintln!(
            "[kpilens][warn] {} record(s) skipped for missing department or metric name",
            report.skipped
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match parsed.output {
        OutputMode::Human => {
            let painter = Painter::new(parsed.color);
            output::render_human(&report, &painter, &mut out)
                .context("cannot write report")?;
        }
        OutputMode::Json => {
            output::render_json(&report, &mut out).context("cannot write report")?;
        }
    }
    out.flush().ok();
    Ok(())
}

fn main() {
    install_broken_pipe_handler();

    let parsed = match parse_args() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if parsed.show_help {
        println!("{USAGE}");
        return;
    }
    if parsed.show_version {
        println!("kpilens {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(err) = run(parsed) {
        eprintln!("kpilens: {err:#}");
        std::process::exit(1);
    }
}

const USAGE: &str = "kpilens - KPI audit: find vanity metrics, keep the ones that matter\n\n\
Usage: kpilens <metrics.csv> [options]\n\n\
Input:\n  \
  <metrics.csv>             Inventory export with Department, Metric_Name,\n                            \
Visible_in_Dashboard, Used_in_Decision_Making,\n                            \
Executive_Requested, Last_Reviewed,\n                            \
Metric_Last_Used_For_Decision, Interpretation_Notes\n\n\
Analysis options:\n  \
  -d, --department <name>   Restrict to a department (repeatable)\n  \
  --top <N>                 Keep-list length per department (default 3)\n  \
  --vanity-margin <n>       Vanity wins at vanity >= value + margin (default 2)\n  \
  --min-value <n>           Minimum value score for Valuable (default 2)\n  \
  --recent-days <n>         Upper bound of the Recent bucket (default 30)\n  \
  --moderate-days <n>       Upper bound of the Moderate bucket (default 180)\n  \
  --config <path>           TOML config (default: ./kpilens.toml if present)\n\n\
Output:\n  \
  --json                    Machine-readable report (includes active thresholds)\n  \
  --color <mode>            Colorize output: auto|always|never (default auto)\n  \
  --verbose                 Report skipped records on stderr\n\n\
Common:\n  \
  --help, -h                Show this message\n  \
  --version, -V             Show version\n\n\
Examples:\n  \
  kpilens metrics.csv                        # Full audit, human-readable\n  \
  kpilens metrics.csv --json | jq .          # Pipe the JSON report\n  \
  kpilens metrics.csv -d Sales --top 5       # Sales only, longer keep list\n  \
  kpilens metrics.csv --vanity-margin 3      # Stricter vanity call\n";
