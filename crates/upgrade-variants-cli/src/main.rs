//! Binary entrypoint for shell-driven upgrade harnesses.
//!
//! Versions default to `FROM_VERSION` / `TO_VERSION`; logs go to stderr and
//! honour `RUST_LOG`.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use upgrade_variants::{builtin, UpgradeEnv, VariantCatalog, VariantOutcome};

#[derive(Debug, Parser)]
#[command(name = "upgrade-variants", version, about = "Adjudicate pre/post upgrade value changes")]
struct Cli {
    /// Extra YAML catalogue merged after the built-in one
    #[arg(long, global = true, env = "UPGRADE_VARIANTS_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check one pre/post value pair; exits 1 on an unexpected change
    Check {
        component: String,
        #[arg(allow_hyphen_values = true)]
        pre: String,
        #[arg(allow_hyphen_values = true)]
        post: String,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Print the attributes left after dropping deprecated ones
    Strip {
        component: String,
        #[arg(long)]
        to: Option<String>,
        #[arg(allow_hyphen_values = true)]
        attrs: Vec<String>,
    },
    /// List catalogued components
    Components,
}

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    component: &'a str,
    pre: &'a str,
    post: &'a str,
    from: Option<&'a str>,
    to: Option<&'a str>,
    pass: bool,
    outcome: &'a VariantOutcome,
}

#[derive(Debug, Serialize)]
struct ComponentSummary<'a> {
    component: &'a str,
    rows: usize,
}

/// Catalogued or identical values
const EXIT_PASS: u8 = 0;
/// An unexplained pre/post difference
const EXIT_UNEXPECTED: u8 = 1;
/// Harness faults such as bad versions or an unreadable catalogue
const EXIT_HARNESS_ERROR: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    ExitCode::from(execute(Cli::parse()))
}

fn execute(cli: Cli) -> u8 {
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            EXIT_HARNESS_ERROR
        }
    }
}

fn load_catalog(path: Option<&PathBuf>) -> anyhow::Result<VariantCatalog> {
    let mut catalog = builtin::catalog().clone();
    if let Some(path) = path {
        let extra = VariantCatalog::load(path)
            .with_context(|| format!("loading catalog override {}", path.display()))?;
        catalog.merge(extra);
    }
    Ok(catalog)
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let catalog = load_catalog(cli.catalog.as_ref())?;

    match cli.command {
        Command::Check { component, pre, post, from, to } => {
            let env = UpgradeEnv::from_env().with_overrides(from, to);
            let outcome = env.check_variant(&catalog, &component, &pre, &post)?;
            let report = CheckReport {
                component: &component,
                pre: &pre,
                post: &post,
                from: env.from_version.as_deref(),
                to: env.to_version.as_deref(),
                pass: outcome.is_pass(),
                outcome: &outcome,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(if outcome.is_pass() { EXIT_PASS } else { EXIT_UNEXPECTED })
        }
        Command::Strip { component, to, attrs } => {
            let env = UpgradeEnv::from_env().with_overrides(None, to);
            let remaining = env.strip_deprecated(&catalog, &component, attrs);
            println!("{}", serde_json::to_string(&remaining)?);
            Ok(EXIT_PASS)
        }
        Command::Components => {
            let summary: Vec<ComponentSummary> = catalog
                .components()
                .map(|component| ComponentSummary {
                    component,
                    rows: catalog.rows(component).len(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(EXIT_PASS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_command() {
        let cli = Cli::parse_from([
            "upgrade-variants",
            "check",
            "role",
            "viewer",
            "customized viewer",
            "--from",
            "6.2",
            "--to",
            "6.3",
        ]);
        match cli.command {
            Command::Check { component, post, from, to, .. } => {
                assert_eq!(component, "role");
                assert_eq!(post, "customized viewer");
                assert_eq!(from.as_deref(), Some("6.2"));
                assert_eq!(to.as_deref(), Some("6.3"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_values() {
        let cli = Cli::parse_from([
            "upgrade-variants",
            "check",
            "subscription",
            "-1",
            "unlimited",
            "--from",
            "6.2",
            "--to",
            "6.3",
        ]);
        match cli.command {
            Command::Check { pre, post, from, .. } => {
                assert_eq!(pre, "-1");
                assert_eq!(post, "unlimited");
                assert_eq!(from.as_deref(), Some("6.2"));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::parse_from(["upgrade-variants", "strip", "settings", "--to", "6.4", "-1"]);
        match cli.command {
            Command::Strip { attrs, .. } => assert_eq!(attrs, vec!["-1"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn check_args<'a>(component: &'a str, pre: &'a str, post: &'a str, from: &'a str, to: &'a str) -> Cli {
        Cli::parse_from([
            "upgrade-variants",
            "check",
            component,
            pre,
            post,
            "--from",
            from,
            "--to",
            to,
        ])
    }

    #[test]
    fn test_check_exit_codes() {
        assert_eq!(execute(check_args("subscription", "-1", "unlimited", "6.2", "6.3")), EXIT_PASS);
        assert_eq!(execute(check_args("domain", "a", "a", "6.1", "6.5")), EXIT_PASS);
        assert_eq!(execute(check_args("subscription", "-1", "0", "6.2", "6.3")), EXIT_UNEXPECTED);
        assert_eq!(
            execute(check_args("subscription", "-1", "unlimited", "6.0", "6.3")),
            EXIT_HARNESS_ERROR
        );
        assert_eq!(
            execute(check_args("subscription", "-1", "unlimited", "6.2", "7.0")),
            EXIT_HARNESS_ERROR
        );
    }

    #[test]
    fn test_check_flags_override_environment() {
        // Explicit flags decide the path whatever FROM_VERSION/TO_VERSION hold
        assert_eq!(execute(check_args("role", "viewer", "customized viewer", "6.2", "6.3")), EXIT_PASS);
        assert_eq!(
            execute(check_args("role", "viewer", "customized viewer", "6.3", "6.4")),
            EXIT_UNEXPECTED
        );
    }

    #[test]
    fn test_strip_and_components_succeed() {
        let cli = Cli::parse_from(["upgrade-variants", "strip", "settings", "--to", "6.4", "use_gravatar"]);
        assert_eq!(run(cli).unwrap(), EXIT_PASS);

        let cli = Cli::parse_from(["upgrade-variants", "components"]);
        assert_eq!(execute(cli), EXIT_PASS);
    }

    #[test]
    fn test_missing_catalog_override_is_harness_error() {
        let cli = Cli::parse_from([
            "upgrade-variants",
            "--catalog",
            "/nonexistent/catalog.yaml",
            "components",
        ]);
        assert_eq!(execute(cli), EXIT_HARNESS_ERROR);
    }

    #[test]
    fn test_parse_strip_command() {
        let cli = Cli::parse_from(["upgrade-variants", "strip", "settings", "--to", "6.4", "a", "b"]);
        match cli.command {
            Command::Strip { attrs, .. } => assert_eq!(attrs, vec!["a", "b"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_load_catalog_without_override() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog, *builtin::catalog());
    }

    #[test]
    fn test_load_catalog_missing_override() {
        let err = load_catalog(Some(&PathBuf::from("/nonexistent/catalog.yaml"))).unwrap_err();
        assert!(format!("{:#}", err).contains("loading catalog override"));
    }
}
