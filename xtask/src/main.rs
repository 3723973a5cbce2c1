use anyhow::Context;
use blueprint_load::{ConfigMerger, config, load_blueprint};
use blueprint_types::{BlueprintApi, parse_blueprint};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use fs_err as fs;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

const BLUEPRINT_V1_SCHEMA: &str = include_str!("../../schemas/blueprint.v1.schema.json");

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the blueprint API identifiers known to this workspace.
    PrintApis,
    /// Decode blueprint files through the version dispatcher.
    Check {
        files: Vec<Utf8PathBuf>,

        /// Accept test-only API identifiers.
        #[arg(long, default_value_t = false)]
        allow_test_apis: bool,

        /// Directory searched for blueprint.toml.
        #[arg(long, default_value = ".")]
        config_root: Utf8PathBuf,
    },
    /// Validate v1 blueprint files against the JSON schema.
    Validate {
        files: Vec<Utf8PathBuf>,

        /// Schema to validate against (default: the bundled v1 schema).
        #[arg(long)]
        schema: Option<Utf8PathBuf>,
    },
}

fn main() -> ExitCode {
    match real_main() {
        Ok(true) => ExitCode::from(0),
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<bool> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintApis => {
            for api in BlueprintApi::known() {
                println!("{api}");
            }
            Ok(true)
        }
        Command::Check {
            files,
            allow_test_apis,
            config_root,
        } => cmd_check(&files, allow_test_apis, &config_root),
        Command::Validate { files, schema } => cmd_validate(&files, schema.as_deref()),
    }
}

fn cmd_check(files: &[Utf8PathBuf], allow_test_apis: bool, config_root: &Utf8Path) -> anyhow::Result<bool> {
    let file_config = config::load_or_default(config_root).context("load blueprint.toml config")?;
    let merged = ConfigMerger::new(file_config)
        .allow_test_apis(allow_test_apis)
        .merge();
    debug!(?merged, "merged config");

    let mut all_ok = true;
    for path in files {
        match load_blueprint(path, &merged.dispatch) {
            Ok(blueprint) => println!("ok {} {}", path, blueprint.api()),
            Err(e) => {
                all_ok = false;
                println!("fail {}: {:#}", path, e);
            }
        }
    }
    Ok(all_ok)
}

fn cmd_validate(files: &[Utf8PathBuf], schema_path: Option<&Utf8Path>) -> anyhow::Result<bool> {
    let schema_text = match schema_path {
        Some(path) => fs::read_to_string(path).with_context(|| format!("read schema {}", path))?,
        None => BLUEPRINT_V1_SCHEMA.to_string(),
    };
    let schema: serde_json::Value =
        serde_json::from_str(&schema_text).context("parse schema JSON")?;

    let mut all_ok = true;
    for path in files {
        let raw = fs::read(path).with_context(|| format!("read {}", path))?;
        let problems = validate_v1(&schema, &raw)?;
        if problems.is_empty() {
            println!("valid {}", path);
        } else {
            all_ok = false;
            for problem in problems {
                println!("invalid {}: {}", path, problem);
            }
        }
    }
    Ok(all_ok)
}

/// Returns a list of problems; empty means the document is a valid v1 blueprint.
fn validate_v1(schema: &serde_json::Value, raw: &[u8]) -> anyhow::Result<Vec<String>> {
    let general = match parse_blueprint(raw) {
        Ok(general) => general,
        Err(e) => return Ok(vec![format!("{e}: {}", e.cause())]),
    };
    if general.api != BlueprintApi::V1 {
        return Ok(vec![format!(
            "schema validation only covers API v1, found '{}'",
            general.api
        )]);
    }

    let instance: serde_json::Value = serde_json::from_slice(raw).context("parse blueprint JSON")?;
    let validator =
        jsonschema::validator_for(schema).map_err(|e| anyhow::anyhow!("invalid schema: {e}"))?;
    Ok(validator
        .iter_errors(&instance)
        .map(|e| e.to_string())
        .collect())
}
