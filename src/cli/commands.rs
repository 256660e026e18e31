//! Command dispatch: wires CLI arguments to the conversion service.

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::{node_label, ConversionService, Input, IoResultExt};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::{self, Node};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    let config_dir = resolve_config_dir(cli.config_dir.as_deref())?;

    match command {
        Commands::Build {
            input,
            sort,
            relevel,
        } => cmd_build(&config_dir, input, sort.as_deref(), *relevel),
        Commands::Flatten { input } => cmd_flatten(&config_dir, input),
        Commands::Show { input, flat, label } => {
            cmd_show(&config_dir, input, *flat, label.as_deref())
        }
        Commands::Config { command } => cmd_config(&config_dir, command),
        Commands::Completion { shell } => {
            cmd_completion(*shell);
            Ok(())
        }
    }
}

fn resolve_config_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(std::env::current_dir().with_context("resolve working directory", &".")?),
    }
}

fn service(config_dir: &Path) -> CliResult<ConversionService> {
    let settings = Settings::load(Some(config_dir))?;
    debug!(?settings, "effective settings");
    Ok(ConversionService::new(settings))
}

#[instrument(level = "debug")]
fn cmd_build(config_dir: &Path, input: &Path, sort: Option<&str>, relevel: bool) -> CliResult<()> {
    let service = service(config_dir)?;
    let nodes = service.read_nodes(&Input::from_arg(input))?;
    let roots = service.build(nodes, sort, relevel.then_some(true))?;
    output::info(&service.to_json(&roots)?);
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_flatten(config_dir: &Path, input: &Path) -> CliResult<()> {
    let service = service(config_dir)?;
    let roots = service.read_nodes(&Input::from_arg(input))?;
    let flat = service.flatten(roots);
    output::info(&service.to_json(&flat)?);
    Ok(())
}

#[instrument(level = "debug")]
fn cmd_show(config_dir: &Path, input: &Path, flat: bool, label: Option<&str>) -> CliResult<()> {
    let service = service(config_dir)?;
    let source = Input::from_arg(input);
    let mut roots = service.read_nodes(&source)?;
    if flat {
        roots = service.build(roots, None, Some(true))?;
    }

    let label_of = |node: &Node| node_label(node, label);
    output::info(&domain::render_forest(&roots, &source.to_string(), &label_of));
    output::header(&service.summary(&roots));
    Ok(())
}

fn cmd_config(config_dir: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(config_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no home directory, global config unavailable"),
            }
            output::action("local", &local_config_path(config_dir).display());
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".into())
                })?
            } else {
                local_config_path(config_dir)
            };
            if path.exists() {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context("create config directory", &parent.display())?;
            }
            std::fs::write(&path, Settings::template())
                .with_context("write config", &path.display())?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
