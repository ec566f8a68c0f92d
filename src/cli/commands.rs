//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{DomainError, Hierarchy, TreeDisplay, UnresolvedPolicy};
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `orgtree --help`".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "orgtree", &mut io::stdout());
        return Ok(());
    }

    let container = ServiceContainer::new(load_settings(cli)?);
    let data_file = resolve_data_file(cli, &container)?;
    let hierarchy = container.hierarchy_service.load(&data_file)?;

    match command {
        Commands::Manager { one, two } => cmd_manager(&hierarchy, one, two),
        Commands::Path { id } => cmd_path(&hierarchy, id),
        Commands::Tree => cmd_tree(&hierarchy),
        Commands::Info => cmd_info(&hierarchy),
        Commands::Completion { .. } => Ok(()),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let local_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| {
            CliError::Usage(format!("cannot determine current directory: {}", e))
        })?,
    };
    let mut settings = Settings::load(Some(local_dir.as_path()))?;
    if cli.skip_unresolved {
        settings.unresolved = UnresolvedPolicy::Skip;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Command line wins over configuration.
fn resolve_data_file(cli: &Cli, container: &ServiceContainer) -> CliResult<PathBuf> {
    let data_file = cli
        .data_file
        .clone()
        .or_else(|| container.settings.data_file.clone())
        .ok_or_else(|| {
            CliError::Usage(
                "no data file: pass --data-file or set data_file in .orgtree.toml".to_string(),
            )
        })?;
    if container.fs.exists(&data_file) && !container.fs.is_file(&data_file) {
        return Err(CliError::InvalidArgs(format!(
            "not a file: {}",
            data_file.display()
        )));
    }
    Ok(data_file)
}

#[instrument(skip(hierarchy))]
fn cmd_manager(hierarchy: &Hierarchy, one: &str, two: &str) -> CliResult<()> {
    let manager = hierarchy.closest_manager(one, two)?;
    output::action("Closest manager", manager);
    Ok(())
}

#[instrument(skip(hierarchy))]
fn cmd_path(hierarchy: &Hierarchy, id: &str) -> CliResult<()> {
    let paths = hierarchy.paths_to(id);
    if paths.is_empty() {
        return Err(DomainError::EmployeeNotFound(id.to_string()).into());
    }
    for path in &paths {
        let employees = hierarchy.resolve_path(path)?;
        output::info(&employees.iter().map(|e| e.id.as_str()).join(" -> "));
    }
    Ok(())
}

fn cmd_tree(hierarchy: &Hierarchy) -> CliResult<()> {
    output::info(&hierarchy.to_tree_string());
    Ok(())
}

fn cmd_info(hierarchy: &Hierarchy) -> CliResult<()> {
    output::header(&format!("Hierarchy: {}", hierarchy.source()));
    if let Some(root) = hierarchy.root() {
        output::detail(&format!("root: {}", root));
    }
    output::detail(&format!("employees: {}", hierarchy.len()));
    output::detail(&format!("depth: {}", hierarchy.depth()));
    Ok(())
}
