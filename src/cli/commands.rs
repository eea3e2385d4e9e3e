//! Command dispatch

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::document::{read_document, to_json};
use crate::application::services::EditorService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::dnd::{DragEnd, DragKind, DragMove, DropOutcome};
use crate::form::{to_domain, to_form, validate};
use crate::tree_traits::forest_to_tree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `orgtree --help`".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Arc::new(Settings::load(cli.config.as_deref())?);
    debug!("settings: {:?}", settings);

    match command {
        Commands::Tree { file } => cmd_tree(settings, file),
        Commands::Validate { file } => cmd_validate(&settings, file),
        Commands::Normalize { file } => cmd_normalize(settings, file),
        Commands::Move {
            file,
            active,
            over,
            delta_x,
        } => cmd_move(settings, file, active, over, *delta_x),
        Commands::MoveMember {
            file,
            from,
            index,
            to,
            at,
        } => cmd_move_member(settings, file, from, *index, to, *at),
        Commands::Config { command } => cmd_config(&settings, command),
        Commands::Completion { .. } => Ok(()),
    }
}

fn open_session(settings: Arc<Settings>, file: &Path) -> CliResult<EditorService> {
    let data = read_document(file)?;
    Ok(EditorService::from_domain(settings, &data)?)
}

fn print_document(service: &EditorService) -> CliResult<()> {
    let data = to_domain(service.values(), service.settings().identity);
    output::plain(&to_json(&data)?);
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_tree(settings: Arc<Settings>, file: &Path) -> CliResult<()> {
    let service = open_session(settings, file)?;
    let tree = forest_to_tree(service.values()).map_err(ApplicationError::from)?;
    output::plain(&tree);
    Ok(())
}

#[instrument(skip(settings))]
fn cmd_validate(settings: &Settings, file: &Path) -> CliResult<()> {
    let data = read_document(file)?;
    let form = to_form(&data, settings.form_options()).map_err(ApplicationError::from)?;
    let errors = validate(&form);
    if errors.is_empty() {
        output::valid(file);
        return Ok(());
    }

    output::field_errors(file, &errors);
    Err(ApplicationError::Invalid(errors).into())
}

#[instrument(skip(settings))]
fn cmd_normalize(settings: Arc<Settings>, file: &Path) -> CliResult<()> {
    let service = open_session(settings, file)?;
    print_document(&service)
}

#[instrument(skip(settings))]
fn cmd_move(
    settings: Arc<Settings>,
    file: &Path,
    active: &str,
    over: &str,
    delta_x: f64,
) -> CliResult<()> {
    let mut service = open_session(settings, file)?;
    let position = |id: &str| {
        service
            .values()
            .position(id)
            .ok_or_else(|| CliError::InvalidArgs(format!("unknown organization: {id}")))
    };
    let active_index = position(active)?;
    let over_index = position(over)?;

    service.drag_start(DragKind::Organization, active);
    let preview = service.drag_move(&DragMove {
        active_id: active.to_string(),
        over_id: over.to_string(),
        delta_x,
    });
    if let Some(preview) = &preview {
        output::preview(preview);
    }

    match service.drag_end(&DragEnd::organization(active_index, over_index))? {
        DropOutcome::Committed(values) => {
            debug!(
                "new order: {}",
                values.orgs.iter().map(|o| o.identifier.as_str()).join(", ")
            );
            print_document(&service)
        }
        DropOutcome::Rejected(reason) => Err(CliError::MoveRejected(reason.to_string())),
        DropOutcome::Ignored => {
            output::unchanged("drop ignored");
            print_document(&service)
        }
    }
}

#[instrument(skip(settings))]
fn cmd_move_member(
    settings: Arc<Settings>,
    file: &Path,
    from: &str,
    index: usize,
    to: &str,
    at: usize,
) -> CliResult<()> {
    let mut service = open_session(settings, file)?;
    for id in [from, to] {
        if service.values().position(id).is_none() {
            return Err(CliError::InvalidArgs(format!("unknown organization: {id}")));
        }
    }

    service.drag_start(DragKind::Member, &format!("{from}.{index}"));
    match service.drag_end(&DragEnd::member(from, index, to, at))? {
        DropOutcome::Committed(_) => print_document(&service),
        DropOutcome::Rejected(reason) => Err(CliError::MoveRejected(reason.to_string())),
        DropOutcome::Ignored => {
            output::unchanged("drop ignored");
            print_document(&service)
        }
    }
}

fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::plain(&settings.to_toml()?),
        ConfigCommands::Template => output::plain(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::plain(&path.display()),
            None => output::error("no config directory available on this platform"),
        },
    }
    Ok(())
}
