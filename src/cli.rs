// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command tree of the `holmscan` binary.
//!
//! Parsing is done with `clap`. Everything a command needs at run time is
//! carried by an [`AppContext`] built once after configuration is loaded.

use crate::domain::{ConfigError, EffectiveConfiguration, HolmscanError, Schema};
use crate::gateway::Gateway;
use crate::logging::LogHandle;
use crate::render::{OutputFormat, Renderer, NAMED_COLUMNS, SCAN_COLUMNS};
use crate::resources::{results, NetScans, ScanResource, WebScans};
use crate::service::{ConfigLocations, ConfigResolver};
use clap::{ArgAction, Parser, Subcommand};

/// Command line client for the Holm Security VMP API.
#[derive(Debug, Parser)]
#[command(name = "holmscan", version, about)]
pub struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for this run (table or yaml), overrides HOLMSCAN_FORMAT
    #[arg(short, long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Network scans
    NetScan {
        /// Action to perform
        #[command(subcommand)]
        action: ScanAction,
    },
    /// Web application scans
    WebScan {
        /// Action to perform
        #[command(subcommand)]
        action: ScanAction,
    },
    /// Print the effective configuration (secrets masked)
    Config,
}

/// Actions available on both scan resources.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ScanAction {
    /// List assets
    Assets,
    /// List scan profiles
    Profiles,
    /// List scan schedules
    Schedules,
    /// List scans
    List,
    /// Show one scan
    Show {
        /// Scan UUID
        uuid: String,
    },
    /// Start a scan
    Start {
        /// Asset UUID
        asset: String,
        /// Scan profile UUID
        profile: String,
    },
}

/// Run-time state shared by every command.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Validated configuration
    pub config: EffectiveConfiguration,
    /// Renderer for command output
    pub renderer: Renderer,
}

impl AppContext {
    /// Builds the context, with `format` taking precedence over the configured
    /// output format.
    pub fn new(config: EffectiveConfiguration, format: Option<&str>) -> Result<Self, ConfigError> {
        let format: OutputFormat = format
            .or_else(|| config.format())
            .map(str::parse::<OutputFormat>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            config,
            renderer: Renderer::new(format),
        })
    }
}

/// Loads configuration, then runs the parsed command and prints its output.
pub fn run(cli: &Cli, log: &mut LogHandle) -> Result<(), HolmscanError> {
    let config =
        ConfigResolver::standard(Schema::token(), &ConfigLocations::standard()).load()?;
    if config.debug() {
        log.raise_to_debug();
    }

    let context = AppContext::new(config, cli.format.as_deref())?;
    let output = execute(&cli.command, &context)?;
    println!("{}", output);
    Ok(())
}

/// Runs `command` and returns the text to print.
pub fn execute(command: &Command, context: &AppContext) -> Result<String, HolmscanError> {
    match command {
        Command::Config => Ok(context.config.to_string().trim_end().to_string()),
        Command::NetScan { action } => {
            let mut gateway = Gateway::from_config(&context.config)?;
            perform(&mut NetScans::new(&mut gateway), action, &context.renderer)
        }
        Command::WebScan { action } => {
            let mut gateway = Gateway::from_config(&context.config)?;
            perform(&mut WebScans::new(&mut gateway), action, &context.renderer)
        }
    }
}

fn perform(
    resource: &mut impl ScanResource,
    action: &ScanAction,
    renderer: &Renderer,
) -> Result<String, HolmscanError> {
    let output = match action {
        ScanAction::Assets => renderer.render_rows(results(&resource.assets()?)?, NAMED_COLUMNS)?,
        ScanAction::Profiles => {
            renderer.render_rows(results(&resource.profiles()?)?, NAMED_COLUMNS)?
        }
        ScanAction::Schedules => {
            renderer.render_rows(results(&resource.schedules()?)?, NAMED_COLUMNS)?
        }
        ScanAction::List => renderer.render_rows(results(&resource.list()?)?, SCAN_COLUMNS)?,
        ScanAction::Show { uuid } => renderer.render_item(&resource.show(uuid)?, SCAN_COLUMNS)?,
        ScanAction::Start { asset, profile } => {
            renderer.render_item(&resource.start(asset, profile)?, SCAN_COLUMNS)?
        }
    };
    Ok(output)
}
