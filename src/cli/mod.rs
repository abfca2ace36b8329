pub mod commands;

use crate::normalize::DiagramKind;
use crate::render::RenderFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "flowgen")]
#[command(author, version, about = "Generate Mermaid diagrams from plain-text descriptions", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a diagram from a process description
    Generate {
        /// Process description (reads stdin when neither this nor --file is given)
        description: Option<String>,

        /// Read the description from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Diagram kind to request (flowchart, graph, sequence, class, state, er, gantt)
        #[arg(short, long, default_value = "flowchart")]
        kind: DiagramKind,

        /// Model to use (e.g., sonnet, haiku, opus)
        #[arg(short, long)]
        model: Option<String>,

        /// Custom backend command; receives the prompt on stdin
        #[arg(long)]
        custom_command: Option<String>,

        /// Render the diagram to an image file
        #[arg(long, value_name = "IMAGE")]
        render: Option<PathBuf>,

        /// Save the markup to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print a Mermaid Live Editor link
        #[arg(long)]
        live_link: bool,

        /// Include the raw model response in the output (always shown on
        /// failure when no diagram is found)
        #[arg(long)]
        show_raw: bool,

        /// Rewrite flowchart headers to graph for older renderers
        #[arg(long)]
        graph_compat: bool,
    },

    /// Normalize existing markup without calling the backend
    Normalize {
        /// Markup file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Rewrite flowchart headers to graph for older renderers
        #[arg(long)]
        graph_compat: bool,
    },

    /// Render a markup file to an image via the rendering service
    Render {
        /// Markup file
        file: PathBuf,

        /// Output image path (defaults to the input path with the image extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Image format
        #[arg(long, default_value = "png")]
        image_format: RenderFormat,

        /// Rendering service endpoint (overrides the config file)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Print a shareable editor link for a markup file
    Export {
        /// Markup file
        file: PathBuf,

        /// Also save the markup to a .mmd file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the resolved configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Generate {
            description,
            file,
            kind,
            model,
            custom_command,
            render,
            output,
            live_link,
            show_raw,
            graph_compat,
        } => commands::generate::run(
            description,
            file.as_deref(),
            kind,
            model,
            custom_command,
            render.as_deref(),
            output.as_deref(),
            live_link,
            show_raw,
            graph_compat,
            cli.format,
        ),
        Commands::Normalize { file, graph_compat } => {
            commands::normalize::run(file.as_deref(), graph_compat, cli.format)
        }
        Commands::Render {
            file,
            output,
            image_format,
            endpoint,
        } => commands::render::run(&file, output.as_deref(), image_format, endpoint, cli.format),
        Commands::Export { file, output } => {
            commands::export::run(&file, output.as_deref(), cli.format)
        }
        Commands::Config { init } => commands::config::run(init, cli.format),
    }
}
