use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::infra::boot;
use crate::infra::config::Config;
use crate::tools::registry::ToolRegistry;

#[derive(Parser, Debug)]
#[command(name = "scout-mcp-gateway")]
#[command(about = "Docker Scout MCP server (stdio transport)")]
#[command(version)]
pub struct Cli {
    /// Docker executable (path or name on PATH)
    #[arg(long, global = true)]
    pub docker: Option<String>,
    /// Kill a scout command after this many seconds (0 = no limit)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Serve,
    /// Resolve docker and run the scout capability probe
    Check,
    /// Print the tool catalogue
    Tools,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli).await
}

pub async fn run_commands(cli: Cli) -> ExitCode {
    let cfg = match Config::from_env_and_toml() {
        Ok(cfg) => cfg.with_overrides(cli.docker, cli.timeout_secs),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => match boot::run_server(cfg).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
        Commands::Check => {
            let cfg = Config { skip_probe: false, ..cfg };
            match boot::connect(&cfg).await {
                Ok(client) => match client.version().await {
                    Ok(info) => {
                        println!("docker scout {}", info.version);
                        ExitCode::SUCCESS
                    }
                    Err(e) => {
                        eprintln!("Error: {e}");
                        ExitCode::FAILURE
                    }
                },
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Tools => {
            print!("{}", render_catalogue(&ToolRegistry::builtin()));
            ExitCode::SUCCESS
        }
    }
}

fn render_catalogue(registry: &ToolRegistry) -> String {
    let width = registry.list().iter().map(|d| d.name.len()).max().unwrap_or(0);
    registry
        .list()
        .iter()
        .map(|d| format!("{:width$}  {}\n", d.name, d.description, width = width))
        .collect()
}
