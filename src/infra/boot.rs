use std::sync::Arc;

use anyhow::Context;

use crate::api::stdio::Dispatcher;
use crate::clients::scout::ScoutClient;
use crate::core::mcp::ServerInfo;
use crate::infra::config::Config;
use crate::infra::runtime::process::{resolve_executable, ProcessRunner};
use crate::tools::executor::ToolExecutor;
use crate::tools::registry::ToolRegistry;

pub const SERVER_NAME: &str = "scout-mcp-gateway";

pub fn server_info() -> ServerInfo {
    ServerInfo { name: SERVER_NAME.into(), version: env!("CARGO_PKG_VERSION").into() }
}

/// Resolve the docker executable and confirm `docker scout` answers.
pub async fn connect(cfg: &Config) -> anyhow::Result<ScoutClient> {
    let program = resolve_executable(&cfg.docker)
        .with_context(|| format!("docker executable `{}` is not available", cfg.docker))?;
    let runner = ProcessRunner::new(program).with_timeout(cfg.command_timeout);
    tracing::info!(
        program = %runner.program().display(),
        timeout = ?cfg.command_timeout,
        "resolved docker"
    );

    let client = ScoutClient::new(Arc::new(runner));
    if cfg.skip_probe {
        tracing::warn!("skipping docker scout capability probe");
    } else {
        let info = client.probe().await?;
        tracing::info!(scout_version = %info.version, "docker scout available");
    }
    Ok(client)
}

pub async fn run_server(cfg: Config) -> anyhow::Result<()> {
    tracing::info!(
        docker = %cfg.docker,
        timeout = ?cfg.command_timeout,
        skip_probe = cfg.skip_probe,
        "BOOT scout-mcp-gateway"
    );
    let client = connect(&cfg).await?;
    let registry = ToolRegistry::builtin();
    tracing::info!(tools = registry.list().len(), "tool catalogue ready");
    let executor = ToolExecutor::new(Arc::new(registry), client);
    let mut dispatcher = Dispatcher::new(executor, server_info());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    dispatcher.serve(stdin, tokio::io::stdout()).await?;
    Ok(())
}
