use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    scout_mcp_gateway::infra::logging::init();

    scout_mcp_gateway::cli::run().await
}
