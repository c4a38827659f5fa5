//! Tool executor: name + argument bag -> typed options -> scout -> envelope.

use std::sync::Arc;
use std::time::Instant;

use crate::clients::scout::ScoutClient;
use crate::core::content::ToolResult;
use crate::domain::*;
use crate::infra::logging::log_timing;
use crate::tools::args::ToolArgs;
use crate::tools::catalog::ToolKind;
use crate::tools::registry::ToolRegistry;

#[derive(Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    client: ScoutClient,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>, client: ScoutClient) -> Self {
        Self { registry, client }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run one tool and wrap the outcome. Tool failures become an error
    /// envelope; only serializing a successful result can fail here.
    pub async fn call(&self, name: &str, args: &ToolArgs) -> Result<ToolResult, serde_json::Error> {
        let start = Instant::now();
        let outcome = self.execute(name, args).await;
        log_timing("tool", name, start.elapsed(), outcome.is_ok());
        match outcome {
            Ok(output) => {
                tracing::info!(tool = name, "tool call succeeded");
                Ok(ToolResult::text(serde_json::to_string_pretty(&output)?))
            }
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tool call failed");
                Ok(ToolResult::error(format!("Error: {e}")))
            }
        }
    }

    pub async fn execute(&self, name: &str, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let tool = self
            .registry
            .lookup(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        match tool.kind {
            ToolKind::Cves => {
                let image = args.require("image")?;
                let opts = CvesOptions {
                    only_fixed: args.flag("only_fixed"),
                    only_severity: args.string("only_severity"),
                    format: args.string("format"),
                    exit_code: args.flag("exit_code"),
                    platform: args.string("platform"),
                };
                Ok(ToolOutput::Cves(self.client.cves(image, &opts).await?))
            }
            ToolKind::Quickview => {
                let image = args.require("image")?;
                Ok(ToolOutput::Quickview(self.client.quickview(image).await?))
            }
            ToolKind::Compare => {
                let [base, target] = args.require_all(&["base_image", "target_image"])?;
                let opts = CompareOptions {
                    only_fixed: args.flag("only_fixed"),
                    exit_code: args.flag("exit_code"),
                };
                Ok(ToolOutput::Compare(self.client.compare(base, target, &opts).await?))
            }
            ToolKind::Sbom => {
                let image = args.require("image")?;
                let opts = SbomOptions {
                    format: args.string("format"),
                    platform: args.string("platform"),
                };
                Ok(ToolOutput::Sbom(self.client.sbom(image, &opts).await?))
            }
            ToolKind::Recommendations => {
                let image = args.require("image")?;
                let opts = RecommendationsOptions {
                    only_refresh: args.flag("only_refresh"),
                    only_update: args.flag("only_update"),
                    tag: args.string("tag"),
                };
                Ok(ToolOutput::Recommendations(self.client.recommendations(image, &opts).await?))
            }
            ToolKind::Policy => {
                let image = args.require("image")?;
                let opts = PolicyOptions {
                    env: args.string("env"),
                    org: args.string("org"),
                    exit_code: args.flag("exit_code"),
                };
                Ok(ToolOutput::Policy(self.client.policy(image, &opts).await?))
            }
            ToolKind::Attestation => {
                let [action, image] = args.require_all(&["action", "image"])?;
                let opts = AttestationOptions {
                    file: args.string("file"),
                    predicate_type: args.string("predicate_type"),
                };
                match parse_action::<AttestationAction>("attestation", action)? {
                    AttestationAction::Add => {
                        let out = self.client.attestation_add(image, &opts).await?;
                        Ok(ToolOutput::Attestation(out))
                    }
                }
            }
            ToolKind::Repo => {
                let action = args.require("action")?;
                let opts = RepoOptions { org: args.string("org") };
                let out = match parse_action::<RepoAction>("repo", action)? {
                    RepoAction::List => self.client.repo_list(&opts).await?,
                    RepoAction::Enable => {
                        let repo = require_for(args, "repo", "enable")?;
                        self.client.repo_enable(repo, &opts).await?
                    }
                    RepoAction::Disable => {
                        let repo = require_for(args, "repo", "disable")?;
                        self.client.repo_disable(repo, &opts).await?
                    }
                };
                Ok(ToolOutput::Repo(out))
            }
            ToolKind::Vex => {
                let [action, image] = args.require_all(&["action", "image"])?;
                let out = match parse_action::<VexAction>("vex", action)? {
                    VexAction::Add => {
                        let opts = VexOptions {
                            file: args.string("file"),
                            cve: args.string("cve"),
                            status: args.string("status"),
                            justification: args.string("justification"),
                        };
                        self.client.vex_add(image, &opts).await?
                    }
                    VexAction::List => self.client.vex_list(image).await?,
                };
                Ok(ToolOutput::Vex(out))
            }
            ToolKind::Environment => {
                let action = args.require("action")?;
                let opts = EnvironmentOptions { org: args.string("org") };
                let out = match parse_action::<EnvironmentAction>("environment", action)? {
                    EnvironmentAction::List => self.client.environment_list(&opts).await?,
                    EnvironmentAction::Set => {
                        let [env, image] = args.require_all(&["env", "image"])?;
                        self.client.environment_set(env, image, &opts).await?
                    }
                };
                Ok(ToolOutput::Environment(out))
            }
            ToolKind::Cache => {
                let action = args.require("action")?;
                let out = match parse_action::<CacheAction>("cache", action)? {
                    CacheAction::Df => self.client.cache_df().await?,
                    CacheAction::Prune => self.client.cache_prune().await?,
                };
                Ok(ToolOutput::Cache(out))
            }
            ToolKind::Enroll => {
                let org = args.require("org")?;
                Ok(ToolOutput::Enroll(self.client.enroll(org).await?))
            }
            ToolKind::Watch => {
                let [action, repo] = args.require_all(&["action", "repo"])?;
                let opts = WatchOptions {
                    org: args.string("org"),
                    integration: args.string("integration"),
                };
                let out = match parse_action::<WatchAction>("watch", action)? {
                    WatchAction::Enable => self.client.watch_enable(repo, &opts).await?,
                    WatchAction::Disable => self.client.watch_disable(repo, &opts).await?,
                };
                Ok(ToolOutput::Watch(out))
            }
            ToolKind::Version => Ok(ToolOutput::Version(self.client.version().await?)),
        }
    }
}

fn parse_action<A>(tool: &'static str, action: &str) -> Result<A, ToolError>
where
    A: std::str::FromStr<Err = String>,
{
    action
        .parse::<A>()
        .map_err(|action| ToolError::UnsupportedAction { tool, action })
}

fn require_for<'a>(
    args: &'a ToolArgs,
    field: &'static str,
    action: &'static str,
) -> Result<&'a str, ToolError> {
    args.str(field).ok_or(ToolError::MissingFor { field, action })
}
