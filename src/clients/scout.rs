use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::domain::*;
use crate::infra::logging::log_timing;
use crate::infra::runtime::process::{CommandOutput, CommandRunner, RunnerError};

#[derive(Debug, Error)]
pub enum ScoutError {
    /// Non-zero exit; the message carries the exit status and any stderr.
    #[error("{0}")]
    CommandFailed(String),
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error("docker scout not available: {0}")]
    Unavailable(String),
}

impl ScoutError {
    fn from_output(out: &CommandOutput) -> Self {
        let stderr = out.stderr.trim_end();
        if stderr.is_empty() {
            ScoutError::CommandFailed(out.status_text())
        } else {
            ScoutError::CommandFailed(format!("{}: {}", out.status_text(), stderr))
        }
    }
}

/// Outcome of one scout invocation before the per-tool failure rule is applied.
struct Ran {
    stdout: String,
    failure: Option<ScoutError>,
}

impl Ran {
    /// Any non-zero exit fails the call.
    fn strict(self) -> Result<String, ScoutError> {
        match self.failure {
            Some(e) => Err(e),
            None => Ok(self.stdout),
        }
    }

    /// A non-zero exit that still produced output is kept as a result.
    fn lenient(self) -> Result<(String, bool), ScoutError> {
        match self.failure {
            Some(e) if self.stdout.is_empty() => Err(e),
            failure => Ok((self.stdout, failure.is_none())),
        }
    }
}

/// Order-significant argv builder for `docker scout ...`.
#[derive(Debug, Default)]
struct ScoutArgs(Vec<String>);

impl ScoutArgs {
    fn new(subcommand: &[&str]) -> Self {
        let mut args = vec!["scout".to_string()];
        args.extend(subcommand.iter().map(|s| s.to_string()));
        Self(args)
    }

    fn arg(mut self, value: &str) -> Self {
        self.0.push(value.to_string());
        self
    }

    fn flag(mut self, on: bool, name: &str) -> Self {
        if on {
            self.0.push(name.to_string());
        }
        self
    }

    fn opt(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.0.push(name.to_string());
            self.0.push(v.to_string());
        }
        self
    }

    fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Wraps `docker scout` operations on top of a [`CommandRunner`].
#[derive(Clone)]
pub struct ScoutClient {
    runner: Arc<dyn CommandRunner>,
}

impl ScoutClient {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    async fn run(&self, args: ScoutArgs) -> Result<Ran, ScoutError> {
        let args = args.into_vec();
        let start = Instant::now();
        let out = self.runner.run(&args).await?;
        let subcommand = args.get(1).map(String::as_str).unwrap_or("scout");
        log_timing("command", subcommand, start.elapsed(), out.success);
        if out.success {
            return Ok(Ran { stdout: out.stdout, failure: None });
        }
        tracing::debug!(subcommand, status = %out.status_text(), "scout exited non-zero");
        let failure = ScoutError::from_output(&out);
        Ok(Ran { stdout: out.stdout, failure: Some(failure) })
    }

    /// Startup capability check: `docker scout version` must succeed.
    pub async fn probe(&self) -> Result<VersionInfo, ScoutError> {
        self.version().await.map_err(|e| ScoutError::Unavailable(e.to_string()))
    }

    pub async fn cves(&self, image: &str, opts: &CvesOptions) -> Result<CvesOutput, ScoutError> {
        let args = ScoutArgs::new(&["cves", image])
            .flag(opts.only_fixed, "--only-fixed")
            .opt("--only-severity", opts.only_severity.as_deref())
            .opt("--format", opts.format.as_deref())
            .flag(opts.exit_code, "--exit-code")
            .opt("--platform", opts.platform.as_deref());
        let ran = self.run(args).await?;
        // With --exit-code a non-zero exit means "findings present".
        let raw_output = if opts.exit_code { ran.lenient()?.0 } else { ran.strict()? };
        Ok(CvesOutput { image: image.to_string(), raw_output })
    }

    pub async fn quickview(&self, image: &str) -> Result<QuickviewOutput, ScoutError> {
        let raw_output = self.run(ScoutArgs::new(&["quickview", image])).await?.strict()?;
        Ok(QuickviewOutput { image: image.to_string(), raw_output })
    }

    pub async fn compare(
        &self,
        base_image: &str,
        target_image: &str,
        opts: &CompareOptions,
    ) -> Result<CompareOutput, ScoutError> {
        let args = ScoutArgs::new(&["compare", "--to", base_image, target_image])
            .flag(opts.only_fixed, "--only-fixed")
            .flag(opts.exit_code, "--exit-code");
        let (raw_output, _) = self.run(args).await?.lenient()?;
        Ok(CompareOutput {
            base_image: base_image.to_string(),
            target_image: target_image.to_string(),
            raw_output,
        })
    }

    pub async fn sbom(&self, image: &str, opts: &SbomOptions) -> Result<SbomOutput, ScoutError> {
        let format = opts.format.as_deref().unwrap_or("spdx");
        let args = ScoutArgs::new(&["sbom", image])
            .opt("--format", Some(format))
            .opt("--platform", opts.platform.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(SbomOutput { image: image.to_string(), format: format.to_string(), raw_output })
    }

    pub async fn recommendations(
        &self,
        image: &str,
        opts: &RecommendationsOptions,
    ) -> Result<RecommendationsOutput, ScoutError> {
        let args = ScoutArgs::new(&["recommendations", image])
            .flag(opts.only_refresh, "--only-refresh")
            .flag(opts.only_update, "--only-update")
            .opt("--tag", opts.tag.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(RecommendationsOutput { image: image.to_string(), raw_output })
    }

    pub async fn policy(
        &self,
        image: &str,
        opts: &PolicyOptions,
    ) -> Result<PolicyOutput, ScoutError> {
        let args = ScoutArgs::new(&["policy", image])
            .opt("--env", opts.env.as_deref())
            .opt("--org", opts.org.as_deref())
            .flag(opts.exit_code, "--exit-code");
        let (raw_output, passed) = self.run(args).await?.lenient()?;
        Ok(PolicyOutput { image: image.to_string(), passed, raw_output })
    }

    pub async fn attestation_add(
        &self,
        image: &str,
        opts: &AttestationOptions,
    ) -> Result<AttestationOutput, ScoutError> {
        let args = ScoutArgs::new(&["attestation", "add", image])
            .opt("--file", opts.file.as_deref())
            .opt("--predicate-type", opts.predicate_type.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(AttestationOutput {
            image: image.to_string(),
            action: AttestationAction::Add,
            success: true,
            raw_output,
        })
    }

    pub async fn repo_list(&self, opts: &RepoOptions) -> Result<RepoOutput, ScoutError> {
        let args = ScoutArgs::new(&["repo", "list"]).opt("--org", opts.org.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(RepoOutput { action: RepoAction::List, repos: Vec::new(), success: true, raw_output })
    }

    pub async fn repo_enable(
        &self,
        repo: &str,
        opts: &RepoOptions,
    ) -> Result<RepoOutput, ScoutError> {
        self.repo_toggle(RepoAction::Enable, repo, opts).await
    }

    pub async fn repo_disable(
        &self,
        repo: &str,
        opts: &RepoOptions,
    ) -> Result<RepoOutput, ScoutError> {
        self.repo_toggle(RepoAction::Disable, repo, opts).await
    }

    async fn repo_toggle(
        &self,
        action: RepoAction,
        repo: &str,
        opts: &RepoOptions,
    ) -> Result<RepoOutput, ScoutError> {
        let args =
            ScoutArgs::new(&["repo", action.as_str(), repo]).opt("--org", opts.org.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(RepoOutput { action, repos: vec![repo.to_string()], success: true, raw_output })
    }

    pub async fn vex_add(&self, image: &str, opts: &VexOptions) -> Result<VexOutput, ScoutError> {
        let args = ScoutArgs::new(&["vex", "add", image])
            .opt("--file", opts.file.as_deref())
            .opt("--cve", opts.cve.as_deref())
            .opt("--status", opts.status.as_deref())
            .opt("--justification", opts.justification.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(VexOutput {
            image: image.to_string(),
            action: VexAction::Add,
            success: true,
            raw_output,
        })
    }

    /// VEX statements attached to the image, read back through `cves`.
    pub async fn vex_list(&self, image: &str) -> Result<VexOutput, ScoutError> {
        let args = ScoutArgs::new(&["cves", image]).opt("--vex-location", Some("image"));
        let (raw_output, _) = self.run(args).await?.lenient()?;
        Ok(VexOutput {
            image: image.to_string(),
            action: VexAction::List,
            success: true,
            raw_output,
        })
    }

    pub async fn environment_list(
        &self,
        opts: &EnvironmentOptions,
    ) -> Result<EnvironmentOutput, ScoutError> {
        let args = ScoutArgs::new(&["environment"]).opt("--org", opts.org.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(EnvironmentOutput {
            action: EnvironmentAction::List,
            environment: None,
            image: None,
            success: true,
            raw_output,
        })
    }

    pub async fn environment_set(
        &self,
        env: &str,
        image: &str,
        opts: &EnvironmentOptions,
    ) -> Result<EnvironmentOutput, ScoutError> {
        let args = ScoutArgs::new(&["environment", env, image]).opt("--org", opts.org.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(EnvironmentOutput {
            action: EnvironmentAction::Set,
            environment: Some(env.to_string()),
            image: Some(image.to_string()),
            success: true,
            raw_output,
        })
    }

    pub async fn cache_df(&self) -> Result<CacheOutput, ScoutError> {
        let raw_output = self.run(ScoutArgs::new(&["cache", "df"])).await?.strict()?;
        Ok(CacheOutput { action: CacheAction::Df, success: true, raw_output })
    }

    pub async fn cache_prune(&self) -> Result<CacheOutput, ScoutError> {
        let args = ScoutArgs::new(&["cache", "prune"]).arg("--force");
        let raw_output = self.run(args).await?.strict()?;
        Ok(CacheOutput { action: CacheAction::Prune, success: true, raw_output })
    }

    pub async fn enroll(&self, org: &str) -> Result<EnrollOutput, ScoutError> {
        let raw_output = self.run(ScoutArgs::new(&["enroll", org])).await?.strict()?;
        Ok(EnrollOutput { org: org.to_string(), success: true, raw_output })
    }

    /// Continuous monitoring rides on `repo enable`, optionally with an integration.
    pub async fn watch_enable(
        &self,
        repo: &str,
        opts: &WatchOptions,
    ) -> Result<WatchOutput, ScoutError> {
        let args = ScoutArgs::new(&["repo", "enable", repo])
            .opt("--org", opts.org.as_deref())
            .opt("--integration", opts.integration.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(WatchOutput {
            repository: repo.to_string(),
            action: WatchAction::Enable,
            success: true,
            raw_output,
        })
    }

    pub async fn watch_disable(
        &self,
        repo: &str,
        opts: &WatchOptions,
    ) -> Result<WatchOutput, ScoutError> {
        let args = ScoutArgs::new(&["repo", "disable", repo]).opt("--org", opts.org.as_deref());
        let raw_output = self.run(args).await?.strict()?;
        Ok(WatchOutput {
            repository: repo.to_string(),
            action: WatchAction::Disable,
            success: true,
            raw_output,
        })
    }

    pub async fn version(&self) -> Result<VersionInfo, ScoutError> {
        let out = self.run(ScoutArgs::new(&["version"])).await?.strict()?;
        Ok(VersionInfo { version: out.trim().to_string() })
    }
}
