//! Strongly-typed per-tool options, built from the call arguments.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CvesOptions {
    pub only_fixed: bool,
    /// critical, high, medium, low
    pub only_severity: Option<String>,
    pub format: Option<String>,
    /// Ask scout to exit non-zero when vulnerabilities are found.
    pub exit_code: bool,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareOptions {
    pub only_fixed: bool,
    pub exit_code: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SbomOptions {
    /// spdx (default), cyclonedx, json
    pub format: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationsOptions {
    pub only_refresh: bool,
    pub only_update: bool,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyOptions {
    pub env: Option<String>,
    pub org: Option<String>,
    pub exit_code: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttestationOptions {
    pub file: Option<String>,
    pub predicate_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoOptions {
    pub org: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VexOptions {
    pub file: Option<String>,
    pub cve: Option<String>,
    /// not_affected, affected, fixed, under_investigation
    pub status: Option<String>,
    pub justification: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentOptions {
    pub org: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchOptions {
    pub org: Option<String>,
    /// github, gitlab, ...
    pub integration: Option<String>,
}
