//! Result records returned by each tool. `raw_output` is the scout stdout,
//! passed through untouched.

use serde::Serialize;

use super::actions::{
    AttestationAction, CacheAction, EnvironmentAction, RepoAction, VexAction, WatchAction,
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CvesOutput {
    pub image: String,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuickviewOutput {
    pub image: String,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompareOutput {
    pub base_image: String,
    pub target_image: String,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SbomOutput {
    pub image: String,
    pub format: String,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RecommendationsOutput {
    pub image: String,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PolicyOutput {
    pub image: String,
    /// False when scout exited non-zero but still reported results.
    pub passed: bool,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttestationOutput {
    pub image: String,
    pub action: AttestationAction,
    pub success: bool,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RepoOutput {
    pub action: RepoAction,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub repos: Vec<String>,
    pub success: bool,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VexOutput {
    pub image: String,
    pub action: VexAction,
    pub success: bool,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EnvironmentOutput {
    pub action: EnvironmentAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub success: bool,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CacheOutput {
    pub action: CacheAction,
    pub success: bool,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EnrollOutput {
    pub org: String,
    pub success: bool,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WatchOutput {
    pub repository: String,
    pub action: WatchAction,
    pub success: bool,
    pub raw_output: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
}

/// Any tool's successful result, serialized as the record itself.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ToolOutput {
    Cves(CvesOutput),
    Quickview(QuickviewOutput),
    Compare(CompareOutput),
    Sbom(SbomOutput),
    Recommendations(RecommendationsOutput),
    Policy(PolicyOutput),
    Attestation(AttestationOutput),
    Repo(RepoOutput),
    Vex(VexOutput),
    Environment(EnvironmentOutput),
    Cache(CacheOutput),
    Enroll(EnrollOutput),
    Watch(WatchOutput),
    Version(VersionInfo),
}
