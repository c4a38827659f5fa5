//! Static tool catalogue. Declaration order is the `tools/list` order.

use crate::core::tool::{InputSchema, ToolDescriptor};
use crate::domain::{
    AttestationAction, CacheAction, EnvironmentAction, RepoAction, VexAction, WatchAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Cves,
    Quickview,
    Compare,
    Sbom,
    Recommendations,
    Policy,
    Attestation,
    Repo,
    Vex,
    Environment,
    Cache,
    Enroll,
    Watch,
    Version,
}

impl ToolKind {
    pub const ALL: [ToolKind; 14] = [
        ToolKind::Cves,
        ToolKind::Quickview,
        ToolKind::Compare,
        ToolKind::Sbom,
        ToolKind::Recommendations,
        ToolKind::Policy,
        ToolKind::Attestation,
        ToolKind::Repo,
        ToolKind::Vex,
        ToolKind::Environment,
        ToolKind::Cache,
        ToolKind::Enroll,
        ToolKind::Watch,
        ToolKind::Version,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Cves => "scout_cves",
            ToolKind::Quickview => "scout_quickview",
            ToolKind::Compare => "scout_compare",
            ToolKind::Sbom => "scout_sbom",
            ToolKind::Recommendations => "scout_recommendations",
            ToolKind::Policy => "scout_policy",
            ToolKind::Attestation => "scout_attestation",
            ToolKind::Repo => "scout_repo",
            ToolKind::Vex => "scout_vex",
            ToolKind::Environment => "scout_environment",
            ToolKind::Cache => "scout_cache",
            ToolKind::Enroll => "scout_enroll",
            ToolKind::Watch => "scout_watch",
            ToolKind::Version => "scout_version",
        }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        let (description, input_schema) = match self {
            ToolKind::Cves => (
                "Scan a container image for CVEs (Common Vulnerabilities and Exposures)",
                InputSchema::object()
                    .string("image", "Image to scan (e.g., 'alpine:latest', 'myorg/app:1.2')")
                    .boolean("only_fixed", "Only show CVEs that have a fix available")
                    .choice(
                        "only_severity",
                        "Filter by severity level",
                        vec!["critical", "high", "medium", "low"],
                    )
                    .string("platform", "Platform to scan (e.g., 'linux/amd64', 'linux/arm64')")
                    .choice(
                        "format",
                        "Output format",
                        vec!["packages", "sarif", "spdx", "markdown", "sbom", "gitlab"],
                    )
                    .boolean(
                        "exit_code",
                        "Exit non-zero when vulnerabilities are found; output is still returned",
                    )
                    .required(&["image"]),
            ),
            ToolKind::Quickview => (
                "Get a quick security overview of a container image",
                InputSchema::object().string("image", "Image to analyze").required(&["image"]),
            ),
            ToolKind::Compare => (
                "Compare security profiles of two container images",
                InputSchema::object()
                    .string("base_image", "Base image to compare from (e.g., previous version)")
                    .string("target_image", "Target image to compare to (e.g., new version)")
                    .boolean("only_fixed", "Only show differences for fixable CVEs")
                    .boolean("exit_code", "Exit non-zero when vulnerabilities were added")
                    .required(&["base_image", "target_image"]),
            ),
            ToolKind::Sbom => (
                "Generate a Software Bill of Materials (SBOM) for a container image",
                InputSchema::object()
                    .string("image", "Image to generate SBOM for")
                    .choice("format", "Output format", vec!["spdx", "cyclonedx", "json"])
                    .default_value("format", "spdx")
                    .string("platform", "Platform (e.g., 'linux/amd64')")
                    .required(&["image"]),
            ),
            ToolKind::Recommendations => (
                "Get base image update recommendations and remediation suggestions",
                InputSchema::object()
                    .string("image", "Image to get recommendations for")
                    .boolean("only_refresh", "Only show refresh recommendations (same tag)")
                    .boolean("only_update", "Only show update recommendations (newer tag)")
                    .string("tag", "Specific tag to recommend")
                    .required(&["image"]),
            ),
            ToolKind::Policy => (
                "Evaluate security policies against a container image",
                InputSchema::object()
                    .string("image", "Image to evaluate")
                    .string("env", "Environment for policy evaluation")
                    .string("org", "Docker organization")
                    .boolean("exit_code", "Exit non-zero when a policy is not met")
                    .required(&["image"]),
            ),
            ToolKind::Attestation => (
                "Manage attestations on container images",
                InputSchema::object()
                    .choice("action", "Action to perform", AttestationAction::names())
                    .string("image", "Image to manage attestations for")
                    .string("file", "Attestation file path (for add)")
                    .string("predicate_type", "Predicate type for attestation")
                    .required(&["action", "image"]),
            ),
            ToolKind::Repo => (
                "Manage Docker Scout on repositories",
                InputSchema::object()
                    .choice("action", "Action to perform", RepoAction::names())
                    .string("repo", "Repository name (for enable/disable)")
                    .string("org", "Docker organization")
                    .required(&["action"]),
            ),
            ToolKind::Vex => (
                "Manage VEX (Vulnerability Exploitability eXchange) statements",
                InputSchema::object()
                    .choice("action", "Action to perform", VexAction::names())
                    .string("image", "Image to manage VEX for")
                    .string("cve", "CVE ID (e.g., 'CVE-2024-1234')")
                    .choice(
                        "status",
                        "VEX status",
                        vec!["not_affected", "affected", "fixed", "under_investigation"],
                    )
                    .string("justification", "Justification for the status")
                    .string("file", "VEX file to add")
                    .required(&["action", "image"]),
            ),
            ToolKind::Environment => (
                "List Docker Scout environments or record an image in one",
                InputSchema::object()
                    .choice("action", "Action to perform", EnvironmentAction::names())
                    .string("env", "Environment name (for set)")
                    .string("image", "Image to record in the environment (for set)")
                    .string("org", "Docker organization")
                    .required(&["action"]),
            ),
            ToolKind::Cache => (
                "Manage the local Docker Scout cache",
                InputSchema::object()
                    .choice(
                        "action",
                        "Show disk usage (df) or prune the cache",
                        CacheAction::names(),
                    )
                    .required(&["action"]),
            ),
            ToolKind::Enroll => (
                "Enroll an organization with Docker Scout",
                InputSchema::object()
                    .string("org", "Docker organization to enroll")
                    .required(&["org"]),
            ),
            ToolKind::Watch => (
                "Enable or disable continuous monitoring of a repository",
                InputSchema::object()
                    .choice("action", "Action to perform", WatchAction::names())
                    .string("repo", "Repository to monitor")
                    .string("org", "Docker organization")
                    .string("integration", "Registry integration (e.g., 'github', 'gitlab')")
                    .required(&["action", "repo"]),
            ),
            ToolKind::Version => ("Get Docker Scout version information", InputSchema::object()),
        };
        ToolDescriptor { name: self.name(), description, input_schema }
    }
}
