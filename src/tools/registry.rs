use crate::core::tool::ToolDescriptor;
use crate::tools::catalog::ToolKind;

#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredTool {
    pub kind: ToolKind,
    pub descriptor: ToolDescriptor,
}

/// Read-only catalogue built once at startup. Insertion order is preserved.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn builtin() -> Self {
        Self::with_kinds(ToolKind::ALL)
    }

    pub fn with_kinds(kinds: impl IntoIterator<Item = ToolKind>) -> Self {
        let tools = kinds
            .into_iter()
            .map(|kind| RegisteredTool { kind, descriptor: kind.descriptor() })
            .collect();
        Self { tools }
    }

    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    pub fn lookup(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.descriptor.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lists_full_catalogue_in_order() {
        let reg = ToolRegistry::builtin();
        let names: Vec<_> = reg.list().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "scout_cves",
                "scout_quickview",
                "scout_compare",
                "scout_sbom",
                "scout_recommendations",
                "scout_policy",
                "scout_attestation",
                "scout_repo",
                "scout_vex",
                "scout_environment",
                "scout_cache",
                "scout_enroll",
                "scout_watch",
                "scout_version",
            ]
        );
    }

    #[test]
    fn lookup_finds_kind_by_name() {
        let reg = ToolRegistry::builtin();
        let t = reg.lookup("scout_sbom").unwrap();
        assert_eq!(t.kind, ToolKind::Sbom);
        assert!(reg.lookup("scout_nope").is_none());
    }

    #[test]
    fn listing_is_stable_across_calls() {
        let reg = ToolRegistry::builtin();
        assert_eq!(reg.list(), reg.list());
        assert_eq!(reg.list().len(), 14);
    }

    #[test]
    fn subset_registry_hides_other_tools() {
        let reg = ToolRegistry::with_kinds([ToolKind::Version]);
        assert_eq!(reg.list().len(), 1);
        assert!(reg.lookup("scout_cves").is_none());
    }
}
