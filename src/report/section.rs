//! Report sections: titled diagnostic commands.

use crate::execution::Invocation;

/// One report section: a heading plus the diagnostic command whose output
/// fills it.
#[derive(Debug, Clone)]
pub struct Section {
    title: String,
    invocation: Invocation,
}

impl Section {
    /// Create a section.
    pub fn new(title: impl Into<String>, invocation: Invocation) -> Self {
        Self {
            title: title.into(),
            invocation,
        }
    }

    /// The section heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The diagnostic command.
    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }
}

/// The built-in diagnostic catalog.
///
/// Cluster-level `oc` views: version, nodes, utilization, operators, the
/// monitoring stack, upgrade history, and recent non-normal events. The
/// outputs are displayed as-is; nothing here interprets them.
pub fn builtin_sections() -> Vec<Section> {
    vec![
        Section::new(
            "Cluster Status",
            Invocation::new("oc").args(["get", "clusterversion"]),
        ),
        Section::new("Node Status", Invocation::new("oc").args(["get", "nodes"])),
        Section::new(
            "Node Utilization",
            Invocation::new("oc").args(["adm", "top", "nodes"]),
        ),
        Section::new("Cluster Operators", Invocation::new("oc").args(["get", "co"])),
        Section::new(
            "Monitoring Stack",
            Invocation::new("oc").args(["get", "pods", "-n", "openshift-monitoring"]),
        ),
        Section::new(
            "Cluster Version History",
            Invocation::new("oc").args([
                "get",
                "clusterversion",
                "version",
                "-o",
                "jsonpath={range .status.history[*]}{.version} {.state} {.startedTime} {.completionTime}{\"\\n\"}{end}",
            ]),
        ),
        Section::new(
            "Critical Events",
            Invocation::new("oc").args([
                "get",
                "events",
                "--all-namespaces",
                "--field-selector",
                "type!=Normal",
            ]),
        ),
    ]
}
