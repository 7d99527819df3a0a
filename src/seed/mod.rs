use crate::database::models::Branch;

const BRANCHES_YAML: &str = include_str!("branches.yaml");

/// Slugs of the builtin catalogue, in seed order
pub const BUILTIN_SLUGS: &[&str] = &[
    "cognitive",
    "developmental",
    "social",
    "clinical",
    "biological",
    "methods",
];

/// Parse the embedded curriculum
pub fn builtin_branches() -> Result<Vec<Branch>, serde_yaml::Error> {
    serde_yaml::from_str(BRANCHES_YAML)
}
