use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployment environment an e2e run executed in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[serde(alias = "VCS", alias = "Vcs")]
    Vcs,
    #[serde(alias = "UCS", alias = "Ucs")]
    Ucs,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Vcs, Environment::Ucs];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Vcs => "vcs",
            Environment::Ucs => "ucs",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[serde(alias = "PASSED", alias = "Passed")]
    Passed,
    #[serde(alias = "FAILED", alias = "Failed")]
    Failed,
    #[serde(alias = "SKIPPED", alias = "Skipped")]
    Skipped,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
            Outcome::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource a usage row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum UsageKind {
    Memory,
    Cpu,
}

/// One test execution inside a run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub maintainer: String,
    #[serde(default)]
    pub duration_in_minutes: f64,
    #[serde(default)]
    pub duration_in_seconds: f64,
    pub result: Outcome,
    pub environment: Environment,
    pub run: u64,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub serial: bool,
}

impl TestResult {
    /// Name as shown in tables; serial tests carry a trailing `*`.
    pub fn display_name(&self) -> String {
        if self.serial {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Timing of a named phase within a run. `sub_type` splits a report type further,
/// e.g. by the node count of the cluster the phase ran against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub duration_in_minutes: f64,
    pub environment: Environment,
    pub run: u64,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
}

/// Peak resource consumption of a workload during a run.
/// Memory values are in Ki, CPU values in millicores.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub name: String,
    #[serde(default)]
    pub memory: i64,
    #[serde(default)]
    pub memory_limit: i64,
    #[serde(default)]
    pub cpu: i64,
    #[serde(default)]
    pub cpu_limit: i64,
    pub environment: Environment,
    pub run: u64,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
}

/// A run id seen in an environment, derived from a terms aggregation.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunBucket {
    pub environment: Environment,
    pub run: u64,
}

/// Format a minute duration the way the tables show it.
pub fn fmt_minutes(minutes: f64) -> String {
    format!("{minutes:.6}")
}
