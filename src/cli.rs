use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::{
    DEFAULT_ES_URL, DEFAULT_REPORTS_INDEX, DEFAULT_RESULTS_INDEX, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USAGE_INDEX,
};
use crate::models::{Environment, Outcome, UsageKind};
use crate::search::{ReportFilter, ResultFilter, UsageFilter};

#[derive(Parser, Debug)]
#[command(
    name = "e2e_result",
    version,
    about = "Display e2e test results, reports and usage collected in Elasticsearch",
    after_help = "See 'e2e_result show <command> --help' to read about a specific subcommand."
)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output (also respects NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Elasticsearch base URL
    #[arg(long, global = true, env = "E2E_RESULT_ES_URL", default_value = DEFAULT_ES_URL)]
    pub es_url: String,

    #[arg(long, global = true, env = "E2E_RESULT_RESULTS_INDEX", default_value = DEFAULT_RESULTS_INDEX)]
    pub results_index: String,

    #[arg(long, global = true, env = "E2E_RESULT_REPORTS_INDEX", default_value = DEFAULT_REPORTS_INDEX)]
    pub reports_index: String,

    #[arg(long, global = true, env = "E2E_RESULT_USAGE_INDEX", default_value = DEFAULT_USAGE_INDEX)]
    pub usage_index: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "E2E_RESULT_TIMEOUT", value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display information on e2e results
    Show(ShowArgs),
    /// Check the search endpoint and indices
    Doctor,
}

#[derive(Args, Debug)]
#[command(subcommand_required = true, arg_required_else_help = true)]
pub struct ShowArgs {
    #[command(subcommand)]
    pub command: ShowCommand,
}

#[derive(Subcommand, Debug)]
pub enum ShowCommand {
    /// Show e2e test result history
    Results(ResultsArgs),
    /// Show (vcs and ucs) runs for which results were collected
    Runs(RunsArgs),
    /// Show e2e timing reports
    Reports(ReportsArgs),
    /// Show pod memory and CPU usage reports
    Usage(UsageArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct EnvArgs {
    /// Only vcs runs
    #[arg(long, conflicts_with = "ucs")]
    pub vcs: bool,

    /// Only ucs runs
    #[arg(long)]
    pub ucs: bool,
}

impl EnvArgs {
    pub fn selected(&self) -> Option<Environment> {
        match (self.vcs, self.ucs) {
            (true, _) => Some(Environment::Vcs),
            (_, true) => Some(Environment::Ucs),
            _ => None,
        }
    }

    /// Environments to list runs for: the selected one, or all of them.
    pub fn environments(&self) -> Vec<Environment> {
        match self.selected() {
            Some(env) => vec![env],
            None => Environment::ALL.to_vec(),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    /// Maximum number of results to display
    #[arg(long, value_name = "INT", default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub max: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl DisplayArgs {
    pub fn limit(&self) -> usize {
        usize::try_from(self.max).unwrap_or(usize::MAX)
    }
}

fn run_id() -> clap::builder::RangedU64ValueParser<u64> {
    clap::value_parser!(u64).range(1..)
}

#[derive(Args, Debug, Clone)]
pub struct ResultsArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    /// Only failed tests
    #[arg(long, conflicts_with_all = ["passed", "skipped"])]
    pub failed: bool,

    /// Only passed tests
    #[arg(long, conflicts_with = "skipped")]
    pub passed: bool,

    /// Only skipped tests
    #[arg(long)]
    pub skipped: bool,

    /// Only results of this run
    #[arg(long, value_name = "ID", value_parser = run_id())]
    pub run: Option<u64>,

    /// History of a specific test (exact name)
    #[arg(long, value_name = "NAME")]
    pub test: Option<String>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

impl ResultsArgs {
    fn outcome(&self) -> Option<Outcome> {
        match (self.passed, self.failed, self.skipped) {
            (true, _, _) => Some(Outcome::Passed),
            (_, true, _) => Some(Outcome::Failed),
            (_, _, true) => Some(Outcome::Skipped),
            _ => None,
        }
    }

    pub fn filter(&self) -> ResultFilter {
        ResultFilter {
            environment: self.env.selected(),
            outcome: self.outcome(),
            run: self.run,
            test: self.test.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunsArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    #[command(flatten)]
    pub display: DisplayArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ReportsArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    #[arg(long, value_name = "ID", value_parser = run_id())]
    pub run: Option<u64>,

    /// History of a report type
    #[arg(long = "type", value_name = "NAME")]
    pub kind: Option<String>,

    /// History of a report subtype (exact)
    #[arg(long, value_name = "NAME")]
    pub subtype: Option<String>,

    /// History of a specific report (exact name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

impl ReportsArgs {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            environment: self.env.selected(),
            run: self.run,
            kind: self.kind.clone(),
            sub_type: self.subtype.clone(),
            name: self.name.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct UsageArgs {
    #[command(flatten)]
    pub env: EnvArgs,

    #[arg(long, value_name = "ID", value_parser = run_id())]
    pub run: Option<u64>,

    /// History of a specific pod (exact name)
    #[arg(long, value_name = "NAME")]
    pub pod: Option<String>,

    /// Only memory or only CPU rows
    #[arg(long = "type", value_enum, ignore_case = true)]
    pub kind: Option<UsageKind>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

impl UsageArgs {
    pub fn filter(&self) -> UsageFilter {
        UsageFilter {
            environment: self.env.selected(),
            run: self.run,
            pod: self.pod.clone(),
        }
    }
}
