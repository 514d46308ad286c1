use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::cli::ConnectionArgs;

pub const DEFAULT_ES_URL: &str = "http://127.0.0.1:9200";
pub const DEFAULT_RESULTS_INDEX: &str = "cs_e2e";
pub const DEFAULT_REPORTS_INDEX: &str = "cs_e2e_entries";
pub const DEFAULT_USAGE_INDEX: &str = "cs_e2e_usage_entries";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the e2e artifacts live. Built once from flags/env and handed to the search layer.
#[derive(Debug, Clone)]
pub struct Config {
    pub es_url: reqwest::Url,
    pub results_index: String,
    pub reports_index: String,
    pub usage_index: String,
    pub request_timeout: Duration,
    pub health_check_timeout: Duration,
}

impl Config {
    pub fn from_args(args: &ConnectionArgs) -> Result<Self> {
        let es_url = reqwest::Url::parse(&args.es_url)
            .with_context(|| format!("invalid --es-url '{}'", args.es_url))?;
        if !matches!(es_url.scheme(), "http" | "https") {
            bail!("--es-url must be http or https, got '{}'", es_url.scheme());
        }
        if es_url.cannot_be_a_base() {
            bail!("--es-url '{}' cannot be used as a base URL", args.es_url);
        }

        for (flag, index) in [
            ("--results-index", &args.results_index),
            ("--reports-index", &args.reports_index),
            ("--usage-index", &args.usage_index),
        ] {
            validate_index(flag, index)?;
        }

        if args.timeout == 0 {
            bail!("--timeout must be at least 1 second");
        }

        Ok(Self {
            es_url,
            results_index: args.results_index.clone(),
            reports_index: args.reports_index.clone(),
            usage_index: args.usage_index.clone(),
            request_timeout: Duration::from_secs(args.timeout),
            health_check_timeout: HEALTH_CHECK_TIMEOUT,
        })
    }

    pub fn indices(&self) -> [&str; 3] {
        [
            self.results_index.as_str(),
            self.reports_index.as_str(),
            self.usage_index.as_str(),
        ]
    }
}

fn validate_index(flag: &str, index: &str) -> Result<()> {
    if index.is_empty() {
        bail!("{flag} must not be empty");
    }
    if index.contains(&['/', ' ', '?', '#'][..]) {
        bail!("{flag} '{index}' is not a valid index name");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(url: &str) -> ConnectionArgs {
        ConnectionArgs {
            es_url: url.to_string(),
            results_index: DEFAULT_RESULTS_INDEX.to_string(),
            reports_index: DEFAULT_REPORTS_INDEX.to_string(),
            usage_index: DEFAULT_USAGE_INDEX.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    #[test]
    fn defaults_resolve() {
        let cfg = Config::from_args(&args(DEFAULT_ES_URL)).unwrap();
        assert_eq!(cfg.es_url.as_str(), "http://127.0.0.1:9200/");
        assert_eq!(cfg.indices(), ["cs_e2e", "cs_e2e_entries", "cs_e2e_usage_entries"]);
        assert_eq!(cfg.health_check_timeout, Duration::from_secs(10));
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn rejects_non_http_url() {
        assert!(Config::from_args(&args("ftp://host:9200")).is_err());
        assert!(Config::from_args(&args("not a url")).is_err());
    }

    #[test]
    fn rejects_bad_index_names() {
        let mut a = args(DEFAULT_ES_URL);
        a.usage_index = "a/b".to_string();
        assert!(Config::from_args(&a).is_err());
        a.usage_index = String::new();
        assert!(Config::from_args(&a).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut a = args(DEFAULT_ES_URL);
        a.timeout = 0;
        assert!(Config::from_args(&a).is_err());
    }
}
