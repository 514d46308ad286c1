//! Search bodies sent to the `_search` endpoint.
//!
//! Every supplied filter becomes one clause in the `filter` list of a `bool`
//! query, so clauses are ANDed and do not contribute to scoring.

use serde_json::{json, Value};

use crate::models::{Environment, Outcome};

pub const RUN_AGGREGATION: &str = "run";

/// A single filter clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Analyzed match.
    Match { field: &'static str, value: Value },
    /// Exact match against an untokenized field.
    Term { field: &'static str, value: String },
}

impl Clause {
    fn matching(field: &'static str, value: impl Into<Value>) -> Self {
        let value = value.into();
        tracing::info!(field, %value, "filter applied");
        Clause::Match { field, value }
    }

    fn exact(field: &'static str, value: &str) -> Self {
        tracing::info!(field, value, "filter applied");
        Clause::Term {
            field,
            value: value.to_string(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Clause::Match { field, value } => json!({ "match": { *field: value } }),
            Clause::Term { field, value } => json!({ "term": { *field: value } }),
        }
    }
}

/// Turns a set of optional filters into clauses; absent filters yield nothing.
pub trait Filter {
    fn clauses(&self) -> Vec<Clause>;
}

fn common_clauses(environment: Option<Environment>, run: Option<u64>) -> Vec<Clause> {
    let mut out = Vec::new();
    if let Some(env) = environment {
        out.push(Clause::matching("environment", env.as_str()));
    }
    if let Some(run) = run {
        out.push(Clause::matching("run", run));
    }
    out
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|v| !v.is_empty())
}

#[derive(Debug, Default, Clone)]
pub struct ResultFilter {
    pub environment: Option<Environment>,
    pub outcome: Option<Outcome>,
    pub run: Option<u64>,
    pub test: Option<String>,
}

impl Filter for ResultFilter {
    fn clauses(&self) -> Vec<Clause> {
        let mut out = Vec::new();
        if let Some(outcome) = self.outcome {
            out.push(Clause::matching("result", outcome.as_str()));
        }
        out.extend(common_clauses(self.environment, self.run));
        if let Some(test) = non_empty(&self.test) {
            out.push(Clause::exact("name.keyword", test));
        }
        out
    }
}

#[derive(Debug, Default, Clone)]
pub struct ReportFilter {
    pub environment: Option<Environment>,
    pub run: Option<u64>,
    pub kind: Option<String>,
    pub sub_type: Option<String>,
    pub name: Option<String>,
}

impl Filter for ReportFilter {
    fn clauses(&self) -> Vec<Clause> {
        let mut out = common_clauses(self.environment, self.run);
        if let Some(kind) = non_empty(&self.kind) {
            out.push(Clause::matching("type", kind));
        }
        if let Some(sub_type) = non_empty(&self.sub_type) {
            out.push(Clause::exact("subType.keyword", sub_type));
        }
        if let Some(name) = non_empty(&self.name) {
            out.push(Clause::exact("name.keyword", name));
        }
        out
    }
}

#[derive(Debug, Default, Clone)]
pub struct UsageFilter {
    pub environment: Option<Environment>,
    pub run: Option<u64>,
    pub pod: Option<String>,
}

impl Filter for UsageFilter {
    fn clauses(&self) -> Vec<Clause> {
        let mut out = common_clauses(self.environment, self.run);
        if let Some(pod) = non_empty(&self.pod) {
            out.push(Clause::exact("name.keyword", pod));
        }
        out
    }
}

/// A capped document search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub clauses: Vec<Clause>,
    pub size: usize,
    pub sort_desc: Option<&'static str>,
}

impl SearchRequest {
    pub fn new(filter: &impl Filter, size: usize) -> Self {
        Self {
            clauses: filter.clauses(),
            size,
            sort_desc: None,
        }
    }

    /// Sort descending on `field`, using the max value for multi-valued fields.
    pub fn sort_desc(mut self, field: &'static str) -> Self {
        self.sort_desc = Some(field);
        self
    }

    pub fn body(&self) -> Value {
        let filter: Vec<Value> = self.clauses.iter().map(Clause::to_json).collect();
        let mut body = json!({
            "query": { "bool": { "filter": filter } },
            "size": self.size,
        });
        if let Some(field) = self.sort_desc {
            body["sort"] = json!([{ field: { "order": "desc", "mode": "max" } }]);
        }
        body
    }
}

/// Distinct run ids for one environment, newest first.
pub fn runs_aggregation(environment: Environment, size: usize) -> Value {
    json!({
        "size": 0,
        "query": { "match": { "environment": environment.as_str() } },
        "aggs": {
            RUN_AGGREGATION: {
                "terms": {
                    "field": "run",
                    "size": size,
                    "order": { "_key": "desc" }
                }
            }
        }
    })
}
