use anyhow::{bail, Result};

use crate::config::Config;
use crate::search::EsClient;
use crate::view::fmt::{cprintln, plural, BOLD, CYAN, DIM, GREEN, RED, RESET};

#[derive(Default)]
struct Tally {
    pass: usize,
    fail: usize,
}

impl Tally {
    fn ok(&mut self, msg: &str) {
        cprintln!("  {GREEN}✓{RESET}  {msg}");
        self.pass += 1;
    }

    fn err(&mut self, msg: &str) {
        cprintln!("  {RED}✗{RESET}  {msg}");
        self.fail += 1;
    }
}

pub async fn run(cfg: &Config) -> Result<()> {
    cprintln!();
    cprintln!("{DIM}── e2e_result doctor ───────────────────────────{RESET}");
    cprintln!();
    cprintln!("  {CYAN}i{RESET}  endpoint {}", cfg.es_url);

    let mut tally = Tally::default();
    let client = EsClient::new(cfg)?;

    if check_endpoint(&client, cfg, &mut tally).await {
        for index in cfg.indices() {
            check_index(&client, index, &mut tally).await;
        }
    } else {
        cprintln!("  {DIM}-{RESET}  index checks skipped");
    }

    cprintln!();
    cprintln!(
        "  {BOLD}{}{RESET} passed  {}{}{RESET} failed",
        tally.pass,
        if tally.fail > 0 { RED } else { DIM },
        tally.fail
    );
    cprintln!();

    if tally.fail > 0 {
        bail!("{} failed", plural(tally.fail, "check"));
    }
    Ok(())
}

async fn check_endpoint(client: &EsClient, cfg: &Config, tally: &mut Tally) -> bool {
    match client.ping(cfg.health_check_timeout).await {
        Ok(info) if info.cluster_name.is_empty() => {
            tally.ok("endpoint reachable");
            true
        }
        Ok(info) => {
            tally.ok(&format!(
                "cluster {} reachable (version {})",
                info.cluster_name,
                if info.version.number.is_empty() {
                    "unknown"
                } else {
                    &info.version.number
                }
            ));
            true
        }
        Err(e) => {
            tally.err(&e.to_string());
            false
        }
    }
}

async fn check_index(client: &EsClient, index: &str, tally: &mut Tally) {
    match client.index_exists(index).await {
        Ok(true) => tally.ok(&format!("index {index} exists")),
        Ok(false) => tally.err(&format!("index {index} does not exist")),
        Err(e) => tally.err(&format!("index {index}: {e}")),
    }
}
