use anyhow::{anyhow, Context as _, Result};
use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::commands::print_json;
use crate::error::{invalid_input, not_found};
use schoolid_config::AppConfig;
use schoolid_core::domain::{reason, LookupQuery, LookupResult};
use schoolid_lookup::build_strategy;

#[derive(Debug, Args)]
pub struct LookupArgs {
    #[arg(long = "student-no")]
    pub student_no: String,
    #[arg(long)]
    pub name: String,
}

/// `--json` output mirrors the remote wire contract.
#[derive(Debug, Serialize)]
struct WireResponse<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> WireResponse<'a> {
    fn found(id: &'a str) -> Self {
        Self {
            ok: true,
            id: Some(id),
            error: None,
        }
    }

    fn failed(error: &'a str) -> Self {
        Self {
            ok: false,
            id: None,
            error: Some(error),
        }
    }
}

pub fn run(config: &AppConfig, json: bool, args: LookupArgs) -> Result<()> {
    let query = LookupQuery::new(&args.student_no, &args.name)
        .map_err(|err| invalid_input(err.to_string()))?;
    let strategy = build_strategy(config).with_context(|| "build lookup backend")?;
    debug!(
        source = strategy.source_name(),
        student_no = %query.student_number,
        "resolving account id"
    );

    match strategy.resolve(&query) {
        LookupResult::Found(record) => {
            if json {
                print_json(&WireResponse::found(&record.id))?;
            } else {
                println!("{}", record.id);
            }
            Ok(())
        }
        LookupResult::NotFound => {
            if json {
                print_json(&WireResponse::failed(reason::NOT_FOUND))?;
            }
            Err(not_found("no matching account for that student number and name"))
        }
        LookupResult::Invalid(code) => {
            if json {
                print_json(&WireResponse::failed(&code))?;
            }
            Err(invalid_input(format!("lookup rejected: {code}")))
        }
        LookupResult::TransportError(code) => {
            if json {
                print_json(&WireResponse::failed(&code))?;
            }
            Err(anyhow!("lookup failed: {code}"))
        }
    }
}
