//! Global search commands: one-shot `hinv search` and the interactive
//! `hinv shell`.
//!
//! Both delegate to [`home_inventory_core::search::search`] with the REST
//! client as the source. The shell additionally routes every query through
//! a [`SearchSession`] for the length guard, recent-search history, and
//! last-write-wins result handling.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

use home_inventory_core::navigation::NavTarget;
use home_inventory_core::search::{search, SearchResult};
use home_inventory_core::session::{SearchSession, SessionUpdate};
use home_inventory_core::source::InventorySource;

use crate::client::ApiClient;
use crate::config::Config;

const DESCRIPTION_WIDTH: usize = 80;
const FAILURE_MESSAGE: &str = "Search failed. Check that the inventory server is reachable.";

/// A search result plus the view it opens, for `--json` output.
#[derive(Serialize)]
struct SearchHit<'a> {
    #[serde(flatten)]
    result: &'a SearchResult,
    open: String,
}

/// CLI entry point for `hinv search`.
pub async fn run_search(config: &Config, query: &str, json: bool) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let results = match search(&client, query).await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, query, "global search failed");
            eprintln!("{}", FAILURE_MESSAGE);
            return Err(e.into());
        }
    };
    info!(query, count = results.len(), "global search finished");

    let mut out = std::io::stdout().lock();
    if json {
        write_json(&mut out, &results)?;
    } else {
        write_results(&mut out, &results)?;
    }
    Ok(())
}

/// CLI entry point for `hinv shell`.
pub async fn run_shell(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let mut session = SearchSession::new(config.search.min_query_chars, config.search.recent_limit);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    run_shell_with(&client, &mut session, stdin, &mut out).await
}

/// Interactive loop over any source, input, and output.
///
/// Each line is a query; `:recent` lists the history and `:quit` (or end
/// of input) exits.
pub async fn run_shell_with<S, R, W>(
    source: &S,
    session: &mut SearchSession,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: InventorySource + ?Sized,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "search> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        match line.trim() {
            ":quit" | ":q" => break,
            ":recent" => {
                if session.recent().is_empty() {
                    writeln!(out, "No recent searches.")?;
                }
                for (i, q) in session.recent().iter().enumerate() {
                    writeln!(out, "{}. {}", i + 1, q)?;
                }
                continue;
            }
            _ => {}
        }

        let Some(query) = session.prepare(&line) else {
            writeln!(out, "(type at least a few characters to search)")?;
            continue;
        };

        let ticket = session.begin(&query);
        let outcome = search(source, &query).await;
        match session.complete(ticket, outcome) {
            SessionUpdate::Applied => write_results(out, session.results())?,
            SessionUpdate::Stale => {}
            SessionUpdate::Failed(e) => {
                error!(error = ?e, query = %query, "global search failed");
                writeln!(out, "{}", FAILURE_MESSAGE)?;
            }
        }
    }
    Ok(())
}

/// Human-readable listing, one block per result.
pub fn write_results<W: Write>(out: &mut W, results: &[SearchResult]) -> std::io::Result<()> {
    if results.is_empty() {
        writeln!(out, "No results.")?;
        return Ok(());
    }

    writeln!(out, "Search results ({})", results.len())?;
    for (i, result) in results.iter().enumerate() {
        writeln!(out, "{}. [{}] {}", i + 1, result.kind.label(), result.name)?;
        if let Some(ref description) = result.description {
            if !description.is_empty() {
                writeln!(out, "    {}", truncate(description, DESCRIPTION_WIDTH))?;
            }
        }
        if !result.location_path.is_empty() {
            writeln!(out, "    in: {}", result.location_path)?;
        }
        writeln!(out, "    id: {}", result.id)?;
        writeln!(out, "    open: {}", NavTarget::for_result(result))?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, results: &[SearchResult]) -> Result<()> {
    let hits: Vec<SearchHit> = results
        .iter()
        .map(|result| SearchHit {
            result,
            open: NavTarget::for_result(result).path(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &hits)?;
    writeln!(out)?;
    Ok(())
}

/// Cut `s` to at most `max` chars, marking the cut with `...`.
fn truncate(s: &str, max: usize) -> String {
    let single_line = s.replace('\n', " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let cut: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
