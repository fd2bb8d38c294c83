//! Line-oriented lookups against one index
//!
//! Reads commands from stdin until EOF or `quit`:
//!
//! ```text
//! class List
//! method List#add(int, E)
//! package java.util
//! reindex
//! stats
//! ```

use anyhow::{Context, Result};
use colored::Colorize;
use jdex_core::Catalog;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::{Answer, failure_report, lookup, stats};
use crate::output::{OutputFormat, Report};

const HELP: &str = "\
Commands:
  class NAME           show a class, e.g. `class util.List`
  method CLASS#NAME    show a method, e.g. `method List#add(int, E)`
  package NAME         show a package, e.g. `package java.util`
  reindex              crawl the site again and swap the index in
  stats                show what the index contains
  help                 show this message
  quit                 leave the shell";

/// A parsed shell line
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Class(&'a str),
    Method(&'a str),
    Package(&'a str),
    Reindex,
    Stats,
    Help,
    Quit,
    Blank,
    Unknown(&'a str),
}

impl<'a> Line<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Self::Blank;
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));
        match (word, rest.is_empty()) {
            ("class", false) => Self::Class(rest),
            ("method", false) => Self::Method(rest),
            ("package", false) => Self::Package(rest),
            ("reindex", true) => Self::Reindex,
            ("stats", true) => Self::Stats,
            ("help", true) => Self::Help,
            ("quit" | "exit", true) => Self::Quit,
            _ => Self::Unknown(line),
        }
    }
}

/// Answer lookups read from stdin until EOF or `quit`.
///
/// Misses and failures are reported and the loop moves on; only reading
/// stdin can end the shell with an error.
pub async fn execute(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let answer = match Line::parse(&line) {
            Line::Class(name) => lookup::class(catalog, name).await,
            Line::Method(reference) => lookup::method(catalog, reference).await,
            Line::Package(name) => lookup::package(catalog, name).await,
            Line::Stats => stats::execute(catalog).await,
            Line::Reindex => match catalog.reindex().await {
                Ok(summary) => Answer::Found(Report::Summary(summary)),
                Err(err) => Answer::Failed(err),
            },
            Line::Help => {
                println!("{HELP}");
                continue;
            },
            Line::Quit => break,
            Line::Blank => continue,
            Line::Unknown(text) => {
                eprintln!("{} unknown command '{text}', try `help`", "error:".red().bold());
                continue;
            },
        };
        report(answer, format)?;
    }

    debug!("shell finished");
    Ok(())
}

fn report(answer: Answer, format: OutputFormat) -> Result<()> {
    match answer {
        Answer::Found(report) | Answer::Miss(report, _) => println!("{}", report.render(format)?),
        Answer::Failed(err) if format.is_machine_readable() => {
            println!("{}", failure_report(&err).render(format)?);
        },
        Answer::Failed(err) => eprintln!("{} {err}", "error:".red().bold()),
    }
    Ok(())
}
