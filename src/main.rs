//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mail_auth_check` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::io::Read;
use std::path::Path;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

use mail_auth_check::config::{Cli, Command, GenerateCommand, HistoryAction};
use mail_auth_check::export::{export_bulk, ExportOptions};
use mail_auth_check::generate::{DmarcRecordBuilder, SpfRecordBuilder};
use mail_auth_check::initialization::init_logger_with;
use mail_auth_check::parse::{Severity, SpfTermKind};
use mail_auth_check::server::{start_api_server, ApiState};
use mail_auth_check::{
    analyze_dmarc_record, analyze_spf_record, check_domain, resolver_from_config, security_score,
    AuthStatus, BulkChecker, Config, FileStore, HistoryEntry, HistoryStore, ScoreBand,
    VerificationResult,
};

#[tokio::main]
async fn main() -> Result<()> {
    // .env may set RUST_LOG and MAIL_AUTH_HISTORY; a missing file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.config();
    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli.command, &config).await {
        eprintln!("mail_auth_check error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Check {
            domain,
            json,
            no_history,
        } => {
            let resolver = resolver_from_config(config)?;
            let result = check_domain(&resolver, &domain).await?;
            if json {
                let body = mail_auth_check::server::CheckResponse::from(result.clone());
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                print_result(&result);
            }
            resolver.stats().log_summary();
            if !no_history {
                let mut history = open_history(config)?;
                history
                    .add(HistoryEntry::now(&result))
                    .context("Failed to save check history")?;
            }
        }
        Command::Analyze { record } => {
            let tags = analyze_dmarc_record(&record)?;
            for tag in tags {
                println!(
                    "{} {} = {}\n    {}",
                    severity_marker(tag.status),
                    tag.tag.bold(),
                    tag.value,
                    tag.description
                );
            }
        }
        Command::Spf { record } => {
            let analysis = analyze_spf_record(&record)?;
            for term in &analysis.terms {
                let kind = match &term.kind {
                    SpfTermKind::Mechanism(_) => "mechanism",
                    SpfTermKind::Modifier(_) => "modifier",
                    SpfTermKind::Unknown => "unknown",
                };
                println!(
                    "{} {} ({})\n    {}",
                    severity_marker(term.status),
                    term.term.bold(),
                    kind,
                    term.description
                );
            }
            println!("DNS lookups: {}", analysis.dns_lookup_count);
            for (severity, finding) in &analysis.findings {
                println!("{} {}", severity_marker(*severity), finding);
            }
        }
        Command::Bulk(args) => {
            let input = match (&args.domains, &args.file) {
                (Some(domains), _) => domains.clone(),
                (None, Some(path)) if path != Path::new("-") => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, _) => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read domains from stdin")?;
                    buf
                }
            };

            let resolver = Arc::new(resolver_from_config(config)?);
            let bulk = BulkChecker::new(Arc::clone(&resolver)).with_delay(config.bulk_delay);
            let state = bulk.run(&input, |_, _| {}).await?;
            resolver.stats().log_summary();

            export_bulk(
                &state,
                &ExportOptions {
                    output: args.output.clone(),
                    format: args.format,
                },
            )?;

            let summary = state.summary();
            eprintln!(
                "✅ Checked {} domain{} ({} complete, {} errors){}",
                summary.total,
                if summary.total == 1 { "" } else { "s" },
                summary.complete,
                summary.errored,
                summary
                    .mean_score
                    .map(|m| format!(", mean score {:.0}", m))
                    .unwrap_or_default()
            );
        }
        Command::History { action } => {
            let mut history = open_history(config)?;
            match action {
                HistoryAction::List => {
                    if history.is_empty() {
                        println!("No checks recorded yet");
                    }
                    for entry in history.entries() {
                        let checked = chrono::DateTime::from_timestamp_millis(entry.timestamp)
                            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default();
                        println!(
                            "{:<32} {:>3}  DMARC {:<9} SPF {:<9} DKIM {:<9} {}",
                            entry.domain,
                            entry.score,
                            entry.dmarc_status.label(),
                            entry.spf_status.label(),
                            entry.dkim_status.label(),
                            checked
                        );
                    }
                }
                HistoryAction::Remove { domain } => {
                    if history.remove(&domain)? {
                        println!("Removed {domain}");
                    } else {
                        println!("{domain} is not in the history");
                    }
                }
                HistoryAction::Clear => {
                    history.clear()?;
                    println!("History cleared");
                }
            }
        }
        Command::Generate { record } => {
            let (record, over_limit) = match record {
                GenerateCommand::Dmarc {
                    policy,
                    rua,
                    ruf,
                    pct,
                    subdomain_policy,
                    adkim,
                    aspf,
                } => {
                    let mut builder = DmarcRecordBuilder::new(policy)
                        .rua(rua.unwrap_or_default())
                        .ruf(ruf.unwrap_or_default())
                        .pct(pct)
                        .adkim(adkim)
                        .aspf(aspf);
                    if let Some(sp) = subdomain_policy {
                        builder = builder.subdomain_policy(sp);
                    }
                    (builder.build(), false)
                }
                GenerateCommand::Spf {
                    ip4,
                    ip6,
                    include,
                    all,
                } => {
                    let builder = ip4.into_iter().fold(SpfRecordBuilder::new(), |b, ip| b.ip4(ip));
                    let builder = ip6.into_iter().fold(builder, |b, ip| b.ip6(ip));
                    let builder = include
                        .into_iter()
                        .fold(builder, |b, domain| b.include(domain))
                        .all(all.into());
                    let over = builder.is_over_lookup_limit();
                    (builder.build(), over)
                }
            };
            println!("{record}");
            if over_limit {
                eprintln!(
                    "{} SPF record exceeds 10 DNS lookup limit and will fail validation!",
                    "warning:".yellow()
                );
            }
        }
        Command::Serve { port } => {
            let resolver = resolver_from_config(config)?;
            let state = ApiState::new(resolver);
            let bulk = BulkChecker::new(state.checker.clone()).with_delay(config.bulk_delay);
            start_api_server(port, state.with_bulk(bulk)).await?;
        }
    }
    Ok(())
}

fn open_history(config: &Config) -> Result<HistoryStore<FileStore>> {
    HistoryStore::open(FileStore::new(&config.history_path)).with_context(|| {
        format!(
            "Failed to open check history in {}",
            config.history_path.display()
        )
    })
}

fn print_result(result: &VerificationResult) {
    let score = security_score(result);
    let band = ScoreBand::from_score(score);
    let score_text = format!("{score}/100 ({band})");
    let score_text = match band {
        ScoreBand::Strong => score_text.green(),
        ScoreBand::Moderate => score_text.yellow(),
        ScoreBand::Weak | ScoreBand::Critical => score_text.red(),
    };

    println!("{}  {}", result.domain.as_str().bold(), score_text);
    println!("  DMARC  {}", status_text(result.dmarc.status));
    if let Some(record) = &result.dmarc.record {
        println!("         {record}");
    }
    println!("  SPF    {}", status_text(result.spf.status));
    if let Some(record) = &result.spf.record {
        println!("         {record}");
    }
    let selectors: Vec<&str> = result
        .dkim_results
        .iter()
        .map(|probe| probe.selector.as_str())
        .collect();
    if selectors.is_empty() {
        println!("  DKIM   {}", status_text(AuthStatus::NotFound));
    } else {
        println!(
            "  DKIM   {} (selectors: {})",
            status_text(AuthStatus::Valid),
            selectors.join(", ")
        );
    }
    println!("  {}", band.summary());
}

fn status_text(status: AuthStatus) -> ColoredString {
    match status {
        AuthStatus::Valid => status.label().green(),
        AuthStatus::Invalid => status.label().yellow(),
        AuthStatus::NotFound | AuthStatus::Error => status.label().red(),
    }
}

fn severity_marker(severity: Severity) -> ColoredString {
    match severity {
        Severity::Good => "✔".green(),
        Severity::Warning => "⚠".yellow(),
        Severity::Info => "ℹ".blue(),
    }
}
