//! CLI command dispatch.

use crate::cli::{Cli, Command, HistoryAction};
use crate::client::ApiClient;
use crate::config::Config;
use crate::gateway;
use crate::history::{FileStorage, RevisionHistory};
use crate::tone::ToneSelection;
use anyhow::{Context, Result};
use std::io::Read;

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            gateway::run_gateway(&config).await
        }

        Command::Rewrite {
            text,
            formality,
            detail,
            server,
        } => {
            let text = match text {
                Some(t) => t,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read text from stdin")?;
                    buf
                }
            };
            let tone = ToneSelection::new(formality, detail);
            let base_url = server.unwrap_or_else(|| {
                format!("http://{}:{}", config.gateway.host, config.gateway.port)
            });

            let adjusted = ApiClient::new(&base_url).adjust_tone(&text, tone).await?;

            // Record both the edit and its rewrite; skip entries that would
            // duplicate the current text (caller-side equality guard).
            let mut history = open_history(&config, text.trim());
            if history.current_text() != text.trim() {
                history.add_revision(text.trim(), None);
            }
            if history.current_text() != adjusted {
                history.add_revision(&adjusted, Some(tone));
            }

            println!("{adjusted}");
            Ok(())
        }

        Command::History { action } => {
            let mut history = open_history(&config, "");
            match action {
                HistoryAction::Show => {
                    for (i, revision) in history.revisions().enumerate() {
                        let marker = if i == history.cursor() { ">" } else { " " };
                        let tone = revision
                            .tone
                            .map(|t| format!(" [{}]", t.key_fragment()))
                            .unwrap_or_default();
                        println!("{marker} {i}{tone}: {}", revision.text);
                    }
                }
                HistoryAction::Undo => {
                    if history.undo() {
                        println!("{}", history.current_text());
                    } else {
                        eprintln!("Nothing to undo.");
                    }
                }
                HistoryAction::Redo => {
                    if history.redo() {
                        println!("{}", history.current_text());
                    } else {
                        eprintln!("Nothing to redo.");
                    }
                }
                HistoryAction::Reset { text } => {
                    history.reset(&text);
                    println!("{}", history.current_text());
                }
            }
            Ok(())
        }
    }
}

fn open_history(config: &Config, seed: &str) -> RevisionHistory {
    RevisionHistory::load_or_seed(Box::new(FileStorage::new(config.history_file())), seed)
}
