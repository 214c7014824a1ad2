use crate::tone::{Detail, Formality};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tonecraft", version, about = "Tone-rewriting text service with undo/redo history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP gateway
    Serve {
        /// Bind host (default from config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (default from config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Rewrite text via a running gateway and record the result in history
    Rewrite {
        /// Source text; read from stdin when omitted
        text: Option<String>,
        #[arg(long, default_value = "casual")]
        formality: Formality,
        #[arg(long, default_value = "concise")]
        detail: Detail,
        /// Gateway base URL (default from config)
        #[arg(long)]
        server: Option<String>,
    },

    /// Inspect and move through the local revision history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// Print the revision log with the cursor position
    Show,
    /// Step the cursor back one revision
    Undo,
    /// Step the cursor forward one revision
    Redo,
    /// Replace the whole log with a single revision
    Reset { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_overrides() {
        let cli = Cli::try_parse_from(["tonecraft", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { host, port } => {
                assert!(host.is_none());
                assert_eq!(port, Some(8080));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn parses_rewrite_with_tone_flags() {
        let cli = Cli::try_parse_from([
            "tonecraft", "rewrite", "hello", "--formality", "formal", "--detail", "detailed",
        ])
        .unwrap();
        match cli.command {
            Command::Rewrite {
                text,
                formality,
                detail,
                ..
            } => {
                assert_eq!(text.as_deref(), Some("hello"));
                assert_eq!(formality, Formality::Formal);
                assert_eq!(detail, Detail::Detailed);
            }
            _ => panic!("expected rewrite"),
        }
    }

    #[test]
    fn rewrite_defaults_to_casual_concise() {
        let cli = Cli::try_parse_from(["tonecraft", "rewrite", "hello"]).unwrap();
        match cli.command {
            Command::Rewrite {
                formality, detail, ..
            } => {
                assert_eq!(formality, Formality::Casual);
                assert_eq!(detail, Detail::Concise);
            }
            _ => panic!("expected rewrite"),
        }
    }

    #[test]
    fn rejects_unknown_tone_value() {
        let result =
            Cli::try_parse_from(["tonecraft", "rewrite", "hi", "--formality", "shouty"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_history_subcommands() {
        let cli = Cli::try_parse_from(["tonecraft", "history", "undo"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::History {
                action: HistoryAction::Undo
            }
        ));

        let cli = Cli::try_parse_from(["tonecraft", "history", "reset", "fresh"]).unwrap();
        match cli.command {
            Command::History {
                action: HistoryAction::Reset { text },
            } => assert_eq!(text, "fresh"),
            _ => panic!("expected reset"),
        }
    }
}
