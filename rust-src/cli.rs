//! CLI definitions using clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use crate::config::{get_log_path, DataSource, DEFAULT_DATA_URL, DEFAULT_TIMEOUT_SECS};
use crate::logging;
use crate::view::GraphType;


/// worklog-dash - weekly developer activity dashboard
#[derive(Parser)]
#[command(name = "wld")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Endpoint serving the AuthorWorklog payload
    #[arg(long, global = true, env = "WORKLOG_URL", default_value = DEFAULT_DATA_URL)]
    url: String,

    /// Read the payload from a local JSON file instead of the endpoint
    #[arg(long, global = true, env = "WORKLOG_FILE", conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "WORKLOG_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}


/// Developer and graph type selectors shared by the chart commands.
#[derive(Args)]
struct Selectors {
    /// Developer to chart ("All" for every developer)
    #[arg(short, long)]
    developer: Option<String>,

    /// Which charts to show
    #[arg(short, long, value_enum, default_value_t = GraphType::All)]
    graph: GraphType,
}


#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard charts to the terminal
    Show {
        #[command(flatten)]
        selectors: Selectors,

        /// Print chart data as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive dashboard
    Tui {
        #[command(flatten)]
        selectors: Selectors,
    },

    /// Export the visible charts as PNG or SVG
    Export {
        #[command(flatten)]
        selectors: Selectors,

        /// Export as SVG instead of PNG
        #[arg(long)]
        svg: bool,

        /// Open file after export
        #[arg(long)]
        open: bool,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List developers in the worklog
    Developers,
}


impl Cli {
    fn source(&self) -> DataSource {
        match &self.file {
            Some(path) => DataSource::File(path.clone()),
            None => DataSource::Remote {
                url: self.url.clone(),
                timeout: Duration::from_secs(self.timeout),
            },
        }
    }
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let source = cli.source();

    match cli.command {
        Some(Commands::Show { selectors, json }) => {
            logging::init_stderr()?;
            commands::show::run(&source, selectors.developer.as_deref(), selectors.graph, json)?;
        }
        Some(Commands::Tui { selectors }) => {
            logging::init_file(&get_log_path())?;
            commands::tui::run(&source, selectors.developer.as_deref(), selectors.graph)?;
        }
        Some(Commands::Export { selectors, svg, open, output }) => {
            logging::init_stderr()?;
            commands::export::run(
                &source,
                selectors.developer.as_deref(),
                selectors.graph,
                svg,
                open,
                output,
            )?;
        }
        Some(Commands::Developers) => {
            logging::init_stderr()?;
            commands::developers::run(&source)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_file_source() {
        let cli = Cli::parse_from(["wld", "--file", "worklog.json", "show", "-g", "line"]);
        assert_eq!(cli.source(), DataSource::File(PathBuf::from("worklog.json")));
        match cli.command {
            Some(Commands::Show { selectors, json }) => {
                assert_eq!(selectors.graph, GraphType::Line);
                assert!(selectors.developer.is_none());
                assert!(!json);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_remote_source() {
        let cli = Cli::parse_from(["wld", "developers", "--url", "http://localhost:9/data", "--timeout", "3"]);
        assert_eq!(
            cli.source(),
            DataSource::Remote {
                url: "http://localhost:9/data".to_string(),
                timeout: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn test_rejects_unknown_graph_type() {
        assert!(Cli::try_parse_from(["wld", "show", "--graph", "pie"]).is_err());
    }
}
