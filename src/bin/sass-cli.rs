use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::Method;
use clap::{Parser, Subcommand};

use sass_server::config::{load_config, ConfigStore};
use sass_server::observability::logging;
use sass_server::sass::{GrassCompiler, HandlerResult, OsFilesystem, RequestDescriptor, SassHandler};
use sass_server::ServerConfig;

#[derive(Parser)]
#[command(name = "sass-cli")]
#[command(about = "Inspect and exercise the sass-server stylesheet handler", long_about = None)]
struct Cli {
    /// Configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the handler for a URL path and print the response
    Handle {
        /// URL path, e.g. /css/site.css
        path: String,
        /// HTTP method to simulate
        #[arg(short, long, default_value = "GET")]
        method: String,
    },
    /// Print the effective options for a URL path as JSON
    Resolve {
        /// URL path, e.g. /css/site.css
        path: String,
    },
    /// Load and validate a configuration file
    Check {
        file: PathBuf,
    },
}

fn load(path: Option<&Path>) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_tracing("warn");

    match cli.command {
        Commands::Handle { path, method } => {
            let config = load(cli.config.as_deref())?;
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
            let store = Arc::new(ConfigStore::new(config));
            let snapshot = store.snapshot();
            let request = RequestDescriptor::new(method, &path, &snapshot.config.server);
            let handler = SassHandler::new(Arc::new(GrassCompiler::new()), Arc::new(OsFilesystem), store);

            match handler.handle(&snapshot, &request) {
                HandlerResult::Respond(response) => {
                    println!("Status: {}", response.status);
                    println!("Content-Type: {}", response.content_type);
                    println!();
                    print!("{}", response.body);
                }
                HandlerResult::Declined(reason) => {
                    eprintln!("Declined: {}", reason);
                    std::process::exit(2);
                }
            }
        }
        Commands::Resolve { path } => {
            let config = load(cli.config.as_deref())?;
            let store = ConfigStore::new(config);
            let snapshot = store.snapshot();
            let request = RequestDescriptor::new(Method::GET, &path, &snapshot.config.server);
            let effective = snapshot.resolve(&request.scope);
            println!("{}", serde_json::to_string_pretty(&effective)?);
        }
        Commands::Check { file } => match load_config(&file) {
            Ok(config) => {
                println!(
                    "{}: OK ({} scope(s), document root {})",
                    file.display(),
                    config.scopes.len(),
                    config.server.document_root
                );
            }
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
