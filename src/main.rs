use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use zenlink::admin::{self, AdminCommands};
use zenlink::config::Config;
use zenlink::error::AppResult;
use zenlink::resolver::ShortCode;
use zenlink::server::{self, LinkSource};

/// zenlink - short link resolution and price rounding
#[derive(Parser, Debug)]
#[command(name = "zenlink")]
#[command(version)]
#[command(about = "Short link resolution and price rounding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to (overrides SERVER_HOST env var)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT env var)
        #[arg(long)]
        port: Option<u16>,

        /// Run migrations on startup
        #[arg(long, default_value_t = false)]
        migrate: bool,

        /// Serve links from memory instead of Postgres
        #[arg(long, default_value_t = false)]
        in_memory: bool,

        /// In-memory link as CODE=URL (repeatable, requires --in-memory)
        #[arg(long = "link", value_parser = parse_link, requires = "in_memory")]
        links: Vec<(String, String)>,
    },

    /// Administrative commands
    Admin {
        #[command(subcommand)]
        admin_command: AdminCommands,
    },
}

fn parse_link(value: &str) -> Result<(String, String), String> {
    let (code, url) = value
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=URL, got '{}'", value))?;

    let code = ShortCode::parse(code).ok_or_else(|| {
        format!("invalid short code '{}': use 1-64 of A-Z a-z 0-9 _ -", code)
    })?;

    let url = url.trim();
    if url.is_empty() {
        return Err(format!("expected CODE=URL, got '{}'", value));
    }

    Ok((code.as_str().to_string(), url.to_string()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    init_tracing();

    let config = Config::from_env()?;

    match cli.command {
        Commands::Server {
            host,
            port,
            migrate,
            in_memory,
            links,
        } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);

            let source = if in_memory {
                LinkSource::InMemory(links)
            } else {
                LinkSource::Postgres { migrate }
            };

            server::run_server(config, addr, source).await
        }
        Commands::Admin { admin_command } => admin::run(config, admin_command).await,
    }
}
