//! CLI entry point for supportal

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "supportal")]
#[command(version)]
#[command(about = "A fast markdown knowledge base and support portal", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new portal site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new article
    New {
        /// Title of the new article
        title: String,
    },

    /// Generate the static portal
    #[command(alias = "g")]
    Generate,

    /// Start the portal server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Clean the public folder
    Clean,

    /// List portal content
    List {
        /// Type of content to list (article, tag, category)
        #[arg(default_value = "article")]
        r#type: String,
    },

    /// Search the article index
    Search {
        /// Query string
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "supportal=debug,info"
    } else {
        "supportal=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing portal in {:?}", target_dir);
            supportal::commands::init::init_site(&target_dir)?;
            println!("Initialized empty portal in {:?}", target_dir);
        }

        Commands::New { title } => {
            let portal = supportal::Portal::new(&base_dir)?;
            tracing::info!("Creating new article: {}", title);
            supportal::commands::new::run(&portal, &title)?;
        }

        Commands::Generate => {
            let portal = supportal::Portal::new(&base_dir)?;
            tracing::info!("Generating static portal...");
            portal.generate()?;
            println!("Generated successfully!");
        }

        Commands::Serve { port, ip, open } => {
            let portal = supportal::Portal::new(&base_dir)?;
            tracing::info!("Starting portal at http://{}:{}", ip, port);
            supportal::server::start(&portal, &ip, port, open).await?;
        }

        Commands::Clean => {
            let portal = supportal::Portal::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            portal.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let portal = supportal::Portal::new(&base_dir)?;
            supportal::commands::list::run(&portal, &r#type)?;
        }

        Commands::Search { query } => {
            let portal = supportal::Portal::new(&base_dir)?;
            supportal::commands::search::run(&portal, &query)?;
        }
    }

    Ok(())
}
