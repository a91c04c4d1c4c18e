use anyhow::Result;
use clap::{Parser, Subcommand};
use tasksearch_core::{Document, OwnerId, SearchService, SledRepository};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "tasksearch")]
#[command(about = "Per-user inverted index over task documents", long_about = None)]
struct Cli {
    /// Path to the sled database directory
    #[arg(long, default_value = "./search-db")]
    db: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a document for an owner
    Insert {
        #[arg(long)]
        owner: OwnerId,
        /// Caller-assigned document id
        #[arg(long)]
        id: String,
        /// Searchable text of the document
        #[arg(long)]
        content: String,
    },
    /// Remove a document from an owner's index
    Delete {
        #[arg(long)]
        owner: OwnerId,
        #[arg(long)]
        id: String,
        /// Must be the same content that was indexed
        #[arg(long)]
        content: String,
    },
    /// Print the ids of an owner's documents matching the query
    Search {
        #[arg(long)]
        owner: OwnerId,
        query: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let repo = SledRepository::open(&cli.db)?;
    let service = SearchService::new(repo);

    match cli.command {
        Commands::Insert { owner, id, content } => {
            let document = Document { id, content };
            service.insert(owner, &document)?;
            tracing::info!(owner, document_id = %document.id, "indexed");
        }
        Commands::Delete { owner, id, content } => {
            let document = Document { id, content };
            service.delete(owner, &document)?;
            tracing::info!(owner, document_id = %document.id, "removed");
        }
        Commands::Search { owner, query } => {
            let mut ids = service.search(owner, &query)?;
            ids.sort();
            println!("{}", serde_json::to_string(&ids)?);
        }
    }
    Ok(())
}
