//! `itemdesk` server: opens the SQLite file, applies migrations, then serves
//! the items page and the document API on one listener.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use itemdesk::api::{self, ApiError, Config};
use itemdesk::db::{Database, SqliteDatabase, StoreError};
use itemdesk::paths::get_db_path;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Database error: {0}")]
    #[diagnostic(code(itemdesk::binary::database))]
    Database(#[from] StoreError),

    #[error("Could not create the database directory: {0}")]
    #[diagnostic(code(itemdesk::binary::io))]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    #[diagnostic(code(itemdesk::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "itemdesk")]
#[command(author, version, about = "Items page and document API server", long_about = None)]
struct Cli {
    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// TCP port
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// SQLite file; its parent directory is created when missing [default: <data dir>/itemdesk/itemdesk.db]
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    serve(cli).await?;
    Ok(())
}

async fn serve(cli: Cli) -> Result<(), BinaryError> {
    let db_path = cli.db.unwrap_or_else(get_db_path);

    println!("itemdesk database: {}", db_path.display());

    if let Some(parent) = db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let db = SqliteDatabase::open(&db_path).await?;

    db.migrate().await?;
    println!("Schema up to date");

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        db,
    )
    .await?;

    Ok(())
}
