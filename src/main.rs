use anyhow::Result;
use callbook::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
