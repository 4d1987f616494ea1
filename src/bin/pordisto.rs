use anyhow::Result;
use pordisto::cli::{actions::session, start};

#[tokio::main]
async fn main() -> Result<()> {
    let (globals, action) = start()?;

    session::handle(action, &globals).await
}
