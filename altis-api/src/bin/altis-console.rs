use std::io;
use altis_api::{bootstrap, console::Console};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bootstrap::init_tracing("altis_core=info,altis_store=warn");

    let config = altis_store::Config::load()?;
    let engine = bootstrap::load_engine(&config).await?;

    let mut console = Console::new(engine);
    console.run(io::stdin().lock(), io::stdout().lock())?;

    Ok(())
}
