#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = elza_app::run().await {
        eprintln!("elza-app fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
