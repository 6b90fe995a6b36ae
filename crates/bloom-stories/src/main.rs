//! Entrypoint for the Bloom stories runner.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bloom_stories::run().await
}
