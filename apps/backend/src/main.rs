#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tilim_backend::run().await
}
