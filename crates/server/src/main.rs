#[tokio::main]
async fn main() -> anyhow::Result<()> {
    diary_insight_server::start().await
}
