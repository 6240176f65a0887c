#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kiomate_server::start().await
}
