#[tokio::main]
async fn main() -> std::io::Result<()> {
    stream_server::run_with_config().await
}
