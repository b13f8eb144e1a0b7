// Single-threaded runtime: patches, command completions, and gestures share one loop.
#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    game_client::run_with_config().await
}
