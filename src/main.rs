#[tokio::main]
async fn main() {
    // Bind and serve failures are already logged inside the bootstrap path.
    if arena_server::frameworks::server::run_with_config().await.is_err() {
        std::process::exit(1);
    }
}
