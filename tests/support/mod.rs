// One-time server bootstrap shared by the WebSocket integration tests.
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};

// Global address published once the server thread has bound its port.
static SERVER_ADDR: OnceLock<String> = OnceLock::new();
// One-time guard so the bootstrap path runs only once per test binary.
static SERVER_READY: OnceLock<()> = OnceLock::new();

/// Boots the server once per test binary and returns its `host:port`.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_addr = Arc::new(OnceLock::<String>::new());
        let published_addr_thread = Arc::clone(&published_addr);
        // An OS thread keeps the server alive across the per-test Tokio
        // runtimes that #[tokio::test] creates and drops.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                // Ephemeral port to avoid collisions with local services.
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_addr_thread.set(addr.to_string());
                arena_server::run(listener).await.expect("server failed");
            });
        });

        // Wait for the server thread to publish its bound address.
        let addr = loop {
            if let Some(addr) = published_addr.get() {
                break addr.clone();
            }
            std::thread::sleep(Duration::from_millis(10));
        };
        let _ = SERVER_ADDR.set(addr.clone());

        // Probe until the socket accepts connections before any test runs.
        for _ in 0..100 {
            if std::net::TcpStream::connect(&addr).is_ok() {
                return;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        panic!("server did not become ready in time");
    });

    SERVER_ADDR
        .get()
        .expect("server addr should be initialized")
        .as_str()
}

/// WebSocket endpoint of the shared test server.
pub fn ws_url() -> String {
    format!("ws://{}/ws", ensure_server())
}
