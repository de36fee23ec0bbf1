use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    #[allow(dead_code)]
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/blog-api-rust");
        cmd.env("BLOG_API_PORT", port.to_string())
            .env("STORAGE_UPLOAD_DIR", std::env::temp_dir().join("blog-api-test-uploads"))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL from .env (loaded by the server)
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Consider server ready on any liveness response, even degraded
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Whether the spawned server has a working database. Tests that need one
/// skip themselves (with a note) when it is missing, so the suite still
/// passes on machines without a configured DATABASE_URL.
pub async fn db_available(server: &TestServer) -> Result<bool> {
    let client = reqwest::Client::new();
    let resp = client.get(format!("{}/health", server.base_url)).send().await?;
    Ok(resp.status() == StatusCode::OK)
}

/// Register a fresh user and return (token, email).
#[allow(dead_code)]
pub async fn register_user(server: &TestServer, name: &str) -> Result<(String, String)> {
    let client = reqwest::Client::new();
    let email = format!("{}-{}@example.com", name, uuid_suffix());

    let resp = client
        .post(format!("{}/api/auth/register", server.base_url))
        .json(&serde_json::json!({
            "name": name,
            "email": email,
            "password": "password123",
            "confirmPassword": "password123",
        }))
        .send()
        .await?;

    anyhow::ensure!(resp.status() == StatusCode::CREATED, "register failed: {}", resp.status());

    let body: serde_json::Value = resp.json().await?;
    let token = body["token"].as_str().context("missing token")?.to_string();
    Ok((token, email))
}

/// Token for the seeded admin account, if one exists in this database.
/// Admin-only flows are exercised only when it does.
#[allow(dead_code)]
pub async fn admin_token(server: &TestServer) -> Result<Option<String>> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&serde_json::json!({
            "email": "admin@gmail.com",
            "password": "Admin1234",
        }))
        .send()
        .await?;

    if resp.status() != StatusCode::OK {
        return Ok(None);
    }

    let body: serde_json::Value = resp.json().await?;
    if body["user"]["role"] != "ADMIN" {
        return Ok(None);
    }
    Ok(body["token"].as_str().map(|s| s.to_string()))
}

#[allow(dead_code)]
pub fn uuid_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("{}-{}", std::process::id(), nanos)
}
