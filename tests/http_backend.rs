//! HttpBackend against a canned local HTTP server.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use firewall_console::{Backend, ConsoleError, EventKind, HttpBackend};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// One canned answer: request line prefix, status, JSON body.
type Route = (&'static str, u16, &'static str);

/// Serve `routes` on an ephemeral port, one request per connection.
/// Returns the base URL and the raw requests received.
async fn serve(routes: Vec<Route>) -> Result<(String, Arc<Mutex<Vec<String>>>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];

            // read headers, then the body announced by Content-Length
            loop {
                let n = match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text
                        .lines()
                        .find_map(|l| {
                            let lower = l.to_ascii_lowercase();
                            lower
                                .strip_prefix("content-length:")
                                .and_then(|v| v.trim().parse::<usize>().ok())
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        break;
                    }
                }
            }

            let request = String::from_utf8_lossy(&raw).to_string();
            let (status, body) = routes
                .iter()
                .find(|(prefix, _, _)| request.starts_with(prefix))
                .map(|(_, status, body)| (*status, *body))
                .unwrap_or((404, "{}"));
            seen_clone.lock().unwrap().push(request);

            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    Ok((format!("http://127.0.0.1:{}", port), seen))
}

#[tokio::test]
async fn test_fetches_and_parses_every_feed() -> Result<()> {
    let (url, _) = serve(vec![
        (
            "GET /api/logs",
            200,
            r#"[{"id": 3, "timestamp": "2024-03-01 12:00:00", "ip_address": "10.0.0.1", "event": "syn"},
                {"id": "2", "timestamp": "2024-03-01T11:59:00Z", "ip_address": "10.0.0.2", "event": "PORTSCAN"}]"#,
        ),
        (
            "GET /api/threats",
            200,
            r#"[{"id": 1, "timestamp": "2024-03-01T12:00:00+00:00", "ip_address": "10.0.0.1", "alert_type": "SYN Flood", "description": "5 SYN events in the last minute"}]"#,
        ),
        ("GET /api/traffic", 200, r#"[{"time": "12:00:00", "traffic": 42}]"#),
        (
            "GET /api/stats",
            200,
            r#"{"total_traffic": 10, "active_threats": 1, "blocked_ips": 0, "recent_activity": 4}"#,
        ),
    ])
    .await?;
    let backend = HttpBackend::new(&url)?;

    let logs = backend.logs().await?;
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].id, "3");
    assert_eq!(logs[0].event, EventKind::Syn);
    assert_eq!(logs[1].event, EventKind::Other("PORTSCAN".into()));

    let threats = backend.threats().await?;
    assert_eq!(threats[0].alert_type, "SYN Flood");

    let traffic = backend.traffic().await?;
    assert_eq!(traffic[0].traffic, 42.0);

    let stats = backend.stats().await?;
    assert_eq!(stats.active_threats, 1);
    assert_eq!(stats.recent_activity, 4);
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_a_fetch_failure() -> Result<()> {
    let (url, _) = serve(vec![("GET /api/logs", 500, r#"{"detail": "boom"}"#)]).await?;
    let backend = HttpBackend::new(&url)?;

    assert_eq!(backend.logs().await.unwrap_err(), ConsoleError::Status(500));
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_a_fetch_failure() -> Result<()> {
    let (url, _) = serve(vec![
        ("GET /api/threats", 200, r#"{"not": "a list"}"#),
        (
            "GET /api/logs",
            200,
            r#"[{"id": 1, "timestamp": "yesterday", "ip_address": "10.0.0.1", "event": "SYN"}]"#,
        ),
    ])
    .await?;
    let backend = HttpBackend::new(&url)?;

    assert!(matches!(backend.threats().await, Err(ConsoleError::Parse(_))));
    assert!(matches!(backend.logs().await, Err(ConsoleError::Parse(_))));
    Ok(())
}

#[tokio::test]
async fn test_simulate_accepted() -> Result<()> {
    let (url, seen) = serve(vec![("POST /simulate", 200, r#"{"status": "logged"}"#)]).await?;
    let backend = HttpBackend::new(&url)?;

    backend.simulate("203.0.113.7", &EventKind::Syn).await?;

    let requests = seen.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].contains(r#""ip_address":"203.0.113.7""#));
    assert!(requests[0].contains(r#""event":"SYN""#));
    Ok(())
}

#[tokio::test]
async fn test_simulate_rejected() -> Result<()> {
    let (url, _) = serve(vec![("POST /simulate", 200, r#"{"status": "error"}"#)]).await?;
    let backend = HttpBackend::new(&url)?;

    let err = backend.simulate("203.0.113.7", &EventKind::Normal).await.unwrap_err();
    assert_eq!(err, ConsoleError::Rejected("error".into()));
    Ok(())
}
