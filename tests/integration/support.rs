//! Minimal HTTP backend for exercising the real client

use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned response for one path
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn ok(path: &'static str, body: &str) -> Self {
        Self {
            path,
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(path: &'static str, status: u16) -> Self {
        Self {
            path,
            status,
            body: r#"{"error": "Analysis results not available. Check backend logs."}"#.to_string(),
        }
    }
}

/// Serve `routes` on an ephemeral port; returns the base URL
pub async fn spawn_backend(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                loop {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") || read == buf.len() {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&buf[..read]);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = routes
                    .iter()
                    .find(|r| r.path == path)
                    .map(|r| (r.status, r.body.clone()))
                    .unwrap_or((404, "{}".to_string()));
                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    500 => "Internal Server Error",
                    503 => "Service Unavailable",
                    _ => "Unknown",
                };

                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

pub const PRICE_DATA: &str = r#"[
    {"Date": "2020-01-02", "Price": 66.0, "log_price": 4.18965, "log_returns": 0.01527},
    {"Date": "2020-01-01", "Price": 65.0, "log_price": 4.17439, "log_returns": 0.0},
    {"Date": "2020-01-03", "Price": 68.6, "log_price": 4.22830, "log_returns": 0.05390}
]"#;

pub const ANALYSIS_RESULTS: &str = r#"{
    "summary": {
        "mu_1": {"mean": 0.005, "sd": 0.004, "hdi_2.5%": -0.01, "hdi_97.5%": 0.02, "r_hat": 1.0},
        "sigma_1": {"mean": 0.021, "hdi_2.5%": 0.019, "hdi_97.5%": 0.023},
        "sigma_2": {"mean": 0.034, "hdi_2.5%": 0.031, "hdi_97.5%": 0.037},
        "tau": {"mean": 1.4}
    },
    "most_probable_change_point_date": "2020-01-02",
    "parameter_hdis": {
        "mu_1": [-0.01, 0.02],
        "mu_2": null,
        "sigma_1": [0.019, 0.023],
        "sigma_2": [0.031, 0.037]
    },
    "events": [
        {"Date": "2020-01-01", "Event": "New year", "Description": "Thin holiday trading."},
        {"Date": "2020-06-15", "Event": "Out of range", "Description": "No observation."}
    ]
}"#;
