use std::time::Duration;

/// Builds the HTTP client shared by outbound integrations.
///
/// One client per process keeps connection pooling and DNS caching
/// effective; `AppState` owns it and hands clones to each integration.
/// Uploads can be several megabytes, so the request timeout is generous.
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_initialization() {
        assert!(build_http_client().is_ok());
    }
}
