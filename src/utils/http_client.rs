use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Create a configured HTTP client for making requests to the GitHub API
pub fn create_http_client() -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(30))
        .user_agent("streakcard/1.0.0")
        .build()
        .expect("Failed to create HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_http_client() {
        // Builder settings are valid and construction does not panic
        let _client = create_http_client();
    }
}
