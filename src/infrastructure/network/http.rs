// HTTP client utilities
use crate::domain::error::FairError;
use crate::infrastructure::config::Config;
use reqwest::Client;

/// Create the shared HTTP client.
///
/// The configured client identifier doubles as the `User-Agent`, which
/// public Nominatim instances require.
pub fn create_client(config: &Config) -> Result<Client, FairError> {
    let mut builder = Client::builder()
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .timeout(std::time::Duration::from_secs(config.geocoder.timeout_secs))
        .user_agent(config.geocoder.client_identifier.as_str());

    if let Some(proxy) = config.http_proxy.as_deref().filter(|p| !p.is_empty()) {
        builder = builder.proxy(reqwest::Proxy::all(proxy)?);
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        assert!(create_client(&Config::default()).is_ok());
    }

    #[test]
    fn builds_with_proxy() {
        let mut config = Config::default();
        config.http_proxy = Some("http://127.0.0.1:3128".to_string());
        assert!(create_client(&config).is_ok());
    }
}
