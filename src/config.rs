use std::net::SocketAddr;

/// Server configuration, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP API binds to.
    pub bind: SocketAddr,
    /// Base URL of the external search engine.
    pub store_url: String,
    /// Name of the index holding the flattened glossary entries.
    pub index: String,
}

impl ServerConfig {
    /// Builds the configuration from `GLOSSARY_BIND`, `GLOSSARY_STORE_URL`
    /// and `GLOSSARY_INDEX`, with local-development defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind = std::env::var("GLOSSARY_BIND")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()?;
        let store_url = std::env::var("GLOSSARY_STORE_URL")
            .unwrap_or_else(|_| "http://localhost:9200".to_string());
        let index = std::env::var("GLOSSARY_INDEX").unwrap_or_else(|_| "glossary".to_string());

        Ok(Self {
            bind,
            store_url: store_url.trim_end_matches('/').to_string(),
            index,
        })
    }
}
