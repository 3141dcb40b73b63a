//! SMDB backend API client

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::models::{Entry, TopActor};

pub struct SmdbClient {
    backend_url: String,
    user_agent: String,
}

impl SmdbClient {
    pub fn new(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, String> {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .timeout_connect(Some(Duration::from_secs(10)))
            .build()
            .new_agent();

        let url = format!("{}/api/{}", self.backend_url, endpoint);
        let mut response = agent
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| format!("Request failed: {}", e))?;

        if response.status() != 200 {
            return Err(format!("HTTP error: {}", response.status()));
        }

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| format!("Read failed: {}", e))?;

        serde_json::from_str(&body).map_err(|e| format!("Invalid JSON from {}: {}", endpoint, e))
    }

    /// Full catalog: one flat list of movies and series
    pub fn fetch_entries(&self) -> Result<Vec<Entry>, String> {
        self.get_json("smdb.php")
    }

    /// Most-featured actors, pass-through display data
    pub fn fetch_top_actors(&self) -> Result<Vec<TopActor>, String> {
        self.get_json("topactors.php")
    }
}
