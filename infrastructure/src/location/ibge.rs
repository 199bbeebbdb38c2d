//! City directory backed by the IBGE localities API

use async_trait::async_trait;
use dpc_application::CityDirectory;
use dpc_domain::{BRAZILIAN_STATES, sort_city_names};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const IBGE_LOCALITIES_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// One entry of `/estados/{uf}/municipios`; the nested region fields are ignored
#[derive(Debug, Deserialize)]
struct Municipality {
    #[allow(dead_code)]
    id: u64,
    nome: String,
}

pub struct IbgeCityDirectory {
    http: Client,
    base_url: String,
}

impl IbgeCityDirectory {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dpc-diagnostic/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: IBGE_LOCALITIES_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn municipalities_url(&self, state: &str) -> String {
        format!("{}/estados/{}/municipios", self.base_url, state)
    }

    async fn fetch(&self, state: &str) -> Result<Vec<String>, reqwest::Error> {
        let url = self.municipalities_url(state);
        debug!("GET {}", url);
        let municipalities: Vec<Municipality> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(sorted_names(municipalities))
    }
}

#[async_trait]
impl CityDirectory for IbgeCityDirectory {
    async fn cities(&self, state: &str) -> Vec<String> {
        let state = state.trim().to_uppercase();
        if !BRAZILIAN_STATES.contains(&state.as_str()) {
            return Vec::new();
        }
        match self.fetch(&state).await {
            Ok(cities) => {
                debug!("{} cities in {}", cities.len(), state);
                cities
            }
            Err(e) => {
                warn!("Failed to fetch cities for {}: {}", state, e);
                Vec::new()
            }
        }
    }
}

fn sorted_names(municipalities: Vec<Municipality>) -> Vec<String> {
    let mut names: Vec<String> = municipalities.into_iter().map(|m| m.nome).collect();
    sort_city_names(&mut names);
    names
}
