#[derive(Debug, Clone)]
pub struct RankingSettings {
    pub match_cutoff: u32,
    pub activity_window_days: i64,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            match_cutoff: 2,
            activity_window_days: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub rate_limit_ms: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            user_agent: "LadderBoard/0.1",
            timeout_secs: 30,
            rate_limit_ms: 0,
        }
    }
}

impl ServiceSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("RANKINGS_API_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url.clone());

        Self { base_url, ..defaults }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ranking: RankingSettings,
    pub service: ServiceSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            ranking: RankingSettings::default(),
            service: ServiceSettings::from_env(),
        }
    }
}
