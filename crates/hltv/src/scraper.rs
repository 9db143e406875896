use std::time::Duration;

use reqwest::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS,
    USER_AGENT,
};

use crate::parser;
use crate::types::{
    EventInfo, EventTier, MatchSummary, PlayerProfile, RankingEntry, ResultEntry, TeamProfile,
};

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0} not found")]
    NotFound(String),
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// hltv.org blocks obvious automated traffic; every request presents the
// header set of a desktop Chrome.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
        ),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,\
             image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(
        "sec-ch-ua",
        HeaderValue::from_static(
            "\"Google Chrome\";v=\"131\", \"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"",
        ),
    );
    headers.insert("sec-ch-ua-mobile", HeaderValue::from_static("?0"));
    headers.insert("sec-ch-ua-platform", HeaderValue::from_static("\"Windows\""));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

#[derive(Debug, Clone)]
pub struct HltvClient {
    client: Client,
    base_url: String,
}

impl HltvClient {
    pub fn new() -> Result<Self, ScraperError> {
        Self::with_base_url(crate::BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(browser_headers())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_matches(&self) -> Result<Vec<MatchSummary>, ScraperError> {
        let url = format!("{}/matches", self.base_url);
        log::info!("Fetching upcoming matches from {}...", url);
        let html = self.get_html(&url).await?;
        Ok(parser::parse_matches(&html, &self.base_url))
    }

    pub async fn fetch_rankings(&self, limit: usize) -> Result<Vec<RankingEntry>, ScraperError> {
        let url = format!("{}/ranking/teams", self.base_url);
        log::info!("Fetching team ranking from {}...", url);
        let html = self.get_html(&url).await?;
        Ok(parser::parse_rankings(&html, limit, &self.base_url))
    }

    pub async fn fetch_results(&self) -> Result<Vec<ResultEntry>, ScraperError> {
        let url = format!("{}/results", self.base_url);
        log::info!("Fetching match results from {}...", url);
        let html = self.get_html(&url).await?;
        Ok(parser::parse_results(&html, &self.base_url))
    }

    pub async fn fetch_events(&self) -> Result<Vec<EventInfo>, ScraperError> {
        let mut events = Vec::new();

        // One listing page per tier; a blocked page costs that tier only.
        for tier in EventTier::ALL {
            let url = format!("{}/events?eventType={}", self.base_url, tier.query_slug());
            log::info!("Fetching {} events from {}...", tier.label(), url);
            match self.get_html(&url).await {
                Ok(html) => events.extend(parser::parse_events(&html, tier, &self.base_url)),
                Err(e) => log::warn!("Skipping {} events: {}", tier.label(), e),
            }
        }

        parser::sort_events(&mut events);
        Ok(events)
    }

    pub async fn fetch_player(&self, name: &str) -> Result<PlayerProfile, ScraperError> {
        let search_html = self.search(name).await?;
        let Some(href) = parser::find_profile_href(&search_html, "/player/") else {
            return Err(ScraperError::NotFound(format!("player '{}'", name)));
        };

        let url = parser::absolutize(&self.base_url, &href);
        let (id, slug) = parser::split_profile_path(&href);

        log::info!("Fetching player profile: {}", url);
        let profile_html = self.get_html(&url).await?;
        let page = parser::parse_player_page(&profile_html);

        // The statistics page is best effort: any failure here leaves the
        // statistic fields at their defaults.
        let mut stats = parser::StatsPageFields::default();
        if !id.is_empty() && !slug.is_empty() {
            let stats_url = format!("{}/stats/players/{}/{}", self.base_url, id, slug);
            log::info!("Fetching player statistics: {}", stats_url);
            match self.get_html(&stats_url).await {
                Ok(html) => stats = parser::parse_stats_page(&html),
                Err(e) => log::warn!("Statistics unavailable for '{}': {}", name, e),
            }
        }

        Ok(parser::assemble_player(name, &url, page, &stats))
    }

    pub async fn fetch_team(&self, name: &str) -> Result<TeamProfile, ScraperError> {
        let search_html = self.search(name).await?;
        let Some(href) = parser::find_profile_href(&search_html, "/team/") else {
            return Err(ScraperError::NotFound(format!("team '{}'", name)));
        };

        let url = parser::absolutize(&self.base_url, &href);
        log::info!("Fetching team profile: {}", url);
        let html = self.get_html(&url).await?;
        Ok(parser::parse_team_page(&html, name, &url))
    }

    async fn search(&self, query: &str) -> Result<String, ScraperError> {
        let url = format!("{}/search", self.base_url);
        log::info!("Searching for '{}'...", query);
        Ok(self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .error_for_status()?
            .text()
            .await?)
    }

    async fn get_html(&self, url: &str) -> Result<String, ScraperError> {
        Ok(self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .error_for_status()?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?)
    }
}
