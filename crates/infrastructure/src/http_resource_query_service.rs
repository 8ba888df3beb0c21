use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use rolegate_application::{CandidateSet, ResourceQuery, ResourceQueryService};
use rolegate_core::{AppError, AppResult};
use rolegate_domain::{ResourceDescriptor, ResourceKey};


const SEARCH_PATH: [&str; 3] = ["api", "components", "search"];

/// Resource query adapter calling the code-analysis server search endpoint.
#[derive(Clone)]
pub struct HttpResourceQueryService {
    http_client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpResourceQueryService {
    /// Creates a query service rooted at `base_url`.
    ///
    /// Timeouts are configured on the provided client.
    #[must_use]
    pub fn new(http_client: reqwest::Client, base_url: Url, token: Option<String>) -> Self {
        Self {
            http_client,
            base_url,
            token: token.filter(|token| !token.trim().is_empty()),
        }
    }

    fn search_url(&self, query: &ResourceQuery) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::QueryService(format!(
                    "resource query base url '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(SEARCH_PATH);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("qualifiers", query.qualifiers.join(",").as_str());
            pairs.append_pair("ps", query.page_size.to_string().as_str());
            if let Some(names) = query.names.as_deref() {
                pairs.append_pair("q", names);
            }
            if let Some(keys) = query.keys.as_deref() {
                pairs.append_pair("keys", keys);
            }
        }

        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    paging: SearchPaging,
    #[serde(default)]
    components: Vec<SearchComponent>,
}

#[derive(Debug, Deserialize)]
struct SearchPaging {
    total: u64,
}

#[derive(Debug, Deserialize)]
struct SearchComponent {
    key: String,
    #[serde(default)]
    name: String,
    qualifier: String,
}

#[async_trait]
impl ResourceQueryService for HttpResourceQueryService {
    async fn find(&self, query: &ResourceQuery) -> AppResult<CandidateSet> {
        let url = self.search_url(query)?;

        let mut request = self.http_client.get(url);
        if let Some(token) = self.token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|error| {
            AppError::QueryService(format!("resource query transport error: {error}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(AppError::QueryService(format!(
                "resource query failed with status {status}: {body}"
            )));
        }

        let payload = response.json::<SearchResponse>().await.map_err(|error| {
            AppError::QueryService(format!("resource query returned an invalid body: {error}"))
        })?;

        let mut resources = Vec::with_capacity(payload.components.len());
        let mut skipped = 0_u64;
        for component in payload.components {
            match ResourceKey::new(component.key) {
                Ok(key) => resources.push(ResourceDescriptor::new(
                    key,
                    component.name,
                    component.qualifier,
                )),
                Err(error) => {
                    skipped += 1;
                    warn!(error = %error, "skipping resource without a key");
                }
            }
        }

        // Skipped components cannot be granted on, so they leave the total too.
        Ok(CandidateSet {
            resources,
            total_count: payload.paging.total.saturating_sub(skipped),
        })
    }
}
