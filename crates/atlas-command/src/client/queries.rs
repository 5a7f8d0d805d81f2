//! Cross-resource query endpoints.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::AtlasResult;
use crate::transport::{Method, RequestBody};
use crate::types::{Dataset, FullDataset};

use super::helpers::QueryParams;
use super::AtlasCommandClient;

impl FullDataset {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .opt("entity_limit", self.entity_limit)
            .opt("task_limit", self.task_limit)
            .opt("object_limit", self.object_limit)
    }
}

fn changed_since_query(since: DateTime<Utc>, limit: Option<u32>) -> QueryParams {
    QueryParams::new()
        .opt("since", Some(since.to_rfc3339_opts(SecondsFormat::AutoSi, true)))
        .opt("limit", limit)
}

impl AtlasCommandClient {
    /// `GET /queries/changed-since`
    pub async fn get_changed_since(
        &self,
        since: DateTime<Utc>,
        limit: Option<u32>,
    ) -> AtlasResult<Dataset> {
        self.call(
            Method::GET,
            &["queries", "changed-since"],
            changed_since_query(since, limit),
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /queries/full`
    pub async fn get_full_dataset(&self, limits: &FullDataset) -> AtlasResult<Dataset> {
        self.call(
            Method::GET,
            &["queries", "full"],
            limits.to_query(),
            RequestBody::Empty,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_changed_since_formats_utc() {
        let since = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let pairs: Vec<_> = changed_since_query(since, Some(50))
            .pairs()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        assert_eq!(pairs, vec!["since=2024-05-01T12:30:00Z", "limit=50"]);
    }
}
