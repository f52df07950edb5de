// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end analysis: collect a profile, then score it.

use serde::Serialize;
use tracing::info;

use crate::{
    collector::Collector,
    config::ScoringConfig,
    error::Error,
    host::RepositoryHost,
    identifier::RepositoryId,
    scoring::{self, ScoreResult}
};

/// Score of one repository together with its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Repository that was analyzed.
    pub repository: RepositoryId,
    /// Scoring outcome.
    #[serde(flatten)]
    pub result:     ScoreResult
}

/// Collects and scores `id`.
///
/// The profile only lives for the duration of the call.
///
/// # Errors
///
/// Propagates collector failures; scoring itself cannot fail.
pub async fn analyze<H: RepositoryHost>(
    collector: &Collector<H>,
    id: &RepositoryId,
    config: &ScoringConfig
) -> Result<Analysis, Error> {
    let profile = collector.collect(id).await?;
    let result = scoring::score_with(&profile, config);
    info!("Scored {} at {} ({})", id, result.score, result.grade);

    Ok(Analysis {
        repository: id.clone(),
        result
    })
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, time::Duration};

    use async_trait::async_trait;

    use super::*;
    use crate::{
        host::{BlobPayload, HostError, RepositoryMetadata, RepositoryTree, TreeEntry},
        scoring::Grade
    };

    struct FixedHost {
        reachable: bool
    }

    #[async_trait]
    impl RepositoryHost for FixedHost {
        async fn metadata(&self, _id: &RepositoryId) -> Result<RepositoryMetadata, HostError> {
            if !self.reachable {
                return Err(HostError::status(404, "404 Not Found"));
            }
            Ok(RepositoryMetadata {
                size:           600 * 1024,
                default_branch: "main".to_owned()
            })
        }

        async fn languages(
            &self,
            _id: &RepositoryId
        ) -> Result<BTreeMap<String, u64>, HostError> {
            Ok(BTreeMap::from([("Python".to_owned(), 100)]))
        }

        async fn tree(
            &self,
            _id: &RepositoryId,
            _branch: &str
        ) -> Result<RepositoryTree, HostError> {
            Ok(RepositoryTree {
                entries:   vec![
                    TreeEntry::blob("requirements.txt", "req"),
                    TreeEntry::blob("src/train.py", "py"),
                ],
                truncated: false
            })
        }

        async fn blob(&self, _id: &RepositoryId, _sha: &str) -> Result<BlobPayload, HostError> {
            Ok(BlobPayload {
                content:  "dGVuc29yZmxvdz09Mi4xNQo=".to_owned(),
                encoding: "base64".to_owned()
            })
        }
    }

    fn collector(reachable: bool) -> Collector<FixedHost> {
        let host = FixedHost {
            reachable
        };
        Collector::new(host, 5, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn analyze_scores_the_collected_profile() {
        let id: RepositoryId = "octocat/trainer".parse().expect("valid identifier");

        let analysis = analyze(&collector(true), &id, &ScoringConfig::default())
            .await
            .expect("analysis succeeds");

        assert_eq!(analysis.repository, id);
        assert_eq!(analysis.result.score, 35);
        assert_eq!(analysis.result.grade, Grade::F);

        let json = serde_json::to_value(&analysis).expect("serializable");
        assert_eq!(json["repository"]["owner"], "octocat");
        assert_eq!(json["score"], 35);
        assert_eq!(json["breakdown"]["computeDeduction"], 15);
    }

    #[tokio::test]
    async fn analyze_propagates_collector_failures() {
        let id: RepositoryId = "octocat/missing".parse().expect("valid identifier");

        let error = analyze(&collector(false), &id, &ScoringConfig::default())
            .await
            .expect_err("metadata failure aborts");

        assert!(matches!(error, Error::RemoteFetch { .. }));
    }
}
