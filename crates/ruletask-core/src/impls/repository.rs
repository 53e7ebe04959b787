//! InMemoryDecisionRepository - 開発用の決定定義リポジトリ
//!
//! # 学習ポイント
//! - key ごとに version 昇順の Vec で保持（latest = 末尾）
//! - RwLock で読み取り並行・登録排他
//! - 二重登録は登録時に弾く

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use crate::domain::{DecisionBinding, DecisionDefinition, DecisionReference, ExecutionContext, NotFoundError};
use crate::ports::DecisionDefinitionResolver;

/// InMemoryDecisionRepository は配置済みの決定定義を保持
///
/// # 使用例
/// ```ignore
/// let repo = InMemoryDecisionRepository::new();
/// repo.deploy(DecisionDefinition::new("approver:1", "approver", 1))?;
/// let d = repo.resolve(&DecisionReference::latest("approver"), None)?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryDecisionRepository {
    by_key: RwLock<HashMap<String, Vec<DecisionDefinition>>>,
}

/// RepositoryError は登録時のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Decision '{key}' version {version} is already deployed")]
    AlreadyDeployed { key: String, version: u32 },
}

impl InMemoryDecisionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deploy(&self, definition: DecisionDefinition) -> Result<(), RepositoryError> {
        let mut by_key = self.by_key.write().unwrap_or_else(PoisonError::into_inner);
        let versions = by_key.entry(definition.key.clone()).or_default();
        if versions.iter().any(|d| d.version == definition.version) {
            return Err(RepositoryError::AlreadyDeployed {
                key: definition.key,
                version: definition.version,
            });
        }
        let at = versions.partition_point(|d| d.version < definition.version);
        versions.insert(at, definition);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<DecisionDefinition>>> {
        self.by_key.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DecisionDefinitionResolver for InMemoryDecisionRepository {
    fn resolve(
        &self,
        reference: &DecisionReference,
        execution: Option<&ExecutionContext>,
    ) -> Result<DecisionDefinition, NotFoundError> {
        let not_found = || NotFoundError::DecisionDefinition {
            reference: reference.clone(),
        };

        let by_key = self.read();
        let versions = by_key.get(&reference.key).ok_or_else(not_found)?;

        let found = match reference.binding {
            DecisionBinding::Latest => versions.last(),
            DecisionBinding::Version(version) => versions.iter().find(|d| d.version == version),
            DecisionBinding::Deployment => {
                let deployment_id = execution
                    .and_then(|ctx| ctx.deployment_id.as_deref())
                    .ok_or_else(not_found)?;
                return versions
                    .iter()
                    .find(|d| d.deployment_id.as_deref() == Some(deployment_id))
                    .cloned()
                    .ok_or_else(|| NotFoundError::DecisionDefinitionInDeployment {
                        reference: reference.clone(),
                        deployment_id: deployment_id.to_string(),
                    });
            }
        };
        found.cloned().ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> InMemoryDecisionRepository {
        let repo = InMemoryDecisionRepository::new();
        repo.deploy(DecisionDefinition::new("approver:2", "approver", 2).with_deployment("dep-2"))
            .unwrap();
        repo.deploy(DecisionDefinition::new("approver:1", "approver", 1).with_deployment("dep-1"))
            .unwrap();
        repo
    }

    fn execution(deployment: Option<&str>) -> ExecutionContext {
        let ctx = ExecutionContext::new("invoice", "invoice:1", "pi-1", "assign", "assign:1");
        match deployment {
            Some(id) => ctx.with_deployment(id),
            None => ctx,
        }
    }

    #[test]
    fn latest_picks_highest_version_regardless_of_deploy_order() {
        let d = repo()
            .resolve(&DecisionReference::latest("approver"), None)
            .unwrap();
        assert_eq!(d.id, "approver:2");
    }

    #[test]
    fn version_binding_picks_exact_version() {
        let repo = repo();
        let d = repo
            .resolve(&DecisionReference::version("approver", 1), None)
            .unwrap();
        assert_eq!(d.id, "approver:1");

        let err = repo
            .resolve(&DecisionReference::version("approver", 7), None)
            .unwrap_err();
        assert!(matches!(err, NotFoundError::DecisionDefinition { .. }));
    }

    #[test]
    fn deployment_binding_uses_the_calling_process_deployment() {
        let repo = repo();
        let reference = DecisionReference::deployment("approver");

        let d = repo
            .resolve(&reference, Some(&execution(Some("dep-1"))))
            .unwrap();
        assert_eq!(d.id, "approver:1");

        let err = repo
            .resolve(&reference, Some(&execution(Some("dep-9"))))
            .unwrap_err();
        assert_eq!(
            err,
            NotFoundError::DecisionDefinitionInDeployment {
                reference: reference.clone(),
                deployment_id: "dep-9".to_string(),
            }
        );

        assert!(repo.resolve(&reference, Some(&execution(None))).is_err());
        assert!(repo.resolve(&reference, None).is_err());
    }

    #[test]
    fn unknown_key_is_not_found() {
        let err = repo()
            .resolve(&DecisionReference::latest("unknown"), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "no decision definition found for 'unknown (latest)'");
    }

    #[test]
    fn duplicate_version_is_rejected() {
        let repo = repo();
        let err = repo
            .deploy(DecisionDefinition::new("approver:1b", "approver", 1))
            .unwrap_err();
        assert_eq!(
            err,
            RepositoryError::AlreadyDeployed {
                key: "approver".to_string(),
                version: 1,
            }
        );
        assert_eq!(repo.len(), 2);
    }
}
