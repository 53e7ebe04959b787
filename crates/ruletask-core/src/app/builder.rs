//! EngineBuilder - エンジンの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 省略可能な協調者にはデフォルト実装を入れる

use std::sync::Arc;

use crate::domain::{DecisionTaskError, DecisionTaskSpec, DeploymentError, EngineConfig, ExecutionContext};
use crate::impls::LoggingHistorySink;
use crate::ports::{
    Clock, DecisionDefinitionResolver, DecisionEvaluator, DecisionInterceptor, HistorySink,
    IdGenerator, SystemClock, UlidGenerator, VariableScope,
};

use super::decision_service::DecisionService;
use super::history_producer::HistoryEventProducer;
use super::interceptor_chain::InterceptorChain;
use super::invoker::DecisionInvoker;
use super::task::{DecisionTask, StepCompletion};

/// EngineBuilder は DecisionEngine を構築
///
/// # 使用例
/// ```ignore
/// let engine = EngineBuilder::new()
///     .evaluator(Arc::new(evaluator))
///     .resolver(Arc::new(repository))
///     .history_sink(sink.clone())
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - evaluator と resolver は必須。欠けていれば build() が BuildError を返す
/// - clock / id generator / sink は未指定ならデフォルト
#[derive(Default)]
pub struct EngineBuilder {
    evaluator: Option<Arc<dyn DecisionEvaluator>>,
    resolver: Option<Arc<dyn DecisionDefinitionResolver>>,
    sink: Option<Arc<dyn HistorySink>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    interceptors: InterceptorChain,
    config: EngineConfig,
}

/// BuildError はエンジン構築時のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("Missing collaborator '{0}'. It must be set before build().")]
    MissingCollaborator(&'static str),
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluator(mut self, evaluator: Arc<dyn DecisionEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn DecisionDefinitionResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn history_sink(mut self, sink: Arc<dyn HistorySink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Add an interceptor; the first one added is the outermost.
    pub fn interceptor(mut self, interceptor: Arc<dyn DecisionInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<DecisionEngine, BuildError> {
        let evaluator = self
            .evaluator
            .ok_or(BuildError::MissingCollaborator("evaluator"))?;
        let resolver = self
            .resolver
            .ok_or(BuildError::MissingCollaborator("resolver"))?;

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let ids: Arc<dyn IdGenerator> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(UlidGenerator::new(clock.clone())),
        };
        let sink: Arc<dyn HistorySink> = match self.sink {
            Some(sink) => sink,
            None => Arc::new(LoggingHistorySink),
        };

        Ok(DecisionEngine {
            invoker: Arc::new(DecisionInvoker {
                evaluator,
                resolver,
                interceptors: self.interceptors,
                producer: HistoryEventProducer::new(clock, ids),
                sink,
                config: self.config,
            }),
        })
    }
}

/// DecisionEngine は配置と実行の入口
#[derive(Clone)]
pub struct DecisionEngine {
    invoker: Arc<DecisionInvoker>,
}

impl DecisionEngine {
    /// Validate a task configuration; unknown mapper names fail here, not at run time.
    pub fn deploy(&self, spec: DecisionTaskSpec) -> Result<DecisionTask, DeploymentError> {
        DecisionTask::deploy(spec)
    }

    pub fn execute(
        &self,
        task: &DecisionTask,
        scope: &mut dyn VariableScope,
        execution: &ExecutionContext,
    ) -> Result<StepCompletion, DecisionTaskError> {
        self.invoker.invoke(task, scope, execution)
    }

    pub fn decision_service(&self) -> DecisionService {
        DecisionService::new(self.invoker.clone())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.invoker.config
    }
}
