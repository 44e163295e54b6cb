//! Wiring and lazy evaluation of pipeline graphs.
//!
//! A [`StageNode`] owns its stage logic and `Arc` references to its upstream
//! nodes. Nodes can only be built through the wiring constructors, which
//! check the stage's type contract against its sources up front. A node can
//! therefore only reference already-constructed upstream nodes, which makes
//! the graph acyclic by construction: no cycle detection is needed because
//! the wiring API cannot express a cycle.
//!
//! Evaluation is pull-based and fully synchronous: nothing computes until
//! [`StageNode::evaluate`] is called on a terminal node, which recursively
//! pulls from its sources depth-first, in declared order, on a single
//! thread. Any error aborts the evaluation and propagates to the caller
//! unchanged; no partial results are returned.

use crate::core::{RecordKind, Records};
use crate::errors::PipelineError;
use crate::pipeline::stage::Stage;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// A stage wired into a pipeline graph.
pub struct StageNode {
    stage: Box<dyn Stage>,
    sources: Vec<Arc<StageNode>>,
    memo: Option<OnceCell<Result<Records, PipelineError>>>,
}

impl std::fmt::Debug for StageNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageNode")
            .field("stage", &self.stage.name())
            .field("sources", &self.sources.len())
            .field("memoized", &self.memo.is_some())
            .finish()
    }
}

impl StageNode {
    /// Wire a source stage (zero declared inputs).
    pub fn source(stage: impl Stage + 'static) -> Result<Arc<Self>, PipelineError> {
        Self::wire(Box::new(stage), Vec::new(), false)
    }

    /// Wire `stage` to its upstream sources.
    ///
    /// Fails when the source count does not match the stage's declared
    /// inputs, or when any source's output kind differs from the declared
    /// input kind at that position. On failure nothing is constructed, so no
    /// partial graph state persists.
    pub fn attach(
        stage: impl Stage + 'static,
        sources: Vec<Arc<StageNode>>,
    ) -> Result<Arc<Self>, PipelineError> {
        Self::wire(Box::new(stage), sources, false)
    }

    /// Like [`StageNode::attach`], but the node evaluates at most once per
    /// run: the first `evaluate` call computes and caches the result (or
    /// the error), and every later call returns the cached value.
    ///
    /// Intended for expensive collaborator lookups shared by several
    /// downstream consumers within one run. The cache is local to this node
    /// and lives as long as it does; reconstruct the node to recompute.
    pub fn reused(
        stage: impl Stage + 'static,
        sources: Vec<Arc<StageNode>>,
    ) -> Result<Arc<Self>, PipelineError> {
        Self::wire(Box::new(stage), sources, true)
    }

    fn wire(
        stage: Box<dyn Stage>,
        sources: Vec<Arc<StageNode>>,
        reuse: bool,
    ) -> Result<Arc<Self>, PipelineError> {
        if stage.declared_outputs().len() != 1 {
            return Err(PipelineError::configuration(format!(
                "stage '{}' must declare exactly one output kind",
                stage.name()
            )));
        }

        let declared = stage.declared_inputs();
        if sources.len() != declared.len() {
            return Err(PipelineError::SourceCountMismatch {
                consumer: stage.name().to_string(),
                expected: declared.len(),
                found: sources.len(),
            });
        }
        for (position, (source, expected)) in sources.iter().zip(declared).enumerate() {
            let found = source.output_kind();
            if found != *expected {
                return Err(PipelineError::TypeMismatch {
                    consumer: stage.name().to_string(),
                    source_name: source.name().to_string(),
                    position,
                    expected: *expected,
                    found,
                });
            }
        }

        Ok(Arc::new(Self {
            stage,
            sources,
            memo: reuse.then(OnceCell::new),
        }))
    }

    /// Name of the wired stage.
    pub fn name(&self) -> &str {
        self.stage.name()
    }

    /// Kind of the sequence this node produces.
    ///
    /// Wiring guarantees every node declares exactly one output kind.
    pub fn output_kind(&self) -> RecordKind {
        self.stage.declared_outputs()[0]
    }

    /// Number of upstream sources wired into this node.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Pull this node's output, evaluating the upstream graph as needed.
    ///
    /// Sources are evaluated depth-first in declared order, one at a time.
    /// A memoized node ([`StageNode::reused`]) computes on the first call
    /// and replays the cached outcome afterwards.
    pub fn evaluate(&self) -> Result<Records, PipelineError> {
        match &self.memo {
            Some(cell) => cell.get_or_init(|| self.compute()).clone(),
            None => self.compute(),
        }
    }

    fn compute(&self) -> Result<Records, PipelineError> {
        let mut inputs = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            inputs.push(source.evaluate()?);
        }

        log::debug!("evaluating stage '{}'", self.stage.name());
        let output = self.stage.produce(inputs)?;

        let expected = self.output_kind();
        if output.kind() != expected {
            return Err(PipelineError::OutputMismatch {
                stage: self.stage.name().to_string(),
                expected,
                found: output.kind(),
            });
        }
        Ok(output)
    }
}
