//! The `Stage` trait: the unit of computation in a pipeline graph.

use crate::core::{RecordKind, Records};
use crate::errors::PipelineError;

/// A typed transformation unit.
///
/// A stage declares the record kinds it consumes (one per attached source, in
/// order) and the kind it produces, then transforms one input sequence per
/// source into a single output sequence. Contracts are checked when the stage
/// is wired into a [`StageNode`](crate::pipeline::StageNode), not when it
/// runs.
///
/// `produce` is a pure transformation over its inputs: it receives owned
/// sequences and returns a new one, and its side effects are limited to
/// logging. The exception is collaborator stages (zero declared inputs,
/// external data retrieval), which own their I/O and surface failures as
/// [`PipelineError::Collaborator`], including any timeout policy they apply
/// before returning.
pub trait Stage: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Record kinds consumed, one per source, in source order. Empty for
    /// source stages.
    fn declared_inputs(&self) -> &[RecordKind];

    /// Record kinds produced. Every stage in this crate produces exactly one
    /// sequence, so this is a one-element slice; wiring rejects stages that
    /// declare otherwise.
    fn declared_outputs(&self) -> &[RecordKind];

    /// Transform one input sequence per attached source, in source order,
    /// into the output sequence.
    fn produce(&self, inputs: Vec<Records>) -> Result<Records, PipelineError>;
}

/// Take the single input sequence of a one-source stage.
pub fn single_input(mut inputs: Vec<Records>) -> Result<Records, PipelineError> {
    if inputs.len() != 1 {
        return Err(PipelineError::Other(format!(
            "expected exactly one input sequence, got {}",
            inputs.len()
        )));
    }
    Ok(inputs.remove(0))
}
