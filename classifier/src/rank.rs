use serde::Serialize;

use crate::errors::{ClassifyError, ClassifyResult};
use crate::labels::LabelTable;

/// One ranked class.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub index: usize,
    pub label: String,
    pub score: f32,
}

/// Normalizes raw scores into a probability distribution.
///
/// The max is subtracted before exponentiation and the sum is accumulated in
/// f64, so large logits neither overflow nor lose the small classes.
/// Non-finite scores are rejected.
pub fn softmax(scores: &[f32]) -> ClassifyResult<Vec<f32>> {
    if let Some(ix) = scores.iter().position(|s| !s.is_finite()) {
        return Err(ClassifyError::Inference(anyhow::anyhow!(
            "model score #{} is not finite ({})",
            ix,
            scores[ix]
        )));
    }
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f64> = scores.iter().map(|&s| ((s - max) as f64).exp()).collect();
    let sum: f64 = exps.iter().sum();
    Ok(exps.into_iter().map(|e| (e / sum) as f32).collect())
}

/// Indices of the `k` largest values, largest first. Equal values keep
/// ascending index order.
pub fn top_k_indices(values: &[f32], k: usize) -> ClassifyResult<Vec<usize>> {
    if k > values.len() {
        return Err(ClassifyError::NotEnoughClasses { requested: k, available: values.len() });
    }
    let mut indices: Vec<usize> = (0..values.len()).collect();
    // stable sort: ties stay in index order
    indices.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    indices.truncate(k);
    Ok(indices)
}

/// Softmax over the raw model output, then the `k` best labels.
pub fn rank(scores: &[f32], labels: &LabelTable, k: usize) -> ClassifyResult<Vec<Prediction>> {
    if scores.len() != labels.len() {
        return Err(ClassifyError::ShapeMismatch { expected: labels.len(), got: scores.len() });
    }
    let probs = softmax(scores)?;
    let best = top_k_indices(&probs, k)?;
    Ok(best
        .into_iter()
        .map(|index| Prediction { index, label: labels[index].to_string(), score: probs[index] })
        .collect())
}
