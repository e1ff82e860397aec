use std::fmt;
use std::path::PathBuf;

pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Everything that can abort a classification run.
///
/// Each variant names the input it failed on, so the message printed by the
/// command line is enough to tell which file to look at.
#[derive(Debug)]
pub enum ClassifyError {
    /// Wrong argument count or an invalid option value.
    Usage(String),
    /// The image file is missing or not in a decodable format.
    ImageDecode { path: PathBuf, source: image::ImageError },
    /// The model artifact or the label file is missing or unusable.
    ModelLoad { path: PathBuf, source: anyhow::Error },
    /// The model does not produce one score per label.
    ShapeMismatch { expected: usize, got: usize },
    /// More predictions were requested than there are labels.
    NotEnoughClasses { requested: usize, available: usize },
    /// The forward pass failed or produced unusable scores.
    Inference(anyhow::Error),
}

impl ClassifyError {
    pub fn model_load(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        ClassifyError::ModelLoad { path: path.into(), source: source.into() }
    }

    pub fn image_decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        ClassifyError::ImageDecode { path: path.into(), source }
    }
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::Usage(msg) => write!(f, "{msg}"),
            ClassifyError::ImageDecode { path, source } => {
                write!(f, "Could not decode image {:?}: {}", path, source)
            }
            ClassifyError::ModelLoad { path, source } => {
                write!(f, "Could not load {:?}: {}", path, source)
            }
            ClassifyError::ShapeMismatch { expected, got } => write!(
                f,
                "Model output has {got} scores, but the label table has {expected} entries"
            ),
            ClassifyError::NotEnoughClasses { requested, available } => write!(
                f,
                "Asked for the top {requested} predictions, but there are only {available} labels"
            ),
            ClassifyError::Inference(e) => write!(f, "Inference failed: {e}"),
        }
    }
}

impl std::error::Error for ClassifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClassifyError::ImageDecode { source, .. } => Some(source),
            ClassifyError::ModelLoad { source, .. } => Some(&**source),
            ClassifyError::Inference(e) => Some(&**e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_names_both_sizes() {
        let e = ClassifyError::ShapeMismatch { expected: 1000, got: 1001 };
        let msg = e.to_string();
        assert!(msg.contains("1000"));
        assert!(msg.contains("1001"));
    }

    #[test]
    fn model_load_names_path_and_keeps_source() {
        let e = ClassifyError::model_load("nets/model.onnx", anyhow::anyhow!("truncated protobuf"));
        assert!(e.to_string().contains("nets/model.onnx"));
        let source = std::error::Error::source(&e).unwrap();
        assert_eq!(source.to_string(), "truncated protobuf");
    }
}
