use std::path::{Path, PathBuf};
use std::str::FromStr;

use tract_nnef::prelude::Framework as _;
use tract_onnx::prelude::*;

use crate::errors::{ClassifyError, ClassifyResult};
use crate::preprocess::INPUT_SHAPE;

/// A network mapping one preprocessed image to one score per class.
///
/// Implementations are loaded once and only read afterwards.
pub trait Model {
    /// Runs one forward pass in inference mode. The input has the
    /// `INPUT_SHAPE` layout, the output is flattened.
    fn forward(&self, input: Tensor) -> ClassifyResult<Vec<f32>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelFormat {
    Onnx,
    Nnef,
}

impl ModelFormat {
    /// Guesses the format from the artifact path: NNEF for a directory with a
    /// `graph.nnef` or a tar archive, ONNX for everything else.
    pub fn guess(path: &Path) -> ModelFormat {
        let name = path.to_string_lossy();
        if (path.is_dir() && path.join("graph.nnef").exists())
            || name.ends_with(".tar")
            || name.ends_with(".tar.gz")
            || path.extension().map(|s| s == "tgz").unwrap_or(false)
        {
            ModelFormat::Nnef
        } else {
            ModelFormat::Onnx
        }
    }
}

impl FromStr for ModelFormat {
    type Err = ClassifyError;
    fn from_str(s: &str) -> ClassifyResult<ModelFormat> {
        match s {
            "onnx" => Ok(ModelFormat::Onnx),
            "nnef" => Ok(ModelFormat::Nnef),
            _ => Err(ClassifyError::Usage(format!(
                "Unknown model format {s:?}, expected \"onnx\" or \"nnef\""
            ))),
        }
    }
}

/// An optimized tract plan, running on the CPU.
pub struct TractModel {
    path: PathBuf,
    plan: TypedRunnableModel<TypedModel>,
}

impl std::fmt::Debug for TractModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TractModel({:?})", self.path)
    }
}

impl TractModel {
    /// Loads, optimizes and plans the model. The format is guessed from the
    /// path when not given.
    pub fn load(path: impl AsRef<Path>, format: Option<ModelFormat>) -> ClassifyResult<TractModel> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ClassifyError::model_load(
                path,
                anyhow::anyhow!("model not found: {:?}", path),
            ));
        }
        let format = format.unwrap_or_else(|| ModelFormat::guess(path));
        info!("Loading {:?} as {:?}", path, format);
        let plan = Self::plan(path, format).map_err(|e| ClassifyError::model_load(path, e))?;
        info!("Model ready");
        Ok(TractModel { path: path.to_owned(), plan })
    }

    fn plan(path: &Path, format: ModelFormat) -> TractResult<TypedRunnableModel<TypedModel>> {
        let model = match format {
            ModelFormat::Onnx => tract_onnx::onnx()
                .model_for_path(path)?
                .with_input_fact(0, f32::fact(INPUT_SHAPE).into())?
                .into_optimized()?,
            ModelFormat::Nnef => {
                tract_nnef::nnef().with_tract_core().model_for_path(path)?.into_optimized()?
            }
        };
        debug!("Optimized model has {} nodes", model.nodes().len());
        model.into_runnable()
    }
}

impl Model for TractModel {
    fn forward(&self, input: Tensor) -> ClassifyResult<Vec<f32>> {
        let start = std::time::Instant::now();
        let outputs = self.plan.run(tvec!(input.into())).map_err(ClassifyError::Inference)?;
        debug!("Forward pass took {:.3} ms", start.elapsed().as_secs_f64() * 1e3);
        let output = outputs.first().ok_or_else(|| {
            ClassifyError::Inference(anyhow::anyhow!("model produced no output"))
        })?;
        trace!("Raw output: {:?}", output);
        let scores = output.cast_to::<f32>().map_err(ClassifyError::Inference)?;
        let scores = scores.as_slice::<f32>().map_err(ClassifyError::Inference)?;
        Ok(scores.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_name() {
        assert_eq!("onnx".parse::<ModelFormat>().unwrap(), ModelFormat::Onnx);
        assert_eq!("nnef".parse::<ModelFormat>().unwrap(), ModelFormat::Nnef);
        assert!(matches!("pt".parse::<ModelFormat>(), Err(ClassifyError::Usage(_))));
    }

    #[test]
    fn format_guess() {
        assert_eq!(ModelFormat::guess(Path::new("model.onnx")), ModelFormat::Onnx);
        assert_eq!(ModelFormat::guess(Path::new("model.pb")), ModelFormat::Onnx);
        assert_eq!(ModelFormat::guess(Path::new("mobilenet.nnef.tgz")), ModelFormat::Nnef);
        assert_eq!(ModelFormat::guess(Path::new("mobilenet.nnef.tar.gz")), ModelFormat::Nnef);
        assert_eq!(ModelFormat::guess(Path::new("mobilenet.tar")), ModelFormat::Nnef);
    }

    #[test]
    fn nnef_directory_is_guessed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("graph.nnef"), "version 1.0;").unwrap();
        assert_eq!(ModelFormat::guess(dir.path()), ModelFormat::Nnef);
    }

    #[test]
    fn missing_model_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        match TractModel::load(&path, None) {
            Err(ClassifyError::ModelLoad { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn garbage_model_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"\xff\xff\xff\xff not a protobuf").unwrap();
        assert!(matches!(
            TractModel::load(&path, Some(ModelFormat::Onnx)),
            Err(ClassifyError::ModelLoad { .. })
        ));
    }
}
