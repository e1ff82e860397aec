use std::path::Path;

use image::RgbImage;

use crate::errors::ClassifyResult;
use crate::labels::LabelTable;
use crate::model::Model;
use crate::rank::{self, Prediction};
use crate::{DEFAULT_TOP_K, loader, preprocess};

/// Labels and model, loaded once and shared read-only by every
/// classification.
#[derive(Debug)]
pub struct Classifier<M: Model> {
    labels: LabelTable,
    model: M,
    top_k: usize,
}

impl<M: Model> Classifier<M> {
    pub fn new(labels: LabelTable, model: M) -> Classifier<M> {
        Classifier { labels, model, top_k: DEFAULT_TOP_K }
    }

    /// Changes the number of reported predictions. It must be between 1 and
    /// the number of labels.
    pub fn with_top_k(self, top_k: usize) -> ClassifyResult<Classifier<M>> {
        self.labels.check_top_k(top_k)?;
        Ok(Classifier { top_k, ..self })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Decodes the image file, then runs `classify_image`.
    pub fn classify(&self, path: impl AsRef<Path>) -> ClassifyResult<Vec<Prediction>> {
        let image = loader::load_rgb(path)?;
        self.classify_image(&image)
    }

    /// The top predictions for an already decoded image, best first.
    pub fn classify_image(&self, image: &RgbImage) -> ClassifyResult<Vec<Prediction>> {
        let input = preprocess::to_input_tensor(image);
        let scores = self.model.forward(input)?;
        let predictions = rank::rank(&scores, &self.labels, self.top_k)?;
        if let Some(best) = predictions.first() {
            info!("Best class #{} {:?} ({:.4})", best.index, best.label, best.score);
        }
        Ok(predictions)
    }
}
