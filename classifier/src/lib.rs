#[macro_use]
extern crate log;

pub mod classifier;
pub mod errors;
pub mod labels;
pub mod loader;
pub mod model;
pub mod preprocess;
pub mod rank;
pub mod report;

pub use self::classifier::Classifier;
pub use self::errors::{ClassifyError, ClassifyResult};
pub use self::labels::LabelTable;
pub use self::model::{Model, ModelFormat, TractModel};
pub use self::rank::Prediction;

/// Number of predictions reported when nothing else is asked for.
pub const DEFAULT_TOP_K: usize = 5;

pub mod prelude {
    pub use crate::{
        Classifier, ClassifyError, ClassifyResult, LabelTable, Model, ModelFormat, Prediction,
        TractModel, DEFAULT_TOP_K,
    };
    pub use tract_onnx::prelude::Tensor;
}
