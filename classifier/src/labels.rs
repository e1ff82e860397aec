use std::ops::Index;
use std::path::Path;

use crate::errors::{ClassifyError, ClassifyResult};

/// Class names, indexed by the position of the matching score in the model
/// output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Reads a newline-delimited label file. Each line is trimmed and keeps
    /// its position, blank lines included.
    pub fn load(path: impl AsRef<Path>) -> ClassifyResult<LabelTable> {
        let path = path.as_ref();
        let content =
            fs_err::read_to_string(path).map_err(|e| ClassifyError::model_load(path, e))?;
        let table = Self::parse(&content).map_err(|e| ClassifyError::model_load(path, e))?;
        info!("Loaded {} labels from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn parse(content: &str) -> anyhow::Result<LabelTable> {
        let labels: Vec<String> = content.lines().map(|l| l.trim().to_string()).collect();
        anyhow::ensure!(!labels.is_empty(), "label file is empty");
        Ok(LabelTable { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Fails unless `k` predictions can be drawn from this table.
    pub fn check_top_k(&self, k: usize) -> ClassifyResult<()> {
        if k == 0 {
            return Err(ClassifyError::Usage("At least one prediction must be asked for".into()));
        }
        if k > self.len() {
            return Err(ClassifyError::NotEnoughClasses { requested: k, available: self.len() });
        }
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|s| s.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.as_str())
    }
}

impl Index<usize> for LabelTable {
    type Output = str;
    fn index(&self, index: usize) -> &str {
        &self.labels[index]
    }
}

impl<S: Into<String>> FromIterator<S> for LabelTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        LabelTable { labels: iter.into_iter().map(Into::into).collect() }
    }
}
