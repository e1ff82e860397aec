use std::io::Write;

use crate::rank::Prediction;

/// `label: 12.34%`
pub fn format_prediction(prediction: &Prediction) -> String {
    format!("{}: {:.2}%", prediction.label, prediction.score as f64 * 100.0)
}

/// One line per prediction, in ranked order.
pub fn write_human(mut w: impl Write, predictions: &[Prediction]) -> std::io::Result<()> {
    for p in predictions {
        writeln!(w, "{}", format_prediction(p))?;
    }
    Ok(())
}

/// The predictions as a JSON array.
pub fn write_json(mut w: impl Write, predictions: &[Prediction]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut w, predictions)?;
    writeln!(w)?;
    Ok(())
}
