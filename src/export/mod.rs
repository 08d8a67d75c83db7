use crate::recommend::Recommendation;
use anyhow::{Context, Result};
use std::io::Write;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const CSV_FILE_NAME: &str = "recommendations.csv";

pub fn write_recommendations_csv<W: Write>(writer: W, recommendations: &[Recommendation]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if recommendations.is_empty() {
        // serialize() writes the header together with the first record only
        csv_writer.write_record(["rank", "track_name", "artist_name", "distance"])?;
    }
    for recommendation in recommendations {
        csv_writer
            .serialize(recommendation)
            .with_context(|| format!("Could not write recommendation {}", recommendation.rank))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn recommendations_to_csv(recommendations: &[Recommendation]) -> Result<Vec<u8>> {
    let mut out = vec![];
    write_recommendations_csv(&mut out, recommendations)?;
    Ok(out)
}
