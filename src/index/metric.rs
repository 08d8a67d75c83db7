use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
    /// 1 - cosine similarity, a zero vector is at distance 1 from everything.
    Cosine,
}

impl Metric {
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Metric::Euclidean => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| {
                    let d = (*x as f64) - (*y as f64);
                    d * d
                })
                .sum::<f64>()
                .sqrt() as f32,
            Metric::Manhattan => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| ((*x as f64) - (*y as f64)).abs())
                .sum::<f64>() as f32,
            Metric::Cosine => {
                let mut dot = 0.0f64;
                let mut norm_a = 0.0f64;
                let mut norm_b = 0.0f64;
                for (x, y) in a.iter().zip(b.iter()) {
                    let (x, y) = (*x as f64, *y as f64);
                    dot += x * y;
                    norm_a += x * x;
                    norm_b += y * y;
                }
                if norm_a == 0.0 || norm_b == 0.0 {
                    return 1.0;
                }
                let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
                (1.0 - similarity).max(0.0) as f32
            }
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Cosine => "cosine",
        };
        write!(f, "{}", name)
    }
}
