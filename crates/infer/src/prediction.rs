use {
    serde::Serialize,
    std::{fmt, ops::Deref},
};

/// What a score refers to: a label when one is known, otherwise the raw index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Class {
    Label(String),
    Index(usize),
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Label(label) => write!(f, "{label}"),
            Class::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class: Class,
    pub confidence: f32,
}

/// Predictions ordered by descending confidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Predictions(Vec<Prediction>);

impl Predictions {
    /// The `k` most confident predictions (fewer if there are not that many).
    pub fn top(&self, k: usize) -> &[Prediction] {
        &self.0[..k.min(self.0.len())]
    }

    pub fn into_vec(self) -> Vec<Prediction> {
        self.0
    }
}

impl Deref for Predictions {
    type Target = [Prediction];

    fn deref(&self) -> &[Prediction] {
        &self.0
    }
}

impl IntoIterator for Predictions {
    type Item = Prediction;
    type IntoIter = std::vec::IntoIter<Prediction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// NaN sorts as the lowest score; -0.0 and 0.0 compare equal
fn sort_key(confidence: f32) -> f32 {
    if confidence.is_nan() {
        f32::NEG_INFINITY
    } else {
        confidence + 0.0
    }
}

/// Pairs scores with labels by position and sorts them, most confident first.
///
/// Scores without a matching label keep their index. Equal scores stay in
/// their original order.
pub fn rank(scores: &[f32], labels: Option<&[String]>) -> Predictions {
    let mut predictions: Vec<Prediction> = scores
        .iter()
        .enumerate()
        .map(|(index, &confidence)| Prediction {
            class: match labels.and_then(|labels| labels.get(index)) {
                Some(label) => Class::Label(label.clone()),
                None => Class::Index(index),
            },
            confidence,
        })
        .collect();
    predictions.sort_by(|a, b| sort_key(b.confidence).total_cmp(&sort_key(a.confidence)));
    Predictions(predictions)
}
