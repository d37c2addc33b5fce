use serde::Deserialize;

use crate::inference::ArtifactError;

/// Parameters of a fitted polynomial feature expansion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolynomialSpec {
    pub n_features_in: usize,
    pub degree: usize,
    #[serde(default = "default_true")]
    pub include_bias: bool,
    #[serde(default)]
    pub interaction_only: bool,
}

fn default_true() -> bool {
    true
}

// 12 inputs at degree 5 is already 6188 terms.
const MAX_DEGREE: usize = 5;

/// Polynomial expansion with its output terms precomputed.
///
/// Terms are ordered by degree, and within a degree by lexicographic index
/// combination: `1, x0, x1, x0², x0·x1, x1², ...`.
#[derive(Debug, Clone)]
pub struct PolyTransform {
    spec: PolynomialSpec,
    /// Input indices multiplied together for each output column. Empty is the bias.
    terms: Vec<Vec<usize>>,
}

impl PolyTransform {
    pub fn new(spec: PolynomialSpec) -> Result<Self, ArtifactError> {
        if spec.n_features_in == 0 {
            return Err(ArtifactError::Contract(
                "polynomial transform has no input features".to_string(),
            ));
        }
        if spec.degree == 0 || spec.degree > MAX_DEGREE {
            return Err(ArtifactError::Contract(format!(
                "polynomial degree {} outside 1..={MAX_DEGREE}",
                spec.degree
            )));
        }

        let mut terms = Vec::new();
        if spec.include_bias {
            terms.push(Vec::new());
        }
        for degree in 1..=spec.degree {
            let mut current = Vec::with_capacity(degree);
            push_combinations(
                0,
                spec.n_features_in,
                degree,
                !spec.interaction_only,
                &mut current,
                &mut terms,
            );
        }

        Ok(Self { spec, terms })
    }

    pub fn n_features_in(&self) -> usize {
        self.spec.n_features_in
    }

    pub fn n_output_features(&self) -> usize {
        self.terms.len()
    }

    /// Expands one row. `x.len()` must equal `n_features_in()`.
    pub fn transform(&self, x: &[f64]) -> Vec<f64> {
        self.terms
            .iter()
            .map(|term| term.iter().map(|&i| x[i]).product::<f64>())
            .collect()
    }
}

fn push_combinations(
    start: usize,
    n: usize,
    size: usize,
    with_replacement: bool,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if current.len() == size {
        out.push(current.clone());
        return;
    }
    for i in start..n {
        current.push(i);
        let next = if with_replacement { i } else { i + 1 };
        push_combinations(next, n, size, with_replacement, current, out);
        current.pop();
    }
}
