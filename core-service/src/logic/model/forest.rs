//! Random Forest Classifier
//!
//! Bagged CART trees (Gini impurity) for the binary normal / risk task.
//! Each tree sees a bootstrap sample and considers a random subset of
//! features at every split; class probabilities are the mean of the leaf
//! probabilities. Global feature importances are the mean decrease in
//! impurity, normalised per tree and then across the forest.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::dataset::{Dataset, RISK_LABEL};
use crate::logic::sensor::{FeatureVector, FEATURE_COUNT};

// ============================================================================
// PARAMETERS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: usize,
    /// Nodes with fewer samples become leaves
    pub min_samples_split: usize,
    /// Features tried per split; `None` = floor(sqrt(FEATURE_COUNT))
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 10,
            min_samples_split: 2,
            max_features: None,
            seed: 42,
        }
    }
}

impl ForestParams {
    fn features_per_split(&self) -> usize {
        let default = (FEATURE_COUNT as f64).sqrt().floor() as usize;
        self.max_features.unwrap_or(default).clamp(1, FEATURE_COUNT)
    }
}

// ============================================================================
// DECISION TREE
// ============================================================================

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        risk_probability: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    fn predict_proba(&self, x: &FeatureVector) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { risk_probability } => return *risk_probability,
                Node::Split { feature, threshold, left, right } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

/// Best split found at a node
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    /// Weighted impurity decrease (sample-count weighted)
    gain: f64,
}

struct TreeBuilder<'a> {
    data: &'a Dataset,
    params: &'a ForestParams,
    rng: &'a mut StdRng,
    importances: [f64; FEATURE_COUNT],
}

impl<'a> TreeBuilder<'a> {
    fn build(&mut self, rows: Vec<usize>, depth: usize) -> Node {
        let (n, n_risk) = self.counts(&rows);
        let risk_probability = if n == 0 { 0.0 } else { n_risk as f64 / n as f64 };

        let pure = n_risk == 0 || n_risk == n;
        if pure || depth >= self.params.max_depth || n < self.params.min_samples_split {
            return Node::Leaf { risk_probability };
        }

        let Some(best) = self.best_split(&rows) else {
            return Node::Leaf { risk_probability };
        };

        self.importances[best.feature] += best.gain;

        let data = self.data;
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&r| data.value(r, best.feature) <= best.threshold);

        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(self.build(left_rows, depth + 1)),
            right: Box::new(self.build(right_rows, depth + 1)),
        }
    }

    fn counts(&self, rows: &[usize]) -> (usize, usize) {
        let n_risk = rows.iter().filter(|&&r| self.data.label(r) == RISK_LABEL).count();
        (rows.len(), n_risk)
    }

    fn best_split(&mut self, rows: &[usize]) -> Option<SplitCandidate> {
        let k = self.params.features_per_split();
        let features = rand::seq::index::sample(&mut *self.rng, FEATURE_COUNT, k);

        let (n, n_risk) = self.counts(rows);
        let parent_impurity = n as f64 * gini(n, n_risk);

        let mut best: Option<SplitCandidate> = None;

        for feature in features.iter() {
            let mut sorted: Vec<(f64, bool)> = rows
                .iter()
                .map(|&r| (self.data.value(r, feature), self.data.label(r) == RISK_LABEL))
                .collect();
            sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

            let mut left_n = 0usize;
            let mut left_risk = 0usize;

            for i in 0..sorted.len() - 1 {
                left_n += 1;
                if sorted[i].1 {
                    left_risk += 1;
                }

                // only split between distinct values
                if sorted[i].0 >= sorted[i + 1].0 {
                    continue;
                }

                let right_n = n - left_n;
                let right_risk = n_risk - left_risk;
                let child_impurity = left_n as f64 * gini(left_n, left_risk)
                    + right_n as f64 * gini(right_n, right_risk);
                let gain = parent_impurity - child_impurity;

                if gain > best.as_ref().map_or(1e-12, |b| b.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: (sorted[i].0 + sorted[i + 1].0) / 2.0,
                        gain,
                    });
                }
            }
        }

        best
    }
}

/// Binary Gini impurity
fn gini(n: usize, n_risk: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = n_risk as f64 / n as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

fn normalize(values: &mut [f64; FEATURE_COUNT]) -> bool {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return false;
    }
    for v in values.iter_mut() {
        *v /= total;
    }
    true
}

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    importances: [f64; FEATURE_COUNT],
}

impl RandomForest {
    /// Fit on `data`. Deterministic for a given `params.seed`.
    pub fn fit(data: &Dataset, params: &ForestParams) -> RandomForest {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_estimators);
        let mut importances = [0.0f64; FEATURE_COUNT];
        let mut contributing = 0usize;

        for _ in 0..params.n_estimators.max(1) {
            let bootstrap: Vec<usize> = if data.is_empty() {
                Vec::new()
            } else {
                (0..data.len()).map(|_| rng.gen_range(0..data.len())).collect()
            };

            let mut builder = TreeBuilder {
                data,
                params,
                rng: &mut rng,
                importances: [0.0; FEATURE_COUNT],
            };
            let root = builder.build(bootstrap, 0);
            let mut tree_importances = builder.importances;

            if normalize(&mut tree_importances) {
                for (acc, v) in importances.iter_mut().zip(tree_importances.iter()) {
                    *acc += v;
                }
                contributing += 1;
            }

            trees.push(DecisionTree { root });
        }

        // A forest of stumps carries no signal; spread weight evenly
        if contributing == 0 || !normalize(&mut importances) {
            importances = [1.0 / FEATURE_COUNT as f64; FEATURE_COUNT];
        }

        RandomForest { trees, importances }
    }

    /// P(risk class) in [0, 1]
    pub fn predict_proba(&self, x: &FeatureVector) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict_proba(x)).sum();
        (sum / self.trees.len() as f64).clamp(0.0, 1.0)
    }

    pub fn predict(&self, x: &FeatureVector) -> u8 {
        if self.predict_proba(x) > 0.5 { RISK_LABEL } else { 0 }
    }

    /// Accuracy on a labelled dataset
    pub fn score(&self, data: &Dataset) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        let correct = (0..data.len())
            .filter(|&i| self.predict(&data.row(i)) == data.label(i))
            .count();
        correct as f64 / data.len() as f64
    }

    /// Global importances in `CORE_FEATURES` order; sums to 1
    pub fn feature_importances(&self) -> [f64; FEATURE_COUNT] {
        self.importances
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
