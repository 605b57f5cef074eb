//! Multinomial Naive Bayes classifier with add-alpha smoothing.
//!
//! The model estimates, from labeled token sequences:
//!
//! ```text
//! P(c)   ~= (occurrences of class c) / (total samples)
//! P(t|c) ~= (occurrences of token t in class c, seeded with alpha)
//!               /
//!           (total token occurrences in class c, alpha included)
//! ```
//!
//! and predicts the class maximizing `log P(c) + Σ log P(t|c)` over the
//! in-vocabulary tokens of the input. All probabilities are kept in log
//! space.
//!
//! # Examples
//!
//! ```
//! use kategoria::classifier::{Classifier, NaiveBayesClassifier};
//! use kategoria::dataset::Sample;
//!
//! let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
//! model.train(&[
//!     Sample::new(["good", "movie"], 1),
//!     Sample::new(["bad", "film"], 0),
//! ]).unwrap();
//!
//! assert_eq!(model.run(&["good".to_string(), "movie".to_string()]).unwrap(), 1);
//! ```

use ahash::{AHashMap, AHashSet};

use super::Classifier;

use crate::dataset::{DataLabel, Sample, Token};
use crate::error::{KategoriaError, Result};
use crate::progress::ProgressReporter;

/// Multinomial Naive Bayes classifier.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    /// Declared output classes, sorted and deduplicated.
    declared_classes: Vec<DataLabel>,
    /// Add-alpha smoothing constant.
    smoothing_factor: u64,
    /// Whether to verify table shapes after training.
    check_invariants: bool,
    /// Learned state; `None` until a training run succeeds.
    state: Option<TrainedState>,
}

/// Everything a training run produces. Built into a temporary and swapped
/// in whole, so a failed run leaves prior state untouched.
#[derive(Debug, Clone)]
struct TrainedState {
    /// Effective classes: declared plus any admitted by widening. Sorted;
    /// this order fixes the tie-break at inference time.
    classes: Vec<DataLabel>,
    /// Tokens seen during training. Tokens outside the vocabulary are
    /// ignored at inference time.
    vocabulary: AHashSet<Token>,
    /// log P(c) per effective class.
    log_class_probabilities: AHashMap<DataLabel, f64>,
    /// log P(t|c) per effective class, covering exactly the vocabulary.
    log_token_probabilities: AHashMap<DataLabel, AHashMap<Token, f64>>,
}

impl NaiveBayesClassifier {
    /// Create a classifier for the given set of output classes.
    ///
    /// Returns [`KategoriaError::EmptyClassSet`] if no classes are given.
    /// Duplicates are ignored.
    pub fn new<I>(classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = DataLabel>,
    {
        let set: AHashSet<DataLabel> = classes.into_iter().collect();
        if set.is_empty() {
            return Err(KategoriaError::EmptyClassSet);
        }

        let mut declared_classes: Vec<DataLabel> = set.into_iter().collect();
        declared_classes.sort_unstable();

        Ok(NaiveBayesClassifier {
            declared_classes,
            smoothing_factor: 1,
            check_invariants: true,
            state: None,
        })
    }

    /// Set the add-alpha smoothing constant (default 1).
    ///
    /// With 0, unseen (class, token) combinations keep zero probability
    /// and classes without token mass score `-inf` on token evidence.
    pub fn with_smoothing_factor(mut self, smoothing_factor: u64) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    /// Enable or disable post-training consistency checks (default on).
    pub fn with_invariant_checks(mut self, check_invariants: bool) -> Self {
        self.check_invariants = check_invariants;
        self
    }

    /// The classes this model predicts over: the declared set before
    /// training, the effective (possibly widened) set afterwards.
    pub fn classes(&self) -> &[DataLabel] {
        match &self.state {
            Some(state) => &state.classes,
            None => &self.declared_classes,
        }
    }

    /// The classes declared at construction time.
    pub fn declared_classes(&self) -> &[DataLabel] {
        &self.declared_classes
    }

    /// The add-alpha smoothing constant.
    pub fn smoothing_factor(&self) -> u64 {
        self.smoothing_factor
    }

    /// Number of distinct tokens seen during training (0 if untrained).
    pub fn vocabulary_size(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.vocabulary.len())
    }

    /// Whether the given token was seen during training.
    pub fn contains_token(&self, token: &str) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.vocabulary.contains(token))
    }

    /// log P(c) for a class, if trained and known.
    pub fn log_class_probability(&self, class: DataLabel) -> Option<f64> {
        self.state
            .as_ref()
            .and_then(|s| s.log_class_probabilities.get(&class).copied())
    }

    /// log P(t|c) for a class and token, if trained and known.
    pub fn log_token_probability(&self, class: DataLabel, token: &str) -> Option<f64> {
        self.state
            .as_ref()
            .and_then(|s| s.log_token_probabilities.get(&class))
            .and_then(|table| table.get(token).copied())
    }

    /// Pass 1: finalize the effective class list and the vocabulary.
    ///
    /// Labels outside the declared set are admitted with a warning; the
    /// returned class list is sorted and covers declared and admitted
    /// classes alike.
    fn scan(&self, data: &[Sample]) -> (Vec<DataLabel>, AHashSet<DataLabel>, AHashSet<Token>) {
        let declared: AHashSet<DataLabel> = self.declared_classes.iter().copied().collect();
        let mut admitted: AHashSet<DataLabel> = AHashSet::new();
        let mut vocabulary: AHashSet<Token> = AHashSet::new();

        for sample in data {
            if !declared.contains(&sample.label) && admitted.insert(sample.label) {
                log::warn!(
                    "training data contains undeclared class {}; admitting it",
                    sample.label
                );
            }
            for token in &sample.tokens {
                if !vocabulary.contains(token) {
                    vocabulary.insert(token.clone());
                }
            }
        }

        let mut classes: Vec<DataLabel> = declared.union(&admitted).copied().collect();
        classes.sort_unstable();

        (classes, admitted, vocabulary)
    }

    /// Verify the table-shape invariants of a freshly built state.
    fn verify(state: &TrainedState) -> Result<()> {
        let class_set: AHashSet<DataLabel> = state.classes.iter().copied().collect();

        let prior_classes: AHashSet<DataLabel> =
            state.log_class_probabilities.keys().copied().collect();
        if prior_classes != class_set {
            return Err(KategoriaError::invariant(format!(
                "class probability table covers {} classes, expected {}",
                prior_classes.len(),
                class_set.len()
            )));
        }

        let token_classes: AHashSet<DataLabel> =
            state.log_token_probabilities.keys().copied().collect();
        if token_classes != class_set {
            return Err(KategoriaError::invariant(format!(
                "token probability table covers {} classes, expected {}",
                token_classes.len(),
                class_set.len()
            )));
        }

        for (class, table) in &state.log_token_probabilities {
            if table.len() != state.vocabulary.len()
                || !table.keys().all(|t| state.vocabulary.contains(t))
            {
                return Err(KategoriaError::invariant(format!(
                    "token probability table for class {class} does not match the vocabulary"
                )));
            }
        }

        Ok(())
    }
}

impl Classifier for NaiveBayesClassifier {
    fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    fn train_with_progress(
        &mut self,
        data: &[Sample],
        progress: &dyn ProgressReporter,
    ) -> Result<()> {
        if data.is_empty() {
            return Err(KategoriaError::TrainingDataEmpty);
        }

        let alpha = self.smoothing_factor;

        progress.start(data.len());

        // Pass 1: class set and vocabulary.
        let (classes, admitted, vocabulary) = self.scan(data);

        // Pass 2: occurrence counts. Declared classes seed at 0; admitted
        // classes seed at alpha, matching the widening convention. Every
        // (class, token) counter starts at alpha.
        let mut class_occurrences: AHashMap<DataLabel, u64> = classes
            .iter()
            .map(|&c| (c, if admitted.contains(&c) { alpha } else { 0 }))
            .collect();
        let mut token_occurrences: AHashMap<DataLabel, AHashMap<Token, u64>> = classes
            .iter()
            .map(|&c| (c, vocabulary.iter().map(|t| (t.clone(), alpha)).collect()))
            .collect();

        for sample in data {
            *class_occurrences.entry(sample.label).or_insert(0) += 1;

            if let Some(counts) = token_occurrences.get_mut(&sample.label) {
                for token in &sample.tokens {
                    *counts.entry(token.clone()).or_insert(alpha) += 1;
                }
            }

            progress.step();
        }

        progress.finish();

        // log P(c) = log N_c - log N. A zero count gives -inf: the class
        // stays in the tables but can never win the argmax.
        let log_total_samples = (data.len() as f64).ln();
        let log_class_probabilities: AHashMap<DataLabel, f64> = classes
            .iter()
            .map(|&c| {
                let occurrences = class_occurrences.get(&c).copied().unwrap_or(0);
                (c, (occurrences as f64).ln() - log_total_samples)
            })
            .collect();

        // log P(t|c) = log N_t,c - log N_c over the whole vocabulary. A
        // class with zero token mass (possible only with alpha 0) gets
        // -inf entries directly, never the NaN of ln(0) - ln(0).
        let mut log_token_probabilities: AHashMap<DataLabel, AHashMap<Token, f64>> =
            AHashMap::with_capacity(classes.len());

        for &class in &classes {
            let counts = &token_occurrences[&class];
            let total: u64 = counts.values().sum();

            let table: AHashMap<Token, f64> = if total == 0 {
                vocabulary
                    .iter()
                    .map(|t| (t.clone(), f64::NEG_INFINITY))
                    .collect()
            } else {
                let log_total = (total as f64).ln();
                counts
                    .iter()
                    .map(|(t, &n)| (t.clone(), (n as f64).ln() - log_total))
                    .collect()
            };

            log_token_probabilities.insert(class, table);
        }

        let state = TrainedState {
            classes,
            vocabulary,
            log_class_probabilities,
            log_token_probabilities,
        };

        if self.check_invariants {
            Self::verify(&state)?;
        }

        self.state = Some(state);

        Ok(())
    }

    fn run(&self, tokens: &[Token]) -> Result<DataLabel> {
        let state = self.state.as_ref().ok_or(KategoriaError::ModelNotTrained)?;

        let mut best: Option<(DataLabel, f64)> = None;

        for &class in &state.classes {
            let prior = state
                .log_class_probabilities
                .get(&class)
                .copied()
                .unwrap_or(f64::NEG_INFINITY);
            let table = state.log_token_probabilities.get(&class);

            let mut score = prior;
            for token in tokens {
                // Out-of-vocabulary tokens contribute zero evidence.
                if !state.vocabulary.contains(token) {
                    continue;
                }
                if let Some(log_prob) = table.and_then(|t| t.get(token)) {
                    score += log_prob;
                }
            }

            // Strict comparison: ties resolve to the first (smallest)
            // class in the sorted effective order.
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((class, score)),
            }
        }

        best.map(|(class, _)| class)
            .ok_or_else(|| KategoriaError::invariant("trained model has no classes"))
    }

    fn name(&self) -> &'static str {
        "naive_bayes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_training_data() -> Vec<Sample> {
        vec![
            Sample::new(["good", "movie"], 1),
            Sample::new(["bad", "film"], 0),
        ]
    }

    fn tokens(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_class_set_rejected() {
        let result = NaiveBayesClassifier::new([]);
        assert!(matches!(result, Err(KategoriaError::EmptyClassSet)));
    }

    #[test]
    fn test_duplicate_classes_deduplicated() {
        let model = NaiveBayesClassifier::new([1, 0, 1, 0]).unwrap();
        assert_eq!(model.declared_classes(), &[0, 1]);
    }

    #[test]
    fn test_train_on_empty_data_fails() {
        let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
        let result = model.train(&[]);
        assert!(matches!(result, Err(KategoriaError::TrainingDataEmpty)));
        assert!(!model.is_trained());
    }

    #[test]
    fn test_run_before_training_fails() {
        let model = NaiveBayesClassifier::new([0, 1]).unwrap();
        let result = model.run(&tokens(&["good"]));
        assert!(matches!(result, Err(KategoriaError::ModelNotTrained)));
    }

    #[test]
    fn test_movie_scenario_probabilities() {
        let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
        model.train(&movie_training_data()).unwrap();

        // Vocabulary: good, movie, bad, film. Per class: 2 observed tokens
        // plus 4 * alpha(=1) smoothing = 6 total.
        assert_eq!(model.vocabulary_size(), 4);

        let half = (1.0f64 / 2.0).ln();
        assert!((model.log_class_probability(0).unwrap() - half).abs() < 1e-12);
        assert!((model.log_class_probability(1).unwrap() - half).abs() < 1e-12);

        let seen = (2.0f64 / 6.0).ln();
        let unseen = (1.0f64 / 6.0).ln();
        assert!((model.log_token_probability(1, "good").unwrap() - seen).abs() < 1e-12);
        assert!((model.log_token_probability(1, "bad").unwrap() - unseen).abs() < 1e-12);
        assert!((model.log_token_probability(0, "film").unwrap() - seen).abs() < 1e-12);
        assert!((model.log_token_probability(0, "movie").unwrap() - unseen).abs() < 1e-12);

        assert_eq!(model.run(&tokens(&["good", "movie"])).unwrap(), 1);
        assert_eq!(model.run(&tokens(&["bad", "film"])).unwrap(), 0);
    }

    #[test]
    fn test_out_of_vocabulary_tokens_are_skipped() {
        let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
        model.train(&movie_training_data()).unwrap();

        // Unknown tokens contribute nothing, so the known token decides.
        let prediction = model.run(&tokens(&["zebra", "good", "quux"])).unwrap();
        assert_eq!(prediction, 1);
    }

    #[test]
    fn test_prediction_is_member_of_class_set() {
        let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
        model.train(&movie_training_data()).unwrap();

        // All tokens unknown: priors alone decide, deterministically.
        let prediction = model.run(&tokens(&["zebra"])).unwrap();
        assert!(model.classes().contains(&prediction));
    }

    #[test]
    fn test_tie_breaks_to_smallest_class() {
        let mut model = NaiveBayesClassifier::new([3, 7]).unwrap();
        // Perfectly symmetrical data: every score ties.
        model
            .train(&[Sample::new(["x"], 3), Sample::new(["x"], 7)])
            .unwrap();

        assert_eq!(model.run(&tokens(&["x"])).unwrap(), 3);
    }

    #[test]
    fn test_determinism() {
        let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
        model.train(&movie_training_data()).unwrap();

        let input = tokens(&["good", "film"]);
        let first = model.run(&input).unwrap();
        for _ in 0..10 {
            assert_eq!(model.run(&input).unwrap(), first);
        }
    }

    #[test]
    fn test_retraining_replaces_state() {
        let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
        model.train(&movie_training_data()).unwrap();
        model.train(&[Sample::new(["solid"], 0)]).unwrap();

        assert_eq!(model.vocabulary_size(), 1);
        assert!(!model.contains_token("good"));
    }

    #[test]
    fn test_training_idempotence() {
        let data = movie_training_data();

        let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
        model.train(&data).unwrap();
        let first_good = model.log_token_probability(1, "good").unwrap();
        let first_prior = model.log_class_probability(0).unwrap();

        model.train(&data).unwrap();
        assert_eq!(model.log_token_probability(1, "good").unwrap(), first_good);
        assert_eq!(model.log_class_probability(0).unwrap(), first_prior);
    }

    #[test]
    fn test_undeclared_label_is_admitted() {
        let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
        model
            .train(&[
                Sample::new(["good"], 1),
                Sample::new(["bad"], 0),
                Sample::new(["weird", "weird", "weird"], 5),
            ])
            .unwrap();

        assert_eq!(model.classes(), &[0, 1, 5]);
        assert!(model.log_class_probability(5).is_some());
        assert_eq!(model.run(&tokens(&["weird", "weird"])).unwrap(), 5);
    }

    #[test]
    fn test_declared_class_without_examples() {
        let mut model = NaiveBayesClassifier::new([0, 1, 2]).unwrap();
        model.train(&movie_training_data()).unwrap();

        // Class 2 never occurred: prior is ln(0) = -inf, so it loses to
        // any class with finite score.
        assert_eq!(model.log_class_probability(2).unwrap(), f64::NEG_INFINITY);
        assert_eq!(model.run(&tokens(&["good", "movie"])).unwrap(), 1);
        assert_ne!(model.run(&tokens(&["zebra"])).unwrap(), 2);
    }

    #[test]
    fn test_zero_smoothing_zero_token_class() {
        let mut model = NaiveBayesClassifier::new([0, 1])
            .unwrap()
            .with_smoothing_factor(0);
        model.train(&[Sample::new(["a"], 0)]).unwrap();

        // Class 1 has no examples and no token mass; its entries must be
        // -inf, not NaN.
        let log_prob = model.log_token_probability(1, "a").unwrap();
        assert_eq!(log_prob, f64::NEG_INFINITY);
        assert!(!log_prob.is_nan());
        assert_eq!(model.run(&tokens(&["a"])).unwrap(), 0);
    }

    #[test]
    fn test_invariant_checks_can_be_disabled() {
        let mut model = NaiveBayesClassifier::new([0, 1])
            .unwrap()
            .with_invariant_checks(false);
        model.train(&movie_training_data()).unwrap();
        assert!(model.is_trained());
    }

    #[test]
    fn test_multi_run_preserves_order() {
        let mut model = NaiveBayesClassifier::new([0, 1]).unwrap();
        model.train(&movie_training_data()).unwrap();

        let inputs = vec![tokens(&["bad", "film"]), tokens(&["good", "movie"])];
        let predictions = model.multi_run(&inputs).unwrap();
        assert_eq!(predictions, vec![0, 1]);
    }

    #[test]
    fn test_classifier_name() {
        let model = NaiveBayesClassifier::new([0]).unwrap();
        assert_eq!(model.name(), "naive_bayes");
    }
}
