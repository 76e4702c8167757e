//! Gesture Classifier: nearest-template matching on finger vectors
//!
//! Euclidean distance to every template; the closest wins if it is
//! strictly below `threshold × scale`. Pure, no state between calls.

use crate::types::{Gesture, GestureTemplate, RecognizerConfig, GESTURE_TEMPLATES};

/// Template matcher
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    templates: Vec<GestureTemplate>,
    acceptance_bound: f32,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(&RecognizerConfig::default())
    }
}

impl GestureClassifier {
    /// Create classifier over the built-in template table
    pub fn new(config: &RecognizerConfig) -> Self {
        Self::with_templates(GESTURE_TEMPLATES.to_vec(), config)
    }

    /// Create classifier over a custom table (order is the tie-break)
    pub fn with_templates(templates: Vec<GestureTemplate>, config: &RecognizerConfig) -> Self {
        Self {
            templates,
            acceptance_bound: config.acceptance_bound(),
        }
    }

    /// Classify a finger vector; `None` for empty input, wrong arity or no match
    pub fn classify(&self, finger_states: &[f32]) -> Option<Gesture> {
        if finger_states.is_empty() {
            return None;
        }

        let mut best: Option<(Gesture, f32)> = None;
        for template in &self.templates {
            let distance = state_distance(finger_states, &template.vector);
            // Strict `<` keeps the first minimum on ties
            if distance < self.acceptance_bound
                && best.map_or(true, |(_, d)| distance < d)
            {
                best = Some((template.gesture, distance));
            }
        }

        best.map(|(gesture, _)| gesture)
    }

    /// Distance bound currently in force
    pub fn acceptance_bound(&self) -> f32 {
        self.acceptance_bound
    }
}

/// Euclidean distance; infinite on arity mismatch
pub fn state_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_fist_match() {
        let classifier = GestureClassifier::default();
        assert_eq!(classifier.classify(&[0.0, 0.0, 0.0, 0.0, 0.0]), Some(Gesture::Fist));
    }

    #[test]
    fn test_every_template_matches_itself() {
        let classifier = GestureClassifier::default();
        for template in GESTURE_TEMPLATES.iter() {
            assert_eq!(classifier.classify(&template.vector), Some(template.gesture));
        }
    }

    #[test]
    fn test_deterministic_across_calls() {
        let classifier = GestureClassifier::default();
        classifier.classify(&[1.0, 1.0, 1.0, 1.0, 1.0]);
        classifier.classify(&[0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(classifier.classify(&[0.0; 5]), Some(Gesture::Fist));
        assert_eq!(classifier.classify(&[0.0; 5]), Some(Gesture::Fist));
    }

    #[test]
    fn test_empty_input_is_none() {
        let classifier = GestureClassifier::default();
        assert_eq!(classifier.classify(&[]), None);
    }

    #[test]
    fn test_arity_mismatch_never_matches() {
        let classifier = GestureClassifier::default();
        assert_eq!(classifier.classify(&[0.0, 0.0, 0.0, 0.0]), None);
        assert_eq!(classifier.classify(&[0.0; 6]), None);
        assert_eq!(state_distance(&[0.0; 4], &[0.0; 5]), f32::INFINITY);
    }

    #[test]
    fn test_continuous_values_within_bound() {
        let classifier = GestureClassifier::default();
        // distance ≈ 0.02 < 0.075
        assert_eq!(classifier.classify(&[0.0, 0.98, 0.0, 0.0, 0.0]), Some(Gesture::One));
    }

    #[test]
    fn test_outside_bound_is_none() {
        let classifier = GestureClassifier::default();
        // Half-bent middle finger sits between ONE and TWO
        assert_eq!(classifier.classify(&[0.0, 1.0, 0.5, 0.0, 0.0]), None);
    }

    #[test]
    fn test_first_minimum_wins_on_tie() {
        let config = RecognizerConfig::default();
        let templates = vec![
            GestureTemplate { gesture: Gesture::Rock, vector: [0.0; 5] },
            GestureTemplate { gesture: Gesture::Fist, vector: [0.0; 5] },
        ];
        let classifier = GestureClassifier::with_templates(templates, &config);
        assert_eq!(classifier.classify(&[0.0; 5]), Some(Gesture::Rock));
    }

    #[test]
    fn test_bound_follows_config() {
        let config = RecognizerConfig::default().with_finger_state_threshold(0.2);
        let classifier = GestureClassifier::new(&config);
        assert!((classifier.acceptance_bound() - 1.0).abs() < 1e-6);
        assert_eq!(classifier.classify(&[0.0, 1.0, 0.5, 0.0, 0.0]), Some(Gesture::One));
    }
}
