use crate::weight::WeightVector;

/// Cosine of the angle between two weight vectors.
///
/// Returns 0 when either vector has zero magnitude.
pub fn cosine_similarity(v1: &WeightVector, v2: &WeightVector) -> f64 {
    let denom = v1.magnitude() * v2.magnitude();
    if denom == 0.0 {
        return 0.0;
    }
    v1.dot(v2) / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let v = WeightVector::from(vec![0.3, 0.0, 1.7]);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let a = WeightVector::from(vec![1.0, 0.0]);
        let b = WeightVector::from(vec![0.0, 2.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn zero_vector_scores_zero() {
        let a = WeightVector::zeros(3);
        let b = WeightVector::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(cosine_similarity(&a, &b), 0.0);
        assert_eq!(cosine_similarity(&b, &a), 0.0);
        assert_eq!(cosine_similarity(&a, &a), 0.0);
    }
}
