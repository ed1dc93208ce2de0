//! Weighted chooser (spec.md §4.1).
//!
//! Given a stack of weight maps, draws one key proportional to the product
//! of weights across the stack. Layer 0 is the authoritative domain: keys
//! absent from layer 0 never enter the draw, and keys present in layer 0 but
//! absent from a later layer are left unchanged by that layer (factor 1.0).

use indexmap::IndexMap;
use rand::Rng;

use crate::domain::errors::{DomainError, DomainResult};

/// An ordered, insertion-order-preserving weight map. Order matters: it
/// defines both the authoritative domain (layer 0) and the walk order used
/// to resolve a draw, so that a fixed seed always produces the same pick
/// (spec.md §4.1 Determinism, testable property 4).
pub type WeightLayer = IndexMap<String, f64>;

/// Draw one key from `layers[0]` proportional to the product of weights
/// across all layers. Fails with `NoCandidate` if the total weight is zero.
pub fn choose<R: Rng + ?Sized>(layers: &[WeightLayer], rng: &mut R) -> DomainResult<String> {
    let Some(l0) = layers.first() else {
        return Err(DomainError::NoCandidate);
    };

    let mut weighted: Vec<(&str, f64)> = Vec::with_capacity(l0.len());
    let mut total = 0.0f64;
    for (key, &base) in l0 {
        let mut w = base;
        for layer in &layers[1..] {
            w *= layer.get(key).copied().unwrap_or(1.0);
        }
        weighted.push((key.as_str(), w));
        total += w;
    }

    if total <= 0.0 {
        return Err(DomainError::NoCandidate);
    }

    let r: f64 = rng.gen_range(0.0..total);
    let mut running = 0.0f64;
    for (key, w) in weighted {
        running += w;
        if running >= r {
            return Ok(key.to_string());
        }
    }

    // Floating-point accumulation can leave `running` a hair short of `total`
    // on the final key; fall back to the last candidate rather than panic.
    l0.keys()
        .last()
        .cloned()
        .ok_or(DomainError::NoCandidate)
}

/// Build a 0/1 mask over `domain_keys`: 1.0 for keys present in `allowed`,
/// 0.0 otherwise. Used for the focus layer (spec.md §4.4 step 2) and the
/// quota layer (step 3).
pub fn binary_mask<'a>(
    domain_keys: impl Iterator<Item = &'a String>,
    allowed: &[String],
) -> WeightLayer {
    domain_keys
        .map(|k| {
            let w = if allowed.iter().any(|a| a == k) { 1.0 } else { 0.0 };
            (k.clone(), w)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn layer(pairs: &[(&str, f64)]) -> WeightLayer {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn empty_layers_is_no_candidate() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = choose::<StdRng>(&[], &mut rng).unwrap_err();
        assert!(matches!(err, DomainError::NoCandidate));
    }

    #[test]
    fn zero_total_weight_is_no_candidate() {
        let layers = vec![layer(&[("a", 0.0), ("b", 0.0)])];
        let mut rng = StdRng::seed_from_u64(1);
        let err = choose(&layers, &mut rng).unwrap_err();
        assert!(matches!(err, DomainError::NoCandidate));
    }

    #[test]
    fn missing_key_in_later_layer_is_treated_as_one() {
        let l0 = layer(&[("a", 1.0)]);
        let l1: WeightLayer = IndexMap::new();
        let mut rng = StdRng::seed_from_u64(1);
        let pick = choose(&[l0, l1], &mut rng).unwrap();
        assert_eq!(pick, "a");
    }

    #[test]
    fn focus_layer_zeroes_out_keys_absent_from_focus() {
        // testable property 5
        let weights = layer(&[("a", 1.0), ("b", 1.0)]);
        let focus = binary_mask(weights.keys(), &["a".to_string()]);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let pick = choose(&[weights.clone(), focus.clone()], &mut rng).unwrap();
            assert_eq!(pick, "a");
        }
    }

    #[test]
    fn empirical_frequency_converges_for_fixed_seed() {
        // testable property 4: {a:1, b:3} -> 0.25 / 0.75
        let layers = vec![layer(&[("a", 1.0), ("b", 3.0)])];
        let mut rng = StdRng::seed_from_u64(7);
        let mut a_count = 0u32;
        let n = 20_000;
        for _ in 0..n {
            if choose(&layers, &mut rng).unwrap() == "a" {
                a_count += 1;
            }
        }
        let freq = f64::from(a_count) / f64::from(n);
        assert!((freq - 0.25).abs() < 0.02, "frequency was {freq}");
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let layers = vec![layer(&[("a", 1.0), ("b", 3.0), ("c", 6.0)])];
        let draw = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..10)
                .map(|_| choose(&layers, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(99), draw(99));
    }
}
