//! Integration tests for the HyperLogLog sketch.

use hyperball::{DistanceError, HllSketch, Mergeable, Sketch};

mod construction {
    use super::*;

    #[test]
    fn test_new_valid_precision() {
        for p in 4..=16 {
            let hll = HllSketch::new(p);
            assert!(hll.is_ok(), "precision {} should be valid", p);
            let hll = hll.unwrap();
            assert_eq!(hll.precision(), p);
            assert_eq!(hll.num_registers(), 1usize << p);
        }
    }

    #[test]
    fn test_new_invalid_precision() {
        for p in 0..4 {
            assert!(HllSketch::new(p).is_err());
        }
        for p in 17..=30 {
            assert!(HllSketch::new(p).is_err());
        }
    }

    #[test]
    fn test_new_is_empty() {
        assert!(HllSketch::new(12).unwrap().is_empty());
    }
}

mod basic_operations {
    use super::*;

    #[test]
    fn test_add_single() {
        let mut hll = HllSketch::new(12).unwrap();
        hll.add(b"hello");
        assert!(!hll.is_empty());
    }

    #[test]
    fn test_add_hash_directly() {
        let mut hll = HllSketch::new(12).unwrap();
        hll.add_hash(0x123456789ABCDEF0);
        assert!(!hll.is_empty());
    }

    #[test]
    fn test_estimate_empty() {
        let hll = HllSketch::new(12).unwrap();
        assert!(hll.estimate() < 1.0);
    }

    #[test]
    fn test_estimate_single() {
        let mut hll = HllSketch::new(12).unwrap();
        hll.add(b"one item");
        let estimate = hll.estimate();
        assert!((0.5..=2.0).contains(&estimate), "got {}", estimate);
    }
}

mod accuracy {
    use super::*;

    #[test]
    fn test_accuracy_1000() {
        let mut hll = HllSketch::new(12).unwrap();
        for i in 0u64..1000 {
            hll.add(&i.to_be_bytes());
        }
        let error = (hll.estimate() - 1000.0).abs() / 1000.0;
        assert!(error < 0.10, "error {} too high for n=1000", error);
    }

    #[test]
    fn test_accuracy_10000() {
        let mut hll = HllSketch::new(12).unwrap();
        for i in 0u64..10_000 {
            hll.add(&i.to_be_bytes());
        }
        let error = (hll.estimate() - 10_000.0).abs() / 10_000.0;
        assert!(error < 0.05, "error {} too high for n=10000", error);
    }

    #[test]
    fn test_hll_cardinality_seed_scenario() {
        let mut a = HllSketch::new(12).unwrap();
        for i in 0u64..2000 {
            let reps = 5 + (i.wrapping_mul(2654435761) >> 58) % 46;
            for _ in 0..reps {
                a.add(&i.to_be_bytes());
            }
        }
        assert!((1800.0..=2200.0).contains(&a.estimate()), "got {}", a.estimate());

        let mut b = HllSketch::new(12).unwrap();
        for i in 2000u64..12000 {
            b.add(&i.to_be_bytes());
        }

        let changed = a.union_in_place(&b).unwrap();
        assert!(changed);
        assert!(
            (10800.0..=13200.0).contains(&a.estimate()),
            "got {}",
            a.estimate()
        );
    }
}

mod union {
    use super::*;

    #[test]
    fn test_union_basic() {
        let mut a = HllSketch::new(12).unwrap();
        let mut b = HllSketch::new(12).unwrap();
        for i in 0u64..500 {
            a.add(&i.to_be_bytes());
        }
        for i in 500u64..1000 {
            b.add(&i.to_be_bytes());
        }
        a.union_in_place(&b).unwrap();
        let error = (a.estimate() - 1000.0).abs() / 1000.0;
        assert!(error < 0.10, "got {}", a.estimate());
    }

    #[test]
    fn test_union_with_empty_does_not_change_estimate_much() {
        let mut a = HllSketch::new(12).unwrap();
        for i in 0u64..1000 {
            a.add(&i.to_be_bytes());
        }
        let before = a.estimate();
        let empty = HllSketch::new(12).unwrap();
        a.union_in_place(&empty).unwrap();
        assert!((before - a.estimate()).abs() < 1.0);
    }

    #[test]
    fn test_union_precision_mismatch() {
        let mut a = HllSketch::new(10).unwrap();
        let b = HllSketch::new(12).unwrap();
        assert_eq!(
            a.union_in_place(&b),
            Err(DistanceError::PrecisionMismatch { left: 10, right: 12 })
        );
    }

    #[test]
    fn test_union_idempotent_on_self_copy() {
        let mut a = HllSketch::new(10).unwrap();
        for i in 0u64..200 {
            a.add(&i.to_be_bytes());
        }
        let copy = a.copy();
        assert!(!a.union_in_place(&copy).unwrap());
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_estimate_non_negative(n in 0usize..5000) {
            let mut hll = HllSketch::new(12).unwrap();
            for i in 0..n {
                hll.add(&(i as u64).to_be_bytes());
            }
            prop_assert!(hll.estimate() >= 0.0);
        }

        #[test]
        fn test_union_commutative(
            items1 in prop::collection::vec(0u64..10000, 0..300),
            items2 in prop::collection::vec(0u64..10000, 0..300)
        ) {
            let mut a1 = HllSketch::new(10).unwrap();
            let mut a2 = HllSketch::new(10).unwrap();
            let mut b1 = HllSketch::new(10).unwrap();
            let mut b2 = HllSketch::new(10).unwrap();

            for &item in &items1 {
                a1.add(&item.to_be_bytes());
                a2.add(&item.to_be_bytes());
            }
            for &item in &items2 {
                b1.add(&item.to_be_bytes());
                b2.add(&item.to_be_bytes());
            }

            a1.union_in_place(&b1).unwrap();
            b2.union_in_place(&a2).unwrap();

            prop_assert_eq!(a1.estimate(), b2.estimate());
        }
    }
}
