use super::*;

#[test]
fn mul_div255_matches_reference() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn splitmix_is_deterministic_per_seed() {
    let mut a = SplitMix64::new(7);
    let mut b = SplitMix64::new(7);
    for _ in 0..16 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
    let mut c = SplitMix64::new(8);
    assert_ne!(SplitMix64::new(7).next_u64(), c.next_u64());
}

#[test]
fn splitmix_ranges_stay_in_bounds() {
    let mut r = SplitMix64::new(1);
    for _ in 0..256 {
        let f = r.next_f64();
        assert!((0.0..1.0).contains(&f));
        assert!(r.below(5) < 5);
    }
    assert_eq!(r.below(0), 0);
}
