use super::*;

#[test]
fn manual_time_clones_share_reading() {
    let host = ManualTime::new(100.0);
    let clock_side = host.clone();
    assert_eq!(clock_side.now_ms(), 100.0);

    host.set(250.0);
    assert_eq!(clock_side.now_ms(), 250.0);

    assert_eq!(host.advance(50.0), 300.0);
    assert_eq!(clock_side.now_ms(), 300.0);
}

#[test]
fn monotonic_time_never_goes_backwards() {
    let t = MonotonicTime::new();
    let a = t.now_ms();
    let b = t.now_ms();
    assert!(a >= 0.0);
    assert!(b >= a);
}
