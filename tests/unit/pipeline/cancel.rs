use super::*;

#[test]
fn clones_share_the_flag() {
    let a = CancelToken::new();
    let b = a.clone();
    assert!(!b.is_cancelled());
    a.cancel();
    a.cancel();
    assert!(b.is_cancelled());
}

#[test]
fn sleep_returns_early_when_cancelled() {
    let t = CancelToken::new();
    let t2 = t.clone();
    let h = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        t2.cancel();
    });
    let start = Instant::now();
    assert!(t.sleep(Duration::from_secs(10)));
    assert!(start.elapsed() < Duration::from_secs(5));
    h.join().unwrap();
}

#[test]
fn sleep_runs_to_completion_otherwise() {
    let t = CancelToken::new();
    assert!(!t.sleep(Duration::from_millis(15)));
}
