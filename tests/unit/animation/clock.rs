use super::*;

#[test]
fn virtual_clock_advances_without_blocking() {
    let mut c = VirtualClock::new();
    c.sleep(Duration::from_millis(80));
    c.sleep(Duration::from_millis(8));
    assert_eq!(c.now(), Duration::from_millis(88));
    assert_eq!(c.sleeps(), 2);
}

#[test]
fn system_clock_is_monotonic() {
    let mut c = SystemClock::new();
    let a = c.now();
    c.sleep(Duration::from_millis(1));
    assert!(c.now() >= a + Duration::from_millis(1));
}
