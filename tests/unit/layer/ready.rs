use super::*;

fn counter() -> (Rc<Cell<u32>>, ReadyCallback) {
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    (hits, Box::new(move || h.set(h.get() + 1)))
}

#[test]
fn fires_listeners_once() {
    let signal = ReadySignal::new();
    let (hits, cb) = counter();
    signal.subscribe(cb);

    assert!(!signal.is_ready());
    assert!(signal.fire());
    assert!(!signal.fire());

    assert_eq!(hits.get(), 1);
    assert!(signal.is_ready());
}

#[test]
fn late_subscribers_run_immediately() {
    let signal = ReadySignal::new();
    signal.fire();

    let (hits, cb) = counter();
    signal.subscribe(cb);
    assert_eq!(hits.get(), 1);
}

#[test]
fn clones_share_the_latch() {
    let signal = ReadySignal::new();
    let trigger = signal.clone();
    let (hits, cb) = counter();
    signal.subscribe(cb);

    trigger.fire();
    assert!(signal.is_ready());
    assert_eq!(hits.get(), 1);
}

#[test]
fn listener_may_subscribe_during_fire() {
    let signal = ReadySignal::new();
    let inner = signal.clone();
    let (hits, cb) = counter();

    signal.subscribe(Box::new(move || inner.subscribe(cb)));
    signal.fire();

    assert_eq!(hits.get(), 1);
}
