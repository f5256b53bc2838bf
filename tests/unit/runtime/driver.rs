use super::*;

use std::cell::RefCell;

use crate::animation::tween::Tween;
use crate::foundation::error::GlobeError;

fn driver() -> (FrameDriver, ManualClock) {
    let clock = ManualClock::new();
    (FrameDriver::new(clock.clone()), clock)
}

#[test]
fn stopped_driver_neither_requests_nor_advances() {
    let (mut driver, clock) = driver();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    driver.tweens().add(Tween::new(0.0, 1.0, 10.0).on_update(move |v| {
        sink.borrow_mut().push(v);
        Ok(())
    }));

    driver.on_frame(0.0);
    driver.on_frame(100.0);

    assert_eq!(clock.request_count(), 0);
    assert!(seen.borrow().is_empty());
    assert_eq!(driver.frame_count(), 0);
}

#[test]
fn every_frame_requests_the_next() {
    let (mut driver, clock) = driver();
    driver.start();
    assert!(clock.take_pending());

    for i in 0..5 {
        driver.on_frame(f64::from(i) * 16.0);
        assert!(clock.take_pending());
    }
    assert_eq!(clock.request_count(), 6);
    assert_eq!(driver.frame_count(), 5);

    driver.stop();
    assert!(!clock.is_pending());
    driver.on_frame(200.0);
    assert_eq!(clock.request_count(), 6);
}

#[test]
fn first_frame_has_no_elapsed_time() {
    let (mut driver, _clock) = driver();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    driver.tweens().add(Tween::new(0.0, 100.0, 100.0).on_update(move |v| {
        sink.borrow_mut().push(v);
        Ok(())
    }));

    driver.start();
    driver.on_frame(5_000.0);
    driver.on_frame(5_025.0);
    driver.on_frame(5_020.0);

    assert_eq!(*seen.borrow(), vec![0.0, 25.0, 25.0]);
}

#[test]
fn loop_survives_failing_callbacks() {
    let (mut driver, clock) = driver();
    let finished = Rc::new(Cell::new(false));
    let f = Rc::clone(&finished);

    driver
        .tweens()
        .add(Tween::new(0.0, 1.0, 32.0).on_update(|_| Err(GlobeError::animation("bad frame"))));
    driver
        .tweens()
        .add(Tween::new(0.0, 1.0, 32.0).on_complete(move || f.set(true)));
    driver
        .timers()
        .schedule("bad", 0.0, || Err(GlobeError::animation("bad timer")));

    driver.start();
    for i in 0..4 {
        driver.on_frame(f64::from(i) * 16.0);
    }

    assert!(finished.get());
    assert!(driver.tweens().is_empty());
    assert!(driver.timers().is_empty());
    assert!(clock.is_pending());
}

#[test]
fn reset_discards_queued_work() {
    let (mut driver, _clock) = driver();
    driver.tweens().add(Tween::new(0.0, 1.0, 10.0));
    driver.timers().schedule("t", 10.0, || Ok(()));

    driver.reset();
    assert!(driver.tweens().is_empty());
    assert!(driver.timers().is_empty());
}
