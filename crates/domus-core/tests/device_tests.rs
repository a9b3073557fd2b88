//! End-to-end device scenarios across the public API

use domus_core::{Fan, Lock, Mower, MowerActivity, Outcome};

#[test]
fn mower_recovers_from_error_and_mows_again() {
    let mut mower = Mower::new("Backyard Mower");

    assert!(mower.start_mowing().is_accepted());
    mower.set_error("Blade jam detected");
    assert_eq!(mower.activity(), MowerActivity::Error);

    assert!(mower.clear_error().is_accepted());
    assert!(mower.start_mowing().is_accepted());

    assert_eq!(mower.activity(), MowerActivity::Mowing);
    assert!(mower.error_message().is_none());
}

#[test]
fn lock_with_code_then_unlock() {
    let lock = Lock::new("Front Door");

    lock.lock(Some("1234"));
    assert!(lock.is_locked());
    assert!(!lock.is_jammed());

    lock.unlock(None);
    assert!(!lock.is_locked());
}

#[tokio::test(start_paused = true)]
async fn lock_conflict_demo_sequence() {
    // The original demo sequence: lock, unlock, deliberately interleave two
    // requests to trigger a jam, then clear it.
    let lock = Lock::new("Front Door");

    assert!(lock.lock_async(Some("1234")).await.is_accepted());
    assert!(lock.unlock_async(None).await.is_accepted());

    let (_, second) = tokio::join!(lock.lock_async(Some("1111")), lock.unlock_async(Some("2222")));
    assert_eq!(second.outcome, Outcome::Conflict);
    assert!(lock.is_jammed());

    lock.clear_jam();
    assert!(!lock.is_jammed());
    assert!(!lock.is_locked());
}

#[test]
fn fan_full_control_sequence() {
    let mut fan = Fan::new("Living Room Fan");

    fan.turn_on(Some(50), Some("eco"));
    assert!(fan.is_on());
    assert_eq!(fan.percentage(), 50);
    assert_eq!(fan.preset_mode(), Some("eco"));

    fan.oscillate(true);
    fan.set_direction("forward");

    fan.turn_off();
    assert!(!fan.is_on());
    assert_eq!(fan.percentage(), 0);
    assert!(fan.preset_mode().is_none());
    // turn_off leaves oscillation and direction alone
    assert!(fan.oscillating());
    assert_eq!(fan.direction(), Some("forward"));
}

#[test]
fn fan_percentage_property() {
    let mut fan = Fan::new("Living Room Fan");
    for p in [-50, 0, 1, 42, 100, 250] {
        fan.set_percentage(p);
        let clamped = p.clamp(0, 100) as u8;
        assert_eq!(fan.percentage(), clamped);
        assert_eq!(fan.is_on(), clamped > 0);
    }
}

#[test]
fn independent_devices_do_not_share_state() {
    let lock_a = Lock::new("Front Door");
    let lock_b = Lock::new("Back Door");

    lock_a.lock(None);
    lock_b.jam();

    assert!(lock_a.is_locked());
    assert!(!lock_a.is_jammed());
    assert!(!lock_b.is_locked());
    assert!(lock_b.is_jammed());
}
