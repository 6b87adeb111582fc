use super::*;

#[derive(Clone, Debug, PartialEq)]
enum Ev {
    A,
    B,
    Every,
}

fn drain(q: &mut TimerQueue<Ev>, until: u64) -> Vec<(u64, Ev)> {
    let mut out = Vec::new();
    while let Some((at, _, ev)) = q.pop_due(TimeMs(until)) {
        out.push((at.0, ev));
    }
    out
}

#[test]
fn timeouts_fire_in_due_order_then_schedule_order() {
    let mut q = TimerQueue::new();
    q.set_timeout(TimeMs(0), 20, Ev::B);
    q.set_timeout(TimeMs(0), 10, Ev::A);
    q.set_timeout(TimeMs(5), 5, Ev::B);
    assert_eq!(q.next_due(), Some(TimeMs(10)));
    assert_eq!(
        drain(&mut q, 100),
        vec![(10, Ev::A), (10, Ev::B), (20, Ev::B)]
    );
    assert_eq!(q.pending(), 0);
}

#[test]
fn nothing_fires_before_due() {
    let mut q = TimerQueue::new();
    q.set_timeout(TimeMs(0), 500, Ev::A);
    assert!(drain(&mut q, 499).is_empty());
    assert_eq!(drain(&mut q, 500), vec![(500, Ev::A)]);
}

#[test]
fn intervals_rearm_from_their_due_time() {
    let mut q = TimerQueue::new();
    let id = q.set_interval(TimeMs(100), 300, Ev::Every);
    assert_eq!(
        drain(&mut q, 1000),
        vec![(400, Ev::Every), (700, Ev::Every), (1000, Ev::Every)]
    );
    assert!(q.is_pending(id));
    assert_eq!(q.next_due(), Some(TimeMs(1300)));
}

#[test]
fn zero_period_is_clamped() {
    let mut q = TimerQueue::new();
    q.set_interval(TimeMs(0), 0, Ev::Every);
    assert_eq!(drain(&mut q, 10).len(), 2);
}

#[test]
fn cleared_timers_never_fire() {
    let mut q = TimerQueue::new();
    let a = q.set_timeout(TimeMs(0), 10, Ev::A);
    let every = q.set_interval(TimeMs(0), 5, Ev::Every);
    assert!(q.clear(a));
    assert!(!q.clear(a));
    assert_eq!(drain(&mut q, 12), vec![(5, Ev::Every), (10, Ev::Every)]);
    assert!(q.clear(every));
    assert_eq!(q.pending(), 0);
    assert_eq!(q.next_due(), None);
    assert!(drain(&mut q, 1000).is_empty());
}

#[test]
fn fired_timeout_is_no_longer_pending() {
    let mut q = TimerQueue::new();
    let id = q.set_timeout(TimeMs(0), 1, Ev::A);
    assert!(q.is_pending(id));
    drain(&mut q, 1);
    assert!(!q.is_pending(id));
    assert!(!q.clear(id));
}
