use super::*;

#[test]
fn pop_due_returns_nothing_before_deadline() {
    let mut q = TimerQueue::new();
    let t0 = Instant::now();
    q.schedule_at(t0 + Duration::from_millis(200), Timer::EndCheck { episode: 1 });

    assert_eq!(q.pop_due(t0), None);
    assert_eq!(q.next_deadline(), Some(t0 + Duration::from_millis(200)));
    assert_eq!(
        q.pop_due(t0 + Duration::from_millis(200)),
        Some(Timer::EndCheck { episode: 1 })
    );
    assert_eq!(q.next_deadline(), None);
}

#[test]
fn timers_pop_in_deadline_order_then_fifo() {
    let mut q = TimerQueue::new();
    let t0 = Instant::now();
    q.schedule_at(t0 + Duration::from_millis(1000), Timer::RefreshPosition { episode: 1 });
    q.schedule_at(t0 + Duration::from_millis(200), Timer::EndCheck { episode: 1 });
    q.schedule_at(t0 + Duration::from_millis(200), Timer::EndCheck { episode: 2 });

    assert_eq!(q.next_deadline(), Some(t0 + Duration::from_millis(200)));

    let later = t0 + Duration::from_secs(5);
    let fired: Vec<Timer> = std::iter::from_fn(|| q.pop_due(later)).collect();
    assert_eq!(
        fired,
        vec![
            Timer::EndCheck { episode: 1 },
            Timer::EndCheck { episode: 2 },
            Timer::RefreshPosition { episode: 1 },
        ]
    );
}

#[test]
fn schedule_after_is_not_due_immediately() {
    let mut q = TimerQueue::new();
    let before = Instant::now();
    q.schedule_after(Duration::from_secs(60), Timer::EndCheck { episode: 7 });

    assert_eq!(q.pop_due(before), None);
    assert_eq!(q.pop_due(Instant::now()), None);
    assert_eq!(Timer::EndCheck { episode: 7 }.episode(), 7);
}
