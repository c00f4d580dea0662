use super::*;

#[test]
fn mapping_covers_both_endpoints() {
    assert_eq!(frame_for_progress(0.0, 120), FrameIndex(0));
    assert_eq!(frame_for_progress(1.0, 120), FrameIndex(119));
    assert_eq!(frame_for_progress(0.5, 120), FrameIndex(59));
}

#[test]
fn mapping_is_always_in_range() {
    for count in [1u32, 2, 3, 120, 240] {
        for step in 0..=100 {
            let p = f64::from(step) / 100.0;
            let idx = frame_for_progress(p, count);
            assert!(idx.0 < count, "p={p} count={count} -> {idx:?}");
        }
    }
}

#[test]
fn out_of_range_progress_clamps() {
    assert_eq!(frame_for_progress(-0.2, 120), FrameIndex(0));
    assert_eq!(frame_for_progress(1.4, 120), FrameIndex(119));
    assert_eq!(frame_for_progress(f64::NAN, 120), FrameIndex(0));
}

#[test]
fn single_frame_sequences_always_map_to_zero() {
    assert_eq!(frame_for_progress(0.0, 1), FrameIndex(0));
    assert_eq!(frame_for_progress(1.0, 1), FrameIndex(0));
    assert_eq!(frame_for_progress(0.7, 1), FrameIndex(0));
}

#[test]
fn scheduler_cancels_and_replaces() {
    let mut scheduler = RedrawScheduler::new();
    assert!(!scheduler.has_pending());
    assert!(scheduler.take_due().is_none());

    scheduler.schedule(FrameIndex(3));
    scheduler.schedule(FrameIndex(7));
    assert!(scheduler.has_pending());

    // Only the latest survives, and only once.
    assert_eq!(scheduler.take_due(), Some(ScheduledRedraw { frame: FrameIndex(7) }));
    assert!(scheduler.take_due().is_none());

    scheduler.schedule(FrameIndex(1));
    scheduler.cancel();
    assert!(scheduler.take_due().is_none());
}

#[test]
fn bridge_tracks_latest_index_and_keeps_one_pending_redraw() {
    let mut bridge = ProgressBridge::new(120);
    assert_eq!(bridge.current_frame(), FrameIndex(0));

    for step in 0..50 {
        bridge.on_progress(f64::from(step) / 49.0);
    }
    assert_eq!(bridge.current_frame(), FrameIndex(119));
    assert!(bridge.has_pending_redraw());

    let due = bridge.scheduler_mut().take_due().unwrap();
    assert_eq!(due.frame, FrameIndex(119));
    assert!(!bridge.has_pending_redraw());
}
