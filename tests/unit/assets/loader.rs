use super::*;

fn frames(count: u32) -> FrameSet {
    FrameSet::new(count, "seq/{frame}.jpg").unwrap()
}

fn tiny_frame() -> PreparedFrame {
    PreparedFrame {
        width: 2,
        height: 2,
        rgba8_premul: std::sync::Arc::new(vec![255u8; 2 * 2 * 4]),
    }
}

/// Captures fetch requests so tests can settle them out of order, twice, or
/// never.
#[derive(Default)]
struct CapturingFetcher {
    requests: Vec<(FrameIndex, String, CompletionSender)>,
}

impl FrameFetcher for CapturingFetcher {
    fn fetch(&mut self, frame: FrameIndex, path: &str, completion: CompletionSender) {
        self.requests.push((frame, path.to_string(), completion));
    }
}

#[test]
fn begin_loading_issues_one_fetch_per_frame_with_one_based_paths() {
    let mut loader = SequenceLoader::new(frames(3));
    assert_eq!(loader.phase(), LoaderPhase::Idle);

    let mut fetcher = CapturingFetcher::default();
    loader.begin_loading(&mut fetcher).unwrap();

    assert_eq!(loader.phase(), LoaderPhase::Loading);
    assert_eq!(fetcher.requests.len(), 3);
    assert_eq!(fetcher.requests[0].1, "seq/1.jpg");
    assert_eq!(fetcher.requests[2].1, "seq/3.jpg");
}

#[test]
fn begin_loading_twice_is_a_validation_error() {
    let mut loader = SequenceLoader::new(frames(2));
    let mut fetcher = CapturingFetcher::default();
    loader.begin_loading(&mut fetcher).unwrap();
    assert!(loader.begin_loading(&mut fetcher).is_err());
}

#[test]
fn readiness_requires_every_attempt_settled_regardless_of_outcome() {
    let mut loader = SequenceLoader::new(frames(5));
    let mut fetcher = CapturingFetcher::default();
    loader.begin_loading(&mut fetcher).unwrap();

    // 2 succeed, 3 fail, settled out of order.
    let mut requests = fetcher.requests;
    requests.reverse();
    for (frame, _, completion) in requests {
        let outcome = if frame.0 < 2 {
            LoadOutcome::Loaded(tiny_frame())
        } else {
            LoadOutcome::Failed("404".to_string())
        };
        completion.settle(frame, outcome);
    }

    assert!(!loader.is_ready());
    assert!(loader.pump());
    assert!(loader.is_ready());
    assert_eq!(loader.settled(), 5);
    assert_eq!(loader.phase(), LoaderPhase::Ready);

    // Ready fires exactly once.
    assert!(!loader.pump());

    assert!(loader.frame(FrameIndex(0)).is_some());
    assert!(loader.frame(FrameIndex(4)).is_none());
    assert!(matches!(loader.record(FrameIndex(4)), FrameLoadState::Failed(_)));
}

#[test]
fn duplicate_and_unknown_completions_are_ignored() {
    let mut loader = SequenceLoader::new(frames(2));
    let mut fetcher = CapturingFetcher::default();
    loader.begin_loading(&mut fetcher).unwrap();

    let (frame, _, completion) = fetcher.requests.remove(0);
    completion.clone().settle(frame, LoadOutcome::Failed("first".to_string()));
    completion.clone().settle(frame, LoadOutcome::Loaded(tiny_frame()));
    completion.settle(FrameIndex(99), LoadOutcome::Loaded(tiny_frame()));

    assert!(!loader.pump());
    assert_eq!(loader.settled(), 1);
    // The first settlement won; the record never reverted.
    assert!(matches!(loader.record(frame), FrameLoadState::Failed(_)));
    assert!(loader.frame(frame).is_none());
}

#[test]
fn unsettled_loads_leave_readiness_false_forever() {
    let mut loader = SequenceLoader::new(frames(2));
    let mut fetcher = CapturingFetcher::default();
    loader.begin_loading(&mut fetcher).unwrap();

    let (frame, _, completion) = fetcher.requests.remove(0);
    completion.settle(frame, LoadOutcome::Loaded(tiny_frame()));
    // The other request never settles: no timeout exists by contract.
    for _ in 0..10 {
        assert!(!loader.pump());
    }
    assert!(!loader.is_ready());
    assert_eq!(loader.settled(), 1);
}

#[test]
fn settle_after_loader_drop_is_silently_ignored() {
    let mut loader = SequenceLoader::new(frames(1));
    let mut fetcher = CapturingFetcher::default();
    loader.begin_loading(&mut fetcher).unwrap();
    drop(loader);

    let (frame, _, completion) = fetcher.requests.remove(0);
    // Must not panic; the receiver is gone.
    completion.settle(frame, LoadOutcome::Loaded(tiny_frame()));
}

#[test]
fn fs_fetcher_settles_synchronously_and_records_failures() {
    let dir = std::path::PathBuf::from("target").join("loader_fs_fetcher");
    std::fs::create_dir_all(dir.join("seq")).unwrap();

    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([9, 9, 9, 255]));
    img.save(dir.join("seq/1.png")).unwrap();
    // seq/2.png is intentionally absent.

    let mut loader = SequenceLoader::new(FrameSet::new(2, "seq/{frame}.png").unwrap());
    let mut fetcher = FsFrameFetcher::new(&dir);
    loader.begin_loading(&mut fetcher).unwrap();

    assert!(loader.pump());
    assert!(loader.is_ready());
    assert!(loader.frame(FrameIndex(0)).is_some());
    assert!(matches!(loader.record(FrameIndex(1)), FrameLoadState::Failed(_)));
}
