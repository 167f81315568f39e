use super::*;
use crate::render::display_list::DrawOp;

#[derive(Default)]
struct MockBackend {
    op_counts: Vec<usize>,
}

impl RenderBackend for MockBackend {
    fn render_list(&mut self, list: &DisplayList) -> BloomResult<FrameRGBA> {
        self.op_counts.push(list.len());
        let c = list.canvas();
        Ok(FrameRGBA {
            width: c.width,
            height: c.height,
            data: Vec::new(),
            premultiplied: true,
        })
    }
}

fn small_config() -> BloomConfig {
    BloomConfig {
        canvas: crate::foundation::core::Canvas::new(200, 120),
        fps: 10,
        duration_ms: 3_000.0,
        ..BloomConfig::default()
    }
}

#[test]
fn frame_times_and_counts() {
    assert_eq!(frame_time_ms(0, 60), 0.0);
    assert_eq!(frame_time_ms(30, 60), 500.0);
    assert_eq!(frame_count(1_000.0, 30), 30);
    assert_eq!(frame_count(1_001.0, 30), 31);
    assert_eq!(frame_count(0.0, 30), 0);
    assert_eq!(frame_count(f64::NAN, 30), 0);
    assert_eq!(frame_count(1_000.0, 0), 0);
}

#[test]
fn record_frame_clears_first_then_draws_roses() {
    let cfg = small_config();
    let mut bouquet = cfg.bouquet();
    let list = record_frame(&mut bouquet, 0.0, cfg.background);
    assert_eq!(
        list.ops().first(),
        Some(&DrawOp::Clear {
            color: cfg.background
        })
    );
    // Six roses, each with center, stem and two leaves.
    assert_eq!(list.len(), 1 + 6 * 4);
}

#[test]
fn sequence_drives_bloom_from_zero() {
    let cfg = small_config();
    let mut backend = MockBackend::default();
    let mut seen = Vec::new();
    let stats = render_sequence(&cfg, &mut backend, |f, frame| {
        assert_eq!((frame.width, frame.height), (200, 120));
        seen.push(f);
        Ok(())
    })
    .unwrap();

    assert_eq!(stats.frames_rendered, 30);
    assert_eq!(seen, (0..30).collect::<Vec<_>>());
    // Main roses finish after 2900ms; the first frame strictly past that is t=3000ms,
    // which is beyond the 30-frame window.
    assert_eq!(stats.full_bloom_frame, None);
    // Op count grows as petals open and never shrinks.
    assert!(backend.op_counts.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(backend.op_counts[0], 1 + 6 * 4);
}

#[test]
fn sequence_reports_full_bloom_frame() {
    let cfg = BloomConfig {
        duration_ms: 3_500.0,
        ..small_config()
    };
    let stats = render_sequence(&cfg, &mut MockBackend::default(), |_, _| Ok(())).unwrap();
    assert_eq!(stats.full_bloom_frame, Some(30));
}

#[test]
fn sink_errors_stop_the_sequence() {
    let cfg = small_config();
    let mut calls = 0;
    let err = render_sequence(&cfg, &mut MockBackend::default(), |f, _| {
        calls += 1;
        if f == 2 {
            Err(BloomError::encode("disk full"))
        } else {
            Ok(())
        }
    })
    .unwrap_err();
    assert!(matches!(err, BloomError::Encode(_)));
    assert_eq!(calls, 3);
}

#[test]
fn still_frames_validate_inputs() {
    let cfg = small_config();
    let mut backend = MockBackend::default();
    assert!(render_still(&cfg, -1.0, &mut backend).is_err());
    assert!(render_still(&cfg, f64::INFINITY, &mut backend).is_err());
    assert!(render_still(&cfg, 4_000.0, &mut backend).is_ok());

    let empty = BloomConfig {
        duration_ms: 0.0,
        ..small_config()
    };
    assert!(render_sequence(&empty, &mut backend, |_, _| Ok(())).is_err());
}

#[test]
fn still_at_full_bloom_draws_every_petal() {
    let cfg = small_config();
    let mut bouquet = cfg.bouquet();
    for rose in bouquet.roses_mut() {
        rose.update(0.0);
    }
    let list = record_frame(&mut bouquet, 4_000.0, cfg.background);
    // 3 roses x 8 petals + 3 x 6 petals, each filled and stroked.
    let petals = 3 * 8 + 3 * 6;
    assert_eq!(list.len(), 1 + 2 * petals + 6 * 4);
    assert!(bouquet.is_full_bloom());
}
