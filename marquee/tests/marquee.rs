use std::path::PathBuf;
use std::time::{Duration, Instant};

use marquee::{Buffer, Event, Logo, MarqueeOptions, Phase, Rect};

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("marquee-int-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn temp_png(name: &str, width: u32, height: u32) -> PathBuf {
    let path = temp_dir().join(name);
    image::RgbaImage::from_pixel(width, height, image::Rgba([200, 30, 30, 255]))
        .save(&path)
        .unwrap();
    path
}

/// Tick until the asset gate opens, bounded so a regression fails fast
/// instead of hanging.
fn wait_for_running(marquee: &mut marquee::Marquee) {
    for _ in 0..400 {
        marquee.tick(Instant::now());
        if marquee.phase() == Phase::Running {
            return;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    panic!("marquee never reached Running, phase {:?}", marquee.phase());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_awaits_assets_then_runs() {
    let mut marquee = MarqueeOptions::new()
        .logos([
            Logo::image(temp_png("life-a.png", 8, 8), "A"),
            Logo::text("Badge"),
            Logo::image(temp_png("life-b.png", 8, 8), "B"),
        ])
        .build();
    assert_eq!(marquee.phase(), Phase::AwaitingAssets);

    marquee.layout(Rect::from_size(40, 2));
    wait_for_running(&mut marquee);

    // Art is 4 cells wide at height 2; labels gave way to art:
    // (4+4) + (5+4) + (4+4) = 25.
    assert_eq!(marquee.sequence_width(), 25);
    assert!(marquee.replica_count() >= 2);
}

#[test]
fn test_failed_asset_still_permits_start() {
    let broken = temp_dir().join("broken.png");
    std::fs::write(&broken, b"not an image").unwrap();

    let mut marquee = MarqueeOptions::new()
        .logos([
            Logo::image(temp_png("ok.png", 8, 8), "OK"),
            Logo::image(broken, "Bad"),
        ])
        .build();
    marquee.layout(Rect::from_size(40, 2));
    wait_for_running(&mut marquee);

    // The broken logo keeps its 3-cell label: (4+4) + (3+4) = 15.
    assert_eq!(marquee.sequence_width(), 15);
}

#[test]
fn test_text_only_runs_immediately_and_scrolls() {
    let mut marquee = MarqueeOptions::new()
        .logos([Logo::text("Alpha"), Logo::text("Beta")])
        .speed(90.0)
        .build();
    assert_eq!(marquee.phase(), Phase::Running);

    marquee.layout(Rect::from_size(40, 2));
    let base = Instant::now();
    marquee.tick(base); // baseline, no motion
    assert_eq!(marquee.offset(), 0.0);

    marquee.tick(base + Duration::from_millis(100));
    assert!(marquee.offset() > 0.0);
    assert!(marquee.velocity() > 0.0);
}

#[test]
fn test_dispose_twice_from_running() {
    let mut marquee = MarqueeOptions::new()
        .logos([Logo::image(temp_png("disp.png", 8, 8), "A")])
        .build();
    marquee.layout(Rect::from_size(40, 2));
    wait_for_running(&mut marquee);

    marquee.dispose();
    marquee.dispose();
    assert!(marquee.is_disposed());
    assert_eq!(marquee.replica_count(), 0);
    assert_eq!(marquee.sequence_width(), 0);

    // Post-disposal operations are no-ops, including rendering.
    let offset = marquee.offset();
    marquee.tick(Instant::now());
    assert_eq!(marquee.offset(), offset);
    let mut buf = Buffer::new(40, 2);
    marquee.render(&mut buf);
    assert_eq!(buf.get(0, 0).unwrap().char, ' ');
}

#[test]
fn test_dispose_before_assets_settle() {
    let mut marquee = MarqueeOptions::new()
        .logos([Logo::image(temp_png("early.png", 8, 8), "A")])
        .build();
    // Dispose straight out of construction, while the loader may still
    // be decoding.
    marquee.dispose();
    assert!(marquee.is_disposed());
    marquee.tick(Instant::now());
    assert_eq!(marquee.phase(), Phase::Disposed);
}

// ============================================================================
// Hover Modulation
// ============================================================================

#[test]
fn test_hover_ramps_velocity_down_and_back() {
    let mut marquee = MarqueeOptions::new()
        .logos([Logo::text("Alpha")])
        .speed(90.0)
        .build();
    marquee.layout(Rect::from_size(40, 2));

    let base = Instant::now();
    marquee.tick(base);
    for i in 1..=100 {
        marquee.tick(base + Duration::from_millis(16 * i));
    }
    let cruising = marquee.velocity();
    assert!(cruising > 85.0);

    // Pointer enters the strip: velocity decays, no instant stop.
    marquee.handle_events(&[Event::MouseMove { x: 5, y: 0 }]);
    assert!(marquee.hovered());
    let mut prev = cruising;
    for i in 101..=140 {
        marquee.tick(base + Duration::from_millis(16 * i));
        assert!(marquee.velocity() < prev);
        assert!(marquee.velocity() > 0.0);
        prev = marquee.velocity();
    }

    // Pointer leaves: the same curve back toward cruise.
    marquee.handle_events(&[Event::MouseMove { x: 5, y: 30 }]);
    assert!(!marquee.hovered());
    for i in 141..=400 {
        marquee.tick(base + Duration::from_millis(16 * i));
    }
    assert!((marquee.velocity() - 90.0).abs() < 1.0);
}

#[test]
fn test_pause_on_hover_disabled_keeps_cruising() {
    let mut marquee = MarqueeOptions::new()
        .logos([Logo::text("Alpha")])
        .speed(90.0)
        .pause_on_hover(false)
        .build();
    marquee.layout(Rect::from_size(40, 2));

    let base = Instant::now();
    marquee.tick(base);
    marquee.handle_events(&[Event::MouseMove { x: 5, y: 0 }]);
    for i in 1..=200 {
        marquee.tick(base + Duration::from_millis(16 * i));
    }
    assert!((marquee.velocity() - 90.0).abs() < 1.0);
}

#[test]
fn test_reduced_motion_never_moves() {
    let mut marquee = MarqueeOptions::new()
        .logos([Logo::text("Alpha")])
        .speed(90.0)
        .reduced_motion(true)
        .build();
    marquee.layout(Rect::from_size(40, 2));

    let base = Instant::now();
    for i in 0..100 {
        marquee.tick(base + Duration::from_millis(16 * i));
    }
    assert_eq!(marquee.offset(), 0.0);
    assert_eq!(marquee.velocity(), 0.0);
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_layout_adapts_replica_count_both_ways() {
    // "abcdefghijklmnop" is 16 cells + 4 gap = one 20-cell sequence.
    let mut marquee = MarqueeOptions::new()
        .logos([Logo::text("abcdefghijklmnop")])
        .build();

    marquee.layout(Rect::from_size(80, 2));
    assert_eq!(marquee.replica_count(), 6); // ceil(80/20) + 2

    marquee.layout(Rect::from_size(20, 2));
    assert_eq!(marquee.replica_count(), 3);

    marquee.layout(Rect::from_size(200, 2));
    assert_eq!(marquee.replica_count(), 12);
}

#[test]
fn test_empty_sequence_defers_without_panicking() {
    let mut marquee = MarqueeOptions::new().build();
    marquee.layout(Rect::from_size(80, 2));
    marquee.tick(Instant::now());
    marquee.tick(Instant::now() + Duration::from_millis(16));

    assert_eq!(marquee.sequence_width(), 0);
    assert_eq!(marquee.replica_count(), 0);
    assert_eq!(marquee.offset(), 0.0);
}
