mod support;

use std::time::Duration;

use crossfade_engine::assets::{AssetError, MemoryAssets};
use crossfade_engine::core::{HostReport, ScriptedHost, StartError, Step};
use crossfade_engine::device::{GlCall, MockDevice, ReleasedKind};
use crossfade_engine::input::{TouchEvent, TouchPhase};
use crossfade_engine::render::DEFAULT_IMAGES;
use crossfade_engine::time::{sine_fade, FadeDriver, ManualClock};

use support::{png, renderer, solid_assets, RED};

#[test]
fn start_then_draw_presents_a_frame() {
    let (fade, _) = FadeDriver::manual(0.5);
    let mut app = renderer(solid_assets(4, 4), fade);
    let mut host = ScriptedHost::new(MockDevice::new());

    let report = host
        .run(&mut app, [Step::Start, Step::Draw { dt: 0.016 }])
        .expect("start succeeds with both textures present");

    assert_eq!(report, HostReport { frames: 1, touches: 0, exited: false });
    assert!(app.is_started());
    assert!(host.device().last_draw().is_some());
}

#[test]
fn start_allocates_exactly_one_quad() {
    let (fade, _) = FadeDriver::manual(0.0);
    let mut app = renderer(solid_assets(4, 4), fade);
    let mut host = ScriptedHost::new(MockDevice::new());
    host.run(&mut app, [Step::Start]).expect("start");

    let device = host.device();
    assert_eq!(device.live(ReleasedKind::Buffer), 2);
    assert_eq!(device.live(ReleasedKind::Texture), 2);
    assert_eq!(device.live(ReleasedKind::Program), 1);
    assert_eq!(device.live(ReleasedKind::Bindings), 1);
    assert_eq!(device.live(ReleasedKind::Overlay), 1);
}

#[test]
fn stop_releases_every_handle() {
    let (fade, _) = FadeDriver::manual(0.0);
    let mut app = renderer(solid_assets(4, 4), fade);
    let mut host = ScriptedHost::new(MockDevice::new());

    host.run(&mut app, [Step::Start, Step::Draw { dt: 0.016 }, Step::Stop])
        .expect("run");

    assert!(!app.is_started());
    assert_eq!(host.device().live_total(), 0);

    let releases = host
        .device()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, GlCall::Release { .. }))
        .count();
    assert_eq!(releases, 7);
}

#[test]
fn missing_asset_fails_start_without_leaking() {
    let assets = MemoryAssets::new().with(DEFAULT_IMAGES[0], png(4, 4, RED));
    let (fade, _) = FadeDriver::manual(0.0);
    let mut app = renderer(assets, fade);
    let mut host = ScriptedHost::new(MockDevice::new());

    let err = host
        .run(&mut app, [Step::Start, Step::Draw { dt: 0.016 }])
        .expect_err("second image is missing");

    match err {
        StartError::Asset(AssetError::NotFound { name }) => assert_eq!(name, DEFAULT_IMAGES[1]),
        other => panic!("unexpected error: {other:?}"),
    }

    // Buffers and the first texture were created, then released on the error path.
    assert_eq!(host.device().live_total(), 0);
    assert!(!app.is_started());
    assert!(host.device().last_draw().is_none());
}

#[test]
fn undecodable_asset_is_an_asset_error() {
    let assets = MemoryAssets::new()
        .with(DEFAULT_IMAGES[0], b"definitely not png".to_vec())
        .with(DEFAULT_IMAGES[1], png(4, 4, RED));
    let (fade, _) = FadeDriver::manual(0.0);
    let mut app = renderer(assets, fade);
    let mut host = ScriptedHost::new(MockDevice::new());

    let err = host.run(&mut app, [Step::Start]).expect_err("decode fails");
    assert!(matches!(err, StartError::Asset(AssetError::Decode { .. })));
    assert_eq!(host.device().live_total(), 0);
}

#[test]
fn link_failure_fails_start_without_leaking() {
    let mut device = MockDevice::new();
    device.fail_link("syntax error");

    let (fade, _) = FadeDriver::manual(0.0);
    let mut app = renderer(solid_assets(4, 4), fade);
    let mut host = ScriptedHost::new(device);

    let err = host.run(&mut app, [Step::Start]).expect_err("link fails");
    assert!(matches!(err, StartError::ProgramLink(ref e) if e.message == "syntax error"));
    assert_eq!(host.device().live_total(), 0);
}

#[test]
fn touches_are_logged_only() {
    let (fade, _) = FadeDriver::manual(0.0);
    let mut app = renderer(solid_assets(4, 4), fade);
    let mut host = ScriptedHost::new(MockDevice::new());
    host.run(&mut app, [Step::Start]).expect("start");
    host.device_mut().clear_calls();

    let touch = TouchEvent::new(1, 10.0, 20.0, TouchPhase::Began);
    let report = host
        .run(&mut app, [Step::Touch(touch), Step::Touch(touch)])
        .expect("touch steps");

    assert_eq!(report.touches, 2);
    assert!(host.device().calls().is_empty());
    assert!(app.is_started());
}

#[test]
fn sine_fade_follows_the_injected_clock() {
    let clock = ManualClock::new();
    let mut app = renderer(solid_assets(4, 4), FadeDriver::sine_with(clock.clone()));
    let mut host = ScriptedHost::new(MockDevice::new());
    host.run(&mut app, [Step::Start]).expect("start");

    for secs in [0.0, 0.4, 1.3, 2.9, 4.7] {
        clock.set(Duration::from_secs_f64(secs));
        host.run(&mut app, [Step::Draw { dt: 0.016 }]).expect("draw");

        let recorded = host.device().last_draw().expect("drawn").fade_factor;
        assert!((recorded - sine_fade(secs)).abs() < 1e-6, "t={secs}");
        assert!((0.0..=1.0).contains(&recorded));
    }
}

#[test]
fn restart_after_stop_draws_again() {
    let (fade, _) = FadeDriver::manual(0.0);
    let mut app = renderer(solid_assets(4, 4), fade);
    let mut host = ScriptedHost::new(MockDevice::new());

    let steps = [
        Step::Start,
        Step::Draw { dt: 0.016 },
        Step::Stop,
        Step::Start,
        Step::Draw { dt: 0.016 },
    ];
    let report = host.run(&mut app, steps).expect("resume");

    assert_eq!(report.frames, 2);
    assert!(app.is_started());
    assert_eq!(host.device().live_total(), 7);
}
