//! Integration tests: end-to-end light request sequences using MockOutput.
//!
//! These tests drive the public controller API and check that the shared
//! LED writes come out in the right order, with the right winner, and never
//! interleave between concurrent callers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use lights_lib::config::{Config, LedPaths};
use lights_lib::led::LedFrame;
use lights_lib::output::SysfsOutput;
use lights_lib::output::mock::MockOutput;
use lights_lib::{FlashMode, LightController, LightKind, LightState, LightsError};

fn controller() -> (LightController<MockOutput>, MockOutput) {
    let mock = MockOutput::new();
    let ctl = LightController::new(
        mock.clone(),
        LedPaths::default(),
        &[LightKind::Attention, LightKind::Notifications],
    );
    (ctl, mock)
}

/// One shared-LED write group as seen on the wire.
#[derive(Debug, PartialEq)]
struct WrittenFrame {
    brightness: String,
    timing: Option<(String, String)>,
    blink: String,
}

/// Split a write log into shared-LED groups, asserting every group is
/// complete and contiguous. Writes to `ignored` paths may only appear
/// between groups.
fn split_frames(
    writes: &[(PathBuf, String)],
    paths: &LedPaths,
    ignored: &[PathBuf],
) -> Vec<WrittenFrame> {
    let mut frames = Vec::new();
    let mut i = 0;
    while i < writes.len() {
        if ignored.contains(&writes[i].0) {
            i += 1;
            continue;
        }
        let rgb = paths.rgb();
        for (k, path) in rgb.iter().enumerate() {
            assert_eq!(
                writes[i + k].0,
                *path,
                "write {} should be color channel {k}",
                i + k
            );
        }
        let brightness = writes[i].1.clone();
        assert_eq!(writes[i + 1].1, brightness, "green differs from red");
        assert_eq!(writes[i + 2].1, brightness, "blue differs from red");
        i += 3;

        let mut timing = None;
        if writes[i].0 == paths.blink_frequency {
            assert_eq!(writes[i + 1].0, paths.blink_pwm);
            timing = Some((writes[i].1.clone(), writes[i + 1].1.clone()));
            i += 2;
        }
        assert_eq!(writes[i].0, paths.blink, "group must end with blink flag");
        let blink = writes[i].1.clone();
        assert_eq!(blink == "1", timing.is_some(), "timing iff blinking");
        i += 1;

        frames.push(WrittenFrame {
            brightness,
            timing,
            blink,
        });
    }
    frames
}

fn expected(state: LightState) -> WrittenFrame {
    let frame = LedFrame::from_state(state);
    WrittenFrame {
        brightness: frame.brightness.to_string(),
        timing: frame
            .blink
            .enabled
            .then(|| (frame.blink.frequency.to_string(), frame.blink.pwm.to_string())),
        blink: u8::from(frame.blink.enabled).to_string(),
    }
}

// ── Sequences ──

#[test]
fn notification_then_attention_then_release() {
    let (ctl, mock) = controller();
    let p = ctl.paths().clone();

    let notif = LightState::timed(0xFF00_FF00, 500, 2000);
    let attn = LightState::timed(0xFFFF_FFFF, 1000, 1000);

    ctl.set_light(LightKind::Notifications, &notif).unwrap();
    ctl.set_light(LightKind::Attention, &attn).unwrap();
    ctl.set_light(LightKind::Attention, &LightState::OFF).unwrap();
    ctl.set_light(LightKind::Notifications, &LightState::OFF)
        .unwrap();

    let frames = split_frames(&mock.writes(), &p, &[]);
    assert_eq!(
        frames,
        vec![
            expected(notif),
            expected(attn),
            expected(notif),
            expected(LightState::OFF),
        ]
    );
}

#[test]
fn attention_with_zero_color_does_not_mask_notification() {
    let (ctl, mock) = controller();
    let notif = LightState::solid(0xFF00_00FF);

    ctl.set_light(LightKind::Notifications, &notif).unwrap();
    mock.clear();
    ctl.set_light(LightKind::Attention, &LightState::timed(0xFF00_0000, 500, 500))
        .unwrap();

    let frames = split_frames(&mock.writes(), ctl.paths(), &[]);
    assert_eq!(frames, vec![expected(notif)]);
}

#[test]
fn unsupported_request_leaves_arbitration_unchanged() {
    let (ctl, mock) = controller();
    let notif = LightState::solid(0xFFFF_8000);
    ctl.set_light(LightKind::Notifications, &notif).unwrap();
    let before = mock.writes().len();

    for kind in [
        LightKind::Keyboard,
        LightKind::Battery,
        LightKind::Bluetooth,
        LightKind::Wifi,
    ] {
        let err = ctl
            .set_light(kind, &LightState::solid(0xFFFF_FFFF))
            .unwrap_err();
        assert!(matches!(err, LightsError::NotSupported(_)));
    }

    assert_eq!(mock.writes().len(), before);
    assert_eq!(ctl.selected_state(), notif);
    assert_eq!(ctl.slot(LightKind::Attention), Some(LightState::OFF));
}

#[test]
fn hardware_flash_never_blinks() {
    let (ctl, mock) = controller();
    let req = LightState {
        color: 0xFFFF_FFFF,
        flash_mode: FlashMode::Hardware,
        flash_on_ms: 100,
        flash_off_ms: 0,
        ..LightState::OFF
    };
    ctl.set_light(LightKind::Notifications, &req).unwrap();

    assert_eq!(
        ctl.slot(LightKind::Notifications).unwrap().flash_mode,
        FlashMode::None
    );
    assert_eq!(mock.last(&ctl.paths().blink).as_deref(), Some("0"));
    assert_eq!(mock.last(&ctl.paths().red).as_deref(), Some("255"));
}

#[test]
fn configured_third_channel_arbitrates_last() {
    let config = Config {
        shared_led: vec![
            "attention".into(),
            "notifications".into(),
            "battery".into(),
        ],
        ..Config::default()
    };
    let mock = MockOutput::new();
    let ctl = LightController::from_config(mock.clone(), &config);
    assert!(ctl.is_supported(LightKind::Battery));

    let low_battery = LightState::timed(0xFFFF_0000, 250, 250);
    ctl.set_light(LightKind::Battery, &low_battery).unwrap();
    assert_eq!(ctl.selected_state(), low_battery);

    let notif = LightState::solid(0xFF00_FF00);
    ctl.set_light(LightKind::Notifications, &notif).unwrap();
    assert_eq!(ctl.selected_state(), notif);

    let frames = split_frames(&mock.writes(), ctl.paths(), &[]);
    assert_eq!(frames, vec![expected(low_battery), expected(notif)]);
}

#[test]
fn sysfs_tree_receives_values() {
    let dir = tempfile::tempdir().unwrap();
    let paths = LedPaths::default();
    for p in [
        &paths.lcd_backlight,
        &paths.red,
        &paths.green,
        &paths.blue,
        &paths.blink,
        &paths.blink_frequency,
        &paths.blink_pwm,
    ] {
        let full = dir.path().join(p.strip_prefix("/").unwrap());
        std::fs::create_dir_all(full.parent().unwrap()).unwrap();
        std::fs::write(&full, "").unwrap();
    }
    let read = |p: &PathBuf| {
        std::fs::read_to_string(dir.path().join(p.strip_prefix("/").unwrap())).unwrap()
    };

    let ctl = LightController::new(
        SysfsOutput::with_root(dir.path()),
        paths.clone(),
        &[LightKind::Attention, LightKind::Notifications],
    );
    ctl.set_light(LightKind::Backlight, &LightState::solid(0xFF80_8080))
        .unwrap();
    ctl.set_light(
        LightKind::Notifications,
        &LightState::timed(0xFFFF_FFFF, 5, 995),
    )
    .unwrap();
    // Buttons file doesn't exist: still succeeds.
    ctl.set_light(LightKind::Buttons, &LightState::solid(0xFFFF_FFFF))
        .unwrap();

    assert_eq!(read(&paths.lcd_backlight), "128\n");
    assert_eq!(read(&paths.red), "255\n");
    assert_eq!(read(&paths.blue), "255\n");
    assert_eq!(read(&paths.blink_frequency), "20\n");
    assert_eq!(read(&paths.blink_pwm), "16\n");
    assert_eq!(read(&paths.blink), "1\n");
}

// ── Concurrency ──

#[test]
fn concurrent_requests_never_interleave_frames() {
    const THREADS: usize = 8;
    const ITERATIONS: usize = 200;

    let (ctl, mock) = controller();
    let ctl = Arc::new(ctl);

    // Distinct brightness per state so each written group can be traced
    // back to exactly one request.
    let palette: Vec<LightState> = vec![
        LightState::solid(0xFF10_1010),
        LightState::timed(0xFF20_2020, 500, 500),
        LightState::timed(0xFF30_3030, 5, 995),
        LightState::timed(0xFF40_4040, 3000, 1000),
        LightState::solid(0xFF50_5050),
        LightState::timed(0xFF60_6060, 1, 999),
        LightState::timed(0xFF70_7070, 100, 100),
        LightState::solid(0xFF80_8080),
    ];
    let by_brightness: HashMap<String, WrittenFrame> = palette
        .iter()
        .map(|s| (LedFrame::from_state(*s).brightness.to_string(), expected(*s)))
        .chain([("0".to_string(), expected(LightState::OFF))])
        .collect();
    assert_eq!(by_brightness.len(), palette.len() + 1);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let ctl = Arc::clone(&ctl);
            let palette = palette.clone();
            thread::spawn(move || {
                for i in 0..ITERATIONS {
                    let state = palette[(t + i) % palette.len()];
                    let kind = match (t + i) % 3 {
                        0 => LightKind::Attention,
                        1 => LightKind::Notifications,
                        _ => LightKind::Backlight,
                    };
                    // Attention requests must blink or they are released.
                    let state = if kind == LightKind::Attention
                        && state.flash_mode == FlashMode::None
                    {
                        LightState::OFF
                    } else {
                        state
                    };
                    ctl.set_light(kind, &state).unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let paths = ctl.paths().clone();
    let writes = mock.writes();
    let frames = split_frames(&writes, &paths, std::slice::from_ref(&paths.lcd_backlight));
    assert!(!frames.is_empty());
    for frame in &frames {
        let want = by_brightness
            .get(&frame.brightness)
            .unwrap_or_else(|| panic!("unexpected brightness {}", frame.brightness));
        assert_eq!(frame, want, "group mixes values from different states");
    }

    // The last group on the wire reflects the final arbitration.
    let last = frames.last().unwrap();
    assert_eq!(*last, expected(ctl.selected_state()));
}
