use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn door_saturates_open_almost_immediately() {
    let SceneParams::DoorThreshold { door_open, .. } = SceneParams::at(SceneKey::DoorThreshold, 0.02)
    else {
        panic!("wrong variant");
    };
    assert!(approx(door_open, 0.6));
    let SceneParams::DoorThreshold {
        door_open,
        light_intensity,
    } = SceneParams::at(SceneKey::DoorThreshold, 0.5)
    else {
        panic!("wrong variant");
    };
    assert_eq!(door_open, 1.0);
    assert!(approx(light_intensity, 0.25 + (3.0 * PI).sin() * 0.12));
}

#[test]
fn finale_eye_opens_after_delay() {
    let at = |p| match SceneParams::at(SceneKey::Finale, p) {
        SceneParams::Finale { darkness, eye_open } => (darkness, eye_open),
        other => panic!("wrong variant: {other:?}"),
    };
    assert_eq!(at(0.0), (0.15, 0.0));
    assert_eq!(at(0.3).1, 0.0);
    let (darkness, eye) = at(0.5);
    assert!(approx(darkness, 0.7));
    assert!(approx(eye, 0.44));
    assert_eq!(at(1.0), (0.9, 1.0));
}

#[test]
fn room_glow_is_bounded() {
    for p in [0.0, 0.05, 0.5, 1.0] {
        let SceneParams::RoomInterior { pulse, red_glow } = SceneParams::at(SceneKey::RoomInterior, p)
        else {
            panic!("wrong variant");
        };
        assert!((0.2..=0.8).contains(&red_glow));
        assert!((0.7..=0.9).contains(&pulse));
    }
}

#[test]
fn whisper_bands_follow_their_own_frequencies() {
    let SceneParams::Whispers { wave, bands } = SceneParams::at(SceneKey::Whispers, 0.25) else {
        panic!("wrong variant");
    };
    assert!(approx(wave, (2.0 * PI).sin()));
    for (i, b) in bands.iter().enumerate() {
        let expected = 0.35 + (0.25 * PI * (i as f64 + 1.0) * 1.8).sin() * 0.25;
        assert!(approx(*b, expected));
        assert!((0.1..=0.6).contains(b));
    }
}

#[test]
fn progress_is_clamped() {
    for key in SceneKey::ALL {
        assert_eq!(SceneParams::at(key, -3.0), SceneParams::at(key, 0.0));
        assert_eq!(SceneParams::at(key, 7.0), SceneParams::at(key, 1.0));
    }
    let SceneParams::Mirror { apparition, .. } = SceneParams::at(SceneKey::Mirror, f64::NAN) else {
        panic!("wrong variant");
    };
    assert_eq!(apparition, 0.0);
}

#[test]
fn hallway_flicker_range() {
    for i in 0..=100 {
        let SceneParams::Hallway { flicker } = SceneParams::at(SceneKey::Hallway, f64::from(i) / 100.0)
        else {
            panic!("wrong variant");
        };
        assert!((0.6..=1.1 + 1e-12).contains(&flicker));
    }
}

#[test]
fn svg_document_has_canvas_size_and_scene_features() {
    let canvas = Canvas::default();
    for key in SceneKey::ALL {
        let doc = scene_svg(key, 0.5, canvas);
        assert!(doc.starts_with("<svg"));
        assert!(doc.contains(r#"width="360" height="640""#));
        assert!(doc.ends_with("</svg>"));
    }
    assert!(scene_svg(SceneKey::Hallway, 0.0, canvas).contains("2 1 3"));
    assert!(scene_svg(SceneKey::DoorThreshold, 0.5, canvas).contains("<path"));
    // The figure group only exists once the apparition has started.
    assert!(!scene_svg(SceneKey::Mirror, 0.0, canvas).contains("<g "));
    assert!(scene_svg(SceneKey::Mirror, 0.5, canvas).contains("<g "));
}

#[test]
fn swung_panel_keeps_hinge_edge() {
    let panel = Rect::new(100.0, 100.0, 200.0, 300.0);
    let closed = swing_panel(panel, 0.0);
    let open = swing_panel(panel, 18.0_f64.to_radians());
    assert!(approx(swung_x(panel, 0.0, 0.0), 100.0));
    assert!(swung_x(panel, 0.3, 0.0) > 100.0);
    assert_ne!(closed.elements(), open.elements());
    assert_eq!(
        open.elements()[0],
        kurbo::PathEl::MoveTo(Point::new(200.0, 100.0))
    );
}
