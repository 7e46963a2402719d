use super::*;
use crate::catalog::room_213;

fn tl() -> Timeline {
    Timeline::build(&room_213())
}

#[test]
fn mid_scene_projection() {
    let tl = tl();
    let p = Projection::at(&tl, 35_000.0);
    assert_eq!(p.active, Some(3));
    assert!((p.scene_progress - 0.5).abs() < 1e-12);
    assert!((p.overall_progress - 35.0 / 60.0).abs() < 1e-12);
    assert_eq!(p.timestamp, "00:35");
}

#[test]
fn start_projection_reveals_nothing() {
    let tl = tl();
    let p = Projection::at(&tl, 0.0);
    assert_eq!(p.active, Some(0));
    assert_eq!(p.scene_progress, 0.0);
    assert_eq!(p.overall_progress, 0.0);
    assert_eq!(p.typed_len, 0);
    assert_eq!(p.typed_subtitle(&tl), "");
    assert_eq!(p.timestamp, "00:00");
}

#[test]
fn end_projection_is_last_cue_complete() {
    let tl = tl();
    let p = Projection::at(&tl, 60_000.0);
    assert_eq!(p.active, Some(5));
    assert_eq!(p.scene_progress, 1.0);
    assert_eq!(p.overall_progress, 1.0);
    let line = &tl.cues()[5].scene.voice_line;
    assert_eq!(p.typed_subtitle(&tl), *line);
}

#[test]
fn elapsed_is_clamped() {
    let tl = tl();
    assert_eq!(Projection::at(&tl, 90_000.0), Projection::at(&tl, 60_000.0));
    assert_eq!(Projection::at(&tl, -5.0), Projection::at(&tl, 0.0));
    assert_eq!(Projection::at(&tl, f64::NAN), Projection::at(&tl, 0.0));
}

#[test]
fn progress_is_monotonic_and_typing_resets_per_scene() {
    let tl = tl();
    let mut prev = Projection::at(&tl, 0.0);
    let mut ms = 0.0;
    while ms <= tl.total_ms() {
        let p = Projection::at(&tl, ms);
        assert!(p.overall_progress >= prev.overall_progress);
        if p.active == prev.active {
            assert!(p.scene_progress >= prev.scene_progress);
            assert!(p.typed_len >= prev.typed_len);
        } else {
            // New scene starts on its boundary with nothing revealed.
            assert_eq!(p.scene_progress, 0.0);
            assert_eq!(p.typed_len, 0);
        }
        prev = p;
        ms += 125.0;
    }
}

#[test]
fn first_positive_progress_reveals_one_char() {
    assert_eq!(typed_len(100, 0.0), 0);
    assert_eq!(typed_len(100, 0.0001), 1);
    assert_eq!(typed_len(100, 0.5), 50);
    assert_eq!(typed_len(100, 1.0), 100);
    assert_eq!(typed_len(0, 0.7), 0);
}

#[test]
fn typed_subtitle_respects_multibyte_chars() {
    let tl = tl();
    // Scene 1 contains em-dashes; slicing by chars must never split them.
    for ms in (10_000..20_000).step_by(37) {
        let p = Projection::at(&tl, ms as f64);
        let s = p.typed_subtitle(&tl);
        assert_eq!(s.chars().count(), p.typed_len);
    }
}

#[test]
fn empty_timeline_projects_to_zero() {
    let tl = Timeline::build(&[]);
    let p = Projection::at(&tl, 1234.0);
    assert_eq!(p.active, None);
    assert_eq!(p.overall_progress, 0.0);
    assert_eq!(p.scene_progress, 0.0);
    assert_eq!(p.typed_subtitle(&tl), "");
}

#[test]
fn inactive_cues_get_zero_progress() {
    let tl = tl();
    let p = Projection::at(&tl, 25_000.0);
    assert_eq!(p.progress_for(2), 0.5);
    assert_eq!(p.progress_for(0), 0.0);
    assert_eq!(p.progress_for(5), 0.0);
}
