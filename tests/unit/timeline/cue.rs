use super::*;
use crate::catalog::{SceneKey, room_213};

fn scene(duration: f64) -> SceneDef {
    SceneDef {
        key: SceneKey::Hallway,
        title: format!("{duration}s"),
        duration,
        voice_line: String::new(),
        sensation: String::new(),
    }
}

#[test]
fn windows_are_prefix_sums() {
    let durations = [3.0, 0.5, 7.25, 1.0];
    let scenes: Vec<_> = durations.iter().map(|&d| scene(d)).collect();
    let tl = Timeline::build(&scenes);

    let mut acc = 0.0;
    for (i, cue) in tl.cues().iter().enumerate() {
        assert_eq!(cue.index, i);
        assert_eq!(cue.start, acc);
        assert_eq!(cue.end, acc + durations[i]);
        acc += durations[i];
    }
    assert_eq!(tl.total_secs(), acc);
    assert_eq!(tl.total_ms(), acc * 1000.0);

    for pair in tl.cues().windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn build_is_idempotent() {
    let scenes = room_213();
    assert_eq!(Timeline::build(&scenes), Timeline::build(&scenes));
}

#[test]
fn empty_catalog_has_zero_total() {
    let tl = Timeline::build(&[]);
    assert!(tl.is_empty());
    assert_eq!(tl.total_secs(), 0.0);
    assert!(tl.cue_at(0.0).is_none());
}

#[test]
fn exactly_one_cue_contains_each_instant() {
    let tl = Timeline::build(&room_213());
    let mut e = 0.0;
    while e < tl.total_secs() {
        let holders = tl.cues().iter().filter(|c| c.contains(e)).count();
        assert_eq!(holders, 1, "e={e}");
        assert!(tl.cue_at(e).unwrap().contains(e));
        e += 0.25;
    }
}

#[test]
fn boundaries_belong_to_the_next_cue() {
    let tl = Timeline::build(&room_213());
    assert_eq!(tl.cue_at(0.0).unwrap().index, 0);
    assert_eq!(tl.cue_at(9.999).unwrap().index, 0);
    assert_eq!(tl.cue_at(10.0).unwrap().index, 1);
    assert_eq!(tl.cue_at(35.0).unwrap().index, 3);
}

#[test]
fn total_duration_maps_to_last_cue() {
    let tl = Timeline::build(&room_213());
    assert_eq!(tl.cue_at(60.0).unwrap().index, 5);
    assert_eq!(tl.cue_at(1e9).unwrap().index, 5);
    assert_eq!(tl.cue_at(-1.0).unwrap().index, 0);
}
