use super::*;
use crate::catalog::room_213;
use crate::narration::speech::InMemorySpeech;

fn voices() -> Vec<Voice> {
    vec![Voice::new("Daniel", "en-GB"), Voice::new("Emma", "en-US")]
}

fn scheduler(speech: Option<InMemorySpeech>) -> NarrationScheduler<InMemorySpeech> {
    let tl = Timeline::build(&room_213());
    NarrationScheduler::new(speech, NarrationConfig::default(), &tl)
}

fn spoken_texts(s: &NarrationScheduler<InMemorySpeech>) -> Vec<String> {
    s.backend()
        .unwrap()
        .spoken()
        .iter()
        .map(|u| u.text.clone())
        .collect()
}

#[test]
fn lines_fire_at_lead_in_plus_cue_start() {
    let mut s = scheduler(Some(InMemorySpeech::with_voices(voices())));
    let t0 = Millis(1_000.0);
    s.arm(t0);
    assert_eq!(s.pending(), 6);
    assert_eq!(s.voice().unwrap().name, "Emma");

    s.poll(t0.add_secs(0.39));
    assert_eq!(s.fired(), 0);
    s.poll(t0.add_secs(0.4));
    assert_eq!(s.fired(), 1);
    s.poll(t0.add_secs(10.39));
    assert_eq!(s.fired(), 1);
    s.poll(t0.add_secs(10.4));
    assert_eq!(s.fired(), 2);
    s.poll(t0.add_secs(100.0));
    assert_eq!(s.fired(), 6);
    assert_eq!(s.pending(), 0);

    let texts = spoken_texts(&s);
    let expected: Vec<String> = room_213().into_iter().map(|d| d.voice_line).collect();
    assert_eq!(texts, expected);

    let u = &s.backend().unwrap().spoken()[0];
    assert_eq!(u.rate, 0.94);
    assert_eq!(u.pitch, 0.9);
    assert_eq!(u.volume, 1.0);
    assert_eq!(u.voice.as_ref().unwrap().name, "Emma");
}

#[test]
fn rearm_cancels_previous_run_without_duplicates() {
    let mut s = scheduler(Some(InMemorySpeech::with_voices(voices())));
    s.arm(Millis(0.0));
    s.poll(Millis(15_000.0));
    assert_eq!(s.fired(), 2);
    assert!(s.backend().unwrap().speaking().is_some());

    // Restart mid-flight at 22s.
    s.arm(Millis(22_000.0));
    assert!(s.backend().unwrap().speaking().is_none());
    assert_eq!(s.pending(), 6);

    // Old deadlines (e.g. 20.4s) must not fire from the previous run.
    s.poll(Millis(22_300.0));
    assert_eq!(s.fired(), 0);
    s.poll(Millis(22_000.0 + 60_000.0));
    assert_eq!(s.fired(), 6);
    assert_eq!(s.backend().unwrap().spoken().len(), 8);
}

#[test]
fn cancel_silences_and_clears() {
    let mut s = scheduler(Some(InMemorySpeech::with_voices(voices())));
    s.arm(Millis(0.0));
    s.poll(Millis(500.0));
    let cancels_before = s.backend().unwrap().cancels();
    s.cancel();
    assert_eq!(s.pending(), 0);
    assert!(s.backend().unwrap().speaking().is_none());
    assert_eq!(s.backend().unwrap().cancels(), cancels_before + 1);
    s.poll(Millis(1e9));
    assert_eq!(s.backend().unwrap().spoken().len(), 1);
}

#[test]
fn missing_speech_is_a_silent_noop() {
    let mut s = scheduler(None);
    assert!(!s.is_available());
    s.arm(Millis(0.0));
    s.poll(Millis(1e9));
    assert_eq!(s.pending(), 0);
    s.cancel();
}

#[test]
fn defers_until_voices_load_then_deregisters() {
    let mut s = scheduler(Some(InMemorySpeech::loading()));
    s.arm(Millis(0.0));
    assert!(s.is_awaiting_voices());
    assert!(s.backend().unwrap().is_watching());
    assert_eq!(s.pending(), 0);

    s.poll(Millis(100.0));
    assert!(s.is_awaiting_voices());

    s.backend_mut().unwrap().publish_voices(voices());
    s.poll(Millis(200.0));
    assert!(!s.is_awaiting_voices());
    assert!(!s.backend().unwrap().is_watching());
    assert_eq!(s.backend().unwrap().watch_registrations(), 1);
    // Anchored to the begin moment: the first line (0.4s) is not due yet at 0.2s.
    assert_eq!(s.pending(), 6);

    s.poll(Millis(400.0));
    assert_eq!(s.fired(), 1);
}

#[test]
fn restart_while_awaiting_voices_registers_once() {
    let mut s = scheduler(Some(InMemorySpeech::loading()));
    s.arm(Millis(0.0));
    s.arm(Millis(50.0));
    assert_eq!(s.backend().unwrap().watch_registrations(), 2);
    assert!(s.backend().unwrap().is_watching());

    s.backend_mut().unwrap().publish_voices(voices());
    s.poll(Millis(60.0));
    s.poll(Millis(1e9));
    assert_eq!(s.fired(), 6);
    assert_eq!(s.backend().unwrap().spoken().len(), 6);
}

#[test]
fn readiness_with_no_voices_skips_narration() {
    let mut s = scheduler(Some(InMemorySpeech::loading()));
    s.arm(Millis(0.0));
    s.backend_mut().unwrap().publish_voices(Vec::new());
    s.poll(Millis(10.0));
    assert!(!s.is_awaiting_voices());
    s.poll(Millis(1e9));
    assert_eq!(s.fired(), 0);
}

#[test]
fn late_voices_skip_lines_for_scenes_already_gone() {
    let mut s = scheduler(Some(InMemorySpeech::loading()));
    s.arm(Millis(0.0));
    s.poll(Millis(1_000.0));

    // Lines for 0.4 s, 10.4 s and 20.4 s are all overdue by 25 s.
    s.backend_mut().unwrap().publish_voices(voices());
    s.poll(Millis(25_000.0));
    let tl = Timeline::build(&room_213());
    assert_eq!(spoken_texts(&s), vec![tl.cues()[2].scene.voice_line.clone()]);
    assert_eq!(s.pending(), 3);

    s.poll(Millis(1e9));
    assert_eq!(s.backend().unwrap().spoken().len(), 4);
}
