use super::*;
use crate::audio::sink::InMemoryAudioSink;

fn cfg() -> AmbientConfig {
    AmbientConfig {
        sample_rate: 8_000,
        ..AmbientConfig::default()
    }
}

fn engine() -> AmbientEngine<InMemoryAudioSink> {
    AmbientEngine::new(cfg(), Some(InMemoryAudioSink::new()))
}

fn secs(s: f64) -> Millis {
    Millis::from_secs(s)
}

#[test]
fn start_fades_in_to_ceiling() {
    let mut e = engine();
    e.start(secs(0.0));
    assert_eq!(e.live_sessions(), 1);
    assert_eq!(e.live_sources(), 3);
    assert!((e.master_gain().unwrap() - 0.0001).abs() < 1e-6);

    e.pump(secs(1.0));
    let mid = e.master_gain().unwrap();
    assert!(mid > 0.0001 && mid < 0.085);

    e.pump(secs(3.0));
    assert!((e.master_gain().unwrap() - 0.085).abs() < 1e-5);
    assert_eq!(e.sink().unwrap().samples.len(), 8_000 * 3 * 2);
}

#[test]
fn audio_clock_follows_rendered_frames() {
    let mut e = engine();
    e.start(secs(10.0));
    e.pump(secs(10.5));
    assert!((e.audio_time().unwrap() - 0.5).abs() < 1e-9);
    // Going backwards renders nothing.
    e.pump(secs(10.2));
    assert!((e.audio_time().unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn double_start_never_overlaps_sessions() {
    let mut e = engine();
    e.start(secs(0.0));
    e.pump(secs(0.5));
    e.start(secs(0.5));
    e.start(secs(0.5));

    let sink = e.sink().unwrap();
    assert_eq!(sink.opened(), 3);
    assert_eq!(sink.closed(), 2);
    assert_eq!(sink.max_concurrent(), 1);
    assert_eq!(e.live_sessions(), 1);
}

#[test]
fn fade_out_tears_down_after_delay() {
    let mut e = engine();
    e.start(secs(0.0));
    e.fade_out(secs(5.0));
    assert!(e.is_fading());
    assert!((e.master_gain().unwrap() - 0.085).abs() < 1e-5);

    e.pump(secs(6.2));
    let g = e.master_gain().unwrap();
    assert!(g < 0.085 && g > 0.0001);

    e.pump(secs(7.5));
    assert_eq!(e.live_sessions(), 1);

    e.pump(secs(30.0));
    assert_eq!(e.live_sessions(), 0);
    let sink = e.sink().unwrap();
    assert_eq!(sink.closed(), 1);
    // Rendering stopped at the teardown point: 7.6 s of stereo frames.
    assert_eq!(sink.samples.len(), 60_800 * 2);
}

#[test]
fn fade_out_mid_fade_in_starts_from_current_gain() {
    let mut e = engine();
    e.start(secs(0.0));
    e.pump(secs(1.0));
    let before = e.master_gain().unwrap();
    e.fade_out(secs(1.0));
    let after = e.master_gain().unwrap();
    assert!((before - after).abs() < 1e-6);

    // A second fade-out is ignored.
    e.fade_out(secs(1.5));
    e.pump(secs(3.5));
    assert_eq!(e.live_sessions(), 1);
    e.pump(secs(3.7));
    assert_eq!(e.live_sessions(), 0);
}

#[test]
fn restart_discards_pending_teardown() {
    let mut e = engine();
    e.start(secs(0.0));
    e.fade_out(secs(10.0));
    e.start(secs(11.0));
    assert!(!e.is_fading());

    // Well past the old teardown moment the new session keeps playing.
    e.pump(secs(20.0));
    assert_eq!(e.live_sessions(), 1);
    assert!((e.master_gain().unwrap() - 0.085).abs() < 1e-5);
}

#[test]
fn stop_is_idempotent() {
    let mut e = engine();
    e.stop();
    e.start(secs(0.0));
    e.stop();
    e.stop();
    e.fade_out(secs(1.0));
    e.pump(secs(2.0));
    let sink = e.sink().unwrap();
    assert_eq!(sink.opened(), 1);
    assert_eq!(sink.closed(), 1);
    assert_eq!(sink.open_streams(), 0);
}

#[test]
fn missing_or_unavailable_output_degrades_to_silence() {
    let mut none: AmbientEngine<InMemoryAudioSink> = AmbientEngine::new(cfg(), None);
    none.start(secs(0.0));
    none.pump(secs(5.0));
    none.fade_out(secs(5.0));
    assert!(!none.is_available());
    assert_eq!(none.live_sessions(), 0);

    let mut broken = AmbientEngine::new(cfg(), Some(InMemoryAudioSink::unavailable()));
    broken.start(secs(0.0));
    assert!(broken.is_available());
    assert_eq!(broken.live_sessions(), 0);
    assert!(broken.master_gain().is_none());
}

#[test]
fn into_sink_closes_live_stream() {
    let mut e = engine();
    e.start(secs(0.0));
    let sink = e.into_sink().unwrap();
    assert_eq!(sink.open_streams(), 0);
}
