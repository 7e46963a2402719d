use super::*;

fn cfg() -> AmbientConfig {
    AmbientConfig {
        sample_rate: 8_000,
        ..AmbientConfig::default()
    }
}

#[test]
fn waveforms_start_at_zero_and_peak_at_quarter() {
    for w in [Waveform::Sine, Waveform::Triangle] {
        assert!(w.sample(0.0).abs() < 1e-6);
        assert!((w.sample(0.25) - 1.0).abs() < 1e-6);
        assert!((w.sample(0.75) + 1.0).abs() < 1e-6);
    }
    assert!((Waveform::Triangle.sample(0.125) - 0.5).abs() < 1e-6);
}

#[test]
fn noise_buffer_is_low_amplitude_and_seeded() {
    let a = AmbientGraph::build(&cfg());
    let b = AmbientGraph::build(&cfg());
    assert_eq!(a.noise().buffer().len(), 24_000);
    assert_eq!(a.noise().buffer(), b.noise().buffer());
    assert!(a.noise().buffer().iter().all(|s| s.abs() <= 0.18));
}

#[test]
fn idle_sources_render_silence() {
    let mut g = AmbientGraph::build(&cfg());
    let mut out = vec![1.0; 64];
    g.render(&mut out);
    assert!(out.iter().all(|&s| s == 0.0));
    assert_eq!(g.frames_rendered(), 32);
    assert_eq!(g.live_sources(), 0);
}

#[test]
fn clock_advances_with_rendered_frames() {
    let mut g = AmbientGraph::build(&cfg());
    g.start_sources().unwrap();
    let mut out = vec![0.0; 8_000 * 2];
    g.render(&mut out);
    assert!((g.current_time() - 1.0).abs() < 1e-12);
    assert!(out.iter().all(|s| s.abs() <= 1.0));
    // Stereo channels carry the same signal.
    assert!(out.chunks_exact(2).all(|f| f[0] == f[1]));
}

#[test]
fn redundant_stop_and_close_report_errors() {
    let mut g = AmbientGraph::build(&cfg());
    assert!(g.stop_sources().is_err());
    g.start_sources().unwrap();
    assert_eq!(g.live_sources(), 3);
    assert!(g.start_sources().is_err());

    g.stop_sources().unwrap();
    assert_eq!(g.live_sources(), 0);
    assert!(g.stop_sources().is_err());

    g.disconnect();
    g.disconnect();
    g.close().unwrap();
    assert!(g.close().is_err());
    assert!(g.is_closed());
}

#[test]
fn ceiling_level_output_stays_quiet() {
    let mut g = AmbientGraph::build(&cfg());
    g.master().set_value_at_time(0.085, 0.0).unwrap();
    g.start_sources().unwrap();
    let mut out = vec![0.0; 8_000 * 2 * 3];
    g.render(&mut out);
    let peak = out.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    // (drone 1.0 + noise 0.18 * 0.02) * (0.085 + 0.025)
    assert!(peak > 0.05);
    assert!(peak <= 0.111);
}
