use std::collections::VecDeque;
use std::process::{Child, Command, Stdio};

use crate::foundation::error::{Room213Error, Room213Result};
use crate::narration::speech::{SpeechBackend, Utterance};
use crate::narration::voice::Voice;

const PROGRAM: &str = "espeak-ng";
const DEFAULT_WPM: f32 = 175.0;
const DEFAULT_PITCH: f32 = 50.0;

/// Return `true` when `espeak-ng` can be run from `PATH`.
pub fn is_espeak_on_path() -> bool {
    Command::new(PROGRAM)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Host speech through the system `espeak-ng` binary.
///
/// One child process speaks at a time. Further utterances wait in a FIFO and start as the
/// current child exits, which is noticed on [`speak`](SpeechBackend::speak) and
/// [`poll`](SpeechBackend::poll).
#[derive(Debug)]
pub struct EspeakSpeech {
    program: String,
    leading_args: Vec<String>,
    voices: Option<Vec<Voice>>,
    current: Option<Child>,
    queue: VecDeque<Utterance>,
}

impl Default for EspeakSpeech {
    fn default() -> Self {
        Self::with_command(PROGRAM, Vec::<String>::new())
    }
}

impl EspeakSpeech {
    /// `Some` when `espeak-ng` is installed.
    pub fn detect() -> Option<Self> {
        if is_espeak_on_path() {
            Some(Self::default())
        } else {
            tracing::info!("espeak-ng not found on PATH; narration disabled");
            None
        }
    }

    /// Speak through `program`, passing `leading_args` before the espeak flags.
    pub fn with_command(
        program: impl Into<String>,
        leading_args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            program: program.into(),
            leading_args: leading_args.into_iter().map(Into::into).collect(),
            voices: None,
            current: None,
            queue: VecDeque::new(),
        }
    }

    /// Whether a child process is still speaking.
    pub fn is_speaking(&self) -> bool {
        self.current.is_some()
    }

    /// Utterances waiting behind the current one.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn list_voices(&self) -> Room213Result<Vec<Voice>> {
        let program = &self.program;
        let out = Command::new(program)
            .args(&self.leading_args)
            .arg("--voices")
            .stderr(Stdio::null())
            .output()
            .map_err(|e| Room213Error::speech(format!("failed to run {program} --voices: {e}")))?;
        if !out.status.success() {
            return Err(Room213Error::speech(format!(
                "{program} --voices exited with {}",
                out.status
            )));
        }
        Ok(parse_voice_table(&String::from_utf8_lossy(&out.stdout)))
    }

    fn spawn(&self, utterance: &Utterance) -> Room213Result<Child> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(voice) = &utterance.voice {
            cmd.args(["-v", voice.lang.as_str()]);
        }
        let (wpm, pitch, amplitude) = espeak_params(utterance);
        cmd.args([
            "-s",
            &wpm.to_string(),
            "-p",
            &pitch.to_string(),
            "-a",
            &amplitude.to_string(),
            "--",
        ])
        .arg(&utterance.text);

        cmd.spawn()
            .map_err(|e| Room213Error::speech(format!("failed to spawn {}: {e}", self.program)))
    }

    /// Drop the current child once it has exited, then start queued lines in order.
    fn reap_finished(&mut self) {
        if let Some(child) = self.current.as_mut()
            && !matches!(child.try_wait(), Ok(None))
        {
            self.current = None;
        }
        while self.current.is_none() {
            let Some(next) = self.queue.pop_front() else {
                return;
            };
            match self.spawn(&next) {
                Ok(child) => self.current = Some(child),
                Err(e) => tracing::warn!(error = %e, "queued narration line dropped"),
            }
        }
    }
}

impl SpeechBackend for EspeakSpeech {
    fn voices(&mut self) -> Vec<Voice> {
        if self.voices.is_none() {
            match self.list_voices() {
                Ok(v) => self.voices = Some(v),
                Err(e) => {
                    tracing::warn!(error = %e, "voice enumeration failed");
                    return Vec::new();
                }
            }
        }
        self.voices.clone().unwrap_or_default()
    }

    fn speak(&mut self, utterance: Utterance) -> Room213Result<()> {
        self.reap_finished();
        if self.current.is_some() {
            self.queue.push_back(utterance);
            return Ok(());
        }
        self.current = Some(self.spawn(&utterance)?);
        Ok(())
    }

    fn cancel_all(&mut self) {
        self.queue.clear();
        if let Some(mut child) = self.current.take() {
            // Already-exited children make kill fail; that is fine.
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn poll(&mut self) {
        self.reap_finished();
    }
}

impl Drop for EspeakSpeech {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Map utterance multipliers onto espeak's words-per-minute, pitch (0..99) and amplitude.
pub(crate) fn espeak_params(u: &Utterance) -> (u32, u32, u32) {
    let wpm = (DEFAULT_WPM * u.rate).round().clamp(80.0, 450.0) as u32;
    let pitch = (DEFAULT_PITCH * u.pitch).round().clamp(0.0, 99.0) as u32;
    let amplitude = (100.0 * u.volume).round().clamp(0.0, 200.0) as u32;
    (wpm, pitch, amplitude)
}

/// Parse the `espeak-ng --voices` table (`Pty Language Age/Gender VoiceName File ...`).
pub(crate) fn parse_voice_table(table: &str) -> Vec<Voice> {
    table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut cols = line.split_whitespace();
            let _pty = cols.next()?;
            let lang = cols.next()?;
            let _age_gender = cols.next()?;
            let name = cols.next()?;
            Some(Voice::new(name.replace('_', " "), lang))
        })
        .collect()
}
