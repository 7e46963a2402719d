use crate::foundation::error::Room213Result;
use crate::narration::voice::Voice;

/// One speech request.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Utterance {
    /// Text to speak.
    pub text: String,
    /// Chosen voice; `None` lets the host use its default.
    pub voice: Option<Voice>,
    /// Rate multiplier.
    pub rate: f32,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Volume in `[0, 1]`.
    pub volume: f32,
}

/// Host speech capability.
///
/// Voice enumeration may be asynchronous: [`voices`](Self::voices) can be empty until the
/// host has loaded its voice data, after which [`voices_changed`](Self::voices_changed)
/// reports `true` once for a registered watcher.
pub trait SpeechBackend {
    /// Currently known voices.
    fn voices(&mut self) -> Vec<Voice>;

    /// Queue an utterance behind anything still speaking.
    fn speak(&mut self, utterance: Utterance) -> Room213Result<()>;

    /// Stop the current utterance and drop anything queued.
    fn cancel_all(&mut self);

    /// Register (`true`) or deregister (`false`) interest in voice readiness.
    fn watch_voices(&mut self, _enabled: bool) {}

    /// One-shot readiness poll: `true` at most once per registration.
    fn voices_changed(&mut self) -> bool {
        false
    }

    /// Housekeeping on every scheduler poll, such as starting the next queued line.
    fn poll(&mut self) {}
}

/// In-memory speech host for tests and dry runs.
///
/// Records every utterance and cancel. Voices can be published late to exercise deferred
/// scheduling.
#[derive(Debug, Default)]
pub struct InMemorySpeech {
    voices: Vec<Voice>,
    voices_dirty: bool,
    watching: bool,
    watch_registrations: usize,
    spoken: Vec<Utterance>,
    speaking: Option<Utterance>,
    cancels: usize,
}

impl InMemorySpeech {
    /// Host with `voices` available immediately.
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            ..Self::default()
        }
    }

    /// Host whose voice list is empty until [`publish_voices`](Self::publish_voices).
    pub fn loading() -> Self {
        Self::default()
    }

    /// Make `voices` available and raise the readiness signal for a registered watcher.
    pub fn publish_voices(&mut self, voices: Vec<Voice>) {
        self.voices = voices;
        self.voices_dirty = true;
    }

    /// Everything passed to `speak`, in order.
    pub fn spoken(&self) -> &[Utterance] {
        &self.spoken
    }

    /// The utterance that has not been cancelled yet, if any.
    pub fn speaking(&self) -> Option<&Utterance> {
        self.speaking.as_ref()
    }

    /// How many times `cancel_all` ran.
    pub fn cancels(&self) -> usize {
        self.cancels
    }

    /// Whether a readiness watcher is registered.
    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// How many times a watcher was registered.
    pub fn watch_registrations(&self) -> usize {
        self.watch_registrations
    }
}

impl SpeechBackend for InMemorySpeech {
    fn voices(&mut self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> Room213Result<()> {
        self.speaking = Some(utterance.clone());
        self.spoken.push(utterance);
        Ok(())
    }

    fn cancel_all(&mut self) {
        self.speaking = None;
        self.cancels += 1;
    }

    fn watch_voices(&mut self, enabled: bool) {
        if enabled && !self.watching {
            self.watch_registrations += 1;
        }
        self.watching = enabled;
    }

    fn voices_changed(&mut self) -> bool {
        if !self.watching {
            return false;
        }
        std::mem::replace(&mut self.voices_dirty, false)
    }
}
