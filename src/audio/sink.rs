use std::path::{Path, PathBuf};

use crate::foundation::error::{Room213Error, Room213Result};

/// Stream parameters handed to an [`AudioSink`] when an ambient session opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioStreamConfig {
    /// Frames per second.
    pub sample_rate: u32,
    /// Interleaved channels per frame.
    pub channels: u16,
}

/// Host audio output.
///
/// Ordering contract: `begin` opens one stream, `write` receives interleaved samples in
/// render order, `end` closes it. A `begin` error means audio is unavailable; the caller
/// degrades to silence.
pub trait AudioSink {
    fn begin(&mut self, cfg: AudioStreamConfig) -> Room213Result<()>;
    fn write(&mut self, samples: &[f32]) -> Room213Result<()>;
    fn end(&mut self) -> Room213Result<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryAudioSink {
    cfg: Option<AudioStreamConfig>,
    /// Samples from every stream, in write order.
    pub samples: Vec<f32>,
    open: usize,
    opened: usize,
    closed: usize,
    max_concurrent: usize,
    unavailable: bool,
}

impl InMemoryAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose `begin` always fails, as on a host without audio output.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn config(&self) -> Option<AudioStreamConfig> {
        self.cfg
    }

    /// Streams opened so far.
    pub fn opened(&self) -> usize {
        self.opened
    }

    /// Streams closed so far.
    pub fn closed(&self) -> usize {
        self.closed
    }

    /// Streams open right now.
    pub fn open_streams(&self) -> usize {
        self.open
    }

    /// Highest number of simultaneously open streams ever observed.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}

impl AudioSink for InMemoryAudioSink {
    fn begin(&mut self, cfg: AudioStreamConfig) -> Room213Result<()> {
        if self.unavailable {
            return Err(Room213Error::audio("no audio output available"));
        }
        self.cfg = Some(cfg);
        self.open += 1;
        self.opened += 1;
        self.max_concurrent = self.max_concurrent.max(self.open);
        Ok(())
    }

    fn write(&mut self, samples: &[f32]) -> Room213Result<()> {
        if self.open == 0 {
            return Err(Room213Error::audio("write on a closed audio stream"));
        }
        self.samples.extend_from_slice(samples);
        Ok(())
    }

    fn end(&mut self) -> Room213Result<()> {
        if self.open == 0 {
            return Err(Room213Error::audio("audio stream already closed"));
        }
        self.open -= 1;
        self.closed += 1;
        Ok(())
    }
}

/// Sink that collects one stream and writes it as raw little-endian `.f32le` on `end`.
///
/// Inspect or play with e.g. `ffplay -f f32le -ar 48000 -ac 2 out.f32le`.
#[derive(Debug)]
pub struct F32leFileSink {
    path: PathBuf,
    cfg: Option<AudioStreamConfig>,
    samples: Vec<f32>,
}

impl F32leFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cfg: None,
            samples: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> Option<AudioStreamConfig> {
        self.cfg
    }
}

impl AudioSink for F32leFileSink {
    fn begin(&mut self, cfg: AudioStreamConfig) -> Room213Result<()> {
        self.cfg = Some(cfg);
        self.samples.clear();
        Ok(())
    }

    fn write(&mut self, samples: &[f32]) -> Room213Result<()> {
        if self.cfg.is_none() {
            return Err(Room213Error::audio("write before begin"));
        }
        self.samples.extend_from_slice(samples);
        Ok(())
    }

    fn end(&mut self) -> Room213Result<()> {
        if self.cfg.take().is_none() {
            return Err(Room213Error::audio("audio stream already closed"));
        }
        write_f32le_file(&self.samples, &self.path)
    }
}

/// Write interleaved `f32` PCM samples to a raw little-endian `.f32le` file.
pub fn write_f32le_file(samples_interleaved: &[f32], out_path: &Path) -> Room213Result<()> {
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            Room213Error::audio(format!(
                "failed to create audio output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        Room213Error::audio(format!(
            "failed to write audio file '{}': {e}",
            out_path.display()
        ))
    })
}
