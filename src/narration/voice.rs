/// A voice offered by the speech capability.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Voice {
    /// Human-readable name, matched against the preference list.
    pub name: String,
    /// BCP 47-ish language tag (`en-US`, `en`, `fr`).
    pub lang: String,
}

impl Voice {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Pick a narration voice.
///
/// Order: a language-matching voice whose name contains a preferred fragment (fragments
/// tried in order), then the first language-matching voice, then the first voice at all.
pub fn pick_voice<'a>(
    voices: &'a [Voice],
    language_prefix: &str,
    preferred: &[String],
) -> Option<&'a Voice> {
    let matching: Vec<&Voice> = voices
        .iter()
        .filter(|v| v.lang.starts_with(language_prefix))
        .collect();

    preferred
        .iter()
        .find_map(|frag| {
            let frag = frag.to_lowercase();
            matching
                .iter()
                .copied()
                .find(|v| v.name.to_lowercase().contains(&frag))
        })
        .or_else(|| matching.first().copied())
        .or_else(|| voices.first())
}
