use crate::foundation::error::{Room213Error, Room213Result};

/// Identifies which illustration a scene uses.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SceneKey {
    /// Corridor leading to the room.
    Hallway,
    /// Key in the lock, door swinging open.
    DoorThreshold,
    /// Flickering lamp over the bed.
    RoomInterior,
    /// Apparition behind the reflection.
    Mirror,
    /// Vent full of voices.
    Whispers,
    /// Lights out, the eye opens.
    Finale,
}

impl SceneKey {
    /// Every key in catalog order.
    pub const ALL: [SceneKey; 6] = [
        SceneKey::Hallway,
        SceneKey::DoorThreshold,
        SceneKey::RoomInterior,
        SceneKey::Mirror,
        SceneKey::Whispers,
        SceneKey::Finale,
    ];

    /// Stable lowercase name, matching the JSON spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hallway => "hallway",
            Self::DoorThreshold => "doorThreshold",
            Self::RoomInterior => "roomInterior",
            Self::Mirror => "mirror",
            Self::Whispers => "whispers",
            Self::Finale => "finale",
        }
    }
}

/// One immutable scene definition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDef {
    /// Illustration to draw.
    pub key: SceneKey,
    /// Display title.
    pub title: String,
    /// Length in seconds, must be finite and > 0.
    pub duration: f64,
    /// Narration text, also used for the subtitle reveal.
    pub voice_line: String,
    /// Short sensory caption.
    pub sensation: String,
}

impl SceneDef {
    fn new(key: SceneKey, title: &str, duration: f64, voice_line: &str, sensation: &str) -> Self {
        Self {
            key,
            title: title.to_owned(),
            duration,
            voice_line: voice_line.to_owned(),
            sensation: sensation.to_owned(),
        }
    }

    /// Check the duration invariant.
    pub fn validate(&self) -> Room213Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(Room213Error::validation(format!(
                "scene '{}' duration must be finite and > 0 (got {})",
                self.title, self.duration
            )));
        }
        Ok(())
    }
}

/// Validate every scene of a catalog.
pub fn validate_catalog(scenes: &[SceneDef]) -> Room213Result<()> {
    for scene in scenes {
        scene.validate()?;
    }
    Ok(())
}

/// The built-in Room 213 catalog: six ten-second scenes.
pub fn room_213() -> Vec<SceneDef> {
    vec![
        SceneDef::new(
            SceneKey::Hallway,
            "The Hallway Breathes",
            10.0,
            "The hallway to room two-thirteen stretches out longer than I remember. Every step I take echoes back twice, as if something is pacing in sync behind me.",
            "Footsteps echo around you.",
        ),
        SceneDef::new(
            SceneKey::DoorThreshold,
            "Key in the Lock",
            10.0,
            "My hand shakes on the brass key. I whisper the number on the plaque\u{2014}two, one, three\u{2014}and the door exhales a warm breath of stale perfume and something metallic.",
            "A warm draft slips past the door.",
        ),
        SceneDef::new(
            SceneKey::RoomInterior,
            "Lights That Won\u{2019}t Stay",
            10.0,
            "Inside, the lamp flickers an apology. The bed is made too neatly, as if someone is lying very still beneath the covers, waiting for me to notice.",
            "The light flickers like a heartbeat.",
        ),
        SceneDef::new(
            SceneKey::Mirror,
            "Eyes in the Glass",
            10.0,
            "I set my bag down and the mirror ripples. A face leans in from behind my reflection. Its eyes are mine, but hollowed out like someone scooped the color from them.",
            "The mirror surface bends inward.",
        ),
        SceneDef::new(
            SceneKey::Whispers,
            "Whispers in the Vent",
            10.0,
            "The vent above the headboard vibrates with whispers. They breathe my name, promise the room has been waiting all night, that I never really checked out.",
            "Air vibrates with hushed voices.",
        ),
        SceneDef::new(
            SceneKey::Finale,
            "Room 213 Takes Me Back",
            10.0,
            "The lamp dies. In the dark, the mattress sighs and I feel the weight of someone settling beside me. I can\u{2019}t move. The last thing I see is the door closing itself.",
            "Something settles into the mattress.",
        ),
    ]
}
