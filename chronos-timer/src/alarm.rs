//! Alarm sounds and playback

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Bundled alarm sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetSound {
    NovoMundo,
    Passaros,
    Perplexo,
    SempreComVoce,
    SonataFeliz,
    UltimoAdeus,
    VelhosAmigos,
}

impl PresetSound {
    pub const ALL: [PresetSound; 7] = [
        PresetSound::NovoMundo,
        PresetSound::Passaros,
        PresetSound::Perplexo,
        PresetSound::SempreComVoce,
        PresetSound::SonataFeliz,
        PresetSound::UltimoAdeus,
        PresetSound::VelhosAmigos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PresetSound::NovoMundo => "Novo Mundo",
            PresetSound::Passaros => "Pássaros",
            PresetSound::Perplexo => "Perplexo",
            PresetSound::SempreComVoce => "Sempre com Você",
            PresetSound::SonataFeliz => "Sonata Feliz",
            PresetSound::UltimoAdeus => "Último Adeus",
            PresetSound::VelhosAmigos => "Velhos Amigos",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            PresetSound::NovoMundo => "/sounds/novo_mundo.mp3",
            PresetSound::Passaros => "/sounds/passaros.mp3",
            PresetSound::Perplexo => "/sounds/perplexo.mp3",
            PresetSound::SempreComVoce => "/sounds/sempre_com_vc.mp3",
            PresetSound::SonataFeliz => "/sounds/sonata_feliz.mp3",
            PresetSound::UltimoAdeus => "/sounds/ultimo_adeus.mp3",
            PresetSound::VelhosAmigos => "/sounds/velhos_amigos.mp3",
        }
    }

    /// Lookup by display name (case-insensitive)
    pub fn from_name(name: &str) -> Option<PresetSound> {
        let wanted = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|p| p.name().to_lowercase() == wanted)
    }
}

/// What to play when a countdown expires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SoundSource {
    Preset(PresetSound),
    /// A user-supplied audio file
    Custom(PathBuf),
}

impl SoundSource {
    /// Where the audio lives: a bundled URL or the custom file path
    pub fn location(&self) -> String {
        match self {
            SoundSource::Preset(p) => p.url().to_string(),
            SoundSource::Custom(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for SoundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundSource::Preset(p) => write!(f, "{}", p.name()),
            SoundSource::Custom(path) => write!(f, "custom ({})", path.display()),
        }
    }
}

/// Plays the expiry alarm
pub trait AlarmPlayer: Send + Sync {
    /// Start playback. `None` means no sound was selected.
    fn play(&self, sound: Option<&SoundSource>);

    /// Silence any playing alarm
    fn stop(&self);
}

/// Player that only records the alarm in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlarm;

impl AlarmPlayer for LogAlarm {
    fn play(&self, sound: Option<&SoundSource>) {
        match sound {
            Some(s) => tracing::info!(sound = %s, location = %s.location(), "countdown alarm"),
            None => tracing::info!("countdown alarm (no sound selected)"),
        }
    }

    fn stop(&self) {
        tracing::debug!("alarm stopped");
    }
}
