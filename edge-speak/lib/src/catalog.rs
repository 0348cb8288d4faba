//! Static voice and output format catalogs.
//!
//! Both catalogs are fixed at compile time. Selection keys typed by the user
//! are resolved with a `match` that always has a fallback arm, so lookups
//! from arbitrary input never fail.

use std::fmt;

// ============================================================================
// Gender
// ============================================================================

/// Voice gender offered by the voice catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Male voice persona.
    Male,
    /// Female voice persona.
    Female,
}

impl Gender {
    /// Resolves a menu selection key.
    ///
    /// `"1"` selects [`Gender::Male`]; every other input selects
    /// [`Gender::Female`].
    ///
    /// ## Examples
    ///
    /// ```
    /// use edge_speak_lib::catalog::Gender;
    ///
    /// assert_eq!(Gender::from_selection_key("1"), Gender::Male);
    /// assert_eq!(Gender::from_selection_key("2"), Gender::Female);
    /// assert_eq!(Gender::from_selection_key("whatever"), Gender::Female);
    /// ```
    pub fn from_selection_key(key: &str) -> Self {
        match key {
            "1" => Gender::Male,
            _ => Gender::Female,
        }
    }
}

// ============================================================================
// Voice Catalog
// ============================================================================

struct VoiceEntry {
    language: &'static str,
    gender: Gender,
    voice_id: &'static str,
}

const VOICES: &[VoiceEntry] = &[
    VoiceEntry {
        language: "ru",
        gender: Gender::Male,
        voice_id: "Microsoft Server Speech Text to Speech Voice (ru-RU, DmitryNeural)",
    },
    VoiceEntry {
        language: "ru",
        gender: Gender::Female,
        voice_id: "Microsoft Server Speech Text to Speech Voice (ru-RU, SvetlanaNeural)",
    },
    VoiceEntry {
        language: "en",
        gender: Gender::Male,
        voice_id: "Microsoft Server Speech Text to Speech Voice (en-US, GuyNeural)",
    },
    VoiceEntry {
        language: "en",
        gender: Gender::Female,
        voice_id: "Microsoft Server Speech Text to Speech Voice (en-US, JennyNeural)",
    },
];

/// Read-only mapping from (language code, gender) to a service voice name.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoiceCatalog;

impl VoiceCatalog {
    /// Returns true when at least one voice exists for `language`.
    pub fn supports(language: &str) -> bool {
        VOICES.iter().any(|entry| entry.language == language)
    }

    /// Looks up the voice identifier for a language and gender.
    ///
    /// ## Examples
    ///
    /// ```
    /// use edge_speak_lib::catalog::{Gender, VoiceCatalog};
    ///
    /// let voice = VoiceCatalog::voice_id("en", Gender::Female).unwrap();
    /// assert!(voice.contains("JennyNeural"));
    /// assert!(VoiceCatalog::voice_id("fr", Gender::Female).is_none());
    /// ```
    pub fn voice_id(language: &str, gender: Gender) -> Option<&'static str> {
        VOICES
            .iter()
            .find(|entry| entry.language == language && entry.gender == gender)
            .map(|entry| entry.voice_id)
    }

    /// Language codes in catalog order, without duplicates.
    pub fn languages() -> Vec<&'static str> {
        let mut languages: Vec<&'static str> = Vec::new();
        for entry in VOICES {
            if !languages.contains(&entry.language) {
                languages.push(entry.language);
            }
        }
        languages
    }
}

// ============================================================================
// Output Format
// ============================================================================

/// Audio encodings the speech service can return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// 16 kHz, 32 kbit/s mono MP3.
    #[default]
    Mp3Khz16,
    /// 24 kHz, 48 kbit/s mono MP3.
    Mp3Khz24,
    /// 16 kHz, 16 bit mono PCM in a RIFF container.
    PcmKhz16,
    /// 24 kHz, 16 bit mono PCM in a RIFF container.
    PcmKhz24,
}

impl OutputFormat {
    /// Every format, in menu order.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Mp3Khz16,
        OutputFormat::Mp3Khz24,
        OutputFormat::PcmKhz16,
        OutputFormat::PcmKhz24,
    ];

    /// Resolves a menu selection key, falling back to [`OutputFormat::Mp3Khz16`].
    pub fn from_selection_key(key: &str) -> Self {
        match key {
            "1" => OutputFormat::Mp3Khz16,
            "2" => OutputFormat::Mp3Khz24,
            "3" => OutputFormat::PcmKhz16,
            "4" => OutputFormat::PcmKhz24,
            _ => OutputFormat::default(),
        }
    }

    /// The menu key that selects this format.
    pub fn selection_key(&self) -> &'static str {
        match self {
            OutputFormat::Mp3Khz16 => "1",
            OutputFormat::Mp3Khz24 => "2",
            OutputFormat::PcmKhz16 => "3",
            OutputFormat::PcmKhz24 => "4",
        }
    }

    /// The encoding identifier sent to the speech service.
    pub fn encoding_id(&self) -> &'static str {
        match self {
            OutputFormat::Mp3Khz16 => "audio-16khz-32kbitrate-mono-mp3",
            OutputFormat::Mp3Khz24 => "audio-24khz-48kbitrate-mono-mp3",
            OutputFormat::PcmKhz16 => "riff-16khz-16bit-mono-pcm",
            OutputFormat::PcmKhz24 => "riff-24khz-16bit-mono-pcm",
        }
    }

    /// Whether the encoding is uncompressed PCM rather than MP3.
    pub fn is_pcm(&self) -> bool {
        matches!(self, OutputFormat::PcmKhz16 | OutputFormat::PcmKhz24)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding_id())
    }
}

// ============================================================================
// Tests
// ============================================================================
