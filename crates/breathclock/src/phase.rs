use std::fmt;

use serde::Serialize;

/// One of the four segments of a respiration cycle, in breath order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreathPhase {
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
}

impl BreathPhase {
    pub const ALL: [BreathPhase; 4] = [Self::Inhale, Self::HoldIn, Self::Exhale, Self::HoldOut];

    /// Numeric slot handed to shaders (`0..=3`).
    pub fn index(self) -> usize {
        match self {
            Self::Inhale => 0,
            Self::HoldIn => 1,
            Self::Exhale => 2,
            Self::HoldOut => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inhale => "inhale",
            Self::HoldIn => "hold-in",
            Self::Exhale => "exhale",
            Self::HoldOut => "hold-out",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inhale => "Breathe In",
            Self::HoldIn | Self::HoldOut => "Hold",
            Self::Exhale => "Breathe Out",
        }
    }

    pub fn sublabel(self) -> &'static str {
        match self {
            Self::Inhale => "Inhale deeply through your nose",
            Self::HoldIn => "Keep the breath in",
            Self::Exhale => "Exhale slowly through your mouth",
            Self::HoldOut => "Empty lungs, stay relaxed",
        }
    }

    pub fn chakras(self) -> PhaseChakras {
        match self {
            Self::Inhale => PhaseChakras {
                primary: Chakra::Anahata,
                secondary: Some(Chakra::Vishuddha),
                significance: "Opening the heart, receiving prana",
            },
            Self::HoldIn => PhaseChakras {
                primary: Chakra::Manipura,
                secondary: None,
                significance: "Building internal fire, charging solar plexus",
            },
            Self::Exhale => PhaseChakras {
                primary: Chakra::Muladhara,
                secondary: None,
                significance: "Grounding, releasing into earth element",
            },
            Self::HoldOut => PhaseChakras {
                primary: Chakra::Sahasrara,
                secondary: None,
                significance: "Open to cosmic consciousness, shunya (void)",
            },
        }
    }

    /// Posture guidance shown alongside the phase.
    pub fn pose(self) -> PoseInfo {
        match self {
            Self::Inhale => PoseInfo {
                name: "Raising Arms",
                sanskrit: "Urdhva Hastasana",
                description: "Inhale deeply through the nose, lifting arms overhead",
                bandha: "Mula Bandha gently engaged",
                drishti: "Soft gaze upward or eyes closed",
                instruction: "Palms face each other or touch. Expand the chest.",
            },
            Self::HoldIn => PoseInfo {
                name: "Hold with Flex",
                sanskrit: "Antara Kumbhaka",
                description: "Retain the breath, arms extended, subtle muscular engagement",
                bandha: "Mula Bandha & Uddiyana Bandha engaged",
                drishti: "Fixed point or third eye (Ajna)",
                instruction: "Feel energy rising through sushumna nadi. Stay soft in the face.",
            },
            Self::Exhale => PoseInfo {
                name: "Lowering Arms",
                sanskrit: "Hasta Uttanasana Release",
                description: "Exhale slowly through nose or mouth, lowering arms gracefully",
                bandha: "Release bandhas gradually",
                drishti: "Follow hands down or close eyes",
                instruction: "Palms may come to heart center or rest at sides. Surrender.",
            },
            Self::HoldOut => PoseInfo {
                name: "Empty Hold",
                sanskrit: "Bahya Kumbhaka",
                description: "Pause with empty lungs, complete relaxation",
                bandha: "All bandhas released, complete softness",
                drishti: "Closed eyes or soft downward gaze",
                instruction: "Experience shunya (void). Let prana circulate freely.",
            },
        }
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decorative tag attached to a phase for display; carries no timing meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Chakra {
    Muladhara,
    Svadhisthana,
    Manipura,
    Anahata,
    Vishuddha,
    Ajna,
    Sahasrara,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChakraInfo {
    pub name: &'static str,
    pub sanskrit: &'static str,
    pub color: &'static str,
    pub location: &'static str,
    pub element: &'static str,
    pub significance: &'static str,
}

impl Chakra {
    pub const ALL: [Chakra; 7] = [
        Self::Muladhara,
        Self::Svadhisthana,
        Self::Manipura,
        Self::Anahata,
        Self::Vishuddha,
        Self::Ajna,
        Self::Sahasrara,
    ];

    pub fn info(self) -> ChakraInfo {
        match self {
            Self::Muladhara => ChakraInfo {
                name: "Muladhara",
                sanskrit: "मूलाधार",
                color: "#ef4444",
                location: "Base of spine",
                element: "Earth",
                significance: "Grounding, stability, survival",
            },
            Self::Svadhisthana => ChakraInfo {
                name: "Svadhisthana",
                sanskrit: "स्वाधिष्ठान",
                color: "#f97316",
                location: "Lower abdomen",
                element: "Water",
                significance: "Creativity, emotions, flow",
            },
            Self::Manipura => ChakraInfo {
                name: "Manipura",
                sanskrit: "मणिपूर",
                color: "#eab308",
                location: "Solar plexus",
                element: "Fire",
                significance: "Power, will, transformation",
            },
            Self::Anahata => ChakraInfo {
                name: "Anahata",
                sanskrit: "अनाहत",
                color: "#22c55e",
                location: "Heart center",
                element: "Air",
                significance: "Love, compassion, connection",
            },
            Self::Vishuddha => ChakraInfo {
                name: "Vishuddha",
                sanskrit: "विशुद्ध",
                color: "#06b6d4",
                location: "Throat",
                element: "Ether",
                significance: "Communication, truth, expression",
            },
            Self::Ajna => ChakraInfo {
                name: "Ajna",
                sanskrit: "आज्ञा",
                color: "#6366f1",
                location: "Between eyebrows",
                element: "Light",
                significance: "Intuition, wisdom, perception",
            },
            Self::Sahasrara => ChakraInfo {
                name: "Sahasrara",
                sanskrit: "सहस्रार",
                color: "#a855f7",
                location: "Crown of head",
                element: "Cosmic",
                significance: "Consciousness, unity, liberation",
            },
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl fmt::Display for Chakra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChakras {
    pub primary: Chakra,
    pub secondary: Option<Chakra>,
    pub significance: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoseInfo {
    pub name: &'static str,
    pub sanskrit: &'static str,
    pub description: &'static str,
    pub bandha: &'static str,
    /// Where the gaze rests.
    pub drishti: &'static str,
    pub instruction: &'static str,
}
