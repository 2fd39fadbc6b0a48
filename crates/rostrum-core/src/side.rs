//! Debate sides and personas
//!
//! A debate always has exactly two fixed participants, [`SideId::A`] and
//! [`SideId::B`]. Each side is bound to a [`Persona`] that conditions both
//! prompt framing and the judge's keyword weighting.

use serde::{Deserialize, Serialize};

/// One of the two fixed debate participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideId {
    /// Side A (speaks first by default)
    #[serde(rename = "AgentA")]
    A,
    /// Side B
    #[serde(rename = "AgentB")]
    B,
}

impl SideId {
    /// Get the opposing side
    pub fn opponent(self) -> Self {
        match self {
            SideId::A => SideId::B,
            SideId::B => SideId::A,
        }
    }

    /// Stable label used in logs and serialized artifacts
    pub fn label(self) -> &'static str {
        match self {
            SideId::A => "AgentA",
            SideId::B => "AgentB",
        }
    }
}

impl std::fmt::Display for SideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named debate role conditioning prompt framing and keyword weighting
///
/// The mapping from persona to framing guidance and scoring vocabulary is
/// plain data: the built-in [`Persona::scientist`] and [`Persona::philosopher`]
/// constructors cover the stock pairing, and [`Persona::new`] accepts any
/// custom role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Display name (e.g., "Scientist")
    pub name: String,
    /// Framing guidance injected into the speaker prompt
    pub framing: String,
    /// Keyword table used by the judge: lowercase keyword -> positive weight
    pub keywords: Vec<(String, u32)>,
}

impl Persona {
    /// Create a custom persona
    ///
    /// Keywords are lowercased on the way in; the judge matches them against
    /// lowercased turn text.
    pub fn new(
        name: impl Into<String>,
        framing: impl Into<String>,
        keywords: Vec<(&str, u32)>,
    ) -> Self {
        Self {
            name: name.into(),
            framing: framing.into(),
            keywords: keywords
                .into_iter()
                .map(|(k, w)| (k.to_lowercase(), w))
                .collect(),
        }
    }

    /// Evidence-and-safety framing with the stock scientific vocabulary
    pub fn scientist() -> Self {
        Self::new(
            "Scientist",
            "Argue from empirical evidence, measurable risk, and safety protocols. \
             Prefer data, testing, and verification over appeals to principle.",
            vec![
                ("risk", 2),
                ("safety", 2),
                ("protocol", 2),
                ("technical", 1),
                ("verification", 1),
                ("data", 1),
                ("evidence", 1),
                ("scientific", 1),
                ("bias", 1),
                ("testing", 1),
                ("impact", 1),
                ("policy", 1),
            ],
        )
    }

    /// Ethics-and-autonomy framing with the stock philosophical vocabulary
    pub fn philosopher() -> Self {
        Self::new(
            "Philosopher",
            "Argue from ethics, autonomy, and human dignity. Question underlying \
             values and societal consequences rather than implementation detail.",
            vec![
                ("autonomy", 2),
                ("freedom", 2),
                ("ethics", 2),
                ("moral", 2),
                ("dignity", 1),
                ("philosophy", 1),
                ("consciousness", 1),
                ("agency", 1),
                ("human", 1),
                ("societal", 1),
                ("rights", 1),
                ("knowledge", 1),
                ("wisdom", 1),
            ],
        )
    }

    /// Look up a built-in persona by name, falling back to a neutral custom one
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "scientist" => Self::scientist(),
            "philosopher" => Self::philosopher(),
            other => Self::new(
                name,
                format!("Argue in the characteristic style of a {other}."),
                vec![],
            ),
        }
    }
}
