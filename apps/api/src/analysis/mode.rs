use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{
    DOSSIE_FRAMING, DOSSIE_SYSTEM, REWRITE_FRAMING, REWRITE_SYSTEM, ROAST_FRAMING, ROAST_SYSTEM,
};

/// Operating contract for one analysis call.
///
/// Each variant owns its instruction template, its task framing and the
/// response shape the normalizer expects. Adding a mode means extending
/// every `match` below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Free-text critique, free tier.
    #[default]
    Roast,
    /// Itemised error dossier (JSON).
    Dossie,
    /// Rewritten résumé (JSON).
    Rewrite,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Roast => "roast",
            Mode::Dossie => "dossie",
            Mode::Rewrite => "rewrite",
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Mode::Roast => ROAST_SYSTEM,
            Mode::Dossie => DOSSIE_SYSTEM,
            Mode::Rewrite => REWRITE_SYSTEM,
        }
    }

    pub fn task_framing(self) -> &'static str {
        match self {
            Mode::Roast => ROAST_FRAMING,
            Mode::Dossie => DOSSIE_FRAMING,
            Mode::Rewrite => REWRITE_FRAMING,
        }
    }

    /// Whether the model is instructed to answer with JSON.
    pub fn expects_json(self) -> bool {
        match self {
            Mode::Roast => false,
            Mode::Dossie | Mode::Rewrite => true,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
