// src/entity/tag.rs
use serde::{Deserialize, Serialize};

/// Closed set of categories a note can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    pub const ALL: [NoteTag; 5] = [
        NoteTag::Todo,
        NoteTag::Work,
        NoteTag::Personal,
        NoteTag::Meeting,
        NoteTag::Shopping,
    ];
}

impl std::fmt::Display for NoteTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteTag::Todo => write!(f, "Todo"),
            NoteTag::Work => write!(f, "Work"),
            NoteTag::Personal => write!(f, "Personal"),
            NoteTag::Meeting => write!(f, "Meeting"),
            NoteTag::Shopping => write!(f, "Shopping"),
        }
    }
}

impl std::str::FromStr for NoteTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(NoteTag::Todo),
            "work" => Ok(NoteTag::Work),
            "personal" => Ok(NoteTag::Personal),
            "meeting" => Ok(NoteTag::Meeting),
            "shopping" => Ok(NoteTag::Shopping),
            _ => Err(format!(
                "Invalid tag: {}. Valid tags: Todo, Work, Personal, Meeting, Shopping",
                s
            )),
        }
    }
}
