//! Card visuals: a closed set of kinds, each with its own width, tack colour and body builder.

use corkboard_core::config::CardWidths;
use corkboard_core::model::non_empty;
use corkboard_core::{EvidenceItem, EvidenceKind, Person};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Polaroid,
    Note,
    Document,
    Tag,
    Other,
}

impl From<EvidenceKind> for CardKind {
    fn from(kind: EvidenceKind) -> Self {
        match kind {
            EvidenceKind::Polaroid => Self::Polaroid,
            EvidenceKind::Note => Self::Note,
            EvidenceKind::Document => Self::Document,
            EvidenceKind::Tag => Self::Tag,
            EvidenceKind::Other => Self::Other,
        }
    }
}

impl CardKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polaroid => "polaroid",
            Self::Note => "note",
            Self::Document => "document",
            Self::Tag => "tag",
            Self::Other => "other",
        }
    }

    pub fn width(self, widths: &CardWidths) -> f64 {
        match self {
            Self::Polaroid => widths.polaroid,
            Self::Note => widths.note,
            Self::Document => widths.document,
            Self::Tag => widths.tag,
            Self::Other => widths.other,
        }
    }

    pub fn tack_color(self) -> &'static str {
        match self {
            Self::Polaroid => "red",
            Self::Note => "yellow",
            Self::Document => "blue",
            Self::Tag => "green",
            Self::Other => "white",
        }
    }

    /// Approximate rendered height for a card of `width`; used for hit testing and for the SVG
    /// card outline.
    pub fn nominal_height(self, width: f64) -> f64 {
        match self {
            Self::Polaroid => width * 1.3,
            Self::Note => width * 0.8,
            Self::Document => width * 0.95,
            Self::Tag => width * 0.5,
            Self::Other => width * 0.4,
        }
    }

    pub fn build(self, source: &CardSource<'_>) -> CardBody {
        let own = |v: Option<&str>| v.map(str::to_string);
        match self {
            Self::Polaroid => CardBody::Polaroid {
                photo: own(source.photo),
                caption: source
                    .name
                    .or(source.label)
                    .unwrap_or(source.id)
                    .to_string(),
                label: own(source.label),
            },
            Self::Note => CardBody::Note {
                label: own(source.label),
                text: own(source.text),
            },
            Self::Document => CardBody::Document {
                label: own(source.label),
                title: own(source.name),
                notes: own(source.notes),
            },
            Self::Tag => CardBody::Tag {
                label: own(source.label),
                name: own(source.name),
            },
            Self::Other => CardBody::Blank,
        }
    }
}

/// Normalised view of the fields a card may show. Blank strings are treated as missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardSource<'a> {
    pub id: &'a str,
    pub name: Option<&'a str>,
    pub label: Option<&'a str>,
    pub text: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub photo: Option<&'a str>,
}

impl<'a> CardSource<'a> {
    /// Persons show their role as the card label.
    pub fn person(p: &'a Person) -> Self {
        Self {
            id: &p.id,
            name: non_empty(&p.name),
            label: non_empty(&p.role),
            photo: non_empty(&p.photo),
            ..Default::default()
        }
    }

    pub fn evidence(e: &'a EvidenceItem) -> Self {
        Self {
            id: &e.id,
            name: non_empty(&e.name),
            label: non_empty(&e.label),
            text: non_empty(&e.text),
            notes: non_empty(&e.notes),
            photo: non_empty(&e.photo),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum CardBody {
    Polaroid {
        photo: Option<String>,
        caption: String,
        label: Option<String>,
    },
    Note {
        label: Option<String>,
        text: Option<String>,
    },
    Document {
        label: Option<String>,
        title: Option<String>,
        notes: Option<String>,
    },
    Tag {
        label: Option<String>,
        name: Option<String>,
    },
    Blank,
}
