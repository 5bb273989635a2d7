//! Detail modal ("case file") for persons and evidence items.

use crate::util::{escape_attr, escape_text};
use corkboard_core::config::ModalConfig;
use corkboard_core::model::non_empty;
use corkboard_core::{Entity, EvidenceItem, Person};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Convicted,
    Deceased,
    Investigation,
    Named,
}

impl StatusClass {
    /// Case-insensitive substring match, checked in declaration order.
    pub fn from_status(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return Self::Named;
        };
        let s = status.to_lowercase();
        if s.contains("convicted") {
            Self::Convicted
        } else if s.contains("deceased") {
            Self::Deceased
        } else if s.contains("investigation") {
            Self::Investigation
        } else {
            Self::Named
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Convicted => "status-convicted",
            Self::Deceased => "status-deceased",
            Self::Investigation => "status-investigation",
            Self::Named => "status-named",
        }
    }
}

/// Label for the "Connection Tier" field. Missing and outer tiers read as peripheral.
pub fn tier_label(tier: Option<u32>) -> &'static str {
    match tier {
        Some(0) => "Center",
        Some(1) => "Inner Circle",
        Some(2) => "Person of Interest",
        _ => "Peripheral",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
}

impl DetailField {
    fn new(label: &str, value: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value: value.unwrap_or(UNKNOWN).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetail {
    pub id: String,
    pub name: String,
    pub role: String,
    pub photo: Option<String>,
    pub status: String,
    pub status_class: StatusClass,
    /// Age, Connection Tier, Status, Role.
    pub fields: Vec<DetailField>,
    pub reason: Option<String>,
    pub details: Option<String>,
    pub documents: Vec<DocumentLink>,
    /// Connected display names, de-duplicated in first-seen order.
    pub connections: Vec<String>,
}

impl PersonDetail {
    pub fn new(person: &Person, connected_names: &[String], config: &ModalConfig) -> Self {
        let status = non_empty(&person.status);
        let role = non_empty(&person.role);
        let fields = vec![
            DetailField::new("Age", non_empty(&person.age)),
            DetailField::new("Connection Tier", Some(tier_label(person.tier))),
            DetailField::new("Status", status),
            DetailField::new("Role", role),
        ];

        let mut connections: Vec<String> = Vec::with_capacity(connected_names.len());
        for name in connected_names {
            if !connections.contains(name) {
                connections.push(name.clone());
            }
        }

        Self {
            id: person.id.clone(),
            name: person.display_name().to_string(),
            role: role.unwrap_or_default().to_string(),
            photo: non_empty(&person.photo).map(str::to_string),
            status: status.unwrap_or(UNKNOWN).to_string(),
            status_class: StatusClass::from_status(status),
            fields,
            reason: non_empty(&person.reason).map(str::to_string),
            details: non_empty(&person.details).map(str::to_string),
            documents: person
                .documents
                .iter()
                .map(|file| DocumentLink {
                    name: file.clone(),
                    href: format!("{}{}", config.document_base, file),
                })
                .collect(),
            connections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum MediaPreview {
    Image { url: String, alt: String },
    Video { url: String },
    /// `pdf` and `document` entries, shown in an embedded frame.
    Embed { url: String },
    /// Any other media type: an empty media box.
    Unsupported,
}

impl MediaPreview {
    pub fn from_media(media: &corkboard_core::Media) -> Self {
        match media.kind.as_str() {
            "image" => Self::Image {
                url: media.url.clone(),
                alt: media.title.clone().unwrap_or_default(),
            },
            "video" => Self::Video {
                url: media.url.clone(),
            },
            "pdf" | "document" => Self::Embed {
                url: media.url.clone(),
            },
            _ => Self::Unsupported,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDetail {
    pub id: String,
    pub name: String,
    pub label: String,
    pub notes: Option<String>,
    pub media: Option<MediaPreview>,
}

impl EvidenceDetail {
    pub fn new(item: &EvidenceItem) -> Self {
        let label = non_empty(&item.label);
        Self {
            id: item.id.clone(),
            name: non_empty(&item.name)
                .or(label)
                .unwrap_or("Evidence")
                .to_string(),
            label: label.unwrap_or_default().to_string(),
            notes: non_empty(&item.notes)
                .or_else(|| non_empty(&item.text))
                .map(str::to_string),
            media: item.media.first().map(MediaPreview::from_media),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ModalBody {
    Person(PersonDetail),
    Evidence(EvidenceDetail),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseButton,
    Backdrop,
    Escape,
}

/// Modal state. Closing hides the modal but keeps the last body, as the DOM does.
#[derive(Debug, Clone)]
pub struct DetailModal {
    config: ModalConfig,
    open: bool,
    body: Option<ModalBody>,
}

impl DetailModal {
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            open: false,
            body: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn body(&self) -> Option<&ModalBody> {
        self.body.as_ref()
    }

    /// Replaces the body with `entity`'s detail and shows the modal.
    pub fn open_entity_detail(&mut self, entity: Entity<'_>, connected_names: &[String]) {
        let body = match entity {
            Entity::Person(p) => ModalBody::Person(PersonDetail::new(p, connected_names, &self.config)),
            Entity::Evidence(e) => ModalBody::Evidence(EvidenceDetail::new(e)),
        };
        tracing::debug!(id = entity.id(), "opening detail modal");
        self.body = Some(body);
        self.open = true;
    }

    pub fn close(&mut self, trigger: CloseTrigger) {
        if self.open {
            tracing::trace!(?trigger, "closing detail modal");
        }
        self.open = false;
    }

    /// Returns true when the key closed the modal.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.open {
            self.close(CloseTrigger::Escape);
            return true;
        }
        false
    }

    pub fn render_html(&self) -> String {
        let mut out = String::new();
        let open = if self.open { " open" } else { "" };
        let _ = write!(
            &mut out,
            r#"<div class="bb-modal{open}"><div class="modal-inner" style="position:relative"><button class="modal-close" type="button">✕</button>"#
        );
        match &self.body {
            None => out.push_str(r#"<div class="modal-body"></div>"#),
            Some(ModalBody::Person(p)) => {
                out.push_str(r#"<div class="modal-body">"#);
                render_person(&mut out, p);
                out.push_str("</div>");
            }
            Some(ModalBody::Evidence(e)) => {
                out.push_str(r#"<div class="modal-body evidence-detail">"#);
                render_evidence(&mut out, e);
                out.push_str("</div>");
            }
        }
        out.push_str("</div></div>");
        out
    }
}

fn div(out: &mut String, class: &str, text: &str) {
    let _ = write!(out, r#"<div class="{class}">{}</div>"#, escape_text(text));
}

fn section(out: &mut String, title: &str, text: &str) {
    out.push_str(r#"<div class="detail-section">"#);
    div(out, "detail-section-title", title);
    div(out, "detail-section-text", text);
    out.push_str("</div>");
}

fn render_person(out: &mut String, p: &PersonDetail) {
    out.push_str(r#"<div class="detail-header"><div class="detail-photo">"#);
    match &p.photo {
        Some(src) => {
            let _ = write!(
                out,
                r#"<img src="{}" alt="{}">"#,
                escape_attr(src),
                escape_attr(&p.name)
            );
        }
        None => out.push('?'),
    }
    out.push_str(r#"</div><div class="detail-info">"#);
    div(out, "detail-name", &p.name);
    div(out, "detail-role", &p.role);
    div(
        out,
        &format!("detail-status {}", p.status_class.css_class()),
        &p.status,
    );
    out.push_str("</div></div>");

    out.push_str(r#"<div class="detail-fields">"#);
    for field in &p.fields {
        let _ = write!(
            out,
            r#"<div class="detail-field"><span class="field-label">{}</span><span class="field-value">{}</span></div>"#,
            escape_text(&field.label),
            escape_text(&field.value)
        );
    }
    out.push_str("</div>");

    if let Some(reason) = &p.reason {
        section(out, "Why on the List", reason);
    }
    if let Some(details) = &p.details {
        section(out, "Details", details);
    }

    if !p.documents.is_empty() {
        out.push_str(r#"<div class="detail-section">"#);
        div(out, "detail-section-title", "Linked Documents");
        out.push_str(r#"<div class="detail-doc-list">"#);
        for doc in &p.documents {
            let _ = write!(
                out,
                r#"<a class="detail-doc-link" href="{}" target="_blank" rel="noopener">{}</a>"#,
                escape_attr(&doc.href),
                escape_text(&doc.name)
            );
        }
        out.push_str("</div></div>");
    }

    if !p.connections.is_empty() {
        out.push_str(r#"<div class="detail-connections">"#);
        div(out, "detail-section-title", "Connected To");
        out.push_str(r#"<div class="conn-tags">"#);
        for name in &p.connections {
            let _ = write!(
                out,
                r#"<span class="conn-tag">{}</span>"#,
                escape_text(name)
            );
        }
        out.push_str("</div></div>");
    }
}

fn render_evidence(out: &mut String, e: &EvidenceDetail) {
    out.push_str(r#"<div class="detail-header"><div class="detail-info">"#);
    div(out, "detail-name", &e.name);
    div(out, "detail-role", &e.label);
    out.push_str("</div></div>");

    if let Some(notes) = &e.notes {
        section(out, "Notes", notes);
    }

    if let Some(media) = &e.media {
        out.push_str(r#"<div class="bb-media">"#);
        match media {
            MediaPreview::Image { url, alt } => {
                let _ = write!(
                    out,
                    r#"<img src="{}" alt="{}">"#,
                    escape_attr(url),
                    escape_attr(alt)
                );
            }
            MediaPreview::Video { url } => {
                let _ = write!(out, r#"<video controls src="{}"></video>"#, escape_attr(url));
            }
            MediaPreview::Embed { url } => {
                let _ = write!(
                    out,
                    r#"<iframe src="{}" style="border:none;width:100%;height:400px"></iframe>"#,
                    escape_attr(url)
                );
            }
            MediaPreview::Unsupported => {}
        }
        out.push_str("</div>");
    }
}
