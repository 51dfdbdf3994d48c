//! Document assembly: turns a `RewrittenCV` into an ordered list of styled blocks.
//!
//! The same block list feeds the tabbed UI view (as JSON) and the PDF export.
//! Entries are rendered exactly in the order received.

use serde::Serialize;

use crate::models::cv::{ContactInfo, RewrittenCV};

pub const NAME_FALLBACK: &str = "Seu Nome";
pub const CONTACT_DELIMITER: &str = "  |  ";
pub const SKILLS_DELIMITER: &str = "  •  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Experience,
    Education,
    Certifications,
    Skills,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "Resumo Profissional",
            Section::Experience => "Experiência Profissional",
            Section::Education => "Formação Acadêmica",
            Section::Certifications => "Certificações",
            Section::Skills => "Habilidades e Competências",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Name plus an optional contact line.
    Header {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        contact: Option<String>,
    },
    Heading { section: Section, text: String },
    /// Bold title followed by a plain detail, e.g. role then company.
    Entry { title: String, detail: String },
    Body { text: String, italic: bool },
    Bullet { text: String },
    /// Vertical gap between two experience entries.
    Spacer,
}

pub fn assemble(cv: &RewrittenCV) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(header) = cv.contact_info.as_ref().and_then(header_block) {
        blocks.push(header);
    }

    if !cv.summary.is_empty() {
        blocks.push(heading(Section::Summary));
        blocks.push(Block::Body {
            text: cv.summary.clone(),
            italic: false,
        });
    }

    if !cv.work_history.is_empty() {
        blocks.push(heading(Section::Experience));
        for (idx, exp) in cv.work_history.iter().enumerate() {
            if idx > 0 {
                blocks.push(Block::Spacer);
            }
            blocks.push(Block::Entry {
                title: exp.role.clone(),
                detail: format!("{CONTACT_DELIMITER}{}", exp.company),
            });
            blocks.push(Block::Body {
                text: exp.period.clone(),
                italic: true,
            });
            blocks.extend(exp.bullets.iter().map(|b| Block::Bullet { text: b.clone() }));
        }
    }

    if let Some(education) = cv.education.as_deref().filter(|e| !e.is_empty()) {
        blocks.push(heading(Section::Education));
        for edu in education {
            blocks.push(Block::Entry {
                title: edu.institution.clone(),
                detail: entry_detail(edu.degree.as_deref(), edu.year.as_deref()),
            });
        }
    }

    if let Some(certs) = cv.certifications.as_deref().filter(|c| !c.is_empty()) {
        blocks.push(heading(Section::Certifications));
        for cert in certs {
            blocks.push(Block::Entry {
                title: cert.name.clone(),
                detail: entry_detail(cert.institution.as_deref(), cert.year.as_deref()),
            });
        }
    }

    if let Some(skills) = cv.skills.as_deref().filter(|s| !s.is_empty()) {
        blocks.push(heading(Section::Skills));
        blocks.push(Block::Body {
            text: skills.join(SKILLS_DELIMITER),
            italic: false,
        });
    }

    blocks
}

fn heading(section: Section) -> Block {
    Block::Heading {
        section,
        text: section.title().to_uppercase(),
    }
}

/// `None` when no contact field is present at all.
fn header_block(contact: &ContactInfo) -> Option<Block> {
    if contact.is_empty() {
        return None;
    }
    let parts: Vec<&str> = [&contact.email, &contact.phone, &contact.city]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .filter(|p| !p.is_empty())
        .collect();
    Some(Block::Header {
        name: contact
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| NAME_FALLBACK.to_string()),
        contact: (!parts.is_empty()).then(|| parts.join(CONTACT_DELIMITER)),
    })
}

// " — detail (year)"
fn entry_detail(detail: Option<&str>, year: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(d) = detail.filter(|d| !d.is_empty()) {
        out.push_str(" — ");
        out.push_str(d);
    }
    if let Some(y) = year.filter(|y| !y.is_empty()) {
        out.push_str(&format!(" ({y})"));
    }
    out
}
