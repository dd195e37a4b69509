//! Face descriptors read from the font database and `name` tables.

use fontdb::{Database, FaceInfo, ID, Style};
use ttf_parser::{Face, name_id};

use fontscout_core::{FontEntry, FontStyle};

/// Full and PostScript names from a face's `name` table.
fn table_names(data: &[u8], index: u32) -> (Option<String>, Option<String>) {
    let Ok(face) = Face::parse(data, index) else {
        return (None, None);
    };

    let mut full_name = None;
    let mut postscript_name = None;
    for name in face.names() {
        let slot = match name.name_id {
            name_id::FULL_NAME => &mut full_name,
            name_id::POST_SCRIPT_NAME => &mut postscript_name,
            _ => continue,
        };
        if slot.is_none() {
            *slot = name.to_string().filter(|n| !n.trim().is_empty());
        }
    }
    (full_name, postscript_name)
}

const fn style(style: Style) -> FontStyle {
    match style {
        Style::Normal => FontStyle::Normal,
        Style::Italic => FontStyle::Italic,
        Style::Oblique => FontStyle::Oblique,
    }
}

/// Describe one face the way an enumeration backend reports it.
pub(crate) fn describe(db: &Database, info: &FaceInfo) -> Option<FontEntry> {
    let family = info.families.first().map(|(family, _)| family.clone())?;
    let (full_name, table_postscript) = db
        .with_face_data(info.id, table_names)
        .unwrap_or((None, None));

    let postscript = Some(info.post_script_name.clone())
        .filter(|name| !name.is_empty())
        .or(table_postscript);

    let mut entry = FontEntry::new(family)
        .with_weight(info.weight.0)
        .with_style(style(info.style));
    if let Some(full_name) = full_name {
        entry = entry.with_full_name(full_name);
    }
    if let Some(postscript) = postscript {
        entry = entry.with_postscript_name(postscript);
    }
    Some(entry)
}

/// Every face in the database with its descriptor.
pub(crate) fn describe_all(db: &Database) -> Vec<(ID, FontEntry)> {
    db.faces()
        .filter_map(|info| describe(db, info).map(|entry| (info.id, entry)))
        .collect()
}
