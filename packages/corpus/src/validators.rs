//! Structural invariants of a chapter, checked before any update is
//! accepted.

use std::collections::{HashMap, HashSet};

use crate::chapter::Chapter;
use crate::error::StructuralError;
use crate::line::{Line, LineNumberLabel};

pub fn validate_chapter(chapter: &Chapter) -> Result<(), StructuralError> {
    validate_manuscripts(chapter)?;
    validate_lines(&chapter.lines)?;
    validate_manuscript_references(chapter)?;
    validate_manuscript_labels(&chapter.lines)?;
    validate_translation_extents(&chapter.lines)?;
    Ok(())
}

fn validate_manuscripts(chapter: &Chapter) -> Result<(), StructuralError> {
    let mut ids = HashSet::new();
    let mut sigla = HashSet::new();
    for manuscript in &chapter.manuscripts {
        manuscript.validate()?;
        if !ids.insert(manuscript.id) {
            return Err(StructuralError::DuplicateManuscriptId(manuscript.id));
        }
        let siglum = manuscript.siglum();
        if !sigla.insert(siglum.clone()) {
            return Err(StructuralError::DuplicateSiglum(siglum));
        }
    }
    Ok(())
}

fn validate_lines(lines: &[Line]) -> Result<(), StructuralError> {
    let mut numbers = HashSet::new();
    for line in lines {
        if !numbers.insert(&line.number) {
            return Err(StructuralError::DuplicateLineNumber(line.number.to_string()));
        }
        if line.variants.is_empty() {
            return Err(StructuralError::NoVariants(line.number.to_string()));
        }
    }
    Ok(())
}

fn validate_manuscript_references(chapter: &Chapter) -> Result<(), StructuralError> {
    let known: HashSet<u32> = chapter.manuscripts.iter().map(|m| m.id).collect();
    for line in &chapter.lines {
        if let Some(manuscript_id) = line.manuscript_ids().find(|id| !known.contains(id)) {
            return Err(StructuralError::UnknownManuscript {
                line: line.number.to_string(),
                manuscript_id,
            });
        }
    }
    Ok(())
}

/// A manuscript may not have two lines with the same labels and number.
fn validate_manuscript_labels(lines: &[Line]) -> Result<(), StructuralError> {
    let mut seen = HashSet::new();
    let manuscript_lines = lines
        .iter()
        .flat_map(|line| &line.variants)
        .flat_map(|variant| &variant.manuscripts);

    for manuscript_line in manuscript_lines {
        let Some(number) = manuscript_line.line.number() else {
            continue;
        };
        let key = (manuscript_line.manuscript_id, &manuscript_line.labels, number);
        if !seen.insert(key) {
            let mut labels = manuscript_line.labels.clone();
            labels.push(number.to_string());
            return Err(StructuralError::DuplicateLabels {
                manuscript_id: manuscript_line.manuscript_id,
                labels: labels.join(" "),
            });
        }
    }
    Ok(())
}

/// Extents must name a later line of the chapter, and translations of the
/// same language must not cover a line twice.
fn validate_translation_extents(lines: &[Line]) -> Result<(), StructuralError> {
    let mut covered_until: HashMap<&str, usize> = HashMap::new();

    for (index, line) in lines.iter().enumerate() {
        for translation in &line.translation {
            let last = match &translation.extent {
                Some(extent) => {
                    let target = lines
                        .iter()
                        .position(|candidate| candidate.number.ends_at(extent))
                        .ok_or_else(|| invalid_extent(&line.number, format!("line {extent} does not exist")))?;
                    if target <= index {
                        return Err(invalid_extent(
                            &line.number,
                            format!("line {extent} is not after this line"),
                        ));
                    }
                    target
                }
                None => index,
            };

            let language = translation.language.as_str();
            if covered_until.get(language).is_some_and(|until| index <= *until) {
                return Err(invalid_extent(
                    &line.number,
                    format!("overlaps a previous {language} translation"),
                ));
            }
            covered_until.insert(language, last);
        }
    }
    Ok(())
}

fn invalid_extent(line: &LineNumberLabel, reason: String) -> StructuralError {
    StructuralError::InvalidTranslationExtent {
        line: line.to_string(),
        reason,
    }
}
