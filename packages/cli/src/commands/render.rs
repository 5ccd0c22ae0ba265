use anyhow::Result;
use clap::Args;
use ebl_corpus::Chapter;
use std::fmt::Write;
use std::path::PathBuf;

use super::read_chapter;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Chapter JSON file
    pub input: PathBuf,
}

/// Reconstructions followed by their manuscript lines, one per row
pub fn render_chapter(chapter: &Chapter) -> String {
    let mut output = format!("&{}\n", chapter.id());

    for line in &chapter.lines {
        for variant in &line.variants {
            let _ = writeln!(output, "{}. {}", line.number, variant.reconstruction_text());

            for manuscript_line in &variant.manuscripts {
                let siglum = chapter
                    .get_manuscript(manuscript_line.manuscript_id)
                    .map(|manuscript| manuscript.siglum())
                    .unwrap_or_default();
                let mut prefix = siglum;
                for label in &manuscript_line.labels {
                    prefix.push(' ');
                    prefix.push_str(label);
                }
                let _ = writeln!(output, "{prefix} {}", manuscript_line.atf());
            }
        }
    }

    output
}

pub fn render(args: RenderArgs) -> Result<()> {
    let chapter = read_chapter(&args.input)?;
    print!("{}", render_chapter(&chapter));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebl_corpus::{
        ChapterId, Line, LineNumber, LineVariant, Manuscript, ManuscriptLine,
        ManuscriptLineContent, ManuscriptType, Period, Provenance, Stage, TextId,
    };
    use ebl_transliteration::{annotate, Bracket, NamedSign, Token, Word};

    #[test]
    fn test_render_chapter() {
        let word: Token = Word::new(vec![NamedSign::reading("ku").into()]).unwrap().into();
        let content = annotate(&[
            Token::open(Bracket::BrokenAway),
            word.clone(),
            Token::close(Bracket::BrokenAway),
        ]);

        let mut chapter = Chapter::new(ChapterId::new(
            TextId::new("L", 1, 2),
            Stage::StandardBabylonian,
            "II",
        ));
        chapter.manuscripts = vec![Manuscript::new(1).with_siglum(
            Provenance::Nineveh,
            Period::NeoAssyrian,
            ManuscriptType::Library,
            "1",
        )];
        chapter.lines = vec![Line::new(
            LineNumber::new(1),
            vec![LineVariant::new(
                vec![word],
                vec![ManuscriptLine::new(
                    1,
                    ManuscriptLineContent::text(LineNumber::primed(2), content),
                )
                .with_labels(vec!["o".to_string(), "i".to_string()])],
            )],
        )];

        assert_eq!(
            render_chapter(&chapter),
            "&L 1.2 SB II\n1. ku\nNinNA1 o i 2'. [ku]\n"
        );
    }
}
