use anyhow::Result;
use clap::Args;
use colored::Colorize;
use ebl_corpus::{validate_chapter, Chapter};
use ebl_transliteration::diagnostics::format_enclosure_error;
use ebl_transliteration::{validate, Token};
use std::path::PathBuf;
use tracing::debug;

use super::{chapter_files, read_chapter};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Chapter JSON file or directory of chapter files
    pub input: PathBuf,

    /// List files without problems too
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub location: String,
    pub message: String,
}

fn check_tokens(problems: &mut Vec<Problem>, location: String, tokens: &[Token]) {
    if let Err(error) = validate(tokens) {
        problems.push(Problem {
            message: format_enclosure_error(tokens, &location, &error),
            location,
        });
    }
}

/// Structural problems of the chapter and enclosure problems of every line
pub fn check_chapter(chapter: &Chapter) -> Vec<Problem> {
    let id = chapter.id();
    let mut problems = Vec::new();

    if let Err(error) = validate_chapter(chapter) {
        problems.push(Problem {
            location: id.to_string(),
            message: error.to_string(),
        });
    }

    for line in &chapter.lines {
        for (index, variant) in line.variants.iter().enumerate() {
            let prefix = format!("{id} {} variant {index}", line.number);
            check_tokens(&mut problems, prefix.clone(), &variant.reconstruction);

            for manuscript_line in &variant.manuscripts {
                let siglum = chapter
                    .get_manuscript(manuscript_line.manuscript_id)
                    .map(|manuscript| manuscript.siglum())
                    .unwrap_or_else(|| manuscript_line.manuscript_id.to_string());
                check_tokens(
                    &mut problems,
                    format!("{prefix} {siglum}"),
                    manuscript_line.content(),
                );
            }
        }
    }

    problems
}

pub fn check(args: CheckArgs) -> Result<()> {
    println!("🔍 {} eBL chapter check", "Starting".green().bold());
    println!("   Input: {}", args.input.display());
    println!();

    let files = chapter_files(&args.input)?;
    let mut total_problems = 0;

    for file in &files {
        debug!(path = %file.display(), "Checking chapter");
        let chapter = match read_chapter(file) {
            Ok(chapter) => chapter,
            Err(err) => {
                eprintln!("{} {:#}", "✗".red(), err);
                total_problems += 1;
                continue;
            }
        };

        let problems = check_chapter(&chapter);
        if problems.is_empty() {
            if args.verbose {
                println!("{} {}", "✓".green(), file.display());
            }
            continue;
        }

        println!("{} {}", "✗".red(), file.display());
        for problem in &problems {
            println!("   {}", problem.location.bold());
            println!("{}", problem.message);
        }
        total_problems += problems.len();
    }

    println!();
    println!("   Files checked: {}", files.len());

    if total_problems > 0 {
        return Err(anyhow::anyhow!("{} problem(s) found", total_problems));
    }
    println!("   {} No issues found!", "✓".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebl_corpus::{
        ChapterId, Line, LineNumber, LineVariant, Manuscript, ManuscriptLine,
        ManuscriptLineContent, Stage, TextId,
    };
    use ebl_transliteration::{Bracket, NamedSign, Word};

    fn chapter(manuscript_content: Vec<Token>) -> Chapter {
        let word: Token = Word::new(vec![NamedSign::reading("ku").into()]).unwrap().into();
        let mut chapter = Chapter::new(ChapterId::new(
            TextId::new("L", 1, 1),
            Stage::StandardBabylonian,
            "I",
        ));
        chapter.manuscripts = vec![Manuscript::new(1)];
        chapter.lines = vec![Line::new(
            LineNumber::new(1),
            vec![LineVariant::new(
                vec![word],
                vec![ManuscriptLine::new(
                    1,
                    ManuscriptLineContent::text(LineNumber::new(1), manuscript_content),
                )],
            )],
        )];
        chapter
    }

    #[test]
    fn test_valid_chapter_has_no_problems() {
        assert!(check_chapter(&chapter(vec![])).is_empty());
    }

    #[test]
    fn test_unclosed_bracket_in_manuscript_line() {
        let problems = check_chapter(&chapter(vec![
            Token::open(Bracket::BrokenAway),
            Token::unknown_number_of_signs(),
        ]));

        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].location, "L 1.1 SB I 1 variant 0 Std");
        assert!(problems[0].message.contains("Unclosed"));
    }

    #[test]
    fn test_structural_problem() {
        let mut chapter = chapter(vec![]);
        chapter.manuscripts.clear();

        let problems = check_chapter(&chapter);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].message.contains("unknown manuscript 1"));
    }
}
