//! Audit command - interactive checklist wizard
//!
//! Walks every check in checklist order and records pass/fail/skip.
//! All scores are recomputed from scratch after each answer. Progress can
//! be saved to an answers file and resumed later.

use super::{analyze, setup};
use crate::analyzer::{self, Suggestion};
use crate::answers::Answers;
use crate::checklist::Checklist;
use crate::models::{AuditReport, CheckStatus, Importance};
use crate::reporters;
use crate::scoring::ScoreBreakdown;
use anyhow::{Context, Result};
use console::{style, Term};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

pub(super) struct AuditArgs<'a> {
    pub variant: Option<&'a str>,
    pub checklist: Option<&'a Path>,
    pub resume: Option<&'a Path>,
    pub save: Option<&'a Path>,
    pub url: Option<&'a str>,
    pub apply: bool,
    pub format: Option<&'a str>,
    pub output: Option<&'a Path>,
}

/// Line-oriented input and output for the wizard
pub trait Prompter {
    /// Show `prompt` and read one line. Empty at end of input.
    fn ask(&mut self, prompt: &str) -> Result<String>;
    fn say(&mut self, text: &str);
}

/// Prompter on the real terminal
pub struct TermPrompter {
    term: Term,
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Prompter for TermPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.term.write_str(prompt)?;
        self.term.flush()?;
        Ok(self.term.read_line()?)
    }

    fn say(&mut self, text: &str) {
        // Terminal write failures are not worth aborting an audit for
        let _ = self.term.write_line(text);
    }
}

/// How the wizard ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Quit,
}

/// What the user typed at the check prompt
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Set(CheckStatus),
    Skip,
    Back,
    Note,
    Quit,
    Help,
    Unknown(String),
}

fn parse_command(input: &str) -> Command {
    match input.trim().to_lowercase().as_str() {
        "" | "s" | "skip" => Command::Skip,
        "u" | "clear" | "unanswered" => Command::Set(CheckStatus::Unanswered),
        "b" | "back" => Command::Back,
        "#" | "note" => Command::Note,
        "q" | "quit" | "exit" => Command::Quit,
        "?" | "h" | "help" => Command::Help,
        // Status words (p/y/yes, f/n/no) read the same as in answers files
        other => other
            .parse()
            .map(Command::Set)
            .unwrap_or_else(|_| Command::Unknown(other.to_string())),
    }
}

const HELP: &str = "  p = pass   f = fail   s/Enter = skip   u = clear answer\n  b = back   # = add note   q = save and quit   ? = help";

/// The interactive loop, independent of the terminal
pub struct Wizard<'a, P: Prompter> {
    checklist: &'a Checklist,
    answers: &'a mut Answers,
    hints: HashMap<&'static str, Suggestion>,
    prompter: P,
}

impl<'a, P: Prompter> Wizard<'a, P> {
    pub fn new(checklist: &'a Checklist, answers: &'a mut Answers, prompter: P) -> Self {
        Self {
            checklist,
            answers,
            hints: HashMap::new(),
            prompter,
        }
    }

    /// Analyzer suggestions shown next to matching checks
    pub fn with_hints(mut self, suggestions: Vec<Suggestion>) -> Self {
        self.hints = suggestions.into_iter().map(|s| (s.check_id, s)).collect();
        self
    }

    pub fn run(&mut self) -> Result<Outcome> {
        let checklist = self.checklist;
        let checks: Vec<_> = checklist.checks().collect();
        if checks.is_empty() {
            self.prompter.say("Checklist has no checks.");
            return Ok(Outcome::Completed);
        }

        // Resume at the first unanswered check
        let mut index = checks
            .iter()
            .position(|(_, check)| !self.answers.statuses.get(&check.id).is_answered())
            .unwrap_or(0);
        let mut shown_category: Option<&str> = None;

        self.prompter.say(HELP);

        while index < checks.len() {
            let (category, check) = checks[index];

            if shown_category != Some(category.id.as_str()) {
                self.show_category_header(category.id.as_str(), &category.name);
                shown_category = Some(category.id.as_str());
            }

            let current = self.answers.statuses.get(&check.id);
            self.prompter.say(&format!(
                "\n{} {} {}",
                style(format!("[{}/{}]", index + 1, checks.len())).dim(),
                importance_badge(check.importance),
                style(&check.name).bold()
            ));
            if !check.description.is_empty() {
                self.prompter.say(&format!("  {}", check.description));
            }
            if let Some(link) = &check.link {
                self.prompter.say(&format!("  {}", style(link).cyan().underlined()));
            }
            if current.is_answered() {
                self.prompter
                    .say(&format!("  {}", style(format!("current: {}", current.label())).dim()));
            }
            if let Some(note) = self.answers.note(&check.id) {
                self.prompter.say(&format!("  {}", style(format!("note: {}", note)).dim()));
            }
            if let Some(hint) = self.hints.get(check.id.as_str()) {
                self.prompter.say(&format!(
                    "  {} {} ({})",
                    style("analyzer suggests").magenta(),
                    hint.status,
                    hint.reason
                ));
            }

            let input = self.prompter.ask("  [p/f/s/b/#/q] > ")?;
            match parse_command(&input) {
                Command::Set(status) => {
                    self.answers.statuses.set(check.id.clone(), status);
                    self.show_progress(&category.id);
                    index += 1;
                }
                Command::Skip => index += 1,
                Command::Back => {
                    if index == 0 {
                        self.prompter.say("  Already at the first check.");
                    } else {
                        index -= 1;
                        if checks[index].0.id != category.id {
                            shown_category = None;
                        }
                    }
                }
                Command::Note => {
                    let note = self.prompter.ask("  note (empty clears) > ")?;
                    self.answers.set_note(check.id.clone(), &note);
                }
                Command::Quit => return Ok(Outcome::Quit),
                Command::Help => self.prompter.say(HELP),
                Command::Unknown(other) => self
                    .prompter
                    .say(&format!("  Unknown choice '{}'. Type ? for help.", other)),
            }
        }

        Ok(Outcome::Completed)
    }

    fn show_category_header(&mut self, id: &str, name: &str) {
        let breakdown = ScoreBreakdown::calculate(&self.checklist.categories, &self.answers.statuses);
        let score = breakdown
            .category(id)
            .and_then(|c| c.score)
            .map(|s| format!("{}/100", s))
            .unwrap_or_else(|| "no score".to_string());
        self.prompter.say(&format!(
            "\n{} {}",
            style(format!("== {} ==", name)).bold().cyan(),
            style(score).dim()
        ));
    }

    fn show_progress(&mut self, category_id: &str) {
        let breakdown = ScoreBreakdown::calculate(&self.checklist.categories, &self.answers.statuses);
        let (answered, total) = breakdown.progress();
        let category = breakdown
            .category(category_id)
            .map(|c| {
                format!(
                    "{}: {}",
                    c.name,
                    c.score.map_or("no score".to_string(), |s| s.to_string())
                )
            })
            .unwrap_or_default();
        let overall = match (breakdown.overall_score, breakdown.rating) {
            (Some(score), Some(rating)) => format!("Overall: {} ({})", score, rating),
            _ => "Overall: no score".to_string(),
        };
        self.prompter.say(&format!(
            "  {}",
            style(format!("→ {} | {} | {}/{} answered", category, overall, answered, total)).dim()
        ));
    }
}

fn importance_badge(importance: Importance) -> String {
    let tag = format!("[{}]", importance.label());
    match importance {
        Importance::Critical => style(tag).red().bold().to_string(),
        Importance::High => style(tag).red().to_string(),
        Importance::Medium => style(tag).yellow().to_string(),
        Importance::Low => style(tag).blue().to_string(),
    }
}

pub(super) fn run(args: AuditArgs<'_>) -> Result<()> {
    let project = setup::project_config();

    let mut answers = match args.resume {
        Some(path) => {
            let answers = Answers::load(path)
                .with_context(|| format!("Cannot resume from {}", path.display()))?;
            info!("Resuming audit from {}", path.display());
            answers
        }
        None => Answers::default(),
    };

    // Flags win over the resumed file, which wins over project defaults
    answers.variant = match args.variant {
        Some(v) => v.parse()?,
        None if args.resume.is_some() => answers.variant,
        None => setup::resolve_variant(None, &project)?,
    };
    if let Some(path) = args.checklist {
        // Absolute, so a resumed file still finds it from any directory
        answers.checklist = Some(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()));
    }
    if let Some(url) = args.url {
        answers.url = Some(url.to_string());
    }

    let checklist = setup::resolve_checklist(
        args.checklist,
        args.resume.map(|p| (&answers, p)),
        answers.variant,
        &project,
    )?;
    setup::warn_unknown_answers(&answers, &checklist);
    let format = setup::resolve_format(args.format, args.output, &project)?;

    println!(
        "\n{} {} {}",
        style("🔍").bold(),
        style(&checklist.name).bold(),
        style(format!(
            "({} categories, {} checks)",
            checklist.categories.len(),
            checklist.check_count()
        ))
        .dim()
    );

    let mut hints = Vec::new();
    if let Some(url) = answers.url.clone() {
        let analysis = analyze::fetch_with_spinner(&url, true)?;
        if let Some(err) = &analysis.error {
            eprintln!("{} {}", style("⚠️  Page analysis incomplete:").yellow(), err);
        }
        hints = analyzer::suggestions(&analysis);
        if args.apply {
            let applied = analyzer::apply_suggestions(&mut answers, &hints, &checklist);
            println!(
                "{} Pre-filled {} check(s) from the page analyzer",
                style("✓").green(),
                applied
            );
        }
    }

    let outcome = Wizard::new(&checklist, &mut answers, TermPrompter::default())
        .with_hints(hints)
        .run()?;

    if let Some(path) = args.save {
        answers
            .save(path)
            .with_context(|| format!("Failed to save answers to {}", path.display()))?;
        eprintln!(
            "{} Answers saved to {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    } else if outcome == Outcome::Quit {
        eprintln!(
            "{}",
            style("Answers were not saved. Pass --save <file> to keep progress.").yellow()
        );
    }

    let report = AuditReport::build(&checklist, &answers);
    let output = reporters::report_with_format(&report, format)?;
    setup::emit(&output, args.output, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::Variant;
    use std::collections::VecDeque;

    /// Replays scripted input; empty lines once the script runs out
    struct Scripted {
        input: VecDeque<String>,
        output: Vec<String>,
    }

    impl Scripted {
        fn new(lines: &[&str]) -> Self {
            Self {
                input: lines.iter().map(|l| l.to_string()).collect(),
                output: Vec::new(),
            }
        }
    }

    impl Prompter for &mut Scripted {
        fn ask(&mut self, _prompt: &str) -> Result<String> {
            Ok(self.input.pop_front().unwrap_or_default())
        }

        fn say(&mut self, text: &str) {
            self.output.push(text.to_string());
        }
    }

    fn tiny() -> Checklist {
        Checklist::from_toml_str(
            r#"
[[categories]]
id = "tech"
name = "Tech"
weight = 20
[[categories.checks]]
id = "a"
name = "A"
importance = "critical"
[[categories.checks]]
id = "b"
name = "B"
importance = "critical"

[[categories]]
id = "content"
name = "Content"
weight = 10
[[categories.checks]]
id = "c"
name = "C"
importance = "low"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("P"), Command::Set(CheckStatus::Pass));
        assert_eq!(parse_command(" fail "), Command::Set(CheckStatus::Fail));
        assert_eq!(parse_command(""), Command::Skip);
        assert_eq!(parse_command("b"), Command::Back);
        assert_eq!(parse_command("#"), Command::Note);
        assert_eq!(parse_command("note"), Command::Note);
        assert_eq!(parse_command("y"), Command::Set(CheckStatus::Pass));
        assert_eq!(parse_command("u"), Command::Set(CheckStatus::Unanswered));
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("maybe"), Command::Unknown("maybe".into()));
    }

    #[test]
    fn test_wizard_records_answers_in_order() {
        let checklist = tiny();
        let mut answers = Answers::new(Variant::General);
        let mut script = Scripted::new(&["p", "f", "p"]);

        let outcome = Wizard::new(&checklist, &mut answers, &mut script).run().unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert_eq!(answers.statuses.get("a"), CheckStatus::Pass);
        assert_eq!(answers.statuses.get("b"), CheckStatus::Fail);
        assert_eq!(answers.statuses.get("c"), CheckStatus::Pass);
        // tech 50, content 100 -> (20*50 + 10*100) / 30 = 66.7 -> 67
        assert!(script.output.iter().any(|l| l.contains("Overall: 67 (Good)")));
    }

    #[test]
    fn test_scores_recomputed_after_each_answer() {
        let checklist = tiny();
        let mut answers = Answers::default();
        let mut script = Scripted::new(&["p", "q"]);

        Wizard::new(&checklist, &mut answers, &mut script).run().unwrap();

        assert!(script.output.iter().any(|l| l.contains("Tech: 100")));
        assert!(script.output.iter().any(|l| l.contains("Overall: 100 (Excellent)")));
        assert!(script.output.iter().any(|l| l.contains("1/3 answered")));
    }

    #[test]
    fn test_back_and_overwrite() {
        let checklist = tiny();
        let mut answers = Answers::default();
        let mut script = Scripted::new(&["p", "b", "f", "s", "s"]);

        Wizard::new(&checklist, &mut answers, &mut script).run().unwrap();

        assert_eq!(answers.statuses.get("a"), CheckStatus::Fail);
        assert_eq!(answers.statuses.get("b"), CheckStatus::Unanswered);
    }

    #[test]
    fn test_quit_keeps_partial_answers() {
        let checklist = tiny();
        let mut answers = Answers::default();
        let mut script = Scripted::new(&["f", "q"]);

        let outcome = Wizard::new(&checklist, &mut answers, &mut script).run().unwrap();

        assert_eq!(outcome, Outcome::Quit);
        assert_eq!(answers.statuses.answered_count(), 1);
    }

    #[test]
    fn test_resume_starts_at_first_unanswered() {
        let checklist = tiny();
        let mut answers = Answers::default();
        answers.statuses.set("a", CheckStatus::Pass);
        answers.statuses.set("b", CheckStatus::Pass);
        let mut script = Scripted::new(&["f"]);

        Wizard::new(&checklist, &mut answers, &mut script).run().unwrap();

        assert_eq!(answers.statuses.get("a"), CheckStatus::Pass);
        assert_eq!(answers.statuses.get("c"), CheckStatus::Fail);
    }

    #[test]
    fn test_yes_no_match_status_words() {
        for word in ["n", "no", "f", "y", "yes", "p"] {
            assert_eq!(
                parse_command(word),
                Command::Set(word.parse::<CheckStatus>().unwrap()),
                "{}",
                word
            );
        }

        let checklist = tiny();
        let mut answers = Answers::default();
        let mut script = Scripted::new(&["n", "y"]);
        Wizard::new(&checklist, &mut answers, &mut script).run().unwrap();
        assert_eq!(answers.statuses.get("a"), CheckStatus::Fail);
        assert_eq!(answers.statuses.get("b"), CheckStatus::Pass);
    }

    #[test]
    fn test_notes_and_unknown_input() {
        let checklist = tiny();
        let mut answers = Answers::default();
        let mut script = Scripted::new(&["#", "needs a redirect", "huh", "f"]);

        Wizard::new(&checklist, &mut answers, &mut script).run().unwrap();

        assert_eq!(answers.note("a"), Some("needs a redirect"));
        assert_eq!(answers.statuses.get("a"), CheckStatus::Fail);
        assert!(script.output.iter().any(|l| l.contains("Unknown choice 'huh'")));
    }

    #[test]
    fn test_end_of_input_skips_remaining_checks() {
        let checklist = tiny();
        let mut answers = Answers::default();
        let mut script = Scripted::new(&[]);

        let outcome = Wizard::new(&checklist, &mut answers, &mut script).run().unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert!(answers.statuses.is_empty());
    }

    #[test]
    fn test_hints_are_shown() {
        let checklist = Checklist::builtin(Variant::General);
        let mut answers = Answers::default();
        let mut script = Scripted::new(&["q"]);
        let hint = Suggestion {
            check_id: "https",
            status: CheckStatus::Pass,
            reason: "Page is served over HTTPS".into(),
        };

        Wizard::new(&checklist, &mut answers, &mut script)
            .with_hints(vec![hint])
            .run()
            .unwrap();

        assert!(script
            .output
            .iter()
            .any(|l| l.contains("analyzer suggests") && l.contains("Page is served over HTTPS")));
    }
}
