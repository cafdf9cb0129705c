mod wizard;

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use rfp_export::{DocumentRenderer, OutputFormat, export_session};
use rfp_spec::{
    AnswerRecord, Branding, FieldKey, FieldKind, FieldValue, RenderQuestion, STEP_COUNT, StepId,
    WizardSession, build_step_payload, export_ready, group_thousands, step_reports,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wizard::{AnswerParseError, PromptContext, Verbosity, WizardPresenter};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

const OUTPUT_DIR_ENV: &str = "RFP_WIZARD_OUTPUT_DIR";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reverse-logistics RFP wizard",
    long_about = "Walks through the four intake steps, checks saved answers, and writes the RFP document"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RenderFormat {
    Docx,
    Text,
    Json,
}

impl From<RenderFormat> for OutputFormat {
    fn from(format: RenderFormat) -> Self {
        match format {
            RenderFormat::Docx => OutputFormat::Docx,
            RenderFormat::Text => OutputFormat::Text,
            RenderFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Answer the intake questions step by step and download the RFP.
    Wizard {
        /// Optional JSON file containing answers to start from.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        /// Optional JSON file overriding the document branding.
        #[arg(long, value_name = "BRANDING")]
        branding: Option<PathBuf>,
        /// Directory the document is written to (defaults to RFP_WIZARD_OUTPUT_DIR or the current directory).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Document format to produce.
        #[arg(long, value_enum, default_value_t = RenderFormat::Docx)]
        format: RenderFormat,
        /// Show verbose output (step status, visible questions, parse expectations).
        #[arg(long, alias = "debug")]
        verbose: bool,
    },
    /// Compose the RFP from saved answers without prompting.
    Compose {
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
        /// Optional JSON file overriding the document branding.
        #[arg(long, value_name = "BRANDING")]
        branding: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = RenderFormat::Docx)]
        format: RenderFormat,
        /// Output file. Text and JSON go to stdout when omitted; DOCX goes to the output directory.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Report which steps can advance for a saved answers file.
    Check {
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Print the JSON Schema of the answers file.
    Schema {
        /// Print the branding schema instead.
        #[arg(long)]
        branding: bool,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let verbose = matches!(cli.command, Command::Wizard { verbose: true, .. });
    init_tracing(verbose);

    match cli.command {
        Command::Wizard {
            answers,
            branding,
            out,
            format,
            verbose,
        } => run_wizard(answers, branding, out, format, verbose),
        Command::Compose {
            answers,
            branding,
            format,
            out,
        } => run_compose(answers, branding, format, out),
        Command::Check { answers } => run_check(answers),
        Command::Schema { branding } => run_schema(branding),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_answers(path: Option<&Path>) -> CliResult<AnswerRecord> {
    match path {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            Ok(AnswerRecord::from_json_str(&contents)?)
        }
        None => Ok(AnswerRecord::default()),
    }
}

fn load_branding(path: Option<&Path>) -> CliResult<Branding> {
    match path {
        Some(path) => Ok(Branding::load(path)?),
        None => Ok(Branding::default()),
    }
}

fn run_wizard(
    answers_path: Option<PathBuf>,
    branding_path: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    format: RenderFormat,
    verbose: bool,
) -> CliResult<()> {
    let record = load_answers(answers_path.as_deref())?;
    let branding = load_branding(branding_path.as_deref())?;
    let out_root = resolve_output_root(out_dir)?;
    let renderer = OutputFormat::from(format).renderer();

    let mut session = WizardSession::with_record(record);
    let mut presenter = WizardPresenter::new(Verbosity::from_verbose(verbose));
    presenter.show_commands();

    'wizard: loop {
        loop {
            if let Some(navigation) = ask_step(&mut session, &mut presenter)? {
                navigate(&mut session, &mut presenter, navigation);
                continue;
            }
            if session.current_step().is_terminal() {
                break;
            }
            session.go_next();
        }

        while !session.export_ready() {
            presenter.show_contact_required();
            for key in [FieldKey::Name, FieldKey::Email] {
                if session.record().is_filled(key) {
                    continue;
                }
                if let Some(navigation) = ask_field(&mut session, &presenter, key)? {
                    navigate(&mut session, &mut presenter, navigation);
                    continue 'wizard;
                }
            }
        }
        break;
    }

    loop {
        match export_and_write(&mut session, &branding, renderer.as_ref(), &out_root) {
            Ok(path) => {
                presenter.show_completion(&path);
                return Ok(());
            }
            Err(err) => {
                presenter.show_export_error(&err);
                if !prompt_bool("Try again?", true)? {
                    return Err(err);
                }
            }
        }
    }
}

/// Movement requested from a prompt instead of an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Navigation {
    Back,
    /// Zero-based step index.
    Step(usize),
    Restart,
}

/// What the user typed at a question prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    /// `None` keeps the stored value.
    Answer(Option<FieldValue>),
    Navigate(Navigation),
}

fn navigate(session: &mut WizardSession, presenter: &mut WizardPresenter, navigation: Navigation) {
    match navigation {
        Navigation::Back => session.go_back(),
        Navigation::Step(index) => session.go_to_step(index),
        Navigation::Restart => session.reset(),
    }
    debug!(?navigation, step = session.step_index(), "wizard navigation");
    presenter.forget_header();
}

/// Asks the current step until it can be left. Returns early when the user navigates away.
fn ask_step(
    session: &mut WizardSession,
    presenter: &mut WizardPresenter,
) -> CliResult<Option<Navigation>> {
    if let Some(navigation) = ask_visible_questions(session, presenter)? {
        return Ok(Some(navigation));
    }
    while !session.can_advance() {
        let missing = session.missing_required();
        presenter.show_missing(&missing);
        for key in missing {
            if let Some(navigation) = ask_field(session, presenter, key)? {
                return Ok(Some(navigation));
            }
        }
    }
    Ok(None)
}

/// Prompts every visible question of the current step once, picking up fields that
/// become visible as earlier answers land.
fn ask_visible_questions(
    session: &mut WizardSession,
    presenter: &mut WizardPresenter,
) -> CliResult<Option<Navigation>> {
    let mut asked = BTreeSet::new();
    loop {
        let payload = build_step_payload(session);
        presenter.show_header(&payload);

        let visible = payload.visible_questions().collect::<Vec<_>>();
        let Some((index, question)) = visible
            .iter()
            .enumerate()
            .find(|(_, question)| !asked.contains(&question.key))
        else {
            presenter.show_status(&payload);
            return Ok(None);
        };

        let prompt = PromptContext::new(question, index + 1, visible.len());
        let key = question.key;
        match prompt_question(&prompt, question, presenter, false)? {
            Reply::Answer(Some(value)) => session.update_field(key, value),
            Reply::Answer(None) => {}
            Reply::Navigate(navigation) => return Ok(Some(navigation)),
        }
        asked.insert(key);
    }
}

fn ask_field(
    session: &mut WizardSession,
    presenter: &WizardPresenter,
    key: FieldKey,
) -> CliResult<Option<Navigation>> {
    let payload = build_step_payload(session);
    let question = match payload.questions.iter().find(|question| question.key == key) {
        Some(question) => question.clone(),
        None => {
            // Contact fields are asked from the lead step regardless of position.
            let mut lead = session.clone();
            lead.go_to_step(StepId::Lead.index());
            build_step_payload(&lead)
                .questions
                .into_iter()
                .find(|question| question.key == key)
                .ok_or_else(|| format!("no question for field '{}'", key))?
        }
    };
    let prompt = PromptContext::new(&question, 1, 1);
    match prompt_question(&prompt, &question, presenter, true)? {
        Reply::Answer(Some(value)) => session.update_field(key, value),
        Reply::Answer(None) => {}
        Reply::Navigate(navigation) => return Ok(Some(navigation)),
    }
    Ok(None)
}

fn prompt_question(
    prompt: &PromptContext,
    question: &RenderQuestion,
    presenter: &WizardPresenter,
    insist: bool,
) -> CliResult<Reply> {
    loop {
        presenter.show_prompt(prompt);
        let input = read_line("> ")?;

        if input.eq_ignore_ascii_case("exit") {
            return Err("wizard aborted by user".into());
        }

        let reply = match parse_navigation(&input) {
            Some(navigation) => navigation.map(Reply::Navigate),
            None => parse_answer(question, &input, insist).map(Reply::Answer),
        };
        match reply {
            Ok(reply) => return Ok(reply),
            Err(err) => presenter.show_parse_error(&err),
        }
    }
}

/// Recognises `back`, `restart` and `step <n>` (1-based). `None` means the input is an answer.
fn parse_navigation(raw: &str) -> Option<Result<Navigation, AnswerParseError>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("back") {
        return Some(Ok(Navigation::Back));
    }
    if raw.eq_ignore_ascii_case("restart") {
        return Some(Ok(Navigation::Restart));
    }
    let (command, target) = raw.split_once(char::is_whitespace)?;
    let target = target.trim();
    if !command.eq_ignore_ascii_case("step") || !target.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    Some(match target.parse::<usize>() {
        Ok(position) if (1..=STEP_COUNT).contains(&position) => Ok(Navigation::Step(position - 1)),
        _ => Err(AnswerParseError::new(
            format!("Choose a step between 1 and {}.", STEP_COUNT),
            Some(format!("'{}' is not a step number", target)),
        )),
    })
}

/// Parses raw input for a question. `Ok(None)` keeps the stored value.
fn parse_answer(
    question: &RenderQuestion,
    raw: &str,
    insist: bool,
) -> Result<Option<FieldValue>, AnswerParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        if insist && question.current_value.is_empty() {
            return Err(AnswerParseError::new(
                "This question requires an answer.",
                None,
            ));
        }
        return Ok(None);
    }

    match question.kind {
        _ if question.key == FieldKey::ReturnsPerYear => parse_count(raw).map(Some),
        FieldKind::Text | FieldKind::LongText => Ok(Some(FieldValue::Text(raw.to_string()))),
        FieldKind::Choice(options) => parse_choice(options, raw).map(Some),
        FieldKind::MultiChoice(options) => parse_choices(options, raw).map(Some),
        FieldKind::Percent => parse_percent(raw).map(Some),
    }
}

fn parse_choice(options: &[&str], raw: &str) -> Result<FieldValue, AnswerParseError> {
    match_option(options, raw).map(|choice| FieldValue::Text(choice.to_string()))
}

fn parse_choices(options: &[&str], raw: &str) -> Result<FieldValue, AnswerParseError> {
    if raw.eq_ignore_ascii_case("none") {
        return Ok(FieldValue::Choices(Vec::new()));
    }
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match_option(options, part).map(String::from))
        .collect::<Result<Vec<_>, _>>()
        .map(FieldValue::Choices)
}

fn match_option<'a>(options: &[&'a str], raw: &str) -> Result<&'a str, AnswerParseError> {
    options
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(raw))
        .copied()
        .ok_or_else(|| {
            AnswerParseError::new(
                format!("Choose one of: {}.", options.join(", ")),
                Some(format!("'{}' is not an allowed value", raw)),
            )
        })
}

fn parse_count(raw: &str) -> Result<FieldValue, AnswerParseError> {
    group_thousands(raw).map(FieldValue::Text).ok_or_else(|| {
        AnswerParseError::new(
            "Please enter the number of returns as digits, for example 150,000.",
            Some(format!("'{}' is not a whole number", raw)),
        )
    })
}

fn parse_percent(raw: &str) -> Result<FieldValue, AnswerParseError> {
    let trimmed = raw.trim_end_matches('%').trim();
    match trimmed.parse::<u32>() {
        Ok(value) if value <= 100 => Ok(FieldValue::Percent(value)),
        _ => Err(AnswerParseError::new(
            "Please enter a whole number between 0 and 100.",
            Some("expected percentage".to_string()),
        )),
    }
}

fn export_and_write(
    session: &mut WizardSession,
    branding: &Branding,
    renderer: &dyn DocumentRenderer,
    out_root: &Path,
) -> CliResult<PathBuf> {
    let exported = export_session(session, branding, renderer)?;
    fs::create_dir_all(out_root)?;
    let path = out_root.join(&exported.filename);
    fs::write(&path, &exported.bytes)?;
    debug!(path = %path.display(), bytes = exported.bytes.len(), "document written");
    Ok(path)
}

fn run_compose(
    answers_path: PathBuf,
    branding_path: Option<PathBuf>,
    format: RenderFormat,
    out: Option<PathBuf>,
) -> CliResult<()> {
    let record = load_answers(Some(&answers_path))?;
    let branding = load_branding(branding_path.as_deref())?;
    let renderer = OutputFormat::from(format).renderer();
    let mut session = WizardSession::with_record(record);

    match (out, format) {
        (Some(path), _) => {
            let exported = export_session(&mut session, &branding, renderer.as_ref())?;
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &exported.bytes)?;
            println!("RFP written to {}", path.display());
        }
        (None, RenderFormat::Text | RenderFormat::Json) => {
            let exported = export_session(&mut session, &branding, renderer.as_ref())?;
            io::stdout().write_all(&exported.bytes)?;
        }
        (None, RenderFormat::Docx) => {
            let out_root = resolve_output_root(None)?;
            let path = export_and_write(&mut session, &branding, renderer.as_ref(), &out_root)?;
            println!("RFP written to {}", path.display());
        }
    }
    Ok(())
}

fn run_check(answers_path: PathBuf) -> CliResult<()> {
    let record = load_answers(Some(&answers_path))?;
    let reports = step_reports(&record);

    for (index, report) in reports.iter().enumerate() {
        if report.can_advance {
            println!("Step {} {}: ready", index + 1, report.title);
        } else {
            let missing = report
                .missing
                .iter()
                .map(FieldKey::as_str)
                .collect::<Vec<_>>();
            println!(
                "Step {} {}: blocked (missing: {})",
                index + 1,
                report.title,
                missing.join(", ")
            );
        }
    }
    println!(
        "Export: {}",
        if export_ready(&record) {
            "ready"
        } else {
            "name and email required"
        }
    );

    if reports.iter().all(|report| report.can_advance) {
        Ok(())
    } else {
        Err("some steps are missing required answers".into())
    }
}

fn run_schema(branding: bool) -> CliResult<()> {
    let schema = if branding {
        Branding::schema()?
    } else {
        AnswerRecord::schema()?
    };
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn resolve_output_root(out: Option<PathBuf>) -> CliResult<PathBuf> {
    let candidate = match out {
        Some(path) => path,
        None => env::var_os(OUTPUT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    if candidate.as_os_str().is_empty() {
        return Err("output directory cannot be empty".into());
    }
    Ok(candidate)
}

fn read_line(prompt: &str) -> CliResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err("input closed before the wizard finished".into());
    }
    Ok(line.trim().to_string())
}

fn prompt_bool(prompt: &str, default: bool) -> CliResult<bool> {
    let suffix = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let value = read_line(&format!("{} {}: ", prompt, suffix))?;
        match value.to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer yes or no."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use serde_json::Value;
    use tempfile::TempDir;

    fn fixture_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../rfp-spec/tests/fixtures/scenario_a.json")
    }

    fn question(key: FieldKey) -> RenderQuestion {
        let mut session = WizardSession::new();
        let step = key.spec().step.unwrap_or(StepId::Lead);
        session.go_to_step(step.index());
        build_step_payload(&session)
            .questions
            .into_iter()
            .find(|question| question.key == key)
            .expect("question on its step")
    }

    #[test]
    fn parse_answer_matches_choices_case_insensitively() {
        let value = parse_answer(&question(FieldKey::SellsIntoRetailers), "yes", false).unwrap();
        assert_eq!(value, Some(FieldValue::Text("Yes".into())));
        assert!(parse_answer(&question(FieldKey::SellsIntoRetailers), "maybe", false).is_err());
    }

    #[test]
    fn parse_answer_splits_multi_choice() {
        let value =
            parse_answer(&question(FieldKey::InterestedChannels), "amazon, other", false).unwrap();
        assert_eq!(
            value,
            Some(FieldValue::Choices(vec!["Amazon".into(), "Other".into()]))
        );
        let cleared = parse_answer(&question(FieldKey::InterestedChannels), "none", false).unwrap();
        assert_eq!(cleared, Some(FieldValue::Choices(Vec::new())));
    }

    #[test]
    fn parse_answer_bounds_percentages() {
        let split = question(FieldKey::SalesSplitDtc);
        assert_eq!(
            parse_answer(&split, "70%", false).unwrap(),
            Some(FieldValue::Percent(70))
        );
        assert!(parse_answer(&split, "101", false).is_err());
        assert!(parse_answer(&split, "-3", false).is_err());
    }

    #[test]
    fn return_volume_must_be_a_count() {
        let volume = question(FieldKey::ReturnsPerYear);
        assert_eq!(
            parse_answer(&volume, "150000", false).unwrap(),
            Some(FieldValue::Text("150,000".into()))
        );
        assert!(parse_answer(&volume, "roughly 20k", false).is_err());
        assert!(parse_answer(&volume, "lots", false).is_err());
    }

    #[test]
    fn navigation_commands_are_recognised() {
        assert_eq!(parse_navigation("back").unwrap().unwrap(), Navigation::Back);
        assert_eq!(parse_navigation("RESTART").unwrap().unwrap(), Navigation::Restart);
        assert_eq!(parse_navigation("step 3").unwrap().unwrap(), Navigation::Step(2));
        assert!(parse_navigation("step 9").unwrap().is_err());
        assert!(parse_navigation("step by step").is_none());
        assert!(parse_navigation("Amazon").is_none());
    }

    #[test]
    fn blank_input_keeps_value_unless_insisting_on_empty_field() {
        let countries = question(FieldKey::Countries);
        assert_eq!(parse_answer(&countries, "  ", false).unwrap(), None);
        assert!(parse_answer(&countries, "", true).is_err());

        let split = question(FieldKey::SalesSplitDtc);
        assert_eq!(parse_answer(&split, "", true).unwrap(), None);
    }

    #[test]
    fn check_reports_complete_answers() -> Result<(), Box<dyn std::error::Error>> {
        let output = Command::cargo_bin("rfp-wizard")?
            .arg("check")
            .arg("--answers")
            .arg(fixture_path())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let stdout = String::from_utf8(output)?;
        assert!(stdout.contains("Step 1 General Logistics: ready"));
        assert!(stdout.contains("Export: ready"));
        Ok(())
    }

    #[test]
    fn check_fails_on_blocked_steps() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        let answers = workspace.path().join("answers.json");
        fs::write(&answers, r#"{ "countries": "US" }"#)?;

        Command::cargo_bin("rfp-wizard")?
            .arg("check")
            .arg("--answers")
            .arg(&answers)
            .assert()
            .failure();
        Ok(())
    }

    #[test]
    fn compose_prints_text_document() -> Result<(), Box<dyn std::error::Error>> {
        let output = Command::cargo_bin("rfp-wizard")?
            .args(["compose", "--format", "text", "--answers"])
            .arg(fixture_path())
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let stdout = String::from_utf8(output)?;
        assert!(stdout.starts_with("Request for Proposal"));
        assert!(stdout.contains("Retailer program: Destroy in Field (DIF)"));
        Ok(())
    }

    #[test]
    fn compose_writes_docx_into_output_dir() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = TempDir::new()?;
        Command::cargo_bin("rfp-wizard")?
            .arg("compose")
            .arg("--answers")
            .arg(fixture_path())
            .env(OUTPUT_DIR_ENV, workspace.path())
            .assert()
            .success();

        let bytes = fs::read(workspace.path().join("Jane-Doe-RFP.docx"))?;
        assert!(bytes.starts_with(b"PK"));
        Ok(())
    }

    #[test]
    fn compose_refuses_without_contact() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        let answers = workspace.path().join("answers.json");
        fs::write(&answers, r#"{ "name": "Jane Doe" }"#)?;

        Command::cargo_bin("rfp-wizard")?
            .args(["compose", "--format", "json", "--answers"])
            .arg(&answers)
            .assert()
            .failure();
        Ok(())
    }

    #[test]
    fn schema_describes_answer_fields() -> Result<(), Box<dyn std::error::Error>> {
        let output = Command::cargo_bin("rfp-wizard")?
            .arg("schema")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let schema: Value = serde_json::from_slice(&output)?;
        assert!(schema["properties"]["excessInventoryChannel"].is_object());
        Ok(())
    }

    #[test]
    fn wizard_accepts_prefilled_answers_and_writes_document()
    -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        let output_root = workspace.path().join("rfp-out");
        let stdin = "\n".repeat(40);

        Command::cargo_bin("rfp-wizard")?
            .arg("wizard")
            .arg("--answers")
            .arg(fixture_path())
            .args(["--format", "text", "--out"])
            .arg(&output_root)
            .write_stdin(stdin)
            .assert()
            .success();

        let text = fs::read_to_string(output_root.join("Jane-Doe-RFP.txt"))?;
        assert!(text.contains("5.0 Evaluation Criteria & Next Steps"));
        Ok(())
    }

    fn run_wizard_with(
        stdin: String,
        out: &Path,
    ) -> Result<(bool, String), Box<dyn std::error::Error>> {
        let output = Command::cargo_bin("rfp-wizard")?
            .arg("wizard")
            .arg("--answers")
            .arg(fixture_path())
            .args(["--format", "text", "--out"])
            .arg(out)
            .write_stdin(stdin)
            .output()?;
        Ok((output.status.success(), String::from_utf8(output.stdout)?))
    }

    #[test]
    fn wizard_jumps_straight_to_a_step() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        let stdin = format!("step 4\n{}", "\n".repeat(10));

        let (success, stdout) = run_wizard_with(stdin, workspace.path())?;

        assert!(success);
        assert!(stdout.contains("Step 4/4: Lead Capture & Export"));
        assert!(!stdout.contains("Step 2/4"));
        assert!(workspace.path().join("Jane-Doe-RFP.txt").exists());
        Ok(())
    }

    #[test]
    fn wizard_goes_back_a_step() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        let stdin = format!("step 2\nback\n{}", "\n".repeat(60));

        let (success, stdout) = run_wizard_with(stdin, workspace.path())?;

        assert!(success);
        assert_eq!(stdout.matches("Step 1/4: General Logistics").count(), 2);
        assert!(workspace.path().join("Jane-Doe-RFP.txt").exists());
        Ok(())
    }

    #[test]
    fn wizard_restart_clears_answers() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;

        let (success, stdout) = run_wizard_with("restart\nexit\n".into(), workspace.path())?;

        assert!(!success);
        assert_eq!(stdout.matches("Current: 150,000").count(), 1);
        assert_eq!(stdout.matches("Step 1/4: General Logistics").count(), 2);
        Ok(())
    }

    #[test]
    fn wizard_stops_on_exit() -> Result<(), Box<dyn std::error::Error>> {
        let workspace = assert_fs::TempDir::new()?;
        Command::cargo_bin("rfp-wizard")?
            .arg("wizard")
            .arg("--out")
            .arg(workspace.path())
            .write_stdin("exit\n")
            .assert()
            .failure();
        Ok(())
    }
}
