use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use survey_builder::commands::files::write_bytes;
use survey_builder::commands::input::answer_from_input;
use survey_builder::commands::survey::{
  create_survey_from_file, export_responses, record_answer, start_response, submit_response,
  toggle_survey_status, RecordAnswerArgs, SessionState,
};
use survey_builder::export::csv::{serialize_to_delimited_text, EXPORT_FILE_NAME};
use survey_builder::llm::gemini::GeminiClient;
use survey_builder::llm::settings::{default_settings_path, load_settings, AiSettings};
use survey_builder::responses::types::SurveyResponse;
use survey_builder::session::share::{share_links, share_token};
use survey_builder::survey::types::Survey;

#[derive(Parser)]
#[command(name = "survey-builder")]
#[command(about = "Build research surveys from plain-text question lists", long_about = None)]
#[command(version)]
struct Cli {
  /// Settings file (defaults to the user config dir)
  #[arg(long, global = true)]
  settings: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate a survey from a plain-text file of questions
  Create {
    file: PathBuf,
    /// Write the survey JSON here as well as printing it
    #[arg(long)]
    out: Option<PathBuf>,
  },

  /// Answer a survey in the terminal, one respondent after another
  Collect {
    #[arg(long)]
    survey: PathBuf,
    /// Directory or .csv path for the export
    #[arg(long, default_value = ".")]
    out: PathBuf,
    /// Start with the survey closed
    #[arg(long)]
    closed: bool,
  },

  /// Export saved responses as CSV
  Export {
    #[arg(long)]
    survey: PathBuf,
    #[arg(long)]
    responses: PathBuf,
    #[arg(long, default_value = EXPORT_FILE_NAME)]
    out: PathBuf,
  },

  /// Print editor and participant links
  Links {
    #[arg(long)]
    base_url: String,
  },

  /// Print the effective settings
  Settings,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  match run(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      eprintln!("error: {err}");
      ExitCode::FAILURE
    }
  }
}

fn settings_for(path: Option<PathBuf>) -> Result<(PathBuf, AiSettings), String> {
  let path = match path {
    Some(p) => p,
    None => default_settings_path().map_err(|e| e.to_string())?,
  };
  let settings = load_settings(&path).map_err(|e| e.to_string())?;
  Ok((path, settings))
}

async fn run(cli: Cli) -> Result<(), String> {
  match cli.command {
    Commands::Create { file, out } => {
      let (_, settings) = settings_for(cli.settings)?;
      let state = SessionState::new(settings.language);
      let client = GeminiClient::new(settings).map_err(|e| e.to_string())?;
      let survey = create_survey_from_file(&state, &client, &file)
        .await?
        .ok_or_else(|| "Survey generation was superseded.".to_string())?;
      let json = serde_json::to_string_pretty(&survey).map_err(|e| e.to_string())?;
      if let Some(out) = out {
        write_bytes(&out, json.as_bytes())?;
      }
      println!("{json}");
      Ok(())
    }
    Commands::Collect { survey, out, closed } => {
      let (_, settings) = settings_for(cli.settings)?;
      let survey: Survey = read_json(&survey)?;
      let state = SessionState::with_survey(settings.language, survey);
      if closed {
        toggle_survey_status(&state)?;
      }
      collect(&state)?;
      match export_responses(&state, &out)? {
        Some(path) => println!("Responses written to {}", path.display()),
        None => println!("No responses collected; nothing exported."),
      }
      Ok(())
    }
    Commands::Export {
      survey,
      responses,
      out,
    } => {
      let survey: Survey = read_json(&survey)?;
      let responses: Vec<SurveyResponse> = read_json(&responses)?;
      match serialize_to_delimited_text(&survey, &responses) {
        Some(bytes) => {
          write_bytes(&out, &bytes)?;
          println!("Responses written to {}", out.display());
        }
        None => println!("No responses to export."),
      }
      Ok(())
    }
    Commands::Links { base_url } => {
      let links = share_links(&base_url, &share_token());
      println!("Editor:      {}", links.editor);
      println!("Participant: {}", links.participant);
      Ok(())
    }
    Commands::Settings => {
      let (path, settings) = settings_for(cli.settings)?;
      println!("# {}", path.display());
      println!(
        "{}",
        serde_json::to_string_pretty(&settings).map_err(|e| e.to_string())?
      );
      Ok(())
    }
  }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
  let raw = fs::read_to_string(path).map_err(|e| format!("Unable to read {}: {e}", path.display()))?;
  serde_json::from_str(&raw).map_err(|e| format!("Invalid JSON in {}: {e}", path.display()))
}

fn prompt_line(lines: &mut impl Iterator<Item = io::Result<String>>, prompt: &str) -> Option<String> {
  print!("{prompt}");
  let _ = io::stdout().flush();
  lines.next().and_then(|l| l.ok())
}

/// Terminal respondent loop. Ends on a "no" or at end of input.
fn collect(state: &SessionState) -> Result<(), String> {
  let stdin = io::stdin();
  let mut lines = stdin.lock().lines();
  loop {
    let survey = match start_response(state) {
      Ok(s) => s,
      Err(notice) => {
        println!("{notice}");
        return Ok(());
      }
    };
    println!("\n== {} ==", survey.title);
    for q in &survey.questions {
      println!("\n{}. {}", q.id, q.text);
      for (i, option) in q.options.iter().enumerate() {
        println!("  {}) {}", i + 1, option);
      }
      loop {
        let Some(line) = prompt_line(&mut lines, "> ") else {
          return Ok(());
        };
        match answer_from_input(q, &line) {
          Some(value) => {
            record_answer(
              state,
              RecordAnswerArgs {
                question_id: q.id,
                value,
              },
            )?;
            break;
          }
          None => println!("Please enter a valid answer."),
        }
      }
    }
    match submit_response(state) {
      Ok(total) => println!("\nResponse recorded ({total} so far)."),
      Err(err) => println!("\n{err}"),
    }
    let again = prompt_line(&mut lines, "Add another response? [y/N] ").unwrap_or_default();
    if !matches!(again.trim().to_lowercase().as_str(), "y" | "yes") {
      return Ok(());
    }
  }
}
