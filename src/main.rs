use anyhow::{anyhow, Context, Result};
use nutricare::alternatives::{recommend_alternatives, CatalogProvider, CsvCatalog, StaticCatalog};
use nutricare::analysis::{analyze_food, evaluate_reply, AnalysisError};
use nutricare::api_connection::endpoints::Provider;
use nutricare::api_connection::GeminiClient;
use nutricare::api_connection::ImageData;
use nutricare::chat::{ChatSession, ReplySource};
use nutricare::cli::{parse_args, Command};
use nutricare::config::AppConfig;
use nutricare::i18n::Language;
use nutricare::logging::init_logging;
use nutricare::nutrition::NutritionRecord;
use nutricare::profile::{load_profile, Profile};
use nutricare::report::render_report;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const QUIT_COMMAND: &str = "/quit";
const IMAGE_COMMAND: &str = "/image";

struct App {
    config: AppConfig,
    language: Language,
    profile: Profile,
    catalog: Box<dyn CatalogProvider>,
}

impl App {
    fn client(&self) -> GeminiClient {
        GeminiClient::new(
            Provider::gemini_at(&self.config.api_key_env_var, &self.config.base_url),
            Some(&self.config.model),
        )
    }

    fn print_report(&self, record: &NutritionRecord) {
        let recommendation = recommend_alternatives(self.catalog.as_ref(), record, &self.profile);
        println!("{}", render_report(record, &self.profile, &recommendation, self.language));
    }
}

async fn run_analyze(app: &App, image: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let msg = app.language.messages();
    let image = match image {
        Some(path) => Some(ImageData::from_file(&path).await?),
        None => None,
    };

    println!("{}", msg.analyzing);
    let analysis = match analyze_food(&app.client(), &app.profile, image.as_ref(), app.language).await {
        Ok(analysis) => analysis,
        Err(AnalysisError::MissingImage) => return Err(anyhow!(msg.upload_first)),
        Err(e) => {
            eprintln!("\n{}", msg.analysis_error);
            return Err(e.into());
        }
    };

    println!("{}\n", msg.analysis_complete);
    app.print_report(&analysis.record);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&analysis).context("Failed to serialise analysis")?;
        fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write analysis to {:?}", path))?;
        println!("Analysis saved to {:?}", path);
    }
    Ok(())
}

async fn run_evaluate(app: &App, response: &Path) -> Result<()> {
    let reply = fs::read_to_string(response)
        .await
        .with_context(|| format!("Failed to read model reply '{}'", response.display()))?;
    let analysis = evaluate_reply(&reply, &app.profile);
    println!(
        "Decoded as {:?} ({:.0}% of nutrients reported)\n",
        analysis.source,
        analysis.confidence * 100.0
    );
    app.print_report(&analysis.record);
    Ok(())
}

async fn load_analysis(path: &Path) -> Result<NutritionRecord> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read analysis file {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Analysis file {:?} is not a nutrition record", path))
}

async fn run_chat(app: &App, analysis: Option<PathBuf>, offline: bool) -> Result<()> {
    let msg = app.language.messages();
    let analysis = match analysis {
        Some(path) => Some(load_analysis(&path).await?),
        None => None,
    };
    let client = app.client();
    let mut session = ChatSession::new(app.profile.clone(), analysis, app.language);

    println!("== {} ==", msg.chat_title);
    println!("{}:", msg.quick_questions_heading);
    for (idx, question) in msg.quick_questions.iter().enumerate() {
        println!("  {}. {}", idx + 1, question);
    }
    println!("({} <file> attaches a photo, {} exits)\n", IMAGE_COMMAND, QUIT_COMMAND);

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending_image: Option<ImageData> = None;

    loop {
        stdout.write_all(format!("{} > ", msg.chat_placeholder).as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line == QUIT_COMMAND {
            break;
        }
        if let Some(path) = line.strip_prefix(IMAGE_COMMAND) {
            match ImageData::from_file(Path::new(path.trim())).await {
                Ok(image) => {
                    println!("Image attached ({}).", image.mime_type);
                    pending_image = Some(image);
                }
                Err(e) => eprintln!("{:#}", e),
            }
            continue;
        }
        if line.is_empty() {
            continue;
        }

        // A bare number picks one of the quick questions.
        let question = match line.parse::<usize>() {
            Ok(n) if (1..=msg.quick_questions.len()).contains(&n) => msg.quick_questions[n - 1],
            _ => line,
        };

        let image = pending_image.take();
        let result = if offline {
            session.ask_offline(question, image)
        } else {
            println!("{}", msg.thinking);
            session.ask(&client, question, image).await
        };
        match result {
            Ok((reply, source)) => {
                if source == ReplySource::Fallback {
                    tracing::warn!("reply produced without the model");
                }
                println!("\n{}\n", reply.text);
            }
            Err(e) => eprintln!("{}", e),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = parse_args();
    let config = AppConfig::from_env();

    let log_filter = if cli_args.verbose {
        "nutricare=debug"
    } else {
        config.log_filter.as_str()
    };
    init_logging(log_filter, config.json_logs)?;

    let profile = match &cli_args.profile {
        Some(path) => load_profile(path).await?,
        None => Profile::default(),
    };
    let catalog: Box<dyn CatalogProvider> = match &cli_args.catalog {
        Some(path) => Box::new(CsvCatalog::load(path)?),
        None => Box::new(StaticCatalog::default()),
    };
    let language = cli_args.lang.unwrap_or(config.language);
    tracing::debug!(model = %config.model, ?language, "configuration loaded");

    let app = App {
        config,
        language,
        profile,
        catalog,
    };

    match cli_args.command {
        Command::Analyze { image, output } => run_analyze(&app, image, output).await,
        Command::Evaluate { response } => run_evaluate(&app, &response).await,
        Command::Chat { analysis, offline } => run_chat(&app, analysis, offline).await,
    }
}
