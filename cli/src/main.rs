//! CLI entrypoint for dpc-diagnostic
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use chrono::{Local, Utc};
use clap::Parser;
use dpc_application::{
    AnonymousUser, CityDirectory, CurrentUser, EventLogger, KeyValueStore, NoCityDirectory,
    NoEventLogger, NoStorage, NoSyncProgress, ProfileStore, QuestionSnapshotSource,
    QuestionStore, QuizController, ReconcileQuestionsUseCase, RegisterError, RegisterOutcome,
    RegisterUserUseCase, ResolveQuestionsUseCase, ResponseStore, SeedProfilesUseCase,
    SignInError, SignInUseCase, SubmitDiagnosticUseCase, SyncProgressNotifier,
};
use dpc_domain::{ConfigIssue, LoginForm, OutputFormat, RegistrationForm};
use dpc_infrastructure::{
    BundledSnapshot, ConfigLoader, FileConfig, FileKeyValueStore, IbgeCityDirectory,
    InMemoryStore, JsonlEventLogger, SessionCache, SupabaseClient, bundled_profiles,
};
use dpc_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormatter, QuizRepl, RegistrationPrompt,
    SimpleSyncProgress, SyncProgressReporter,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Wired dependencies shared by every command
struct App {
    cli: Cli,
    config: FileConfig,
    logger: Arc<dyn EventLogger>,
    storage: Arc<dyn KeyValueStore>,
    snapshot: Arc<dyn QuestionSnapshotSource>,
}

impl App {
    fn output_format(&self) -> OutputFormat {
        self.cli
            .output
            .map(OutputFormat::from)
            .or(self.config.output.format)
            .unwrap_or_default()
    }

    fn progress(&self) -> Box<dyn SyncProgressNotifier> {
        if self.cli.quiet {
            Box::new(NoSyncProgress)
        } else if self.config.output.show_progress {
            Box::new(SyncProgressReporter::new())
        } else {
            Box::new(SimpleSyncProgress)
        }
    }

    /// Storage for quiz progress; nothing is kept when resuming is disabled
    fn quiz_storage(&self) -> Arc<dyn KeyValueStore> {
        if self.config.session.resume {
            Arc::clone(&self.storage)
        } else {
            Arc::new(NoStorage)
        }
    }

    fn session_cache(&self) -> SessionCache {
        SessionCache::new(Arc::clone(&self.storage))
    }

    /// Municipality lookup for the registration form; empty when unavailable
    fn city_directory(&self) -> Box<dyn CityDirectory> {
        let timeout = Duration::from_secs(self.config.backend.effective_timeout_secs());
        match IbgeCityDirectory::new(timeout) {
            Ok(directory) => Box::new(directory),
            Err(e) => {
                warn!("City lookup disabled: {}", e);
                Box::new(NoCityDirectory)
            }
        }
    }

    /// Build the backend client, reusing a cached sign-in when still valid
    fn connect(&self) -> Result<SupabaseClient> {
        let backend = &self.config.backend;
        let issues = backend.validate_remote();
        if issues.iter().any(ConfigIssue::is_error) {
            eprintln!("{}", ConsoleFormatter::format_config_issues(&issues));
            bail!("Backend is not configured");
        }

        let client = SupabaseClient::new(
            backend.url.as_deref().unwrap_or_default(),
            backend.anon_key.as_deref().unwrap_or_default(),
            Duration::from_secs(backend.effective_timeout_secs()),
        )?;

        Ok(match self.session_cache().load(Utc::now().timestamp()) {
            Some(session) => {
                info!("Using cached session for {}", session.user_id);
                client.with_session(session)
            }
            None => client,
        })
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let loaded = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        if let Some(path) = &cli.config
            && !path.exists()
        {
            bail!("Config file not found: {}", path.display());
        }
        ConfigLoader::load(cli.config.as_ref())
    };
    loaded.map_err(|e| anyhow!("Failed to load configuration: {}", e))
}

/// Console logging by verbosity, plus a daily log file when a directory is set
fn init_logging(verbose: u8, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "dpc-diagnostic.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

fn event_logger(log_dir: Option<&str>) -> Arc<dyn EventLogger> {
    let logger =
        log_dir.and_then(|dir| JsonlEventLogger::new(Path::new(dir).join("events.jsonl")));
    match logger {
        Some(logger) => {
            info!("Writing diagnostic events to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoEventLogger),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let log_dir = config.logging.dir.clone();
    let _guard = init_logging(cli.verbose, log_dir.as_deref());

    info!("Starting dpc-diagnostic");

    if !config.output.color {
        colored::control::set_override(false);
    }

    let command = cli.command_or_default();
    if command == Command::Config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        let mut issues = config.validate();
        if !cli.offline {
            issues.extend(config.backend.validate_remote());
        }
        println!();
        if issues.is_empty() {
            println!("No configuration issues found.");
        } else {
            println!("{}", ConsoleFormatter::format_config_issues(&issues));
        }
        return Ok(());
    }

    let issues = config.validate();
    if issues.iter().any(ConfigIssue::is_error) {
        eprintln!("{}", ConsoleFormatter::format_config_issues(&issues));
        bail!("Invalid configuration");
    }
    for issue in &issues {
        warn!("{}", issue.message);
    }

    // === Dependency Injection ===
    let storage: Arc<dyn KeyValueStore> = match config.session.resolved_dir() {
        Some(dir) => Arc::new(FileKeyValueStore::new(dir)),
        None => {
            warn!("No data directory available, progress will not be kept");
            Arc::new(NoStorage)
        }
    };
    let snapshot: Arc<dyn QuestionSnapshotSource> = match &config.quiz.snapshot_path {
        Some(path) => Arc::new(BundledSnapshot::from_path(path)),
        None => Arc::new(BundledSnapshot::new()),
    };

    let app = App {
        logger: event_logger(log_dir.as_deref()),
        cli,
        config,
        storage,
        snapshot,
    };

    match command {
        Command::Quiz { restart } => {
            if app.cli.offline {
                let store = Arc::new(InMemoryStore::with_profiles(bundled_profiles()?));
                run_quiz(&app, store, Arc::new(AnonymousUser), restart).await
            } else {
                let client = Arc::new(app.connect()?);
                run_quiz(&app, Arc::clone(&client), client, restart).await
            }
        }
        Command::Sync => {
            if app.cli.offline {
                bail!("sync writes to the backend and cannot run with --offline");
            }
            run_sync(&app).await
        }
        Command::SeedProfiles => {
            if app.cli.offline {
                bail!("seed-profiles writes to the backend and cannot run with --offline");
            }
            run_seed(&app).await
        }
        Command::Register => {
            if app.cli.offline {
                bail!("register needs the backend and cannot run with --offline");
            }
            run_register(&app).await
        }
        Command::Login { no_quiz } => {
            if app.cli.offline {
                bail!("login needs the backend and cannot run with --offline");
            }
            run_login(&app, no_quiz).await
        }
        Command::Config => Ok(()),
    }
}

/// Resolve the questions, run the interactive quiz and print the result
async fn run_quiz<S>(
    app: &App,
    store: Arc<S>,
    user: Arc<dyn CurrentUser>,
    restart: bool,
) -> Result<()>
where
    S: QuestionStore + ProfileStore + ResponseStore + 'static,
{
    let resolver = ResolveQuestionsUseCase::new(Arc::clone(&store), Arc::clone(&app.snapshot))
        .with_policy(app.config.quiz.to_sync_policy())
        .with_logger(Arc::clone(&app.logger));

    let progress = app.progress();
    let resolved = resolver.execute_with_progress(progress.as_ref()).await?;
    info!(
        "Loaded {} questions from the {}",
        resolved.bank.len(),
        resolved.source
    );

    let submitter = Arc::new(
        SubmitDiagnosticUseCase::new(store.clone(), store, user)
            .with_logger(Arc::clone(&app.logger)),
    );

    let mut controller = QuizController::start(resolved.bank, app.quiz_storage(), submitter);
    if restart {
        controller.restart();
    }

    let mut repl = QuizRepl::new(controller);
    if let Some(outcome) = repl.run().await? {
        println!();
        println!("{}", ConsoleFormatter.format(&outcome, app.output_format()));
    }
    Ok(())
}

async fn run_sync(app: &App) -> Result<()> {
    let client = Arc::new(app.connect()?);
    let use_case = ReconcileQuestionsUseCase::new(client, Arc::clone(&app.snapshot))
        .with_policy(app.config.quiz.to_sync_policy());

    let progress = app.progress();
    let report = use_case.execute_with_progress(progress.as_ref()).await?;

    if app.output_format() == OutputFormat::Json {
        println!("{}", serde_json_pretty(&report));
    } else {
        print!("{}", ConsoleFormatter::format_reconcile_report(&report));
    }
    if !report.is_success() {
        bail!("Question sync finished with failures");
    }
    Ok(())
}

async fn run_seed(app: &App) -> Result<()> {
    let client = Arc::new(app.connect()?);
    let profiles = bundled_profiles()?;
    let report = SeedProfilesUseCase::new(client).execute(&profiles).await;

    if app.output_format() == OutputFormat::Json {
        println!("{}", serde_json_pretty(&report));
    } else {
        print!("{}", ConsoleFormatter::format_seed_report(&report));
    }
    if !report.is_success() {
        bail!("Profile seeding finished with failures");
    }
    Ok(())
}

/// Prompt until the form validates, sign up, then go straight to the quiz
async fn run_register(app: &App) -> Result<()> {
    let client = Arc::new(app.connect()?);
    let use_case = RegisterUserUseCase::new(Arc::clone(&client));
    let cities = app.city_directory();
    let mut prompt = RegistrationPrompt::new()?;
    let mut form = RegistrationForm::default();

    loop {
        let Some(filled) = prompt.ask(&form, cities.as_ref()).await? else {
            return Ok(());
        };
        form = filled;

        match use_case.execute(&form, Local::now().date_naive()).await {
            Ok(RegisterOutcome::SignedIn(session)) => {
                app.session_cache().save(&session);
                println!("Cadastro concluído. Vamos ao questionário!");
                break;
            }
            Ok(RegisterOutcome::RegisteredPendingLogin(user_id)) => {
                info!("Registered {} without a session", user_id);
                println!(
                    "Cadastro criado. Confirme seu e-mail e depois entre com `dpc-diagnostic login`."
                );
                return Ok(());
            }
            Err(RegisterError::Invalid(errors)) => RegistrationPrompt::show_errors(&errors),
            Err(e) => return Err(e.into()),
        }
    }

    run_quiz(app, Arc::clone(&client), client, false).await
}

/// Prompt for e-mail and WhatsApp until sign-in succeeds, keep the session,
/// then take the quiz unless `no_quiz`
async fn run_login(app: &App, no_quiz: bool) -> Result<()> {
    let client = Arc::new(app.connect()?);
    let use_case = SignInUseCase::new(Arc::clone(&client));
    let mut prompt = RegistrationPrompt::new()?;
    let mut form = LoginForm::default();

    loop {
        let Some(filled) = prompt.ask_login(&form)? else {
            return Ok(());
        };
        form = filled;

        match use_case.execute(&form).await {
            Ok(session) => {
                app.session_cache().save(&session);
                println!("Login realizado com sucesso!");
                break;
            }
            Err(SignInError::Invalid(errors)) => RegistrationPrompt::show_errors(&errors),
            Err(SignInError::EmailNotConfirmed) => {
                println!("Email não confirmado. Por favor, verifique sua caixa de entrada.");
                return Ok(());
            }
            Err(SignInError::InvalidCredentials) => {
                println!("Falha no login. Verifique seu email e WhatsApp.");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if no_quiz {
        return Ok(());
    }
    run_quiz(app, Arc::clone(&client), client, false).await
}

fn serde_json_pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
