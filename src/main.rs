use clap::Parser;
use studio_booking::adapters::terminal::{ConsoleNotifier, StdinConfirm, TerminalSurface};
use studio_booking::core::booking::parse_form_date;
use studio_booking::core::contact_links::ContactLink;
use studio_booking::core::page::{footer_text, format_date_it};
use studio_booking::core::{Clock, ConfigProvider, GatedSection, RelayOutcome, SubmitReport};
use studio_booking::utils::error::ErrorSeverity;
use studio_booking::utils::{logger, validation::Validate};
use studio_booking::{
    BookingError, BookingFormController, CliConfig, Command, ConsentAction, ConsentManager,
    FileStore, HttpRelay, MemoryForm, SiteConfig, SubmitArgs, SystemClock,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => match SiteConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => SiteConfig::default(),
    };

    // 初始化日誌
    logger::init_logger(config.log_format(), cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2, // 可重試
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(command: Command, config: &SiteConfig) -> studio_booking::Result<()> {
    match command {
        Command::Slots { date } => show_slots(&date),
        Command::Submit(args) => submit(args, config).await,
        Command::Consent { action } => consent(action, config),
        Command::Contact { href } => {
            let link = ContactLink::parse(&href).ok_or_else(|| BookingError::ValidationError {
                message: format!("'{}' is not a tel: or mailto: link", href),
            })?;
            match link.follow(&StdinConfirm) {
                Some(target) => println!("➡️  {}", target),
                None => println!("Annullato"),
            }
            Ok(())
        }
        Command::Info => {
            println!("🏠 {}", config.site.name);
            println!("📮 Relay: {}", config.relay_endpoint());
            println!("🗄️  Store: {}", config.store_path());
            if let Some(footer) = &config.site.footer {
                println!("{}", footer_text(footer, SystemClock.current_year()));
            }
            Ok(())
        }
    }
}

fn show_slots(date: &str) -> studio_booking::Result<()> {
    let parsed = parse_form_date(date).ok_or_else(|| BookingError::ValidationError {
        message: format!("'{}' is not a YYYY-MM-DD date", date),
    })?;

    let form = MemoryForm::new(studio_booking::core::FormData::new().with("date", date));
    let mut controller = BookingFormController::new(form, NoRelay, ConsoleNotifier, SystemClock);
    controller.on_date_changed();

    println!("📅 {}", format_date_it(parsed));
    for option in controller.form().time_options() {
        if option.disabled {
            println!("   ({})", option.label);
        } else {
            println!("   {}", option.label);
        }
    }
    Ok(())
}

async fn submit(args: SubmitArgs, config: &SiteConfig) -> studio_booking::Result<()> {
    let form = MemoryForm::new(args.to_form_data());

    if args.dry_run {
        let mut controller = BookingFormController::new(form, NoRelay, ConsoleNotifier, SystemClock);
        let result = controller.validate();
        if result.is_valid() {
            println!("✅ Richiesta valida (dry run, nessun invio)");
            return Ok(());
        }
        return Err(BookingError::ValidationError {
            message: format!("invalid fields: {:?}", result.failed_fields()),
        });
    }

    let relay = HttpRelay::from_config(config)?;
    tracing::info!("📮 Submitting booking to {}", relay.endpoint());
    let mut controller = BookingFormController::new(form, relay, ConsoleNotifier, SystemClock);

    match controller.submit().await {
        SubmitReport::Submitted(RelayOutcome::Success) | SubmitReport::Ignored => Ok(()),
        SubmitReport::Submitted(RelayOutcome::Error(reason)) => {
            Err(BookingError::SubmissionFailed { reason })
        }
        SubmitReport::Invalid(result) => Err(BookingError::ValidationError {
            message: format!("invalid fields: {:?}", result.failed_fields()),
        }),
    }
}

fn consent(action: ConsentAction, config: &SiteConfig) -> studio_booking::Result<()> {
    let store = FileStore::open(config.store_path())?;
    tracing::debug!("Consent store at {}", store.path().display());
    let mut manager = ConsentManager::new(store);
    let mut surface = TerminalSurface::new(&[GatedSection::Booking, GatedSection::ContactForm]);

    match action {
        ConsentAction::Show => {
            let preference = manager.on_page_load(&mut surface)?;
            println!("🍪 Consent: {:?}", preference.consent);
            manager.open_settings(&mut surface)?;
        }
        ConsentAction::AcceptAll => {
            manager.accept_all_on(&mut surface)?;
        }
        ConsentAction::AcceptEssential => {
            manager.accept_essential_on(&mut surface)?;
        }
        ConsentAction::Custom {
            analytics,
            calendly,
        } => {
            manager.save_settings_on(&mut surface, analytics, calendly)?;
        }
        ConsentAction::Reset => {
            manager.reset()?;
            println!("🍪 Preferenze cookie cancellate");
        }
    }
    Ok(())
}

/// Stand-in relay for commands that never submit.
struct NoRelay;

#[async_trait::async_trait]
impl studio_booking::core::RelayClient for NoRelay {
    async fn submit(&self, _fields: &[(String, String)]) -> studio_booking::Result<()> {
        Err(BookingError::ValidationError {
            message: "this command does not submit".to_string(),
        })
    }
}
