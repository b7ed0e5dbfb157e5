use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;
use whatsaterminal::adapters::inbound::ConsoleMenu;
use whatsaterminal::adapters::outbound::console::{CropTable, StderrProgressReporter};
use whatsaterminal::adapters::outbound::filesystem::{XlsxCropExporter, DEFAULT_EXPORT_FILE};
use whatsaterminal::adapters::outbound::network::{
    CachingSpreadsheetRepository, GoogleSheetsClient, ServiceAccountTokenProvider,
    StaticTokenProvider,
};
use whatsaterminal::application::dto::ExportRequest;
use whatsaterminal::application::use_cases::{CropInventoryUseCase, ExportCropsUseCase};
use whatsaterminal::cli::{Args, Command, SheetArg};
use whatsaterminal::config::{discover_config, load_config_from_path, ConfigFile};
use whatsaterminal::inventory::domain::{SheetLayout, SpreadsheetId};
use whatsaterminal::ports::inbound::{RowWriteOutcome, SheetsApplicationPort};
use whatsaterminal::ports::outbound::AccessTokenProvider;
use whatsaterminal::shared::error::{ExitCode, SheetsError};
use whatsaterminal::shared::Result;

const DEFAULT_APPLICATION_NAME: &str = "Whats a Terminal";

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(colors_enabled(args.no_color, std::io::stderr().is_terminal()));

    match run(args).await {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(ansi: bool) {
    let filter = EnvFilter::try_from_env("WHATSATERMINAL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .init();
}

fn colors_enabled(no_color: bool, is_terminal: bool) -> bool {
    !no_color && is_terminal && std::env::var_os("NO_COLOR").is_none()
}

/// How requests to the Sheets API are authorized
#[derive(Clone, PartialEq, Eq)]
enum Credentials {
    ServiceAccount(PathBuf),
    AccessToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ServiceAccount(path) => {
                f.debug_tuple("ServiceAccount").field(path).finish()
            }
            Credentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
        }
    }
}

/// Command-line values merged over the config file
#[derive(Debug)]
struct Settings {
    spreadsheet_id: SpreadsheetId,
    credentials: Credentials,
    application_name: String,
    default_sheet: Option<String>,
    export_path: PathBuf,
    layout: SheetLayout,
    api_base_url: Option<String>,
    colored: bool,
}

impl Settings {
    /// Precedence: command line (and its env vars), then config file, then defaults
    fn resolve(args: &Args, config: ConfigFile) -> Result<Self> {
        let spreadsheet_id = args
            .spreadsheet_id
            .clone()
            .or(config.spreadsheet_id)
            .ok_or(SheetsError::MissingSpreadsheetId)?;

        let credentials = match (&args.access_token, &args.credentials) {
            (Some(token), _) => Credentials::AccessToken(token.clone()),
            (None, Some(path)) => Credentials::ServiceAccount(path.clone()),
            (None, None) => config
                .credentials_path
                .map(Credentials::ServiceAccount)
                .ok_or(SheetsError::MissingCredentials)?,
        };

        let layout = match config.layout {
            Some(layout) => layout.to_layout()?,
            None => SheetLayout::default(),
        };

        Ok(Self {
            spreadsheet_id: SpreadsheetId::new(spreadsheet_id)?,
            credentials,
            application_name: config
                .application_name
                .unwrap_or_else(|| DEFAULT_APPLICATION_NAME.to_string()),
            default_sheet: config.default_sheet,
            export_path: config
                .export_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE)),
            layout,
            api_base_url: args.api_base_url.clone(),
            colored: colors_enabled(args.no_color, std::io::stdout().is_terminal()),
        })
    }

    fn sheet(&self, arg: SheetArg) -> Result<String> {
        arg.sheet
            .or_else(|| self.default_sheet.clone())
            .ok_or_else(|| {
                SheetsError::validation(
                    "No sheet given. Pass --sheet or set default_sheet in the config file",
                )
                .into()
            })
    }
}

fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => Ok(discover_config(&std::env::current_dir()?)?.unwrap_or_default()),
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;
    let settings = Settings::resolve(&args, config)?;
    tracing::debug!(?settings, "resolved settings");

    match settings.credentials.clone() {
        Credentials::AccessToken(token) => {
            run_with(StaticTokenProvider::new(token)?, settings, args.command).await
        }
        Credentials::ServiceAccount(path) => {
            let provider = ServiceAccountTokenProvider::from_file(&path)?;
            tracing::info!(client_email = %provider.key().client_email, "using service account");
            run_with(provider, settings, args.command).await
        }
    }
}

async fn run_with<T: AccessTokenProvider>(
    token_provider: T,
    settings: Settings,
    command: Command,
) -> Result<ExitCode> {
    let mut client = GoogleSheetsClient::new(token_provider, &settings.application_name)?;
    if let Some(base_url) = &settings.api_base_url {
        client = client.with_base_url(base_url.clone());
    }

    let inventory = CropInventoryUseCase::new(
        CachingSpreadsheetRepository::new(client),
        StderrProgressReporter::new(),
        settings.spreadsheet_id.clone(),
        settings.layout,
    );
    let table = CropTable::new(settings.colored);

    match command {
        Command::Check => {
            inventory.test_connection().await?;
        }
        Command::Sheets => {
            let ids = inventory.sheet_names_and_ids().await?;
            for title in inventory.available_sheets().await? {
                match ids.get(&title) {
                    Some(id) => println!("{}\t{}", title, id),
                    None => println!("{}", title),
                }
            }
        }
        Command::List { sheet } => {
            let sheet = settings.sheet(sheet)?;
            let crops = inventory.items_in_sheet(&sheet).await?;
            if !crops.is_empty() {
                print!("{}", table.render(&crops));
            }
        }
        Command::Show { sheet, crop_id } => {
            let sheet = settings.sheet(sheet)?;
            match inventory.check_and_display_crop(&sheet, crop_id).await? {
                Some(crop) => println!("{}", table.render_one(&crop)),
                None => return Ok(ExitCode::CropNotFound),
            }
        }
        Command::Add(crop) => {
            let sheet = settings.sheet(crop.sheet.clone())?;
            let crop = crop.into_input(sheet).into_crop()?;
            inventory.add_data_row(&crop).await?;
        }
        Command::Update(crop) => {
            let sheet = settings.sheet(crop.sheet.clone())?;
            let crop = crop.into_input(sheet).into_crop()?;
            return Ok(exit_code_for(inventory.update_data_row(&crop).await?));
        }
        Command::Delete { sheet, crop_id } => {
            let sheet = settings.sheet(sheet)?;
            return Ok(exit_code_for(
                inventory.delete_data_row(&sheet, crop_id).await?,
            ));
        }
        Command::Export { sheets, output } => {
            let exporter =
                XlsxCropExporter::new(output.unwrap_or_else(|| settings.export_path.clone()));
            ExportCropsUseCase::new(&inventory, exporter, inventory.progress_reporter())
                .execute(ExportRequest::new(sheets))
                .await?;
        }
        Command::Menu { sheet } => {
            let sheet = settings.sheet(sheet)?;
            let stdin = std::io::stdin();
            ConsoleMenu::new(&inventory, sheet, stdin.lock(), std::io::stdout())
                .with_colors(settings.colored)
                .run()
                .await?;
        }
    }

    Ok(ExitCode::Success)
}

fn exit_code_for(outcome: RowWriteOutcome) -> ExitCode {
    if outcome.is_not_found() {
        ExitCode::CropNotFound
    } else {
        ExitCode::Success
    }
}
