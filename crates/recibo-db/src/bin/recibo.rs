//! # recibo
//!
//! Admin CLI for the receipt store.
//!
//! ## Usage
//! ```bash
//! # Backups (default file: RECIBO_BACKUP_FILE or backup-recibos.json)
//! recibo export
//! recibo export --output - > copia.json
//! recibo import copia.json
//!
//! # Stored receipts
//! recibo list --search maria
//! recibo show 6f1c...
//! recibo delete 6f1c...
//!
//! # Helpers
//! recibo words 1.500,50
//! recibo check-doc cnpj 06.227.875/0001-07
//! recibo warranty 12
//! ```
//!
//! Logs go to stderr; `RUST_LOG` sets the level (default `info`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use recibo_core::taxpayer::{self, TaxpayerKind};
use recibo_core::warranty::{to_canonical, DayConvention, WarrantyDuration};
use recibo_core::{Money, WarrantyReceipt};
use recibo_db::{AppConfig, BackupService, Database};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "recibo", version, about = "Recibos de garantia: backup e consulta")]
struct Cli {
    /// SQLite database file (overrides RECIBO_DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write every stored receipt to a backup file.
    Export {
        /// Output file, or `-` for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a receipt for every valid record of a backup file.
    Import {
        /// Backup file (defaults to RECIBO_BACKUP_FILE)
        file: Option<PathBuf>,
    },

    /// List stored receipts, newest first.
    List {
        /// Filter by customer name, CPF, IMEI, brand or model
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print one stored receipt as JSON.
    Show { id: String },

    /// Delete a stored receipt.
    Delete { id: String },

    /// Write an amount out in words.
    Words {
        /// Amount such as `1500.50`, `1.500,50` or `R$ 1.500,50`
        amount: String,
    },

    /// Check a CPF or CNPJ.
    CheckDoc {
        #[arg(value_enum)]
        kind: DocKind,
        value: String,
    },

    /// Print the duration string and disclaimer for a warranty.
    Warranty {
        months: u32,

        /// Days per month (overrides RECIBO_DAY_CONVENTION)
        #[arg(long, value_enum)]
        convention: Option<ConventionArg>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DocKind {
    Cpf,
    Cnpj,
}

impl From<DocKind> for TaxpayerKind {
    fn from(kind: DocKind) -> Self {
        match kind {
            DocKind::Cpf => TaxpayerKind::Cpf,
            DocKind::Cnpj => TaxpayerKind::Cnpj,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ConventionArg {
    #[value(name = "30")]
    Commercial,
    #[value(name = "30.44")]
    Average,
}

impl From<ConventionArg> for DayConvention {
    fn from(arg: ConventionArg) -> Self {
        match arg {
            ConventionArg::Commercial => DayConvention::Commercial,
            ConventionArg::Average => DayConvention::AverageMonth,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(1);
        }
    };
    if let Some(path) = cli.database {
        config.database_path = path;
    }

    match run(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::from(1)
        }
    }
}

async fn run(command: Commands, config: &AppConfig) -> CliResult<ExitCode> {
    match command {
        Commands::Export { output } => {
            let db = open(config).await?;
            let text = BackupService::new(db.receipts()).export_all().await?;

            let target = output.unwrap_or_else(|| config.backup_file.clone());
            if target.as_os_str() == "-" {
                println!("{text}");
            } else {
                tokio::fs::write(&target, text).await?;
                info!(file = %target.display(), "Backup written");
            }
        }

        Commands::Import { file } => {
            let source = file.unwrap_or_else(|| config.backup_file.clone());
            let text = tokio::fs::read_to_string(&source).await?;

            let db = open(config).await?;
            let imported = BackupService::new(db.receipts()).import_all(&text).await?;
            println!("{imported} recibo(s) importado(s)");
        }

        Commands::List { search } => {
            let db = open(config).await?;
            let receipts = match search {
                Some(term) => db.receipts().search(&term).await?,
                None => db.receipts().list_all().await?,
            };
            for receipt in &receipts {
                println!("{}", summary_line(receipt));
            }
            info!(count = receipts.len(), "Receipts listed");
        }

        Commands::Show { id } => {
            let db = open(config).await?;
            match db.receipts().get_by_id(&id).await? {
                Some(receipt) => {
                    println!("{}", serde_json::to_string_pretty(&receipt)?);
                    println!("{}", receipt.data.warranty(config.day_convention).warranty_text);
                }
                None => {
                    error!(id = %id, "Receipt not found");
                    return Ok(ExitCode::from(2));
                }
            }
        }

        Commands::Delete { id } => {
            let db = open(config).await?;
            db.receipts().delete(&id).await?;
            println!("Recibo {id} excluído");
        }

        Commands::Words { amount } => {
            let amount = Money::parse_brl(&amount)?;
            println!("{}", amount.to_words());
        }

        Commands::CheckDoc { kind, value } => {
            let kind = TaxpayerKind::from(kind);
            let formatted = taxpayer::format(kind, &value);
            if taxpayer::validate(kind, &value) {
                println!("{kind} {formatted} válido");
            } else {
                println!("{kind} {formatted} inválido");
                return Ok(ExitCode::from(2));
            }
        }

        Commands::Warranty { months, convention } => {
            let convention = convention.map(DayConvention::from).unwrap_or(config.day_convention);
            let canonical = to_canonical(months, convention)?;
            println!("{canonical}");
            if let Some(duration) = WarrantyDuration::parse(&canonical) {
                println!("{}", duration.warranty_text());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn open(config: &AppConfig) -> CliResult<Database> {
    Ok(Database::new(config.db_config()).await?)
}

fn summary_line(receipt: &WarrantyReceipt) -> String {
    let data = &receipt.data;
    format!(
        "{}  {}  {}  {}  {} {}  {}",
        receipt.id,
        receipt.created_at.format("%d/%m/%Y %H:%M"),
        data.customer_name,
        data.cpf,
        data.brand,
        data.model,
        data.sale_value,
    )
}
