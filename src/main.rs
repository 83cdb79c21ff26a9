//! # Docsmith CLI
//!
//! Command-line interface for rendering store documents.
//!
//! ## Usage
//!
//! ```bash
//! # List template kinds
//! docsmith kinds
//!
//! # Render the stored invoice template
//! docsmith render invoice --settings settings.json --order order.json \
//!     --document invoice.json --out invoice.pdf
//!
//! # Preview another layout
//! docsmith render packing-slip --kind BASIC_SMALL --settings settings.json \
//!     --order order.json --document slip.json --out slip.pdf
//!
//! # Check settings against a template
//! docsmith validate invoice --kind BASIC_LOGO --settings settings.json
//!
//! # Next display number
//! docsmith next-number --format "INV-{invoice_number}" --last 41
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use docsmith::{
    DocsmithError, DocumentType, InvoiceTemplateKind, PackingSlipTemplateKind, RenderConfig,
    generator::{generate_for_kind_name, validate_input_for_kind},
    model::{DocumentSettings, InvoiceData, Order, PackingSlipData, StoreDetail},
    numbering::next_display_number,
    resolve::LogoResolver,
    templates::resolve_kind,
};

/// Docsmith - invoice and packing slip generator
#[derive(Parser, Debug)]
#[command(name = "docsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding TrueType fonts (overrides DOCSMITH_FONT_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    font_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DocArg {
    Invoice,
    PackingSlip,
}

impl From<DocArg> for DocumentType {
    fn from(arg: DocArg) -> Self {
        match arg {
            DocArg::Invoice => DocumentType::Invoice,
            DocArg::PackingSlip => DocumentType::PackingSlip,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a document to PDF
    Render {
        #[arg(value_enum)]
        document: DocArg,

        /// Template kind (defaults to the one stored in the settings)
        #[arg(long)]
        kind: Option<String>,

        /// Document settings JSON
        #[arg(long, value_name = "FILE")]
        settings: PathBuf,

        /// Order JSON
        #[arg(long, value_name = "FILE")]
        order: PathBuf,

        /// Invoice or packing slip JSON (display number and date)
        #[arg(long = "document", value_name = "FILE")]
        document_data: PathBuf,

        /// Logo image to use instead of fetching the configured source
        #[arg(long, value_name = "FILE")]
        logo: Option<PathBuf>,

        /// Output PDF
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Check settings against a template kind
    Validate {
        #[arg(value_enum)]
        document: DocArg,

        #[arg(long)]
        kind: String,

        #[arg(long, value_name = "FILE")]
        settings: PathBuf,
    },

    /// List template kinds
    Kinds,

    /// Print the next display number
    NextNumber {
        /// Format containing {invoice_number}
        #[arg(long)]
        format: Option<String>,

        /// Last issued number
        #[arg(long)]
        last: Option<u64>,

        /// Forced number
        #[arg(long)]
        forced: Option<u64>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DocsmithError> {
    let cli = Cli::parse();

    let mut config = RenderConfig::from_env();
    if let Some(dir) = &cli.font_dir {
        config = config.with_font_dir(dir);
    }

    match cli.command {
        Commands::Render {
            document,
            kind,
            settings,
            order,
            document_data,
            logo,
            out,
        } => {
            let settings: DocumentSettings = read_json(&settings)?;
            let order: Order = read_json(&order)?;
            let kind = kind.unwrap_or_else(|| stored_kind(document, &settings));
            let needs_logo = matches!(document, DocArg::Invoice)
                && kind.parse::<InvoiceTemplateKind>().ok() == Some(InvoiceTemplateKind::BasicLogo);
            let store = store_detail(&settings, logo.as_deref(), needs_logo)?;

            let doc_type = DocumentType::from(document);
            let pdf = match document {
                DocArg::Invoice => {
                    let data: InvoiceData = read_json(&document_data)?;
                    let heading = data.heading();
                    generate_for_kind_name(
                        doc_type, &kind, &settings, heading, &order, &store, &config,
                    )?
                }
                DocArg::PackingSlip => {
                    let data: PackingSlipData = read_json(&document_data)?;
                    let heading = data.heading();
                    generate_for_kind_name(
                        doc_type, &kind, &settings, heading, &order, &store, &config,
                    )?
                }
            };

            std::fs::write(&out, &pdf)?;
            println!("Saved {} ({} bytes) to {}", kind, pdf.len(), out.display());
        }

        Commands::Validate {
            document,
            kind,
            settings,
        } => {
            let settings: DocumentSettings = read_json(&settings)?;
            let validation = validate_input_for_kind(document.into(), &kind, &settings);
            println!("{}", serde_json::to_string_pretty(&validation)?);
            if !validation.ok {
                std::process::exit(2);
            }
        }

        Commands::Kinds => {
            println!("Invoice templates:");
            for kind in InvoiceTemplateKind::ALL {
                println!("  {}", kind);
            }
            println!("\nPacking slip templates:");
            for kind in PackingSlipTemplateKind::ALL {
                println!("  {}", kind);
            }
        }

        Commands::NextNumber {
            format,
            last,
            forced,
        } => {
            println!("{}", next_display_number(format.as_deref(), last, forced)?);
        }
    }

    Ok(())
}

/// Kind stored in the settings, or the default one.
fn stored_kind(document: DocArg, settings: &DocumentSettings) -> String {
    match document {
        DocArg::Invoice => resolve_kind(None, settings.invoice_template).to_string(),
        DocArg::PackingSlip => resolve_kind(None, settings.packing_slip_template).to_string(),
    }
}

/// Logo from `--logo`, else fetched from the configured source when the
/// layout prints one.
fn store_detail(
    settings: &DocumentSettings,
    logo: Option<&Path>,
    needs_logo: bool,
) -> Result<StoreDetail, DocsmithError> {
    if let Some(path) = logo {
        return Ok(StoreDetail::with_logo(std::fs::read(path)?));
    }
    if !needs_logo {
        return Ok(StoreDetail::default());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let resolver = LogoResolver::new()?;
        resolver.store_detail(settings).await
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DocsmithError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
