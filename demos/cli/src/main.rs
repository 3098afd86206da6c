use std::path::PathBuf;

use anyhow::Context;
use ccda_core::{cda_time, ClinicalDocument, ExtractConfig, SectionCatalog};
use ccda_parser::extract_document_value;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "ccda-cli",
    about = "Đọc tài liệu C-CDA (XML) và in tóm tắt các section lâm sàng."
)]
struct Args {
    /// Đường dẫn tới file XML C-CDA.
    #[arg(short, long)]
    input: PathBuf,

    /// File JSON cấu hình trích xuất (tùy chọn).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// In toàn bộ kết quả dạng JSON thay vì tóm tắt.
    #[arg(long)]
    json: bool,

    /// Tăng mức log (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file cấu hình {path:?}"))?;
            serde_json::from_str::<ExtractConfig>(&raw)
                .with_context(|| format!("Cấu hình không hợp lệ trong {path:?}"))?
        }
        None => ExtractConfig::default(),
    };
    debug!(?config, "extract config");

    let xml = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Không đọc được file {:?}", args.input))?;
    let tree = ccda_xml::xml_to_tree(&xml)
        .with_context(|| format!("XML không hợp lệ trong {:?}", args.input))?;
    let document = extract_document_value(&tree, &SectionCatalog::standard(), &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print_summary(&document);
    }

    Ok(())
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn print_summary(document: &ClinicalDocument) {
    let meta = &document.metadata;
    println!(
        "Document: {} ({})\nC-CDA version: {}",
        meta.effective_kind.display_name(),
        meta.document_kind,
        meta.document_version
    );

    if let Some(patient) = &document.patient {
        let name = patient
            .name
            .as_ref()
            .map(|name| name.full.as_str())
            .unwrap_or("-");
        let birth = patient
            .date_of_birth
            .as_deref()
            .map(cda_time::display_date)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "Patient: {name} | MRN {} | born {birth}",
            patient.mrn.as_deref().unwrap_or("-")
        );
    }

    println!("Sections:");
    for id in &meta.supported_sections {
        if id.is_header_based() {
            continue;
        }
        let Some(section) = document.section_metadata.get(id) else {
            continue;
        };
        let marker = if document.is_section_populated(*id) { "*" } else { " " };
        println!(
            "  {marker} {:<28} entries: {}",
            section.title.as_deref().unwrap_or(id.as_str()),
            section.entry_count
        );
    }

    if !meta.warnings.is_empty() {
        println!("Warnings:");
        for warning in &meta.warnings {
            match serde_json::to_string(warning) {
                Ok(text) => println!("  {text}"),
                Err(_) => println!("  {warning:?}"),
            }
        }
    }
}
