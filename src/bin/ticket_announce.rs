//! Resolves the audio segments that announce one queue ticket.
//!
//! Prints the asset ids in playback order, one per line, for a player to pick
//! up. The catalog comes from a manifest, a scanned audio directory, or (by
//! default) the stock naming convention.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use ticket_voice::lexicon::{notice_text, DEFAULT_CLINIC_NAMES};
use ticket_voice::{
    Announcement, NamingConvention, SegmentCatalog, SegmentResolver, MAX_TICKET_NUMBER,
};

#[derive(Parser)]
#[command(version, about = "Resolve the audio segments announcing a clinic queue ticket")]
struct Cli {
    /// Ticket number to announce (0-999)
    #[arg(
        allow_negative_numbers = true,
        required_unless_present_any = ["check", "notice"],
        conflicts_with = "notice"
    )]
    number: Option<i64>,

    /// Clinic the ticket is called to
    #[arg(short, long)]
    clinic: Option<u32>,

    /// Directory holding the recorded segments
    #[arg(long, conflicts_with = "manifest")]
    audio_dir: Option<PathBuf>,

    /// Directory holding the fixed notices (welcome, closing, ...)
    #[arg(long, requires = "audio_dir")]
    notice_dir: Option<PathBuf>,

    /// JSON manifest listing segment assets
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// JSON naming convention overriding the stock file names
    #[arg(long, conflicts_with = "manifest")]
    naming: Option<PathBuf>,

    /// Play a fixed notice by name instead of a ticket
    #[arg(long)]
    notice: Option<String>,

    /// Verify that every ticket can be announced
    #[arg(long)]
    check: bool,

    /// Print the Arabic text instead of asset ids
    #[arg(long, conflicts_with = "json")]
    text: bool,

    /// Print the announcement as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let naming = match &cli.naming {
        Some(path) => NamingConvention::from_json_file(path)?,
        None => NamingConvention::default(),
    };

    let catalog = if let Some(path) = &cli.manifest {
        SegmentCatalog::load_manifest(path)?
    } else if let Some(dir) = &cli.audio_dir {
        let catalog = SegmentCatalog::scan_dir(dir, &naming)?;
        match &cli.notice_dir {
            Some(notices) => catalog.scan_notices(notices, &naming)?,
            None => catalog,
        }
    } else {
        SegmentCatalog::from_naming(&naming, DEFAULT_CLINIC_NAMES.iter().map(|(id, _)| *id))
    };

    if cli.check {
        catalog.ensure_coverage(MAX_TICKET_NUMBER)?;
        println!("All {} segments present", catalog.len());
    }

    if let Some(name) = &cli.notice {
        let asset = catalog.resolve_notice(name)?;
        if cli.text {
            println!("{}", notice_text(name).unwrap_or_default());
        } else if cli.json {
            println!("{}", serde_json::json!({ "notice": name, "asset": asset }));
        } else {
            println!("{asset}");
        }
        return Ok(());
    }

    let Some(number) = cli.number else {
        return Ok(());
    };
    let announcement = Announcement::for_ticket(number, cli.clinic, &catalog)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&announcement)?);
    } else if cli.text {
        println!("{}", announcement.spoken_text(&DEFAULT_CLINIC_NAMES));
    } else {
        for asset in &announcement.assets {
            println!("{asset}");
        }
    }
    Ok(())
}
