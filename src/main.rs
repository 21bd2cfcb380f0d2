//! pokelang command line
//!
//! Translates a text file from one coded language into another, copying all
//! non-word text unchanged.
//!
//! ```bash
//! pokelang --from english --to pika story.txt story.pika.txt
//! pokelang --languages ./languages --list
//! ```

use clap::Parser;
use pokelang_core::{OnWordError, TranslatorBuilder, TranslatorConfig};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "pokelang")]
#[command(about = "Transcode text between prefix-coded languages")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of language documents (.toml / .json); bundled languages otherwise
    #[arg(long)]
    languages: Option<PathBuf>,

    /// Source language name
    #[arg(long)]
    from: Option<String>,

    /// Destination language name
    #[arg(long)]
    to: Option<String>,

    /// Copy untranslatable words unchanged instead of aborting
    #[arg(long)]
    keep_untranslatable: bool,

    /// List the available languages and exit
    #[arg(long)]
    list: bool,

    /// Log loading and translation details
    #[arg(short, long)]
    verbose: bool,

    /// Input file
    #[arg(required_unless_present = "list")]
    input: Option<PathBuf>,

    /// Output file; stdout when omitted
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::default(),
    };
    if let Some(dir) = args.languages {
        config.languages_dir = Some(dir);
    }
    if let Some(from) = args.from {
        config.from = from;
    }
    if let Some(to) = args.to {
        config.to = to;
    }
    if args.keep_untranslatable {
        config.on_word_error = OnWordError::KeepOriginal;
    }

    let (builder, report) = TranslatorBuilder::new().with_config(config).load_languages()?;
    for (path, e) in &report.rejected {
        eprintln!("skipping {}: {}", path.display(), e);
    }

    if args.list {
        for name in builder.registry.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let (_registry, translator) = builder.build()?;
    let Some(input) = args.input else {
        return Err("missing input file".into());
    };
    let text = std::fs::read_to_string(&input)?;
    let translation = translator.translate(&text)?;

    if !translation.skipped.is_empty() {
        eprintln!("{} words left untranslated", translation.skipped.len());
    }
    match args.output {
        Some(path) => std::fs::write(path, translation.text)?,
        None => print!("{}", translation.text),
    }
    Ok(())
}
