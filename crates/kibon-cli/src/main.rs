mod logger;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kibon", about = "Kibon training card PDF generator", version)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the card deck to PDF
    Generate {
        /// Card data (category → subcategory → cards)
        #[arg(short, long, default_value = "kibon.yaml")]
        data: PathBuf,

        /// Colors and icons per subcategory
        #[arg(short, long, default_value = "config.yaml")]
        styles: PathBuf,

        /// Output PDF file
        #[arg(short, long, default_value = "kibon.pdf")]
        output: PathBuf,

        /// Options JSON (see `init-options`); flags below override it
        #[arg(long)]
        options: Option<PathBuf>,

        /// Directory holding the Open Sans TTF files
        #[arg(long)]
        fonts_dir: Option<PathBuf>,

        /// Directory holding the SVG icons
        #[arg(long)]
        images_dir: Option<PathBuf>,

        /// Front face decoration
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,

        /// Faces that get corner cutting guides
        #[arg(long, value_enum)]
        guides: Option<GuidesArg>,

        /// Separator before the `t=` timestamp parameter
        #[arg(long, value_enum)]
        delimiter: Option<DelimiterArg>,

        /// Output paper size
        #[arg(long, value_enum)]
        paper: Option<PaperArg>,

        /// Mirror back-page columns for long-edge duplex printing
        #[arg(long)]
        mirror_backs: bool,
    },

    /// Count cards and pages without rendering
    Stats {
        /// Card data (category → subcategory → cards)
        #[arg(short, long, default_value = "kibon.yaml")]
        data: PathBuf,
    },

    /// Write the default options as JSON
    InitOptions {
        #[arg(short, long, default_value = "kibon-options.json")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Plain,
    Banded,
    Embossed,
}

#[derive(Clone, Copy, ValueEnum)]
enum GuidesArg {
    None,
    Front,
    Back,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
enum DelimiterArg {
    Question,
    Ampersand,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A3,
    A4,
    A5,
    Letter,
}

impl From<VariantArg> for kibon_cards::StyleVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Plain => Self::Plain,
            VariantArg::Banded => Self::Banded,
            VariantArg::Embossed => Self::Embossed,
        }
    }
}

impl From<GuidesArg> for kibon_cards::GuidePlacement {
    fn from(arg: GuidesArg) -> Self {
        match arg {
            GuidesArg::None => Self::None,
            GuidesArg::Front => Self::Front,
            GuidesArg::Back => Self::Back,
            GuidesArg::Both => Self::Both,
        }
    }
}

impl From<DelimiterArg> for kibon_cards::QueryDelimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Question => Self::Question,
            DelimiterArg::Ampersand => Self::Ampersand,
        }
    }
}

impl From<PaperArg> for kibon_cards::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(logger::level_for(cli.verbose))
        .init()
        .context("installing logger")?;

    match cli.command {
        Commands::Generate {
            data,
            styles,
            output,
            options,
            fonts_dir,
            images_dir,
            variant,
            guides,
            delimiter,
            paper,
            mirror_backs,
        } => {
            let mut opts = match &options {
                Some(path) => kibon_cards::DeckOptions::load(path)
                    .await
                    .with_context(|| format!("loading options from {}", path.display()))?,
                None => kibon_cards::DeckOptions::default(),
            };
            if let Some(dir) = fonts_dir {
                opts.fonts = kibon_cards::FontPaths::in_dir(dir);
            }
            if let Some(dir) = images_dir {
                opts.images_dir = dir;
            }
            if let Some(variant) = variant {
                opts.policy.variant = variant.into();
            }
            if let Some(guides) = guides {
                opts.policy.guides = guides.into();
            }
            if let Some(delimiter) = delimiter {
                opts.policy.query_delimiter = delimiter.into();
            }
            if let Some(paper) = paper {
                opts.paper = paper.into();
            }
            if mirror_backs {
                opts.policy.back_mirroring = kibon_cards::BackMirroring::LongEdge;
            }

            let deck = kibon_cards::load_deck(&data)
                .await
                .with_context(|| format!("reading {}", data.display()))?;
            let style_table = kibon_cards::load_styles(&styles)
                .await
                .with_context(|| format!("reading {}", styles.display()))?;

            kibon_cards::generate_pdf(&deck, &style_table, &opts, &output).await?;
            println!("PDF created: {}", output.display());
        }

        Commands::Stats { data } => {
            let deck = kibon_cards::load_deck(&data)
                .await
                .with_context(|| format!("reading {}", data.display()))?;
            let stats =
                kibon_cards::calculate_statistics(&deck, &kibon_cards::DeckOptions::default());
            println!("Deck Statistics:");
            println!("  Categories: {}", stats.categories);
            println!("  Subcategories: {}", stats.subcategories);
            println!("  Cards: {}", stats.cards);
            println!("  Sheets: {}", stats.page_pairs);
            println!("  Pages: {}", stats.pages);
            if stats.cards > 0 {
                println!("  Cards on last sheet: {}", stats.last_batch);
            }
        }

        Commands::InitOptions { output } => {
            kibon_cards::DeckOptions::default().save(&output).await?;
            println!("Options written → {}", output.display());
        }
    }

    Ok(())
}
