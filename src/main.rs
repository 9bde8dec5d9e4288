use clap::{Parser, Subcommand};
use log::debug;
use serde_json::json;
use wishlist_autofill::{
    AutofillConfig, CurrencyFormat, ItemAutofill, ItemDraft, MetadataExtractor, MonetaryAmount,
};

#[derive(Parser)]
#[command(name = "wishlist-autofill", version, about = "Fill wishlist items from product links")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a product page and print the extracted price and Open Graph data
    Extract {
        url: String,
        /// Include the raw page HTML in the output
        #[arg(long)]
        include_html: bool,
    },
    /// Fill a new item draft from a product link
    Autofill { url: String },
    /// Convert between stored minor units and displayed amounts
    Money {
        #[command(subcommand)]
        command: MoneyCommand,
    },
}

#[derive(Subcommand)]
enum MoneyCommand {
    /// Format stored minor units, e.g. 123456 -> ₱1,234.56
    Format {
        #[arg(allow_hyphen_values = true)]
        minor_units: i64,
        /// Leave out the currency symbol
        #[arg(long)]
        bare: bool,
    },
    /// Parse a typed amount into minor units, e.g. "₱1,234.56" -> 123456
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AutofillConfig::load()?;
    debug!("{:#?}", config);

    match cli.command {
        Command::Extract { url, include_html } => {
            let extractor = MetadataExtractor::new(&config)?;
            let mut result = extractor.extract(&url).await;
            if !include_html {
                result = result.without_html();
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Autofill { url } => {
            let autofill = ItemAutofill::new(&config)?;
            let mut draft = ItemDraft::default();
            let outcome = autofill.fill_draft(&mut draft, &url).await;
            let output = json!({
                "draft": draft,
                "outcome": outcome,
                "notice": outcome.notice().map(|n| n.message()),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Money { command } => match command {
            MoneyCommand::Format { minor_units, bare } => {
                let amount = MonetaryAmount::from_integer(minor_units);
                if bare {
                    println!("{}", amount.format_with(&CurrencyFormat::php().without_symbol()));
                } else {
                    println!("{amount}");
                }
            }
            MoneyCommand::Parse { text } => {
                println!("{}", MonetaryAmount::new(text.as_str()).to_integer());
            }
        },
    }

    Ok(())
}
