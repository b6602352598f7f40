use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use salladsbaren::catalog::{load_catalog, Catalog};
use salladsbaren::cli::{Cli, Command};
use salladsbaren::config::{ReceiptFormat, Settings};
use salladsbaren::error::Result;
use salladsbaren::interface::{
    display_menu, display_receipt_saved, display_recommendation, prompt_extras,
    prompt_ingredients, prompt_salad_choice, prompt_yes_no,
};
use salladsbaren::matcher::{price_order, recommend, Recommendation};
use salladsbaren::receipt::{read_receipt, write_receipt};
use salladsbaren::session::Session;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "salladsbaren=warn",
        1 => "salladsbaren=info",
        _ => "salladsbaren=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings();
    let command = cli.command.unwrap_or_default();

    // Verifying a receipt does not need the data files.
    if let Command::Verify { path } = &command {
        return cmd_verify(path);
    }

    let catalog = load_catalog(&settings.ingredients_path, &settings.salads_path)?;
    debug!(matching = %settings.matching, "catalog ready");

    match command {
        Command::Order { receipt, format } => {
            let path = receipt.unwrap_or_else(|| format.default_path());
            cmd_order(&catalog, &settings, path, format)
        }
        Command::Menu => {
            display_menu(&catalog);
            Ok(())
        }
        Command::Recommend { selected } => cmd_recommend(&catalog, &settings, &selected),
        Command::Price { salad, extras } => cmd_price(&catalog, &salad, &extras),
        Command::Verify { .. } => Ok(()),
    }
}

/// Interactive order: ingredients, recommendation, extras, receipt.
fn cmd_order(
    catalog: &Catalog,
    settings: &Settings,
    receipt_path: PathBuf,
    format: ReceiptFormat,
) -> Result<()> {
    let mut session = Session::new(catalog, settings.matching);

    loop {
        let picked = prompt_ingredients(catalog, session.selection())?;
        session.set_selection(&picked)?;

        let recommendation = session.search()?;
        display_recommendation(recommendation);

        if !recommendation.is_match() {
            if prompt_yes_no("Försöka igen?", true)? {
                continue;
            }
            return Ok(());
        }

        if let Recommendation::Complete(matches) = recommendation {
            if matches.len() > 1 {
                let name = prompt_salad_choice(matches)?;
                session.choose(&name)?;
            }
        }

        if prompt_yes_no("Lägg till extra ingredienser?", false)? {
            session.begin_extras()?;
            let extras = prompt_extras(catalog)?;
            session.set_extras(&extras)?;
        }

        let salad = session.chosen().map(|s| s.name.as_str()).unwrap_or_default();
        if prompt_yes_no(&format!("Bekräfta {} och skriv ut kvitto?", salad), true)? {
            break;
        }
        session.edit_selection()?;
    }

    let receipt = session.confirm()?;
    let report = write_receipt(&receipt_path, receipt, format)?;
    display_receipt_saved(receipt, &receipt_path, &report);

    Ok(())
}

/// Non-interactive recommendation for the given ingredients.
fn cmd_recommend(catalog: &Catalog, settings: &Settings, selected: &[String]) -> Result<()> {
    let selection: BTreeSet<String> = selected
        .iter()
        .map(|name| Ok(catalog.require_ingredient(name)?.name.clone()))
        .collect::<Result<_>>()?;

    let recommendation = recommend(catalog, &selection, &settings.matching);
    display_recommendation(&recommendation);
    Ok(())
}

/// Non-interactive total for a salad plus extras.
fn cmd_price(catalog: &Catalog, salad: &str, extras: &[String]) -> Result<()> {
    let total = price_order(catalog, salad, extras)?;
    println!("Totalpris: {} kr", total);
    Ok(())
}

/// Check a signed receipt's hash.
fn cmd_verify(path: &Path) -> Result<()> {
    let receipt = read_receipt(path)?;
    receipt.verify()?;
    println!(
        "Kvittot är oförändrat: {} ({} kr totalt)",
        receipt.salad, receipt.total
    );
    Ok(())
}
