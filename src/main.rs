// Entry point and high-level CLI flow.
//
// A subcommand runs one dashboard view and exits. Without one, a small menu
// lets the user open views one after another; every pick reloads and
// re-cleans the dataset from disk.
use clap::Parser;
use delivery_dashboard::error::Result;
use delivery_dashboard::settings::{self, Command, Settings};
use delivery_dashboard::types::{CleanRecord, RawRecord};
use delivery_dashboard::views::{CompanyView, DelivererView, RestaurantView};
use delivery_dashboard::{loader, output, util};
use std::io::{self, Write};
use tracing::info;

/// Read a single line of input after printing the common "Enter choice:" prompt.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the view selection menu.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to View Selection (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        let resp = buf.trim().to_uppercase();
        match resp.as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Load, clean and filter the dataset for one view.
fn prepare(settings: &Settings) -> Result<Vec<CleanRecord>> {
    let filters = settings.filter_options()?;
    let (data, report) = loader::load_and_clean(&settings.data)?;
    println!(
        "Processing dataset... ({} rows loaded, {} kept after cleaning)",
        util::format_int(report.total_rows),
        util::format_int(report.kept_rows)
    );
    if report.dropped_rows() > 0 {
        println!(
            "Note: {} rows dropped for missing values.",
            util::format_int(report.dropped_rows())
        );
    }
    Ok(filters.apply(data))
}

fn run(settings: &Settings, command: Command) -> Result<()> {
    let data = prepare(settings)?;
    let out_dir = settings.out_dir.as_path();
    let rows = settings.preview_rows;
    match command {
        Command::Company => {
            let view = CompanyView::build(&data);
            view.render(rows);
            view.export(out_dir)?;
        }
        Command::Deliverers => {
            let view = DelivererView::build(&data);
            view.render(rows);
            view.export(out_dir)?;
        }
        Command::Restaurants => {
            let view = RestaurantView::build(&data);
            view.render(rows);
            view.export(out_dir)?;
        }
        Command::Clean => {
            std::fs::create_dir_all(out_dir)?;
            let raw: Vec<RawRecord> = data.iter().map(RawRecord::from).collect();
            output::write_csv(&out_dir.join("clean_dataset.csv"), &raw)?;
        }
    }
    println!("(Full tables exported to {})\n", out_dir.display());
    Ok(())
}

fn interactive(settings: &Settings) {
    loop {
        println!("Select Dashboard View:");
        println!("[1] Company Vision");
        println!("[2] Deliverers Vision");
        println!("[3] Restaurants Vision");
        println!("[0] Exit\n");
        let command = match read_choice().as_str() {
            "1" => Command::Company,
            "2" => Command::Deliverers,
            "3" => Command::Restaurants,
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 0, 1, 2 or 3.\n");
                continue;
            }
        };
        println!();
        if let Err(e) = run(settings, command) {
            eprintln!("Failed to build view: {}\n", e);
        }
        if !prompt_back_to_menu() {
            println!("Exiting the program.");
            break;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();
    settings::setup_logging(&settings.log_level);
    info!("Using dataset {}", settings.data.display());

    match settings.command {
        Some(command) => run(&settings, command)?,
        None => interactive(&settings),
    }
    Ok(())
}
