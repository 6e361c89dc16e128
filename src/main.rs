use assetpress::{config, convert, counter, output, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup — trivial, called exactly once
        Box::leak(format!("{} ({hash})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "assetpress")]
#[command(about = "Build-time web asset converter")]
#[command(long_about = "\
Build-time web asset converter

Walks a source directory of images and produces a delivery-ready destination
tree mirroring the source layout:

  src/assets/images/               dist/assets/images/
  ├── hero.jpg                     ├── hero.jpg      (re-encoded, q80)
  │                                ├── hero.webp     (derived, q75)
  │                                ├── hero.avif     (derived, q65)
  └── icons/                       └── icons/
      └── logo.svg                     └── logo.svg  (copied unchanged)

jpg/jpeg/png inputs are re-encoded and get .webp/.avif variants; svg, gif,
and ico files are copied byte-for-byte. A failing file is logged and counted
but never stops the run.

Encode parameters can be overridden by an assetpress.toml in the source root.
Run 'assetpress gen-config' to print a documented stock config.")]
#[command(version = version_string())]
struct Cli {
    /// Source directory
    #[arg(long, default_value = "src/assets/images", global = true)]
    source: PathBuf,

    /// Destination directory
    #[arg(long, default_value = "dist/assets/images", global = true)]
    dest: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert the source tree into the destination tree
    Convert,
    /// Discover and classify source files without converting
    Scan,
    /// Animate a currency count-up to the given amount in the terminal
    Countup {
        /// Final amount to count up to
        amount: String,
    },
    /// Print a stock assetpress.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert => {
            let encode_config = config::load_config(&cli.source)?;
            println!("Starting image optimization...");

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    println!("{}", output::format_convert_event(&event));
                }
            });
            let backend = assetpress::imaging::RustBackend::new();
            let stats = convert::run(&backend, &cli.source, &cli.dest, &encode_config, Some(tx))?;
            printer.join().unwrap();

            output::print_summary(&stats);
        }
        Command::Scan => {
            let discovered = scan::scan(&cli.source)?;
            output::print_scan_output(&discovered);
        }
        Command::Countup { amount } => {
            // An unparseable amount is a silent no-op, matching the
            // missing-target contract of the animation.
            if let Some(count) = counter::CountUp::from_attr(Some(&amount)) {
                counter::animate(&count, &mut std::io::stdout())?;
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
