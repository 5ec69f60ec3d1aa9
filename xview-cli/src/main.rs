use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xview::logging::Logger;

mod blocks;
mod logging;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    subcommands: Subcommands,
}

#[derive(Subcommand, Debug)]
enum Subcommands {
    /// Render an article from JSON content.
    Render {
        #[arg(long, help = "Article content in JSON")]
        content: PathBuf,

        #[arg(long, help = "Layout template, the built-in layout is used if not set")]
        layout: Option<PathBuf>,

        #[arg(long, help = "Prefix for image URLs", default_value = "")]
        assets: String,

        #[arg(long, help = "Write the HTML to this file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Show the blocks and placeholders declared by a template.
    Blocks {
        /// Template to inspect.
        template: PathBuf,
    },
}

fn main() {
    Logger::init();
    let args = Cli::parse();

    let result = match args.subcommands {
        Subcommands::Render {
            content,
            layout,
            assets,
            output,
        } => render::render(&content, layout.as_deref(), &assets, output.as_deref()),
        Subcommands::Blocks { template } => blocks::blocks(&template),
    };

    if let Err(err) = result {
        logging::error(err);
        std::process::exit(1);
    }
}
