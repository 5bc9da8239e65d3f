use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfmux")]
#[command(about = "Merge PDFs, extract page ranges, and turn images into PDFs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Combine multiple PDFs into one
    Merge {
        /// PDF files to merge, in order (at least 2)
        #[arg(required = true, num_args = 2..)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = "merged.pdf")]
        output: PathBuf,
    },

    /// Extract a page range into a new PDF
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Pages to keep, numbered from 1 (e.g. "1-3,5,8-9")
        pages: String,

        /// Output file
        #[arg(short, long, default_value = "extracted_pages.pdf")]
        output: PathBuf,
    },

    /// Assemble JPEG/PNG images into a single PDF, one page per image
    Images {
        /// Image files, in page order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long, default_value = "images.pdf")]
        output: PathBuf,
    },
}
