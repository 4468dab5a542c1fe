//! PDF input and output.

pub mod reader;
pub mod writer;

pub use reader::{DocumentReader, LoadedPdf, PdfReader, SourceDocument};
pub use writer::{PdfWriter, WriteStatistics};
