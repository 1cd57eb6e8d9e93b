pub mod document;
pub mod outline;

#[cfg(test)]
pub mod fixtures;

pub use document::PdfDocument;
