pub mod analyzer;
#[cfg(not(feature = "ssr"))]
pub mod clipboard;
#[cfg(not(feature = "ssr"))]
pub mod transport;

pub use analyzer::AnalyzerPage;
