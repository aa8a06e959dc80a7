pub mod correction;
pub mod normalizer;
pub mod ocr;
pub mod similarity;

pub use correction::correct_numeric_confusions;
pub use normalizer::{digits_only, last_digits, normalize};
#[cfg(feature = "tesseract")]
pub use ocr::TesseractOcr;
pub use ocr::{OcrEngine, OcrProgress, TextFileOcr};
pub use similarity::similarity;
