use crate::utils::ReconcileError;
use log::debug;
use std::fs;
use std::path::Path;

/// Incremental progress reported by an OCR engine, as a percentage in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OcrProgress(u8);

impl OcrProgress {
    pub fn new(percent: u32) -> Self {
        OcrProgress(percent.min(100) as u8)
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

/// Something that turns a document image into raw text.
///
/// Implementations may call `progress` any number of times before returning.
/// A failure to recognize anything is reported as [`ReconcileError::Ocr`].
pub trait OcrEngine {
    fn recognize(
        &self,
        image: &Path,
        progress: &mut dyn FnMut(OcrProgress),
    ) -> Result<String, ReconcileError>;
}

/// Reads text that was already recognized elsewhere.
///
/// The image path is used to locate a sidecar file with the same stem and a
/// `.txt` extension; a path that already ends in `.txt` is read directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFileOcr;

impl TextFileOcr {
    pub fn new() -> Self {
        TextFileOcr
    }

    fn sidecar_path(image: &Path) -> std::path::PathBuf {
        match image.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") => image.to_path_buf(),
            _ => image.with_extension("txt"),
        }
    }
}

impl OcrEngine for TextFileOcr {
    fn recognize(
        &self,
        image: &Path,
        progress: &mut dyn FnMut(OcrProgress),
    ) -> Result<String, ReconcileError> {
        let path = Self::sidecar_path(image);
        progress(OcrProgress::new(0));

        let text = fs::read_to_string(&path).map_err(|e| {
            ReconcileError::ocr(format!("Failed to read OCR text {}: {}", path.display(), e))
        })?;

        if text.trim().is_empty() {
            return Err(ReconcileError::ocr(format!(
                "No text recognized in {}",
                path.display()
            )));
        }

        debug!("Loaded {} bytes of OCR text from {}", text.len(), path.display());
        progress(OcrProgress::new(100));
        Ok(text)
    }
}

/// Runs Tesseract on the image file. Aadhaar cards carry English and Hindi,
/// so both language packs are requested by default.
#[cfg(feature = "tesseract")]
pub struct TesseractOcr {
    languages: String,
}

#[cfg(feature = "tesseract")]
impl TesseractOcr {
    pub fn new() -> Self {
        TesseractOcr {
            languages: "eng+hin".to_string(),
        }
    }
}

#[cfg(feature = "tesseract")]
impl OcrEngine for TesseractOcr {
    fn recognize(
        &self,
        image: &Path,
        progress: &mut dyn FnMut(OcrProgress),
    ) -> Result<String, ReconcileError> {
        use tesseract::Tesseract;

        let path_str = image
            .to_str()
            .ok_or_else(|| ReconcileError::ocr("Could not convert image path to string"))?;
        progress(OcrProgress::new(0));

        let tess = Tesseract::new(None, Some(self.languages.as_str()))
            .map_err(|e| ReconcileError::ocr(format!("Failed to initialize Tesseract: {}", e)))?;
        progress(OcrProgress::new(10));

        let mut tess = tess
            .set_image(path_str)
            .map_err(|e| ReconcileError::ocr(format!("Failed to set image: {}", e)))?;
        progress(OcrProgress::new(30));

        let text = tess
            .get_text()
            .map_err(|e| ReconcileError::ocr(format!("Failed to extract text: {}", e)))?;

        if text.trim().is_empty() {
            return Err(ReconcileError::ocr("Tesseract returned no text"));
        }
        progress(OcrProgress::new(100));
        Ok(text)
    }
}
