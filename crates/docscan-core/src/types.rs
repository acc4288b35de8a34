// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types shared by the scanner and the document writer.

use serde::{Deserialize, Serialize};

/// Paper sizes used when assembling scanned pages into a PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// Output encodings for a single rectified page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageFormat {
    Png,
    Jpeg,
}

impl PageFormat {
    /// Guess the encoding from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_format_extension_round_trips() {
        for format in [PageFormat::Png, PageFormat::Jpeg] {
            assert_eq!(PageFormat::from_extension(format.extension()), Some(format));
        }
        assert_eq!(PageFormat::from_extension("JPEG"), Some(PageFormat::Jpeg));
        assert_eq!(PageFormat::from_extension("tiff"), None);
    }

    #[test]
    fn a4_is_portrait() {
        let (w, h) = PaperSize::A4.dimensions_mm();
        assert!(h > w);
    }

    #[test]
    fn extension_lookup_ignores_case() {
        assert_eq!(PageFormat::from_extension("JPEG"), Some(PageFormat::Jpeg));
        assert_eq!(PageFormat::from_extension("png"), Some(PageFormat::Png));
        assert_eq!(PageFormat::from_extension("tiff"), None);
    }
}
