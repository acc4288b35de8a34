// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan-document — Document processing for the docscan scanner.
//
// Provides the scanning pipeline (page boundary detection, corner ordering,
// perspective rectification), image I/O for page images, and assembly of
// rectified pages into a multi-page PDF.

pub mod image;
pub mod pdf;
pub mod scan;

// Re-export the primary items so callers can use `docscan_document::DocumentScanner` etc.
pub use crate::image::processor::ImageProcessor;
pub use pdf::writer::PdfWriter;
pub use scan::{DocumentScanner, OrderedCorners, ScanOutcome, rectify_document};
