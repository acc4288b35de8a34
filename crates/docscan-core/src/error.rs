// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for docscan.

use thiserror::Error;

/// Top-level error type for all docscan operations.
#[derive(Debug, Error)]
pub enum DocscanError {
    // -- Scan pipeline --
    /// No contour in the photo reduces to a four-vertex polygon.
    #[error("no four-sided document boundary found in image")]
    NoDocumentBoundary,

    /// The four corners cannot be mapped onto the destination frame.
    #[error("degenerate document quadrilateral: {0}")]
    DegenerateQuadrilateral(String),

    // -- Documents and images --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocscanError>;
