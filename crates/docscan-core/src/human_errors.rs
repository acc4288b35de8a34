// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Scan failures are never retried automatically: the photo itself has to
// change, so the suggestion tells the user how to retake it.

use crate::error::DocscanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk or filesystem hiccup; trying again may work.
    Transient,
    /// The user must do something (retake the photo, fix a setting).
    ActionRequired,
    /// Cannot be fixed by retrying: corrupt file, unsupported format.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Whether repeating the same request may succeed.
    pub retriable: bool,
    /// Severity level.
    pub severity: Severity,
}

/// Convert a `DocscanError` into a `HumanError`.
pub fn humanize_error(err: &DocscanError) -> HumanError {
    match err {
        DocscanError::NoDocumentBoundary => HumanError {
            message: "We couldn't find the page in this photo.".into(),
            suggestion: "Lay the page flat on a darker, plain surface and make sure all four corners are inside the picture.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        DocscanError::DegenerateQuadrilateral(_) => HumanError {
            message: "The page edges in this photo don't form a usable rectangle.".into(),
            suggestion: "Take the photo from more directly above the page so that its four corners are clearly visible.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        DocscanError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        DocscanError::PdfError(detail) => HumanError {
            message: "The PDF couldn't be created.".into(),
            suggestion: format!("Check that at least one page was scanned successfully. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        DocscanError::InvalidConfig(detail) => HumanError {
            message: "The scanner settings are not valid.".into(),
            suggestion: format!("Fix or delete the configuration file, then try again. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        DocscanError::Io(io) => match io.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "A file could not be found.".into(),
                suggestion: "Check the file name and folder, then try again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "We don't have permission to use this file.".into(),
                suggestion: "Choose a different folder, or check the file's permissions.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "Reading or writing a file failed.".into(),
                suggestion: format!("Make sure there is free disk space, then try again. ({io})"),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        DocscanError::Serialization(_) => HumanError {
            message: "The settings file is damaged.".into(),
            suggestion: "Delete the configuration file to go back to the default settings.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
    }
}
