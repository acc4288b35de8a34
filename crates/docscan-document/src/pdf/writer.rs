// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — assembles rectified page images into a multi-page PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use docscan_core::PaperSize;
use docscan_core::error::DocscanError;
use image::DynamicImage;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

/// Nominal resolution at which page images are embedded.
const IMAGE_DPI: f32 = 150.0;

/// Blank border around every page image.
const MARGIN_MM: f32 = 10.0;

/// Assembles scanned pages into a single PDF, one image per page.
pub struct PdfWriter {
    /// Paper size for every page.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    // -- Pages to PDF ---------------------------------------------------------

    /// Create a PDF with one page per image, in order.
    ///
    /// Each image is scaled to fit within the page margins, preserving its
    /// aspect ratio, and centred on the page.
    #[instrument(skip(self, pages), fields(pages = pages.len()))]
    pub fn create_from_pages(&self, pages: &[DynamicImage]) -> Result<Vec<u8>, DocscanError> {
        if pages.is_empty() {
            return Err(DocscanError::PdfError(
                "cannot assemble a document without pages".into(),
            ));
        }

        let (page_w, page_h) = self.page_dimensions();
        let title = self.title.as_deref().unwrap_or("Scanned Document");
        info!(paper = ?self.paper_size, title, "Assembling PDF");

        let mut doc = PdfDocument::new(title);
        let mut pdf_pages: Vec<PdfPage> = Vec::with_capacity(pages.len());

        for (index, page) in pages.iter().enumerate() {
            if page.width() == 0 || page.height() == 0 {
                return Err(DocscanError::PdfError(format!("page {} is empty", index + 1)));
            }

            let img_width = page.width() as usize;
            let img_height = page.height() as usize;
            let raw = RawImage {
                pixels: RawImageData::U8(page.to_rgb8().into_raw()),
                width: img_width,
                height: img_height,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };
            let xobject_id = doc.add_image(&raw);

            let usable_w_pt = Mm(page_w.0 - 2.0 * MARGIN_MM).into_pt().0;
            let usable_h_pt = Mm(page_h.0 - 2.0 * MARGIN_MM).into_pt().0;

            let img_w_pt = img_width as f32 / IMAGE_DPI * 72.0;
            let img_h_pt = img_height as f32 / IMAGE_DPI * 72.0;

            // Scanned pages fill the usable area, so upscaling is allowed.
            let scale = (usable_w_pt / img_w_pt).min(usable_h_pt / img_h_pt);
            let rendered_w_pt = img_w_pt * scale;
            let rendered_h_pt = img_h_pt * scale;

            let margin_pt = Mm(MARGIN_MM).into_pt().0;
            let x_offset = margin_pt + (usable_w_pt - rendered_w_pt) / 2.0;
            let y_offset = margin_pt + (usable_h_pt - rendered_h_pt) / 2.0;

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(x_offset)),
                    translate_y: Some(Pt(y_offset)),
                    scale_x: Some(scale),
                    scale_y: Some(scale),
                    dpi: Some(IMAGE_DPI),
                    rotate: None,
                },
            }];

            debug!(page = index + 1, rendered_w_pt, rendered_h_pt, scale, "Page placed");
            pdf_pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "PDF serialisation reported warnings");
        }

        debug!(bytes = output.len(), "PDF assembled");
        Ok(output)
    }

    // -- File output convenience ----------------------------------------------

    /// Assemble `pages` and write the PDF directly to a file.
    pub fn write_pages_to_file(
        &self,
        pages: &[DynamicImage],
        path: impl AsRef<Path>,
    ) -> Result<(), DocscanError> {
        let bytes = self.create_from_pages(pages)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote {}-page PDF to {}", pages.len(), path.as_ref().display());
        Ok(())
    }
}
