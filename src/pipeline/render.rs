//! PDF rendering: draw every placed label and serialise the document.
//!
//! Rendering works entirely in memory and returns the finished PDF bytes;
//! writing them to disk is the caller's job. A failure here therefore never
//! leaves a partial file behind.

use crate::config::LabelRunConfig;
use crate::error::LabelError;
use crate::pipeline::layout::LabelLayout;
use crate::pipeline::metrics::text_width_mm;
use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rgb};
use tracing::{debug, info};

const LAYER_NAME: &str = "Labels";

/// Render all pages of `layout` using the text settings in `config`.
///
/// Progress events go to `config.progress_callback`, if any.
pub fn render_document(
    config: &LabelRunConfig,
    layout: &LabelLayout,
    title: &str,
) -> Result<Vec<u8>, LabelError> {
    let (page_w, page_h) = layout.page_size();
    let font_size = config.font_size as f32;
    let (r, g, b) = config.color.to_unit_rgb();
    let total_pages = layout.pages();

    debug!(
        "Page {}x{} mm, cell {:.2}x{:.2} mm, font {}pt",
        page_w,
        page_h,
        layout.cell().width,
        layout.cell().height,
        config.font_size
    );

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(page_w), Mm(page_h), LAYER_NAME);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| LabelError::RenderFailed {
            detail: format!("cannot load Helvetica: {e:?}"),
        })?;

    let mut first = Some((first_page, first_layer));
    for page in 0..total_pages {
        let page_num = page + 1;
        info!("Rendering page {}/{}", page_num, total_pages);
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_num, total_pages);
        }

        let (page_idx, layer_idx) = match first.take() {
            Some(indices) => indices,
            None => doc.add_page(Mm(page_w), Mm(page_h), LAYER_NAME),
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));

        let mut drawn = 0usize;
        for label in layout.page(page) {
            let text = config.format.render(label.serial);
            let (x, y) = layout.text_origin(&label, text_width_mm(&text, font_size), font_size);
            layer.use_text(text, font_size, Mm(x), Mm(y), &font);
            drawn += 1;
        }

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_num, total_pages, drawn);
        }
    }

    doc.save_to_bytes().map_err(|e| LabelError::RenderFailed {
        detail: format!("cannot serialise PDF: {e:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_pdf_document() {
        let config = LabelRunConfig::builder().rows(2).columns(2).build().unwrap();
        let layout = LabelLayout::new(&config).unwrap();
        let bytes = render_document(&config, &layout, "test").unwrap();
        assert!(bytes.starts_with(b"%PDF"), "missing PDF header");
        assert!(bytes.len() > 200);
    }

    #[test]
    fn more_pages_make_a_larger_document() {
        let one = LabelRunConfig::builder().build().unwrap();
        let three = LabelRunConfig::builder().pages(3).build().unwrap();
        let one_bytes = render_document(&one, &LabelLayout::new(&one).unwrap(), "t").unwrap();
        let three_bytes =
            render_document(&three, &LabelLayout::new(&three).unwrap(), "t").unwrap();
        assert!(three_bytes.len() > one_bytes.len());
    }
}
