//! Grid geometry and label ordering.
//!
//! Pages have zero margins, so the grid cells tile the whole sheet: cell
//! width is `page_width / columns` and cell height is `page_height / rows`.
//! Labels are placed in row-major order (every column of a row before the
//! next row, every row of a page before the next page) and each one carries
//! the next serial number.
//!
//! All lengths are millimetres. Cell positions are measured from the top-left
//! corner of the page; [`LabelLayout::text_origin`] converts to PDF's
//! bottom-left origin when the text is drawn.

use crate::config::LabelRunConfig;
use crate::error::LabelError;
use crate::pipeline::metrics::PT_TO_MM;
use serde::{Deserialize, Serialize};

/// Inclusive range of serial numbers printed by one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialRange {
    start: u64,
    end: u64,
}

impl SerialRange {
    /// Range of `count` consecutive serials beginning at `start`.
    pub fn new(start: u64, count: u64) -> Result<Self, LabelError> {
        if count == 0 {
            return Err(LabelError::InvalidConfig(
                "a label run needs at least one label".into(),
            ));
        }
        let end = start
            .checked_add(count - 1)
            .ok_or(LabelError::SerialOverflow { start, count })?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of serials in the range.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false; a range holds at least one serial.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u64> {
        self.start..=self.end
    }
}

/// Size of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub width: f32,
    pub height: f32,
}

impl GridCell {
    /// Cell size for a page of `page_width × page_height` split into
    /// `rows × columns`.
    pub fn new(page_width: f32, page_height: f32, rows: u32, columns: u32) -> Self {
        Self {
            width: page_width / columns as f32,
            height: page_height / rows as f32,
        }
    }
}

/// One label at its grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedLabel {
    /// 0-indexed page.
    pub page: usize,
    /// 0-indexed row within the page.
    pub row: u32,
    /// 0-indexed column within the row.
    pub column: u32,
    pub serial: u64,
    /// Left edge of the cell.
    pub x: f32,
    /// Top edge of the cell, measured down from the top of the page.
    pub top: f32,
}

/// Page geometry and ordering for a whole run.
#[derive(Debug, Clone)]
pub struct LabelLayout {
    page_width: f32,
    page_height: f32,
    rows: u32,
    columns: u32,
    pages: u32,
    cell: GridCell,
    range: SerialRange,
}

impl LabelLayout {
    /// Lay out the run described by `config`.
    pub fn new(config: &LabelRunConfig) -> Result<Self, LabelError> {
        if config.rows == 0 || config.columns == 0 || config.pages == 0 {
            return Err(LabelError::InvalidConfig(
                "rows, columns and pages must all be ≥ 1".into(),
            ));
        }
        let range = config.serial_range()?;
        let (page_width, page_height) = config.sheet_size.dimensions_mm();
        Ok(Self {
            page_width,
            page_height,
            rows: config.rows,
            columns: config.columns,
            pages: config.pages,
            cell: GridCell::new(page_width, page_height, config.rows, config.columns),
            range,
        })
    }

    /// Page `(width, height)` in millimetres.
    pub fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    pub fn cell(&self) -> GridCell {
        self.cell
    }

    pub fn range(&self) -> SerialRange {
        self.range
    }

    pub fn pages(&self) -> usize {
        self.pages as usize
    }

    pub fn labels_per_page(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.columns)
    }

    /// Labels of one 0-indexed page in row-major order.
    pub fn page(&self, page: usize) -> impl Iterator<Item = PlacedLabel> + '_ {
        let first = self.range.start + page as u64 * self.labels_per_page();
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| {
            (0..columns).map(move |column| PlacedLabel {
                page,
                row,
                column,
                serial: first + u64::from(row) * u64::from(columns) + u64::from(column),
                x: column as f32 * self.cell.width,
                top: row as f32 * self.cell.height,
            })
        })
    }

    /// Every label of the run, page by page.
    pub fn placements(&self) -> impl Iterator<Item = PlacedLabel> + '_ {
        (0..self.pages()).flat_map(move |page| self.page(page))
    }

    /// Baseline origin for text of width `text_width` centred in `label`'s
    /// cell, in PDF coordinates (origin at the bottom-left of the page).
    ///
    /// The baseline sits `0.3 × font size` below the cell's vertical centre,
    /// which visually centres cap-height text.
    pub fn text_origin(
        &self,
        label: &PlacedLabel,
        text_width: f32,
        font_size_pt: f32,
    ) -> (f32, f32) {
        let x = label.x + (self.cell.width - text_width) / 2.0;
        let baseline_from_top = label.top + self.cell.height / 2.0 + 0.3 * font_size_pt * PT_TO_MM;
        (x, self.page_height - baseline_from_top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetSize;

    fn config(rows: u32, columns: u32, pages: u32, start: u64) -> LabelRunConfig {
        LabelRunConfig::builder()
            .rows(rows)
            .columns(columns)
            .pages(pages)
            .asn_start(start)
            .build()
            .unwrap()
    }

    #[test]
    fn serial_range_is_inclusive() {
        let r = SerialRange::new(1, 56).unwrap();
        assert_eq!(r.start(), 1);
        assert_eq!(r.end(), 56);
        assert_eq!(r.len(), 56);
        assert_eq!(r.iter().count(), 56);

        let single = SerialRange::new(7, 1).unwrap();
        assert_eq!(single.end(), 7);
    }

    #[test]
    fn serial_range_rejects_empty_and_overflow() {
        assert!(SerialRange::new(1, 0).is_err());
        assert!(SerialRange::new(u64::MAX, 1).is_ok());
        assert!(matches!(
            SerialRange::new(u64::MAX, 2),
            Err(LabelError::SerialOverflow { .. })
        ));
    }

    #[test]
    fn cells_tile_the_page() {
        let layout = LabelLayout::new(&config(14, 4, 1, 1)).unwrap();
        let cell = layout.cell();
        let (w, h) = layout.page_size();
        assert!((cell.width * 4.0 - w).abs() < 1e-3);
        assert!((cell.height * 14.0 - h).abs() < 1e-3);
        assert!((cell.width - 52.5).abs() < 1e-4);
    }

    #[test]
    fn placements_are_row_major_and_consecutive() {
        let layout = LabelLayout::new(&config(3, 2, 2, 10)).unwrap();
        let labels: Vec<PlacedLabel> = layout.placements().collect();
        assert_eq!(labels.len(), 12);

        let serials: Vec<u64> = labels.iter().map(|l| l.serial).collect();
        assert_eq!(serials, (10..22).collect::<Vec<_>>());

        let positions: Vec<(usize, u32, u32)> =
            labels.iter().take(4).map(|l| (l.page, l.row, l.column)).collect();
        assert_eq!(positions, vec![(0, 0, 0), (0, 0, 1), (0, 1, 0), (0, 1, 1)]);

        let second_page = &labels[6];
        assert_eq!((second_page.page, second_page.row, second_page.column), (1, 0, 0));
        assert_eq!(second_page.serial, 16);
        assert_eq!(second_page.x, 0.0);
        assert_eq!(second_page.top, 0.0);
    }

    #[test]
    fn last_serial_matches_range_end() {
        let layout = LabelLayout::new(&config(14, 4, 10, 1)).unwrap();
        let last = layout.placements().last().unwrap();
        assert_eq!(last.serial, layout.range().end());
        assert_eq!(last.serial, 560);
        assert_eq!((last.page, last.row, last.column), (9, 13, 3));
    }

    #[test]
    fn text_is_centred_in_cell() {
        let layout = LabelLayout::new(&config(2, 2, 1, 1)).unwrap();
        let (_, page_h) = layout.page_size();
        let cell = layout.cell();
        let label = layout.page(0).nth(3).unwrap();

        let (x, y) = layout.text_origin(&label, 20.0, 12.0);
        assert!((x - (cell.width + (cell.width - 20.0) / 2.0)).abs() < 1e-4);

        let baseline_from_top = cell.height + cell.height / 2.0 + 0.3 * 12.0 * PT_TO_MM;
        assert!((y - (page_h - baseline_from_top)).abs() < 1e-4);
        assert!(y > 0.0 && y < cell.height);
    }

    #[test]
    fn sheet_size_drives_geometry() {
        let config = LabelRunConfig::builder()
            .sheet_size(SheetSize::Letter)
            .rows(10)
            .columns(3)
            .build()
            .unwrap();
        let layout = LabelLayout::new(&config).unwrap();
        assert_eq!(layout.page_size(), (215.9, 279.4));
        assert!((layout.cell().height - 27.94).abs() < 1e-3);
    }
}
