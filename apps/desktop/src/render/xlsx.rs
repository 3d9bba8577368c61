//! # Xlsx Renderer
//!
//! Writes `FACTURE {n}.xlsx` with rust_xlsxwriter: one A4 portrait sheet,
//! Calibri throughout, printed centered.

use facture_core::InvoiceDocument;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

use super::layout::{CellStyle, CellValue, InvoiceLayout, LAST_COL};
use super::{artifact_file_name, InvoiceRenderer, RenderError, RenderResult};

const FONT: &str = "Calibri";
const GREY: u32 = 0xD3D3D3;
const PAPER_A4: u8 = 9;
const SHEET_NAME: &str = "Facture";
const COLUMN_WIDTH: f64 = 11.0;

/// Spreadsheet renderer writing into one output directory.
#[derive(Debug, Clone)]
pub struct XlsxRenderer {
    output_dir: PathBuf,
    currency_symbol: String,
}

impl XlsxRenderer {
    /// Creates a renderer writing into `output_dir` with the euro sign.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        XlsxRenderer {
            output_dir: output_dir.into(),
            currency_symbol: "€".to_string(),
        }
    }

    /// Sets the currency symbol used in amount formats and sentences.
    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    /// Directory artifacts are written to.
    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }

    /// Builds the workbook in memory.
    pub fn render_to_buffer(&self, doc: &InvoiceDocument) -> RenderResult<Vec<u8>> {
        let layout = InvoiceLayout::build(doc, &self.currency_symbol);
        let formats = Formats::new(&self.currency_symbol);

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;
        write_layout(worksheet, &layout, &formats)?;
        page_setup(worksheet);

        Ok(workbook.save_to_buffer()?)
    }
}

impl InvoiceRenderer for XlsxRenderer {
    fn artifact_path(&self, number: u64) -> PathBuf {
        self.output_dir.join(artifact_file_name(number))
    }

    fn render(&self, doc: &InvoiceDocument) -> RenderResult<PathBuf> {
        let path = self.artifact_path(doc.number);
        debug!(number = doc.number, path = %path.display(), "Rendering invoice");

        let bytes = self.render_to_buffer(doc)?;

        fs::create_dir_all(&self.output_dir).map_err(|e| RenderError::io(&path, e))?;
        fs::write(&path, &bytes).map_err(|e| RenderError::io(&path, e))?;

        info!(number = doc.number, path = %path.display(), bytes = bytes.len(), "Invoice written");
        Ok(path)
    }
}

fn write_layout(ws: &mut Worksheet, layout: &InvoiceLayout, formats: &Formats) -> Result<(), XlsxError> {
    for col in 0..=LAST_COL {
        ws.set_column_width(col, COLUMN_WIDTH)?;
    }

    for cell in &layout.cells {
        let format = formats.get(cell.style);

        if cell.is_merged() {
            // merge_range only takes text; numbers are written over the anchor
            let text = cell.text().unwrap_or("");
            ws.merge_range(cell.row, cell.first_col, cell.row, cell.last_col, text, format)?;
        }

        match &cell.value {
            CellValue::Text(text) => {
                if !cell.is_merged() {
                    ws.write_string_with_format(cell.row, cell.first_col, text, format)?;
                }
            }
            CellValue::Count(n) => {
                ws.write_number_with_format(cell.row, cell.first_col, *n, format)?;
            }
            CellValue::Amount(money) => {
                ws.write_number_with_format(cell.row, cell.first_col, money.to_euros_f64(), format)?;
            }
        }
    }

    for (row, height) in &layout.row_heights {
        ws.set_row_height(*row, *height)?;
    }

    Ok(())
}

fn page_setup(ws: &mut Worksheet) {
    ws.set_portrait();
    ws.set_paper_size(PAPER_A4);
    ws.set_margins(0.5, 0.5, 1.0, 1.0, 0.3, 0.3);
    ws.set_print_center_horizontally(true);
}

// =============================================================================
// Formats
// =============================================================================

struct Formats {
    title: Format,
    heading: Format,
    plain: Format,
    wrapped: Format,
    client_top: Format,
    client_middle: Format,
    client_bottom: Format,
    banner: Format,
    table_header: Format,
    table_cell: Format,
    table_amount: Format,
    total_label: Format,
    total_amount: Format,
}

impl Formats {
    fn new(currency_symbol: &str) -> Self {
        let base = || Format::new().set_font_name(FONT);
        let amount = format!("#,##0.00 {}", currency_symbol);
        let thin_box = || base().set_border(FormatBorder::Thin).set_align(FormatAlign::Center);

        Formats {
            title: base()
                .set_font_size(26)
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(GREY)),
            heading: base().set_bold(),
            plain: base(),
            wrapped: base()
                .set_text_wrap()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter),
            client_top: base()
                .set_bold()
                .set_border_top(FormatBorder::Thick)
                .set_border_left(FormatBorder::Thick)
                .set_border_right(FormatBorder::Thick),
            client_middle: base()
                .set_text_wrap()
                .set_align(FormatAlign::VerticalCenter)
                .set_border_left(FormatBorder::Thick)
                .set_border_right(FormatBorder::Thick),
            client_bottom: base()
                .set_border_bottom(FormatBorder::Thick)
                .set_border_left(FormatBorder::Thick)
                .set_border_right(FormatBorder::Thick),
            banner: base().set_bold().set_background_color(Color::RGB(GREY)),
            table_header: base()
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(GREY)),
            table_cell: thin_box(),
            table_amount: thin_box().set_num_format(&amount),
            total_label: base(),
            total_amount: base().set_num_format(&amount),
        }
    }

    fn get(&self, style: CellStyle) -> &Format {
        match style {
            CellStyle::Title => &self.title,
            CellStyle::Heading => &self.heading,
            CellStyle::Plain => &self.plain,
            CellStyle::Wrapped => &self.wrapped,
            CellStyle::ClientBoxTop => &self.client_top,
            CellStyle::ClientBoxMiddle => &self.client_middle,
            CellStyle::ClientBoxBottom => &self.client_bottom,
            CellStyle::Banner => &self.banner,
            CellStyle::TableHeader => &self.table_header,
            CellStyle::TableCell => &self.table_cell,
            CellStyle::TableAmount => &self.table_amount,
            CellStyle::TotalLabel => &self.total_label,
            CellStyle::TotalAmount => &self.total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use facture_core::{ClientRecord, InvoiceCalculator, PaymentMethod, SellerIdentity};

    fn document(number: u64) -> InvoiceDocument {
        let calc = InvoiceCalculator::standard();
        let lines = vec![calc.add_line("Widget", "2", "10.00").unwrap()];
        let totals = calc.compute_totals(&lines, false);
        InvoiceDocument {
            number,
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            seller: SellerIdentity::default(),
            client: ClientRecord::new("Acme").city("Paris"),
            lines,
            totals,
            payment_method: PaymentMethod::Transfer,
        }
    }

    #[test]
    fn test_artifact_path() {
        let renderer = XlsxRenderer::new("/out");
        assert_eq!(renderer.artifact_path(3), PathBuf::from("/out/FACTURE 3.xlsx"));
    }

    #[test]
    fn test_render_writes_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = XlsxRenderer::new(dir.path().join("factures"));

        let path = renderer.render(&document(12)).unwrap();

        assert_eq!(path, dir.path().join("factures").join("FACTURE 12.xlsx"));
        let bytes = fs::read(&path).unwrap();
        // xlsx files are zip archives
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_into_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let renderer = XlsxRenderer::new(&blocker);
        assert!(matches!(
            renderer.render(&document(1)),
            Err(RenderError::Io { .. })
        ));
    }
}
