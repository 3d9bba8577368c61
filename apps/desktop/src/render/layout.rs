//! # Invoice Layout
//!
//! Decides where every piece of an invoice goes on the sheet, without
//! touching a workbook. The xlsx writer only maps styles to formats.
//!
//! ## Sheet Map (columns A–I, rows 1-based)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ 1   FACTURE N° FA42                                         (A:I)       │
//! │ 3   SELLER NAME        (A:D)         ┏ Client : ACME SARL   (F:I) ┓    │
//! │ 4   seller address                   ┃ street, cp, city           ┃    │
//! │ 5   N° SIRET                         ┃ [N° TVA : …]               ┃    │
//! │ 6   N° TVA                           ┗ Tel : …                    ┛    │
//! │ 7   Contact                                                            │
//! │ 10  Date de facturation   (A:F, grey)                                  │
//! │ 11  Date de livraison                                                  │
//! │ 12  Mode de paiement                                                   │
//! │ 15  Quantité │ Nom du produit (B:E) │ Prix unitaire HT │ Prix total HT │
//! │ 16… one row per line                                                   │
//! │ n+2                              Total HT   (F:G)  │ amount (H:I)      │
//! │ n+3                              TVA 20%           │ amount            │
//! │ n+4                              Total TTC         │ amount            │
//! │ n+6 [reverse-charge note]                                              │
//! │ …   Facture payée le … pour la somme de … € par …   (A:I)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use facture_core::{InvoiceDocument, Money};

/// Rows and columns are zero-based, as rust_xlsxwriter counts them.
pub type Row = u32;
pub type Col = u16;

/// Last column of the sheet (I).
pub const LAST_COL: Col = 8;

const SELLER_FIRST_ROW: Row = 2;
const DATES_FIRST_ROW: Row = 9;
const TABLE_HEADER_ROW: Row = 14;
const ADDRESS_ROW: Row = 3;
const ADDRESS_ROW_HEIGHT: f64 = 45.0;

/// What a cell holds.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Count(u32),
    Amount(Money),
}

/// Visual role of a cell. The writer turns each into one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    Title,
    Heading,
    Plain,
    Wrapped,
    ClientBoxTop,
    ClientBoxMiddle,
    ClientBoxBottom,
    Banner,
    TableHeader,
    TableCell,
    TableAmount,
    TotalLabel,
    TotalAmount,
}

/// One cell, or one merged range on a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: Row,
    pub first_col: Col,
    pub last_col: Col,
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    /// Whether this cell spans more than one column.
    pub fn is_merged(&self) -> bool {
        self.last_col > self.first_col
    }

    /// The text, if this is a text cell.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            CellValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// The whole sheet, in write order.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLayout {
    pub cells: Vec<Cell>,
    pub row_heights: Vec<(Row, f64)>,
}

impl InvoiceLayout {
    /// Lays out `doc`; amounts in sentences are suffixed with `currency_symbol`.
    pub fn build(doc: &InvoiceDocument, currency_symbol: &str) -> Self {
        let mut sheet = SheetBuilder::default();

        sheet.text(
            0,
            (0, LAST_COL),
            format!("FACTURE N° {}", doc.display_number()),
            CellStyle::Title,
        );

        seller_block(&mut sheet, doc);
        client_block(&mut sheet, doc);

        let date = doc.formatted_date();
        let method = doc.payment_method.label();
        let banners = [
            format!("Date de facturation: {}", date),
            format!("Date de livraison: {}", date),
            format!("Mode de paiement: {}", method),
        ];
        for (offset, text) in (0..).zip(banners) {
            sheet.text(DATES_FIRST_ROW + offset, (0, 5), text, CellStyle::Banner);
        }

        let after_lines = product_table(&mut sheet, doc);
        let totals = &doc.totals;

        let total_rows = [
            ("Total HT".to_string(), totals.subtotal),
            (format!("TVA {}", totals.tax_rate), totals.tax_amount),
            ("Total TTC".to_string(), totals.grand_total),
        ];
        for (offset, (label, amount)) in (1..).zip(total_rows) {
            let row = after_lines + offset;
            sheet.text(row, (5, 6), label, CellStyle::TotalLabel);
            sheet.push(row, (7, 8), CellValue::Amount(amount), CellStyle::TotalAmount);
        }

        let mut row = after_lines + 5;
        if doc.tax_exempt() {
            sheet.text(row, (0, LAST_COL), doc.seller.reverse_charge_note.clone(), CellStyle::Plain);
            row += 1;
        }
        sheet.text(
            row,
            (0, LAST_COL),
            format!(
                "Facture payée le {} pour la somme de {} {} par {}",
                date,
                doc.amount_paid(),
                currency_symbol,
                method
            ),
            CellStyle::Plain,
        );

        InvoiceLayout {
            cells: sheet.cells,
            row_heights: vec![(ADDRESS_ROW, ADDRESS_ROW_HEIGHT)],
        }
    }

    /// First cell whose text starts with `prefix`.
    pub fn find(&self, prefix: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.text().is_some_and(|t| t.starts_with(prefix)))
    }

    /// The cell anchored at (`row`, `col`).
    pub fn at(&self, row: Row, col: Col) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.first_col == col)
    }
}

fn seller_block(sheet: &mut SheetBuilder, doc: &InvoiceDocument) {
    let seller = &doc.seller;
    let rows = [
        (seller.name.clone(), CellStyle::Heading),
        (seller.address.clone(), CellStyle::Wrapped),
        (format!("N° SIRET: {}", seller.siret), CellStyle::Plain),
        (format!("N° TVA: {}", seller.vat_number), CellStyle::Plain),
        (format!("Contact: {}", seller.contact_phone), CellStyle::Plain),
    ];
    for (offset, (text, style)) in (0..).zip(rows) {
        sheet.text(SELLER_FIRST_ROW + offset, (0, 3), text, style);
    }
}

fn client_block(sheet: &mut SheetBuilder, doc: &InvoiceDocument) {
    let client = &doc.client;

    let mut rows = vec![
        format!("Client : {}", client.company_name.trim().to_uppercase()),
        client.formatted_address(),
    ];
    if let Some(tax_id) = client.tax_id.as_deref().filter(|_| client.is_tax_exempt()) {
        rows.push(format!("N° TVA : {}", tax_id.trim()));
    }
    rows.push(format!("Tel : {}", client.contact_phone.trim()));

    let last = rows.len() - 1;
    for (offset, text) in rows.into_iter().enumerate() {
        let style = match offset {
            0 => CellStyle::ClientBoxTop,
            i if i == last => CellStyle::ClientBoxBottom,
            _ => CellStyle::ClientBoxMiddle,
        };
        sheet.text(SELLER_FIRST_ROW + offset as Row, (5, LAST_COL), text, style);
    }
}

/// Writes the header and one row per line; returns the first row after them.
fn product_table(sheet: &mut SheetBuilder, doc: &InvoiceDocument) -> Row {
    let headers = [
        ("Quantité", (0, 0)),
        ("Nom du produit", (1, 4)),
        ("Prix unitaire HT", (5, 6)),
        ("Prix total HT", (7, 8)),
    ];
    for (text, cols) in headers {
        sheet.text(TABLE_HEADER_ROW, cols, text.to_string(), CellStyle::TableHeader);
    }

    let mut row = TABLE_HEADER_ROW + 1;
    for line in &doc.lines {
        sheet.push(row, (0, 0), CellValue::Count(line.quantity()), CellStyle::TableCell);
        sheet.text(row, (1, 4), line.name().to_string(), CellStyle::TableCell);
        sheet.push(row, (5, 6), CellValue::Amount(line.unit_price()), CellStyle::TableAmount);
        sheet.push(row, (7, 8), CellValue::Amount(line.line_total()), CellStyle::TableAmount);
        row += 1;
    }
    row
}

#[derive(Default)]
struct SheetBuilder {
    cells: Vec<Cell>,
}

impl SheetBuilder {
    fn push(&mut self, row: Row, (first_col, last_col): (Col, Col), value: CellValue, style: CellStyle) {
        self.cells.push(Cell {
            row,
            first_col,
            last_col,
            value,
            style,
        });
    }

    fn text(&mut self, row: Row, cols: (Col, Col), text: String, style: CellStyle) {
        self.push(row, cols, CellValue::Text(text), style);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
