//! # Invoice Commands
//!
//! Form commands and the read model the UI redraws from after each one.

use facture_core::{InvoiceTotals, ProductLine, Stage};
use serde::Serialize;
use tracing::{debug, warn};

use crate::commands::client::ClientDto;
use crate::error::ApiResult;
use crate::messages::conflict_message;
use crate::render::InvoiceRenderer;
use crate::state::ConfigState;
use crate::workflow::{Workflow, WorkflowCommand, WorkflowEvent};

/// One product row as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    /// `name // qty // price // total` for the list widget
    pub summary: String,
}

impl LineDto {
    fn new(line: &ProductLine, config: &ConfigState) -> Self {
        LineDto {
            name: line.name().to_string(),
            quantity: line.quantity(),
            unit_price: config.format_currency(line.unit_price()),
            line_total: config.format_currency(line.line_total()),
            summary: line.summary(),
        }
    }
}

/// Totals formatted with the configured currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsDto {
    pub subtotal: String,
    /// e.g. `"TVA 20%"`
    pub tax_label: String,
    pub tax_amount: String,
    pub grand_total: String,
    pub tax_exempt: bool,
}

impl TotalsDto {
    fn new(totals: &InvoiceTotals, config: &ConfigState) -> Self {
        TotalsDto {
            subtotal: config.format_currency(totals.subtotal),
            tax_label: format!("TVA {}", totals.tax_rate),
            tax_amount: config.format_currency(totals.tax_amount),
            grand_total: config.format_currency(totals.grand_total),
            tax_exempt: totals.tax_exempt,
        }
    }
}

/// Everything the form shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceView {
    pub stage: Stage,
    pub client: ClientDto,
    pub lines: Vec<LineDto>,
    pub totals: TotalsDto,
    pub payment_method: String,
    /// Localized conflict dialog text while finalization is on hold
    pub pending_conflict: Option<String>,
}

/// Builds the view of the current draft.
pub fn invoice_view<R: InvoiceRenderer>(workflow: &Workflow<R>, config: &ConfigState) -> InvoiceView {
    let draft = workflow.draft();

    InvoiceView {
        stage: workflow.stage(),
        client: ClientDto::from(&draft.client),
        lines: draft.lines.iter().map(|l| LineDto::new(l, config)).collect(),
        totals: TotalsDto::new(&workflow.totals(), config),
        payment_method: draft.payment_method.label().to_string(),
        pending_conflict: workflow
            .pending_conflict()
            .map(|changes| conflict_message(changes, config.language)),
    }
}

/// Applies a form command.
pub fn dispatch<R: InvoiceRenderer>(
    workflow: &mut Workflow<R>,
    command: WorkflowCommand,
) -> ApiResult<WorkflowEvent> {
    debug!(command = ?command, "dispatch command");

    workflow.handle(command).map_err(|e| {
        warn!(stage = %workflow.stage(), error = %e, "Command failed");
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::messages::Language;
    use crate::render::test_support::NullRenderer;
    use facture_core::{ClientRecord, InvoiceCalculator, LineInput};
    use facture_store::{Store, StoreConfig};

    fn products_page(dir: &std::path::Path, client: ClientRecord) -> Workflow<NullRenderer> {
        let store = Store::open(&StoreConfig::new(dir)).unwrap();
        let mut wf = Workflow::new(store, NullRenderer, InvoiceCalculator::standard());
        dispatch(&mut wf, WorkflowCommand::SetClient(client)).unwrap();
        dispatch(&mut wf, WorkflowCommand::Next).unwrap();
        wf
    }

    #[test]
    fn test_view_formats_amounts() {
        let dir = tempfile::tempdir().unwrap();
        let mut wf = products_page(dir.path(), ClientRecord::new("Acme"));
        dispatch(&mut wf, WorkflowCommand::AddLine(LineInput::new("Widget", "3", "8.50"))).unwrap();

        let view = invoice_view(&wf, &ConfigState::default());
        assert_eq!(view.stage, Stage::CollectingProducts);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].line_total, "25.50 €");
        assert_eq!(view.totals.tax_label, "TVA 20%");
        assert_eq!(view.totals.tax_amount, "5.10 €");
        assert_eq!(view.totals.grand_total, "30.60 €");
        assert_eq!(view.payment_method, "CB");
        assert!(view.pending_conflict.is_none());
    }

    #[test]
    fn test_exempt_client_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut wf = products_page(dir.path(), ClientRecord::new("Müller").tax_id("DE1"));
        dispatch(&mut wf, WorkflowCommand::AddLine(LineInput::new("Widget", "2", "10"))).unwrap();

        let view = invoice_view(&wf, &ConfigState::default());
        assert!(view.totals.tax_exempt);
        assert_eq!(view.totals.tax_amount, "0.00 €");
        assert_eq!(view.totals.grand_total, "20.00 €");
    }

    #[test]
    fn test_dispatch_maps_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut wf = products_page(dir.path(), ClientRecord::new("Acme"));

        let err = dispatch(&mut wf, WorkflowCommand::AddLine(LineInput::new("A", "abc", "1")))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
        assert_eq!(err.prompt(Language::Chinese), "请输入正确数量.");

        let err = dispatch(&mut wf, WorkflowCommand::AddLine(LineInput::new("A", "1", "x")))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPrice);
    }

    #[test]
    fn test_pending_conflict_in_view() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = Store::open(&StoreConfig::new(dir.path())).unwrap();
            store
                .clients_mut()
                .upsert(&ClientRecord::new("Acme").city("Paris"))
                .unwrap();
        }

        let mut wf = products_page(dir.path(), ClientRecord::new("Acme").city("Lyon"));
        dispatch(&mut wf, WorkflowCommand::Next).unwrap();
        dispatch(&mut wf, WorkflowCommand::Finalize).unwrap();

        let config = ConfigState {
            language: Language::Chinese,
            ..ConfigState::default()
        };
        let view = invoice_view(&wf, &config);
        let text = view.pending_conflict.unwrap();
        assert!(text.contains("城市: Paris -> Lyon"));
    }
}
