//! # Invoice Workflow
//!
//! The invoice form as a state machine driven by [`WorkflowCommand`]s.
//!
//! ## Stages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────┐ Next ┌──────────────┐ Next ┌──────────────┐          │
//! │  │  Collecting  │─────►│  Collecting  │─────►│  Collecting  │          │
//! │  │   Client     │◄─────│   Products   │◄─────│   Payment    │          │
//! │  └──────────────┘ Back └──────────────┘ Back └──────┬───────┘          │
//! │   SetClient             AddLine                     │ Finalize          │
//! │   SelectClient          RemoveLine                  ▼                   │
//! │                         EditLine              ┌──────────────┐          │
//! │                                               │  Finalized   │          │
//! │                                               └──────────────┘          │
//! │                                               (no way out)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Finalize
//! ```text
//! 1. upsert client ──► conflict? ──► ClientConflict, wait for
//!        │                            ConfirmClientUpdate / KeepStoredClient
//!        ▼
//! 2. compute totals
//! 3. peek next number
//! 4. render          ──► error? stay on CollectingPayment, number unused
//! 5. commit number   ──► error? stay on CollectingPayment
//! 6. remove previous invoice file (best effort)
//! ```

use chrono::{Local, NaiveDate};
use facture_core::validation::validate_company_name;
use facture_core::{
    ClientRecord, CoreError, FieldChange, InvoiceCalculator, InvoiceDocument, InvoiceTotals,
    LineInput, PaymentMethod, SellerIdentity, Stage,
};
use facture_store::{Store, StoreError, UpsertResult};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::render::{remove_previous_artifact, InvoiceRenderer, RenderError};
use crate::state::InvoiceDraft;

// =============================================================================
// Commands & Events
// =============================================================================

/// What the user did on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowCommand {
    /// Replace the client form contents.
    SetClient(ClientRecord),
    /// Fill the client form from a stored client.
    SelectClient(String),
    Next,
    Back,
    AddLine(LineInput),
    RemoveLine(usize),
    /// Remove a line and hand its text back for editing.
    EditLine(usize),
    ChoosePayment(PaymentMethod),
    Finalize,
    /// Answer "yes" to the client conflict dialog.
    ConfirmClientUpdate,
    /// Answer "no" to the client conflict dialog.
    KeepStoredClient,
}

/// What changed after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum WorkflowEvent {
    StageChanged(Stage),
    ClientUpdated,
    ClientSelected(ClientRecord),
    LinesChanged(InvoiceTotals),
    LineForEdit(LineInput),
    PaymentChosen(PaymentMethod),
    /// The stored client differs; the invoice is on hold until answered.
    ClientConflict(Vec<FieldChange>),
    Finalized(FinalizedInvoice),
}

/// Result of a successful finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedInvoice {
    pub number: u64,
    pub path: PathBuf,
    pub totals: InvoiceTotals,
}

// =============================================================================
// Errors
// =============================================================================

/// Errors from handling a command. State is unchanged when one is returned.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Invalid input or a command the current stage does not accept.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Reading or writing clients.json / invoiceNumber.json failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The invoice file could not be produced.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<facture_core::ValidationError> for WorkflowError {
    fn from(err: facture_core::ValidationError) -> Self {
        WorkflowError::Core(err.into())
    }
}

/// Result type for workflow commands.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

// =============================================================================
// Workflow
// =============================================================================

/// One invoice being entered, from the client page to the written file.
///
/// The store and the renderer are injected, so tests drive it with a
/// temporary directory and an in-memory renderer.
pub struct Workflow<R: InvoiceRenderer> {
    stage: Stage,
    draft: InvoiceDraft,
    store: Store,
    renderer: R,
    calculator: InvoiceCalculator,
    seller: SellerIdentity,
    pending_conflict: Option<Vec<FieldChange>>,
    issue_date: Option<NaiveDate>,
}

impl<R: InvoiceRenderer> Workflow<R> {
    /// Starts on the client page with an empty draft.
    pub fn new(store: Store, renderer: R, calculator: InvoiceCalculator) -> Self {
        Workflow {
            stage: Stage::default(),
            draft: InvoiceDraft::new(),
            store,
            renderer,
            calculator,
            seller: SellerIdentity::default(),
            pending_conflict: None,
            issue_date: None,
        }
    }

    /// Sets the issuing company.
    pub fn seller(mut self, seller: SellerIdentity) -> Self {
        self.seller = seller;
        self
    }

    /// Fixes the issue date instead of using today's date.
    pub fn with_issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Starts a fresh invoice with the same store, renderer and settings.
    pub fn into_next_invoice(self) -> Self {
        Workflow {
            stage: Stage::default(),
            draft: InvoiceDraft::new(),
            pending_conflict: None,
            ..self
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    /// Totals of the current lines for the current client.
    pub fn totals(&self) -> InvoiceTotals {
        self.calculator
            .compute_totals(&self.draft.lines, self.draft.client.is_tax_exempt())
    }

    /// Differences awaiting an answer, if finalization is on hold.
    pub fn pending_conflict(&self) -> Option<&[FieldChange]> {
        self.pending_conflict.as_deref()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Applies one command.
    ///
    /// ## Errors
    /// Any error leaves stage, draft and persisted files as they were.
    pub fn handle(&mut self, command: WorkflowCommand) -> WorkflowResult<WorkflowEvent> {
        debug!(stage = %self.stage, command = ?command, "Workflow command");

        if self.stage.is_terminal() {
            return Err(self.invalid("accept commands").into());
        }

        match command {
            WorkflowCommand::SetClient(client) => {
                self.require(Stage::CollectingClient, "edit the client")?;
                self.draft.client = client;
                Ok(WorkflowEvent::ClientUpdated)
            }
            WorkflowCommand::SelectClient(name) => {
                self.require(Stage::CollectingClient, "select a client")?;
                let client = self.store.clients().get(&name)?.clone();
                debug!(client = %client.company_name, "Client selected");
                self.draft.client = client.clone();
                Ok(WorkflowEvent::ClientSelected(client))
            }
            WorkflowCommand::Next => self.next(),
            WorkflowCommand::Back => self.back(),
            WorkflowCommand::AddLine(input) => {
                self.require(Stage::CollectingProducts, "add a product")?;
                self.calculator.check_room(&self.draft.lines)?;
                let line = self.calculator.add_input(&input)?;
                debug!(line = %line.summary(), "Line added");
                self.draft.lines.push(line);
                Ok(WorkflowEvent::LinesChanged(self.totals()))
            }
            WorkflowCommand::RemoveLine(index) => {
                self.require(Stage::CollectingProducts, "remove a product")?;
                self.draft.lines = self.calculator.remove_line(&self.draft.lines, index)?;
                Ok(WorkflowEvent::LinesChanged(self.totals()))
            }
            WorkflowCommand::EditLine(index) => {
                self.require(Stage::CollectingProducts, "edit a product")?;
                let (remaining, prefill) =
                    self.calculator.take_line_for_edit(&self.draft.lines, index)?;
                self.draft.lines = remaining;
                Ok(WorkflowEvent::LineForEdit(prefill))
            }
            WorkflowCommand::ChoosePayment(method) => {
                self.require(Stage::CollectingPayment, "choose a payment method")?;
                self.draft.payment_method = method;
                Ok(WorkflowEvent::PaymentChosen(method))
            }
            WorkflowCommand::Finalize => self.finalize(),
            WorkflowCommand::ConfirmClientUpdate => {
                self.require_conflict("confirm a client update")?;
                self.store.clients_mut().confirm_update(&self.draft.client)?;
                self.pending_conflict = None;
                self.complete()
            }
            WorkflowCommand::KeepStoredClient => {
                self.require_conflict("keep the stored client")?;
                self.pending_conflict = None;
                self.complete()
            }
        }
    }

    fn next(&mut self) -> WorkflowResult<WorkflowEvent> {
        let Some(next) = self.stage.next() else {
            return Err(self.invalid("go to the next page").into());
        };

        if self.stage == Stage::CollectingClient {
            validate_company_name(&self.draft.client.company_name)?;
        }

        self.stage = next;
        Ok(WorkflowEvent::StageChanged(next))
    }

    fn back(&mut self) -> WorkflowResult<WorkflowEvent> {
        let Some(previous) = self.stage.previous() else {
            return Err(self.invalid("go back").into());
        };

        self.pending_conflict = None;
        self.stage = previous;
        Ok(WorkflowEvent::StageChanged(previous))
    }

    fn finalize(&mut self) -> WorkflowResult<WorkflowEvent> {
        self.require(Stage::CollectingPayment, "finalize")?;

        match self.store.clients_mut().upsert(&self.draft.client)? {
            UpsertResult::ConflictDetected(changes) => {
                info!(
                    client = %self.draft.client.company_name,
                    fields = changes.len(),
                    "Stored client differs, waiting for confirmation"
                );
                self.pending_conflict = Some(changes.clone());
                Ok(WorkflowEvent::ClientConflict(changes))
            }
            UpsertResult::Inserted | UpsertResult::Unchanged | UpsertResult::Updated => {
                self.pending_conflict = None;
                self.complete()
            }
        }
    }

    /// Steps 2 to 6 of finalization.
    fn complete(&mut self) -> WorkflowResult<WorkflowEvent> {
        let client = self.draft.client.trimmed();
        let totals = self
            .calculator
            .compute_totals(&self.draft.lines, client.is_tax_exempt());
        let number = self.store.sequencer().next();

        let doc = InvoiceDocument {
            number,
            issue_date: self.issue_date.unwrap_or_else(|| Local::now().date_naive()),
            seller: self.seller.clone(),
            client,
            lines: self.draft.lines.clone(),
            totals,
            payment_method: self.draft.payment_method,
        };

        let path = self.renderer.render(&doc).map_err(|e| {
            warn!(number, error = %e, "Rendering failed, invoice number not used");
            e
        })?;
        self.store.sequencer_mut().commit()?;
        remove_previous_artifact(&self.renderer, number);

        self.stage = Stage::Finalized;
        info!(number, path = %path.display(), total = %totals.grand_total, "Invoice finalized");

        Ok(WorkflowEvent::Finalized(FinalizedInvoice {
            number,
            path,
            totals,
        }))
    }

    fn require(&self, stage: Stage, action: &str) -> Result<(), CoreError> {
        if self.stage != stage {
            return Err(self.invalid(action));
        }
        Ok(())
    }

    fn require_conflict(&self, action: &str) -> Result<(), CoreError> {
        self.require(Stage::CollectingPayment, action)?;
        if self.pending_conflict.is_none() {
            return Err(CoreError::InvalidTransition {
                stage: "no client conflict is pending".to_string(),
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn invalid(&self, action: &str) -> CoreError {
        CoreError::InvalidTransition {
            stage: self.stage.to_string(),
            action: action.to_string(),
        }
    }
}
