//! # Client Commands
//!
//! The client picker dialog: a searchable list with select and delete.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  选择客户                                │
//! │  ┌────────────────────────────────────┐  │
//! │  │ 搜索客户名...                      │  │  filter_clients
//! │  └────────────────────────────────────┘  │
//! │  Acme                   [选择] [删除]    │  select_client / delete_client
//! │  Boulangerie Dupré      [选择] [删除]    │
//! └──────────────────────────────────────────┘
//! ```

use facture_core::ClientRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::render::InvoiceRenderer;
use crate::workflow::{Workflow, WorkflowCommand, WorkflowEvent};

/// A stored client as shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub company_name: String,
    pub street_address: String,
    pub postal_code: String,
    pub city: String,
    pub contact_phone: String,
    pub tax_id: Option<String>,
    /// `street, postal code, city` on one line
    pub address: String,
    pub tax_exempt: bool,
}

impl From<&ClientRecord> for ClientDto {
    fn from(record: &ClientRecord) -> Self {
        ClientDto {
            company_name: record.company_name.clone(),
            street_address: record.street_address.clone(),
            postal_code: record.postal_code.clone(),
            city: record.city.clone(),
            contact_phone: record.contact_phone.clone(),
            tax_id: record.tax_id.clone(),
            address: record.formatted_address(),
            tax_exempt: record.is_tax_exempt(),
        }
    }
}

/// All stored clients, in file order.
pub fn list_clients<R: InvoiceRenderer>(workflow: &Workflow<R>) -> Vec<ClientDto> {
    debug!("list_clients command");
    workflow
        .store()
        .clients()
        .list()
        .iter()
        .map(ClientDto::from)
        .collect()
}

/// Clients whose name contains `query`, ignoring case. Blank lists all.
pub fn filter_clients<R: InvoiceRenderer>(workflow: &Workflow<R>, query: &str) -> Vec<ClientDto> {
    debug!(query = %query, "filter_clients command");
    workflow
        .store()
        .clients()
        .filter(query)
        .into_iter()
        .map(ClientDto::from)
        .collect()
}

/// Fills the client form with a stored client.
///
/// ## Errors
/// - `NOT_FOUND` when no client has that name
/// - `INVALID_STATE` when the form is not on the client page
pub fn select_client<R: InvoiceRenderer>(
    workflow: &mut Workflow<R>,
    name: &str,
) -> ApiResult<ClientDto> {
    debug!(name = %name, "select_client command");

    match workflow.handle(WorkflowCommand::SelectClient(name.to_string()))? {
        WorkflowEvent::ClientSelected(record) => Ok(ClientDto::from(&record)),
        other => Err(ApiError::internal(format!(
            "unexpected workflow event: {:?}",
            other
        ))),
    }
}

/// Deletes a stored client after the user confirmed "确定要删除这个客户吗？".
///
/// Returns whether a client was removed. The current form is left as is.
pub fn delete_client<R: InvoiceRenderer>(workflow: &mut Workflow<R>, name: &str) -> ApiResult<bool> {
    debug!(name = %name, "delete_client command");

    Ok(workflow.store_mut().clients_mut().delete(name)?)
}
