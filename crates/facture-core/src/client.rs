//! # Client Records
//!
//! The client half of an invoice, plus the comparison rules the client
//! directory uses to decide between insert, no-op and conflict.
//!
//! ## Identity
//! ```text
//! "  Acme SARL "  ──normalize──►  "acme sarl"  ◄──normalize──  "ACME sarl"
//!                                     │
//!                           one stored record per key
//! ```
//!
//! ## Persisted Shape
//! The JSON keys are the ones the invoice tool has always written to
//! `clients.json`, so existing client lists keep loading:
//! ```json
//! {
//!   "Nom de l'entreprise": "Acme SARL",
//!   "Adresse": "12 rue des Lilas",
//!   "Adresse_cp": "75011",
//!   "Adresse_ville": "Paris",
//!   "Contact": "01 23 45 67 89",
//!   "Num_TVA": ""
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalizes a company name into its directory key.
///
/// ```rust
/// use facture_core::client::normalize_name;
///
/// assert_eq!(normalize_name("  Acme SARL "), "acme sarl");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Client Record
// =============================================================================

/// A billed company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    #[serde(rename = "Nom de l'entreprise")]
    pub company_name: String,

    #[serde(rename = "Adresse", default)]
    pub street_address: String,

    #[serde(rename = "Adresse_cp", default)]
    pub postal_code: String,

    #[serde(rename = "Adresse_ville", default)]
    pub city: String,

    #[serde(rename = "Contact", default)]
    pub contact_phone: String,

    /// Intra-community VAT number. Present means reverse charge.
    #[serde(rename = "Num_TVA", default, with = "blank_as_none")]
    pub tax_id: Option<String>,
}

impl ClientRecord {
    /// Creates a record with only a company name set.
    pub fn new(company_name: impl Into<String>) -> Self {
        ClientRecord {
            company_name: company_name.into(),
            ..Default::default()
        }
    }

    /// Sets the street address.
    pub fn street_address(mut self, value: impl Into<String>) -> Self {
        self.street_address = value.into();
        self
    }

    /// Sets the postal code.
    pub fn postal_code(mut self, value: impl Into<String>) -> Self {
        self.postal_code = value.into();
        self
    }

    /// Sets the city.
    pub fn city(mut self, value: impl Into<String>) -> Self {
        self.city = value.into();
        self
    }

    /// Sets the contact phone number.
    pub fn contact_phone(mut self, value: impl Into<String>) -> Self {
        self.contact_phone = value.into();
        self
    }

    /// Sets the tax identifier. A blank value clears it.
    pub fn tax_id(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.tax_id = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    /// Directory key of this record.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.company_name)
    }

    /// Checks whether this record names the same company as `name`.
    pub fn matches_name(&self, name: &str) -> bool {
        self.normalized_name() == normalize_name(name)
    }

    /// Reverse-charge rule: a non-blank tax id zeroes the tax line.
    pub fn is_tax_exempt(&self) -> bool {
        self.tax_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }

    /// `"street, postal code, city"`, the single address line of the client block.
    pub fn formatted_address(&self) -> String {
        format!(
            "{}, {}, {}",
            self.street_address.trim(),
            self.postal_code.trim(),
            self.city.trim()
        )
    }

    /// Returns a copy with every field trimmed and a blank tax id cleared.
    pub fn trimmed(&self) -> ClientRecord {
        ClientRecord {
            company_name: self.company_name.trim().to_string(),
            street_address: self.street_address.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            city: self.city.trim().to_string(),
            contact_phone: self.contact_phone.trim().to_string(),
            tax_id: self
                .tax_id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }

    /// Value of one comparable field, trimmed. A missing tax id reads as `""`.
    pub fn field(&self, field: ClientField) -> &str {
        match field {
            ClientField::StreetAddress => self.street_address.trim(),
            ClientField::PostalCode => self.postal_code.trim(),
            ClientField::City => self.city.trim(),
            ClientField::ContactPhone => self.contact_phone.trim(),
            ClientField::TaxId => self.tax_id.as_deref().map(str::trim).unwrap_or(""),
        }
    }

    /// Field-level differences from `self` (stored) to `incoming`.
    ///
    /// Values are compared after trimming, so incidental spacing never shows
    /// up as a conflict. The company name is not compared: both records are
    /// assumed to share the same key.
    ///
    /// ```rust
    /// use facture_core::client::{ClientField, ClientRecord};
    ///
    /// let stored = ClientRecord::new("Acme").city("Paris");
    /// let incoming = ClientRecord::new("ACME").city(" Lyon ");
    ///
    /// let changes = stored.differences(&incoming);
    /// assert_eq!(changes.len(), 1);
    /// assert_eq!(changes[0].field, ClientField::City);
    /// assert_eq!(changes[0].after, "Lyon");
    /// ```
    pub fn differences(&self, incoming: &ClientRecord) -> Vec<FieldChange> {
        ClientField::ALL
            .iter()
            .filter(|&&field| self.field(field) != incoming.field(field))
            .map(|&field| FieldChange {
                field,
                before: self.field(field).to_string(),
                after: incoming.field(field).to_string(),
            })
            .collect()
    }
}

// =============================================================================
// Field Changes
// =============================================================================

/// The fields compared when a known client is saved again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClientField {
    StreetAddress,
    PostalCode,
    City,
    ContactPhone,
    TaxId,
}

impl ClientField {
    /// All comparable fields, in form order.
    pub const ALL: [ClientField; 5] = [
        ClientField::StreetAddress,
        ClientField::PostalCode,
        ClientField::City,
        ClientField::ContactPhone,
        ClientField::TaxId,
    ];

    /// Key of this field in `clients.json`.
    pub fn storage_key(&self) -> &'static str {
        match self {
            ClientField::StreetAddress => "Adresse",
            ClientField::PostalCode => "Adresse_cp",
            ClientField::City => "Adresse_ville",
            ClientField::ContactPhone => "Contact",
            ClientField::TaxId => "Num_TVA",
        }
    }
}

impl fmt::Display for ClientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// One field that differs between the stored and the incoming record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    pub field: ClientField,
    pub before: String,
    pub after: String,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.field, self.before, self.after)
    }
}

// =============================================================================
// Serde Helpers
// =============================================================================

/// Writes an absent tax id as `""` and reads `""`/`null` back as absent.
mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let value: Option<String> = Option::deserialize(d)?;
        Ok(value.filter(|s| !s.trim().is_empty()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> ClientRecord {
        ClientRecord::new("Acme SARL")
            .street_address("12 rue des Lilas")
            .postal_code("75011")
            .city("Paris")
            .contact_phone("01 23 45 67 89")
    }

    #[test]
    fn test_name_matching_ignores_case_and_spacing() {
        assert!(acme().matches_name("  ACME sarl "));
        assert!(!acme().matches_name("Acme"));
    }

    #[test]
    fn test_tax_exempt_requires_non_blank_id() {
        assert!(!acme().is_tax_exempt());
        assert!(!acme().tax_id("   ").is_tax_exempt());
        assert!(acme().tax_id("FR12345678901").is_tax_exempt());

        let mut raw = acme();
        raw.tax_id = Some("  ".to_string());
        assert!(!raw.is_tax_exempt());
    }

    #[test]
    fn test_identical_after_trim_has_no_differences() {
        let incoming = ClientRecord::new("acme sarl")
            .street_address(" 12 rue des Lilas ")
            .postal_code("75011 ")
            .city("Paris")
            .contact_phone("01 23 45 67 89");
        assert!(acme().differences(&incoming).is_empty());
    }

    #[test]
    fn test_address_only_difference() {
        let incoming = acme().street_address("3 avenue Foch");
        let changes = acme().differences(&incoming);

        assert_eq!(
            changes,
            vec![FieldChange {
                field: ClientField::StreetAddress,
                before: "12 rue des Lilas".to_string(),
                after: "3 avenue Foch".to_string(),
            }]
        );
    }

    #[test]
    fn test_tax_id_added_is_a_difference() {
        let changes = acme().differences(&acme().tax_id("FR1"));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, ClientField::TaxId);
        assert_eq!(changes[0].before, "");
        assert_eq!(changes[0].to_string(), "Num_TVA:  -> FR1");
    }

    #[test]
    fn test_formatted_address() {
        assert_eq!(acme().formatted_address(), "12 rue des Lilas, 75011, Paris");
    }

    #[test]
    fn test_json_uses_legacy_keys() {
        let json = serde_json::to_value(acme()).unwrap();
        assert_eq!(json["Nom de l'entreprise"], "Acme SARL");
        assert_eq!(json["Adresse_ville"], "Paris");
        assert_eq!(json["Num_TVA"], "");
    }

    #[test]
    fn test_json_missing_and_blank_tax_id() {
        let old = r#"{"Nom de l'entreprise":"Old Co","Adresse":"1 rue","Adresse_cp":"1","Adresse_ville":"X","Contact":"0"}"#;
        let record: ClientRecord = serde_json::from_str(old).unwrap();
        assert_eq!(record.tax_id, None);

        let blank = r#"{"Nom de l'entreprise":"Co","Num_TVA":"  "}"#;
        let record: ClientRecord = serde_json::from_str(blank).unwrap();
        assert_eq!(record.tax_id, None);
        assert_eq!(record.city, "");
    }

    #[test]
    fn test_trimmed() {
        let record = ClientRecord::new("  Co ").city(" Lyon ").tax_id(" FR9 ");
        let trimmed = record.trimmed();
        assert_eq!(trimmed.company_name, "Co");
        assert_eq!(trimmed.city, "Lyon");
        assert_eq!(trimmed.tax_id.as_deref(), Some("FR9"));
    }
}
