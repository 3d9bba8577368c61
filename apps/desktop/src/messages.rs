//! # Messages
//!
//! Every label, prompt and dialog text of the invoice form, keyed by
//! [`MessageId`]. French and Chinese are shipped.
//!
//! ```text
//! MessageId::Quantity.text(Language::French)   → "Quantité"
//! MessageId::Quantity.text(Language::Chinese)  → "数量"
//! ```

use facture_core::{ClientField, FieldChange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ErrorCode;

/// Language of the form labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::Chinese => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fr" | "french" | "français" => Ok(Language::French),
            "zh" | "chinese" | "中文" => Ok(Language::Chinese),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}

/// A piece of user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageId {
    // Window and client picker
    WindowTitle,
    ClientsButton,
    SelectClientTitle,
    SearchClientHint,
    Select,
    Delete,
    Edit,
    DeleteClientTitle,
    DeleteClientConfirm,

    // Client form
    CompanyName,
    StreetAddress,
    PostalCode,
    City,
    ContactPhone,
    TaxId,

    // Navigation
    Previous,
    Next,

    // Products and payment
    ProductName,
    Quantity,
    UnitPrice,
    AddProduct,
    PaymentMethod,
    GenerateInvoice,

    // Client conflict dialog
    ConflictTitle,
    ConflictIntro,
    ConflictQuestion,
    ConflictAddress,
    ConflictPostalCode,
    ConflictCity,
    ConflictContact,
    ConflictTaxId,

    // Results
    ErrorTitle,
    SuccessTitle,
    InvoiceGenerated,
    InvalidQuantity,
    InvalidPrice,
    CompanyNameRequired,
    InvalidInput,
    ClientNotFound,
    SaveFailed,
    CorruptData,
    RenderFailed,
    UnexpectedError,
}

impl MessageId {
    /// Text of this message in `lang`.
    pub fn text(self, lang: Language) -> &'static str {
        use Language::{Chinese as Zh, French as Fr};
        use MessageId::*;

        match (self, lang) {
            (WindowTitle, Fr) => "Générateur de factures",
            (WindowTitle, Zh) => "发票生成器",
            (ClientsButton, Fr) => "Clients",
            (ClientsButton, Zh) => "客户",
            (SelectClientTitle, Fr) => "Choisir un client",
            (SelectClientTitle, Zh) => "选择客户",
            (SearchClientHint, Fr) => "Rechercher un client...",
            (SearchClientHint, Zh) => "搜索客户名...",
            (Select, Fr) => "Choisir",
            (Select, Zh) => "选择",
            (Delete, Fr) => "Supprimer",
            (Delete, Zh) => "删除",
            (Edit, Fr) => "Modifier",
            (Edit, Zh) => "修改",
            (DeleteClientTitle, Fr) => "Supprimer le client",
            (DeleteClientTitle, Zh) => "删除客户",
            (DeleteClientConfirm, Fr) => "Voulez-vous vraiment supprimer ce client ?",
            (DeleteClientConfirm, Zh) => "确定要删除这个客户吗？",

            (CompanyName, Fr) => "Nom de l'entreprise",
            (CompanyName, Zh) => "客人商店名",
            (StreetAddress, Fr) => "Numéro et rue",
            (StreetAddress, Zh) => "客人商店 门牌号 和 街道名",
            (PostalCode, Fr) => "Code postal",
            (PostalCode, Zh) => "客人城市邮编",
            (City, Fr) => "Ville",
            (City, Zh) => "客人城市",
            (ContactPhone, Fr) => "Contact",
            (ContactPhone, Zh) => "客人联系方式",
            (TaxId, Fr) => "Numéro TVA",
            (TaxId, Zh) => "客人税号 (Numéro TVA)",

            (Previous, Fr) => "Précédent",
            (Previous, Zh) => "上一页",
            (Next, Fr) => "Suivant",
            (Next, Zh) => "下一页",

            (ProductName, Fr) => "Nom du produit (35 caractères max)",
            (ProductName, Zh) => "产品名 (最多35个字母)",
            (Quantity, Fr) => "Quantité",
            (Quantity, Zh) => "数量",
            (UnitPrice, Fr) => "Prix unitaire",
            (UnitPrice, Zh) => "单价",
            (AddProduct, Fr) => "Ajouter le produit",
            (AddProduct, Zh) => "添加产品",
            (PaymentMethod, Fr) => "Mode de paiement",
            (PaymentMethod, Zh) => "支付方式",
            (GenerateInvoice, Fr) => "Générer la facture",
            (GenerateInvoice, Zh) => "生成发票",

            (ConflictTitle, Fr) => "Conflit d'informations client",
            (ConflictTitle, Zh) => "客户信息冲突",
            (ConflictIntro, Fr) => "Ce client est déjà enregistré avec d'autres informations, ancien -> nouveau :",
            (ConflictIntro, Zh) => "同客户一下信息不同 旧信息->新信息:",
            (ConflictQuestion, Fr) => "Voulez-vous les remplacer ?",
            (ConflictQuestion, Zh) => "请问是否替换 ?",
            (ConflictAddress, Fr) => "Adresse",
            (ConflictAddress, Zh) => "地址",
            (ConflictPostalCode, Fr) => "Code postal",
            (ConflictPostalCode, Zh) => "邮政编码",
            (ConflictCity, Fr) => "Ville",
            (ConflictCity, Zh) => "城市",
            (ConflictContact, Fr) => "Contact",
            (ConflictContact, Zh) => "联系方式",
            (ConflictTaxId, Fr) => "Numéro TVA",
            (ConflictTaxId, Zh) => "税号",

            (ErrorTitle, Fr) => "Erreur",
            (ErrorTitle, Zh) => "错误",
            (SuccessTitle, Fr) => "Succès",
            (SuccessTitle, Zh) => "成功",
            (InvoiceGenerated, Fr) => "Facture générée.",
            (InvoiceGenerated, Zh) => "发票已生成.",
            (InvalidQuantity, Fr) => "Veuillez saisir une quantité valide.",
            (InvalidQuantity, Zh) => "请输入正确数量.",
            (InvalidPrice, Fr) => "Veuillez saisir un prix valide.",
            (InvalidPrice, Zh) => "请输入正确价格.",
            (CompanyNameRequired, Fr) => "Veuillez saisir le nom de l'entreprise.",
            (CompanyNameRequired, Zh) => "请输入客人商店名.",
            (InvalidInput, Fr) => "Saisie invalide.",
            (InvalidInput, Zh) => "输入无效.",
            (ClientNotFound, Fr) => "Client introuvable.",
            (ClientNotFound, Zh) => "找不到该客户.",
            (SaveFailed, Fr) => "Impossible d'enregistrer les données.",
            (SaveFailed, Zh) => "数据保存失败.",
            (CorruptData, Fr) => "Le fichier de données est illisible.",
            (CorruptData, Zh) => "数据文件已损坏.",
            (RenderFailed, Fr) => "Impossible de créer le fichier de la facture.",
            (RenderFailed, Zh) => "无法生成发票文件.",
            (UnexpectedError, Fr) => "Une erreur inattendue est survenue.",
            (UnexpectedError, Zh) => "发生意外错误.",
        }
    }

    /// Label used for `field` in the conflict dialog.
    pub fn for_conflict_field(field: ClientField) -> MessageId {
        match field {
            ClientField::StreetAddress => MessageId::ConflictAddress,
            ClientField::PostalCode => MessageId::ConflictPostalCode,
            ClientField::City => MessageId::ConflictCity,
            ClientField::ContactPhone => MessageId::ConflictContact,
            ClientField::TaxId => MessageId::ConflictTaxId,
        }
    }

    /// Label of `field` on the client form.
    pub fn for_form_field(field: ClientField) -> MessageId {
        match field {
            ClientField::StreetAddress => MessageId::StreetAddress,
            ClientField::PostalCode => MessageId::PostalCode,
            ClientField::City => MessageId::City,
            ClientField::ContactPhone => MessageId::ContactPhone,
            ClientField::TaxId => MessageId::TaxId,
        }
    }

    /// Prompt shown for a failed command.
    pub fn for_error(code: ErrorCode) -> MessageId {
        match code {
            ErrorCode::InvalidQuantity => MessageId::InvalidQuantity,
            ErrorCode::InvalidPrice => MessageId::InvalidPrice,
            ErrorCode::CompanyNameRequired => MessageId::CompanyNameRequired,
            ErrorCode::ValidationError | ErrorCode::InvalidState => MessageId::InvalidInput,
            ErrorCode::NotFound => MessageId::ClientNotFound,
            ErrorCode::PersistenceError => MessageId::SaveFailed,
            ErrorCode::CorruptData => MessageId::CorruptData,
            ErrorCode::RenderError => MessageId::RenderFailed,
            ErrorCode::Internal => MessageId::UnexpectedError,
        }
    }
}

/// Body of the "client information conflict" dialog.
///
/// ```text
/// 同客户一下信息不同 旧信息->新信息:
/// 地址: 1 rue A -> 2 rue B
/// 联系方式: 01 -> 06
///
/// 请问是否替换 ?
/// ```
pub fn conflict_message(changes: &[FieldChange], lang: Language) -> String {
    let diffs: Vec<String> = changes
        .iter()
        .map(|c| {
            format!(
                "{}: {} -> {}",
                MessageId::for_conflict_field(c.field).text(lang),
                c.before,
                c.after
            )
        })
        .collect();

    format!(
        "{}\n{}\n\n{}",
        MessageId::ConflictIntro.text(lang),
        diffs.join("\n"),
        MessageId::ConflictQuestion.text(lang)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parse() {
        assert_eq!("fr".parse::<Language>().unwrap(), Language::French);
        assert_eq!(" ZH ".parse::<Language>().unwrap(), Language::Chinese);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::default(), Language::French);
    }

    #[test]
    fn test_language_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Chinese).unwrap(), "\"zh\"");
        let lang: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(lang, Language::French);
    }

    #[test]
    fn test_prompts() {
        assert_eq!(MessageId::InvalidQuantity.text(Language::Chinese), "请输入正确数量.");
        assert_eq!(MessageId::InvalidPrice.text(Language::Chinese), "请输入正确价格.");
        assert_eq!(MessageId::InvoiceGenerated.text(Language::Chinese), "发票已生成.");
        assert_eq!(MessageId::Quantity.text(Language::French), "Quantité");
    }

    #[test]
    fn test_error_prompts() {
        let id = MessageId::for_error(ErrorCode::InvalidQuantity);
        assert_eq!(id, MessageId::InvalidQuantity);
        assert_eq!(
            MessageId::for_error(ErrorCode::PersistenceError).text(Language::French),
            "Impossible d'enregistrer les données."
        );
    }

    #[test]
    fn test_every_field_has_labels() {
        for field in ClientField::ALL {
            for lang in [Language::French, Language::Chinese] {
                assert!(!MessageId::for_conflict_field(field).text(lang).is_empty());
                assert!(!MessageId::for_form_field(field).text(lang).is_empty());
            }
        }
    }

    #[test]
    fn test_conflict_message() {
        let changes = vec![
            FieldChange {
                field: ClientField::StreetAddress,
                before: "1 rue A".to_string(),
                after: "2 rue B".to_string(),
            },
            FieldChange {
                field: ClientField::ContactPhone,
                before: "01".to_string(),
                after: "06".to_string(),
            },
        ];

        assert_eq!(
            conflict_message(&changes, Language::Chinese),
            "同客户一下信息不同 旧信息->新信息:\n地址: 1 rue A -> 2 rue B\n联系方式: 01 -> 06\n\n请问是否替换 ?"
        );
        assert!(conflict_message(&changes, Language::French).contains("Adresse: 1 rue A -> 2 rue B"));
    }
}
