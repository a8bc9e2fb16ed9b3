use crate::domain::amount::to_minor_units;
use crate::domain::status::PaymentStatus;
use crate::domain::timestamp::parse_payment_date;
use crate::error::{IpnError, Result};
use crate::interfaces::form::payload_decoder::decode_fields;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

/// Field names the processor uses in notification payloads.
pub mod field {
    pub const PAYMENT_STATUS: &str = "payment_status";
    pub const TXN_ID: &str = "txn_id";
    pub const TXN_TYPE: &str = "txn_type";
    pub const GROSS: &str = "mc_gross";
    pub const FEE: &str = "mc_fee";
    pub const CURRENCY: &str = "mc_currency";
    pub const ITEM_NUMBER: &str = "item_number";
    pub const INVOICE: &str = "invoice";
    pub const CUSTOM: &str = "custom";
    pub const RECEIVER_EMAIL: &str = "receiver_email";
    pub const PAYER_EMAIL: &str = "payer_email";
    pub const BUSINESS: &str = "business";
    pub const PENDING_REASON: &str = "pending_reason";
    pub const REASON_CODE: &str = "reason_code";
    pub const MEMO: &str = "memo";
    pub const TEST_IPN: &str = "test_ipn";
    pub const PAYMENT_DATE: &str = "payment_date";
}

/// An inbound payment notification.
///
/// Holds the exact bytes that were received alongside the decoded fields. The
/// raw bytes are never rewritten: verification must echo them back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    raw: Vec<u8>,
    fields: BTreeMap<String, String>,
}

impl Notification {
    /// Parses a form-encoded notification body.
    pub fn parse(raw: impl Into<Vec<u8>>) -> Self {
        let raw = raw.into();
        let fields = decode_fields(&raw);
        Self { raw, fields }
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Every decoded field, including ones without a dedicated accessor.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Clears the raw body and all fields so the value can be reused.
    pub fn reset(&mut self) {
        self.raw.clear();
        self.fields.clear();
    }

    pub fn status(&self) -> Option<PaymentStatus> {
        self.field(field::PAYMENT_STATUS).map(PaymentStatus::from)
    }

    pub fn is_complete(&self) -> bool {
        self.field(field::PAYMENT_STATUS) == Some("Completed")
    }

    pub fn is_pending(&self) -> bool {
        self.field(field::PAYMENT_STATUS) == Some("Pending")
    }

    /// True only when the processor marked this as a sandbox notification.
    pub fn is_test(&self) -> bool {
        self.field(field::TEST_IPN) == Some("1")
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.field(field::TXN_ID)
    }

    pub fn transaction_type(&self) -> Option<&str> {
        self.field(field::TXN_TYPE)
    }

    /// Gross amount as the decimal string the processor sent.
    pub fn gross(&self) -> Option<&str> {
        self.field(field::GROSS)
    }

    pub fn fee(&self) -> Option<&str> {
        self.field(field::FEE)
    }

    pub fn currency(&self) -> Option<&str> {
        self.field(field::CURRENCY)
    }

    pub fn item_id(&self) -> Option<&str> {
        self.field(field::ITEM_NUMBER)
    }

    pub fn invoice(&self) -> Option<&str> {
        self.field(field::INVOICE)
    }

    pub fn custom(&self) -> Option<&str> {
        self.field(field::CUSTOM)
    }

    pub fn receiver_email(&self) -> Option<&str> {
        self.field(field::RECEIVER_EMAIL)
    }

    pub fn payer_email(&self) -> Option<&str> {
        self.field(field::PAYER_EMAIL)
    }

    /// Merchant account the payment was sent to.
    pub fn account(&self) -> Option<&str> {
        self.field(field::BUSINESS)
    }

    pub fn pending_reason(&self) -> Option<&str> {
        self.field(field::PENDING_REASON)
    }

    pub fn reason_code(&self) -> Option<&str> {
        self.field(field::REASON_CODE)
    }

    pub fn memo(&self) -> Option<&str> {
        self.field(field::MEMO)
    }

    pub fn payment_date(&self) -> Option<&str> {
        self.field(field::PAYMENT_DATE)
    }

    /// When the processor says the payment happened.
    pub fn received_at(&self) -> Result<DateTime<FixedOffset>> {
        let value = self.required(field::PAYMENT_DATE)?;
        parse_payment_date(value)
    }

    /// Gross amount in minor currency units (cents for USD).
    pub fn gross_cents(&self) -> Result<i64> {
        let value = self.required(field::GROSS)?;
        to_minor_units(field::GROSS, value)
    }

    pub fn fee_cents(&self) -> Result<i64> {
        let value = self.required(field::FEE)?;
        to_minor_units(field::FEE, value)
    }

    /// A serializable snapshot of the typed views.
    ///
    /// Strict accessors that fail are reported as `None` here; call them
    /// directly to get the error.
    pub fn summary(&self) -> NotificationSummary {
        NotificationSummary {
            status: self.status(),
            complete: self.is_complete(),
            pending: self.is_pending(),
            test: self.is_test(),
            transaction_id: self.transaction_id().map(str::to_owned),
            transaction_type: self.transaction_type().map(str::to_owned),
            gross: self.gross().map(str::to_owned),
            gross_cents: self.gross_cents().ok(),
            fee: self.fee().map(str::to_owned),
            fee_cents: self.fee_cents().ok(),
            currency: self.currency().map(str::to_owned),
            item_id: self.item_id().map(str::to_owned),
            invoice: self.invoice().map(str::to_owned),
            custom: self.custom().map(str::to_owned),
            receiver_email: self.receiver_email().map(str::to_owned),
            payer_email: self.payer_email().map(str::to_owned),
            received_at: self.received_at().ok(),
        }
    }

    fn required(&self, name: &'static str) -> Result<&str> {
        self.field(name)
            .ok_or(IpnError::MissingField { field: name })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationSummary {
    pub status: Option<PaymentStatus>,
    pub complete: bool,
    pub pending: bool,
    pub test: bool,
    pub transaction_id: Option<String>,
    pub transaction_type: Option<String>,
    pub gross: Option<String>,
    pub gross_cents: Option<i64>,
    pub fee: Option<String>,
    pub fee_cents: Option<i64>,
    pub currency: Option<String>,
    pub item_id: Option<String>,
    pub invoice: Option<String>,
    pub custom: Option<String>,
    pub receiver_email: Option<String>,
    pub payer_email: Option<String>,
    pub received_at: Option<DateTime<FixedOffset>>,
}
