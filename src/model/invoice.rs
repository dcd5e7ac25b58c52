use super::{EntityType, Mapper};
use crate::{
    common::{Record, key::Keys},
    error::Result,
    identity,
    keys::{self, Prefix},
};

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A payment made against an invoice.
///
/// Dates use the same fixed-width millisecond form as every other stored date.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Payment {
    /// Amount paid.
    pub amount: Decimal,
    /// When the payment was made.
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
}

mod timestamp {
    use crate::keys;

    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&keys::encode_timestamp(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = String::deserialize(deserializer)?;
        keys::decode_timestamp(&value).map_err(de::Error::custom)
    }
}

/// Apply `convert` to the top-level amount and to every payment amount.
fn convert_amounts(record: &mut Record, convert: fn(&mut Record, &[&str])) {
    convert(record, &["amount"]);
    if let Some(AttributeValue::L(payments)) = record.get_mut("payments") {
        for payment in payments {
            if let AttributeValue::M(payment) = payment {
                convert(payment, &["amount"]);
            }
        }
    }
}

/// An invoice issued for an order.
///
/// Lives under its order's partition; the `gsi1` entry keyed on the invoice alone
/// makes it reachable by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Invoice {
    /// Invoice identifier, assigned on first save when absent.
    pub id: Option<String>,
    /// The order invoiced.
    pub order_id: String,
    /// Payments received so far.
    pub payments: Vec<Payment>,
    /// Invoiced amount.
    pub amount: Decimal,
    /// Issue date, defaults to the time of the save.
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
struct InvoiceLayout {
    pk: String,
    sk: String,
    gsi1_pk: String,
    gsi1_sk: String,
    #[serde(default)]
    payments: Vec<Payment>,
    amount: Decimal,
    date: String,
    #[serde(rename = "entityType")]
    entity_type: EntityType,
}

impl Invoice {
    /// Primary key of the invoice row.
    pub fn primary_key(order_id: &str, invoice_id: &str) -> Keys {
        Keys::table(
            keys::encode_key(order_id, Prefix::Order),
            keys::encode_key(invoice_id, Prefix::Invoice),
        )
    }

    /// Fill the identity and the date, normalising identifiers.
    pub fn with_defaults(self) -> Self {
        Self {
            id: Some(identity::assign_id(self.id.as_deref(), Prefix::Invoice)),
            order_id: keys::strip_prefix(&self.order_id, Prefix::Order).to_string(),
            payments: self
                .payments
                .into_iter()
                .map(|payment| Payment {
                    date: keys::truncate_timestamp(payment.date),
                    ..payment
                })
                .collect(),
            date: Some(keys::truncate_timestamp(self.date.unwrap_or_else(Utc::now))),
            ..self
        }
    }
}

impl Mapper for Invoice {
    const ENTITY_TYPE: EntityType = EntityType::Invoice;

    fn to_record(&self) -> Result<Record> {
        let id = super::required(&self.id, Self::ENTITY_TYPE, "id")?;
        let date = super::required(&self.date, Self::ENTITY_TYPE, "date")?;
        let invoice_key = super::key(id, Prefix::Invoice, Self::ENTITY_TYPE, "id")?;
        let mut record = super::encode(InvoiceLayout {
            pk: super::key(&self.order_id, Prefix::Order, Self::ENTITY_TYPE, "order_id")?,
            sk: invoice_key.clone(),
            gsi1_pk: invoice_key.clone(),
            gsi1_sk: invoice_key,
            payments: self.payments.clone(),
            amount: self.amount,
            date: keys::encode_timestamp(date),
            entity_type: Self::ENTITY_TYPE,
        })?;
        convert_amounts(&mut record, super::as_numbers);
        Ok(record)
    }

    fn from_record(mut record: Record) -> Result<Self> {
        convert_amounts(&mut record, super::as_strings);
        let layout: InvoiceLayout = super::decode(record, Self::ENTITY_TYPE)?;
        Ok(Self {
            id: Some(keys::decode_key(&layout.gsi1_pk, Prefix::Invoice)?),
            order_id: keys::decode_key(&layout.pk, Prefix::Order)?,
            payments: layout.payments,
            amount: layout.amount,
            date: Some(keys::decode_timestamp(&layout.date)?),
        })
    }
}
