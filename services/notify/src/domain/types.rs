use std::fmt;

use serde::Deserialize;

/// Order reference as sent by the storefront: numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(i64),
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ── Email payloads ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationData {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedData {
    pub order_id: OrderId,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub shipping_address: String,
    pub payment_method: String,
}

/// Lifecycle states of an order as named in customer mail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pendiente,
    Confirmado,
    Enviado,
    Entregado,
    Cancelado,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdatedData {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// A transactional email, typed by its template.
#[derive(Debug, Clone)]
pub enum EmailKind {
    Registration(RegistrationData),
    OrderCreated(OrderCreatedData),
    OrderUpdated(OrderUpdatedData),
}

/// Email ready to hand to the delivery provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

// ── WhatsApp payloads ────────────────────────────────────────────────────────

/// Shipping states a WhatsApp status update can announce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShippingStatus {
    Preparing,
    Shipped,
    Delivered,
    Canceled,
}

/// Canned WhatsApp messages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WhatsAppTemplate {
    PaymentConfirmation {
        order_id: OrderId,
    },
    OrderStatus {
        status: ShippingStatus,
        #[serde(default)]
        order_id: Option<OrderId>,
    },
}

/// Identifiers WhatsApp returns for an accepted message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhatsAppReceipt {
    pub message_id: Option<String>,
    pub whatsapp_id: Option<String>,
}
