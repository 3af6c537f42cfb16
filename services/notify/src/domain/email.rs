//! Customer-facing email templates.
//!
//! Every value interpolated into HTML goes through [`escape_html`]; amounts are
//! rendered with [`format_amount`].

use std::fmt::Write as _;

use serde_json::Value;

use crate::domain::types::{
    EmailKind, OrderCreatedData, OrderStatus, OrderUpdatedData, OutgoingEmail, RegistrationData,
};
use crate::error::NotifyServiceError;

/// Sender addresses and links that vary per deployment.
#[derive(Debug, Clone)]
pub struct EmailBranding {
    pub from_accounts: String,
    pub from_orders: String,
    pub store_url: String,
}

const FOOTER_AUTOMATED: &str = "Este correo fue enviado automáticamente, por favor no respondas.";

impl EmailKind {
    /// Decode `data` according to the template name.
    pub fn parse(kind: &str, data: Value) -> Result<Self, NotifyServiceError> {
        fn decode<T: serde::de::DeserializeOwned>(data: Value) -> Result<T, NotifyServiceError> {
            serde_json::from_value(data).map_err(|e| NotifyServiceError::InvalidData(e.to_string()))
        }
        match kind {
            "registration" => decode(data).map(Self::Registration),
            "order_created" => decode(data).map(Self::OrderCreated),
            "order_updated" => decode(data).map(Self::OrderUpdated),
            other => Err(NotifyServiceError::UnknownEmailType(other.to_owned())),
        }
    }

    pub fn render(&self, to: &str, branding: &EmailBranding) -> OutgoingEmail {
        match self {
            Self::Registration(data) => OutgoingEmail {
                from: branding.from_accounts.clone(),
                to: to.to_owned(),
                subject: "¡Bienvenido a CeluCol!".to_owned(),
                html: registration_html(data, &branding.store_url),
            },
            Self::OrderCreated(data) => OutgoingEmail {
                from: branding.from_orders.clone(),
                to: to.to_owned(),
                subject: format!("Pedido #{} - Confirmación", data.order_id),
                html: order_created_html(data),
            },
            Self::OrderUpdated(data) => OutgoingEmail {
                from: branding.from_orders.clone(),
                to: to.to_owned(),
                subject: format!("Pedido #{} - {}", data.order_id, data.status.label()),
                html: order_updated_html(data),
            },
        }
    }
}

impl OrderStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pendiente => "Pendiente de Confirmación",
            Self::Confirmado => "Confirmado y en Preparación",
            Self::Enviado => "Enviado",
            Self::Entregado => "Entregado",
            Self::Cancelado => "Cancelado",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Pendiente => "#f59e0b",
            Self::Confirmado => "#3b82f6",
            Self::Enviado => "#8b5cf6",
            Self::Entregado => "#10b981",
            Self::Cancelado => "#ef4444",
        }
    }

    fn emoji(self) -> &'static str {
        match self {
            Self::Pendiente => "⏳",
            Self::Confirmado => "✅",
            Self::Enviado => "🚚",
            Self::Entregado => "📦",
            Self::Cancelado => "❌",
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Pendiente => {
                "Tu pedido está siendo revisado por nuestro equipo. Te notificaremos una vez sea confirmado."
            }
            Self::Confirmado => {
                "¡Excelente! Tu pedido ha sido confirmado y estamos preparándolo para su envío."
            }
            Self::Enviado => "Tu pedido está en camino. Recibirás tu paquete pronto.",
            Self::Entregado => {
                "¡Tu pedido ha sido entregado! Esperamos que disfrutes tus productos. Gracias por confiar en CeluCol."
            }
            Self::Cancelado => {
                "Tu pedido ha sido cancelado. Si esto fue un error o tienes preguntas, contáctanos."
            }
        }
    }

    /// Timeline steps reached at this status, after "created".
    fn reached(self) -> &'static [(&'static str, &'static str)] {
        const CONFIRMED: (&str, &str) = ("Pedido Confirmado", "Tu pedido está siendo preparado");
        const SHIPPED: (&str, &str) = ("Pedido Enviado", "Tu pedido está en camino");
        const DELIVERED: (&str, &str) =
            ("Pedido Entregado", "Tu pedido ha sido entregado con éxito");
        match self {
            Self::Pendiente => &[],
            Self::Confirmado | Self::Cancelado => &[CONFIRMED],
            Self::Enviado => &[CONFIRMED, SHIPPED],
            Self::Entregado => &[CONFIRMED, SHIPPED, DELIVERED],
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `1234567.5` renders as `1,234,567.5`; at most two decimals, trailing zeros dropped.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac {
        0 => format!("{sign}{grouped}"),
        f if f % 10 == 0 => format!("{sign}{grouped}.{}", f / 10),
        f => format!("{sign}{grouped}.{f:02}"),
    }
}

fn payment_method_label(method: &str) -> &'static str {
    if method == "tarjeta" {
        "Tarjeta de Crédito"
    } else {
        "Transferencia Bancaria"
    }
}

fn layout(header_color: &str, header: &str, body: &str, footer_note: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background: {header_color}; color: white; padding: 30px; text-align: center; border-radius: 10px 10px 0 0; }}
    .content {{ background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px; }}
    .box {{ background: white; padding: 20px; border-radius: 5px; margin: 20px 0; }}
    .footer {{ text-align: center; margin-top: 20px; color: #666; font-size: 12px; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header">{header}</div>
    <div class="content">{body}</div>
    <div class="footer">
      <p>CeluCol - Tu tienda de accesorios móviles</p>
      <p>{footer_note}</p>
    </div>
  </div>
</body>
</html>
"#
    )
}

fn registration_html(data: &RegistrationData, store_url: &str) -> String {
    let body = format!(
        r#"<h2>Hola {name},</h2>
      <p>Gracias por registrarte en CeluCol, tu tienda de confianza para accesorios de celulares.</p>
      <p>Tu cuenta ha sido creada exitosamente con el rol de <strong>{role}</strong>.</p>
      <p>Ya puedes empezar a explorar nuestro catálogo y hacer tus pedidos.</p>
      <p><a href="{url}" style="display: inline-block; padding: 12px 30px; background: #667eea; color: white; text-decoration: none; border-radius: 5px;">Ir a la tienda</a></p>
      <p>Si tienes alguna pregunta, no dudes en contactarnos.</p>"#,
        name = escape_html(&data.name),
        role = escape_html(&data.role),
        url = escape_html(store_url),
    );
    layout(
        "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        "<h1>¡Bienvenido a CeluCol! 🎉</h1>",
        &body,
        FOOTER_AUTOMATED,
    )
}

fn order_created_html(data: &OrderCreatedData) -> String {
    let mut rows = String::new();
    for item in &data.items {
        let cell = "padding: 10px; border-bottom: 1px solid #eee;";
        // Infallible: writing to a String.
        let _ = write!(
            rows,
            r#"<tr><td style="{cell}">{name}</td><td style="{cell} text-align: center;">{qty}</td><td style="{cell} text-align: right;">${price}</td><td style="{cell} text-align: right;">${subtotal}</td></tr>"#,
            name = escape_html(&item.product.name),
            qty = item.quantity,
            price = format_amount(item.product.price),
            subtotal = format_amount(item.product.price * f64::from(item.quantity)),
        );
    }

    let body = format!(
        r#"<h2>Hola,</h2>
      <p>Hemos recibido tu pedido exitosamente. A continuación los detalles:</p>
      <div class="box">
        <h3>Resumen del Pedido</h3>
        <table style="width: 100%; border-collapse: collapse;">
          <thead><tr style="background: #f3f4f6;"><th style="padding: 10px; text-align: left;">Producto</th><th style="padding: 10px;">Cantidad</th><th style="padding: 10px; text-align: right;">Precio</th><th style="padding: 10px; text-align: right;">Subtotal</th></tr></thead>
          <tbody>{rows}</tbody>
        </table>
        <p style="font-size: 18px; font-weight: bold; color: #10b981; text-align: right;">Total: ${total}</p>
      </div>
      <div class="box">
        <h3>Información de Envío</h3>
        <p><strong>Dirección:</strong> {address}</p>
        <p><strong>Método de Pago:</strong> {payment}</p>
        <p><strong>Estado:</strong> <span style="color: #f59e0b;">Pendiente</span></p>
      </div>
      <p>Te notificaremos cuando tu pedido sea confirmado y enviado.</p>"#,
        total = format_amount(data.total),
        address = escape_html(&data.shipping_address),
        payment = payment_method_label(&data.payment_method),
    );
    let header = format!(
        "<h1>✅ ¡Pedido Confirmado!</h1><p>Pedido #{}</p>",
        escape_html(&data.order_id.to_string())
    );
    layout(
        "#10b981",
        &header,
        &body,
        "Si no realizaste este pedido, contacta con nosotros inmediatamente.",
    )
}

fn order_updated_html(data: &OrderUpdatedData) -> String {
    let status = data.status;
    let mut timeline = String::from(
        r#"<div class="box"><strong>Pedido Creado</strong><p>Tu pedido fue recibido exitosamente</p></div>"#,
    );
    for (title, detail) in status.reached() {
        let _ = write!(
            timeline,
            r#"<div class="box" style="border-left: 4px solid {color};"><strong>{title}</strong><p>{detail}</p></div>"#,
            color = status.color(),
        );
    }

    let body = format!(
        r#"<h2>Hola,</h2>
      <p>Tu pedido ha sido actualizado:</p>
      <div style="text-align: center; margin: 30px 0;">
        <span style="display: inline-block; padding: 10px 20px; background: {color}; color: white; border-radius: 20px; font-weight: bold;">{label}</span>
      </div>
      <p>{message}</p>
      <h3>Línea de Tiempo</h3>
      {timeline}
      <p>Si tienes alguna pregunta sobre tu pedido, no dudes en contactarnos.</p>"#,
        color = status.color(),
        label = status.label(),
        message = status.message(),
    );
    let header = format!(
        "<h1>{} Estado del Pedido Actualizado</h1><p>Pedido #{}</p>",
        status.emoji(),
        escape_html(&data.order_id.to_string())
    );
    layout(status.color(), &header, &body, FOOTER_AUTOMATED)
}
