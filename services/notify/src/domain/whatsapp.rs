use serde_json::Value;

use crate::domain::types::{ShippingStatus, WhatsAppTemplate};
use crate::error::NotifyServiceError;

impl WhatsAppTemplate {
    pub fn parse(raw: Value) -> Result<Self, NotifyServiceError> {
        serde_json::from_value(raw).map_err(|e| NotifyServiceError::InvalidData(e.to_string()))
    }

    /// Message text sent for this template.
    pub fn render(&self) -> String {
        match self {
            Self::PaymentConfirmation { order_id } => format!(
                "🎉 ¡Pago confirmado!\n\nTu pedido #{order_id} fue recibido exitosamente.\n\n\
                 Te mantendremos informado sobre el estado de tu pedido.\n\n¡Gracias por tu compra! 🛍️"
            ),
            Self::OrderStatus { status, order_id } => match order_id {
                Some(id) => format!("Pedido #{id}\n\n{}", status.message()),
                None => status.message().to_owned(),
            },
        }
    }
}

impl ShippingStatus {
    fn message(self) -> &'static str {
        match self {
            Self::Preparing => {
                "📦 Tu pedido está siendo preparado.\n\nNuestro equipo está trabajando para tener tu pedido listo lo antes posible.\n\nTe notificaremos cuando esté listo para enviar."
            }
            Self::Shipped => {
                "🚚 ¡Tu pedido fue enviado!\n\nYa está en camino a tu dirección.\n\nPodrás recibirlo pronto. Mantente atento a las actualizaciones de entrega."
            }
            Self::Delivered => {
                "✅ ¡Tu pedido fue entregado!\n\nEsperamos que disfrutes tu compra.\n\nGracias por confiar en nosotros. 😊"
            }
            Self::Canceled => {
                "❌ Tu pedido fue cancelado.\n\nSi tienes alguna pregunta o necesitas asistencia, no dudes en contactarnos.\n\nEstamos aquí para ayudarte."
            }
        }
    }
}
