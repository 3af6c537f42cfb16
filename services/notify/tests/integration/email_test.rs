use serde_json::json;

use celucol_notify::error::NotifyServiceError;
use celucol_notify::usecase::email::{SendEmailInput, SendEmailUseCase};

use crate::helpers::{MockEmailSender, branding};

#[tokio::test]
async fn should_send_order_created_from_orders_sender() {
    let sender = MockEmailSender::default();
    let branding = branding();
    let usecase = SendEmailUseCase {
        sender: Some(&sender),
        branding: &branding,
    };
    let id = usecase
        .execute(SendEmailInput {
            to: Some("cliente@example.com".into()),
            kind: Some("order_created".into()),
            data: Some(json!({
                "orderId": 301,
                "items": [
                    { "product": { "name": "Vidrio templado", "price": 15000 }, "quantity": 2 },
                    { "product": { "name": "Cable USB-C", "price": 22000 }, "quantity": 1 }
                ],
                "total": 52000,
                "shippingAddress": "Av. 68 #40-12, Bogotá",
                "paymentMethod": "tarjeta"
            })),
        })
        .await
        .unwrap();

    assert_eq!(id, "email-1");
    let sent = sender.sent.lock().unwrap();
    assert_eq!(sent[0].from, "CeluCol <pedidos@tudominio.com>");
    assert_eq!(sent[0].subject, "Pedido #301 - Confirmación");
    assert!(sent[0].html.contains("$30,000"));
    assert!(sent[0].html.contains("Tarjeta de Crédito"));
}

#[tokio::test]
async fn should_send_order_updated_with_status_label() {
    let sender = MockEmailSender::default();
    let branding = branding();
    let usecase = SendEmailUseCase {
        sender: Some(&sender),
        branding: &branding,
    };
    usecase
        .execute(SendEmailInput {
            to: Some("cliente@example.com".into()),
            kind: Some("order_updated".into()),
            data: Some(json!({ "orderId": 301, "status": "confirmado" })),
        })
        .await
        .unwrap();

    let sent = sender.sent.lock().unwrap();
    assert_eq!(sent[0].subject, "Pedido #301 - Confirmado y en Preparación");
}

#[tokio::test]
async fn should_reject_unknown_type_without_sending() {
    let sender = MockEmailSender::default();
    let branding = branding();
    let usecase = SendEmailUseCase {
        sender: Some(&sender),
        branding: &branding,
    };
    let result = usecase
        .execute(SendEmailInput {
            to: Some("cliente@example.com".into()),
            kind: Some("promo".into()),
            data: Some(json!({})),
        })
        .await;
    assert!(matches!(result, Err(NotifyServiceError::UnknownEmailType(_))));
    assert!(sender.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_require_type() {
    let sender = MockEmailSender::default();
    let branding = branding();
    let usecase = SendEmailUseCase {
        sender: Some(&sender),
        branding: &branding,
    };
    let result = usecase
        .execute(SendEmailInput {
            to: Some("cliente@example.com".into()),
            kind: None,
            data: None,
        })
        .await;
    assert!(matches!(result, Err(NotifyServiceError::MissingData("type"))));
}
