use serde_json::json;

use celucol_notify::error::NotifyServiceError;
use celucol_notify::usecase::whatsapp::{SendWhatsAppInput, SendWhatsAppUseCase};

use crate::helpers::MockWhatsAppSender;

fn input(phone: &str, message: &str) -> SendWhatsAppInput {
    SendWhatsAppInput {
        phone: Some(phone.into()),
        message: Some(message.into()),
        template: None,
    }
}

#[tokio::test]
async fn should_send_plain_message() {
    let sender = MockWhatsAppSender::default();
    let usecase = SendWhatsAppUseCase {
        sender: Some(&sender),
    };
    let receipt = usecase
        .execute(input("+573001234567", "Tu pedido llegó"))
        .await
        .unwrap();

    assert_eq!(receipt.message_id.as_deref(), Some("wamid.test"));
    assert_eq!(receipt.whatsapp_id.as_deref(), Some("573001234567"));
    assert_eq!(
        sender.sent.lock().unwrap()[0],
        ("+573001234567".to_owned(), "Tu pedido llegó".to_owned())
    );
}

#[tokio::test]
async fn should_reject_short_phone_before_any_call() {
    let sender = MockWhatsAppSender::default();
    let usecase = SendWhatsAppUseCase {
        sender: Some(&sender),
    };
    let result = usecase.execute(input("123456", "hola")).await;
    assert!(
        matches!(result, Err(NotifyServiceError::InvalidPhone)),
        "expected InvalidPhone, got {result:?}"
    );
    assert_eq!(sender.calls(), 0);
}

#[tokio::test]
async fn should_reject_blank_message_before_any_call() {
    let sender = MockWhatsAppSender::default();
    let usecase = SendWhatsAppUseCase {
        sender: Some(&sender),
    };
    let result = usecase.execute(input("+573001234567", "   \n")).await;
    assert!(matches!(result, Err(NotifyServiceError::EmptyMessage)));
    assert_eq!(sender.calls(), 0);
}

#[tokio::test]
async fn should_require_phone_and_message() {
    let sender = MockWhatsAppSender::default();
    let usecase = SendWhatsAppUseCase {
        sender: Some(&sender),
    };
    let result = usecase
        .execute(SendWhatsAppInput {
            phone: None,
            message: Some("hola".into()),
            template: None,
        })
        .await;
    assert!(matches!(result, Err(NotifyServiceError::MissingData("phone"))));

    let result = usecase
        .execute(SendWhatsAppInput {
            phone: Some("+573001234567".into()),
            message: None,
            template: None,
        })
        .await;
    assert!(matches!(result, Err(NotifyServiceError::MissingData("message"))));
    assert_eq!(sender.calls(), 0);
}

#[tokio::test]
async fn should_render_status_template() {
    let sender = MockWhatsAppSender::default();
    let usecase = SendWhatsAppUseCase {
        sender: Some(&sender),
    };
    usecase
        .execute(SendWhatsAppInput {
            phone: Some("+573001234567".into()),
            message: None,
            template: Some(json!({ "kind": "order_status", "status": "SHIPPED", "order_id": 12 })),
        })
        .await
        .unwrap();

    let sent = sender.sent.lock().unwrap();
    assert!(sent[0].1.starts_with("Pedido #12\n\n🚚"));
}

#[tokio::test]
async fn should_report_missing_credentials_after_validation() {
    let usecase = SendWhatsAppUseCase::<MockWhatsAppSender> { sender: None };

    let result = usecase.execute(input("123456", "hola")).await;
    assert!(matches!(result, Err(NotifyServiceError::InvalidPhone)));

    let result = usecase.execute(input("+573001234567", "hola")).await;
    assert!(matches!(result, Err(NotifyServiceError::NotConfigured(_))));
}

#[tokio::test]
async fn should_surface_provider_failure() {
    let sender = MockWhatsAppSender {
        fail: true,
        ..Default::default()
    };
    let usecase = SendWhatsAppUseCase {
        sender: Some(&sender),
    };
    let result = usecase.execute(input("+573001234567", "hola")).await;
    assert!(matches!(result, Err(NotifyServiceError::Internal(_))));
    assert_eq!(sender.calls(), 1);
}
