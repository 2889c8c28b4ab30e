// src/services/payment.rs

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use serde::Deserialize;
use sha2::Sha256;
use utoipa::ToSchema;

use crate::common::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Resultado do checkout hospedado, devolvido pelo gateway ao navegador
/// e repassado ao backend: id do pedido no gateway, id da transação e a
/// assinatura HMAC de ambos.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAttempt {
    #[schema(example = "order_NXhj29a")]
    pub gateway_order_id: String,
    #[schema(example = "pay_NXhkQ71b")]
    pub transaction_id: String,
    pub signature: String,
}

/// Requisição opaca entregue ao colaborador de pagamento:
/// valor, moeda e contato do cliente + a confirmação a validar.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub currency: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub attempt: PaymentAttempt,
}

#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub gateway_order_id: String,
    pub transaction_id: String,
    pub signature: String,
}

/// Colaborador externo de pagamento. O orquestrador de checkout entrega a
/// requisição e suspende até sucesso (`PaymentConfirmation`) ou falha
/// (`AppError::PaymentFailed`, com o motivo exibido ao usuário).
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn confirm(&self, request: PaymentRequest) -> Result<PaymentConfirmation, AppError>;
}

/// Gateway de checkout hospedado: o cliente paga na página do provedor e
/// o backend valida a assinatura `HMAC-SHA256(order_id|transaction_id)`
/// com o segredo compartilhado antes de aceitar a confirmação.
pub struct HostedCheckoutGateway {
    key_secret: String,
}

impl HostedCheckoutGateway {
    pub fn new(key_secret: String) -> Self {
        Self { key_secret }
    }
}

#[async_trait]
impl PaymentGateway for HostedCheckoutGateway {
    async fn confirm(&self, request: PaymentRequest) -> Result<PaymentConfirmation, AppError> {
        let attempt = &request.attempt;
        if attempt.gateway_order_id.is_empty() || attempt.transaction_id.is_empty() {
            return Err(AppError::PaymentFailed(
                "confirmação de pagamento incompleta".into(),
            ));
        }

        let payload = format!("{}|{}", attempt.gateway_order_id, attempt.transaction_id);
        let mut mac = HmacSha256::new_from_slice(self.key_secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("Segredo HMAC inválido: {}", e))?;
        mac.update(payload.as_bytes());

        let provided = hex::decode(&attempt.signature)
            .map_err(|_| AppError::PaymentFailed("assinatura malformada".into()))?;

        // Comparação em tempo constante, via o próprio Mac.
        mac.verify_slice(&provided)
            .map_err(|_| AppError::PaymentFailed("assinatura inválida".into()))?;

        Ok(PaymentConfirmation {
            gateway_order_id: attempt.gateway_order_id.clone(),
            transaction_id: attempt.transaction_id.clone(),
            signature: attempt.signature.clone(),
        })
    }
}

/// Assina um par (order_id, transaction_id) como o gateway faria.
/// Usado pelos testes e pelo modo sandbox.
pub fn sign_payload(key_secret: &str, gateway_order_id: &str, transaction_id: &str) -> String {
    let payload = format!("{}|{}", gateway_order_id, transaction_id);
    let mut mac =
        HmacSha256::new_from_slice(key_secret.as_bytes()).expect("HMAC aceita chave de qualquer tamanho");
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(signature: &str) -> PaymentRequest {
        PaymentRequest {
            amount: Decimal::new(29900, 2),
            currency: "BRL".into(),
            customer_name: "Maria da Silva".into(),
            customer_phone: "(11) 99999-8888".into(),
            attempt: PaymentAttempt {
                gateway_order_id: "order_NXhj29a".into(),
                transaction_id: "pay_NXhkQ71b".into(),
                signature: signature.into(),
            },
        }
    }

    #[tokio::test]
    async fn assinatura_valida_confirma() {
        let gateway = HostedCheckoutGateway::new("segredo-de-teste".into());
        let signature = sign_payload("segredo-de-teste", "order_NXhj29a", "pay_NXhkQ71b");
        let confirmation = gateway.confirm(request(&signature)).await.unwrap();
        assert_eq!(confirmation.transaction_id, "pay_NXhkQ71b");
    }

    #[tokio::test]
    async fn assinatura_adulterada_recusa() {
        let gateway = HostedCheckoutGateway::new("segredo-de-teste".into());
        // assinada com outro segredo
        let signature = sign_payload("outro-segredo", "order_NXhj29a", "pay_NXhkQ71b");
        let err = gateway.confirm(request(&signature)).await.unwrap_err();
        assert!(matches!(err, AppError::PaymentFailed(_)));
    }

    #[tokio::test]
    async fn assinatura_malformada_recusa() {
        let gateway = HostedCheckoutGateway::new("segredo-de-teste".into());

        let err = gateway.confirm(request("não-é-hex")).await.unwrap_err();
        assert!(matches!(err, AppError::PaymentFailed(_)));

        // comprimento ímpar também é hex inválido
        let err = gateway.confirm(request("abc")).await.unwrap_err();
        assert!(matches!(err, AppError::PaymentFailed(_)));
    }
}
