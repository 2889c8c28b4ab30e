// src/models/address.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Endereço de entrega do usuário. Antes uma lista embutida no perfil,
/// agora tabela normalizada; o índice parcial do banco garante no máximo
/// UM padrão por usuário.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "Maria da Silva")]
    pub recipient_name: String,
    #[schema(example = "Casa 2")]
    pub house_unit: String,
    #[schema(example = "Rua das Flores, 123")]
    pub street: String,
    #[schema(example = "Jardim Primavera")]
    pub locality: String,
    #[schema(example = "São Paulo")]
    pub city: String,
    #[schema(example = "SP")]
    pub state: String,
    #[schema(example = "01234-567")]
    pub postal_code: String,
    #[schema(example = "Brasil")]
    pub country: String,
    #[schema(example = "(11) 99999-8888")]
    pub phone_primary: String,
    pub phone_secondary: Option<String>,
    pub is_default: bool,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Dados de entrega usados pelo checkout — ou copiados de um endereço
/// salvo, ou vindos inline ("novo endereço") no próprio checkout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    #[schema(example = "Maria da Silva")]
    pub recipient_name: String,
    #[schema(example = "Casa 2")]
    pub house_unit: String,
    #[schema(example = "Rua das Flores, 123")]
    pub street: String,
    #[schema(example = "Jardim Primavera")]
    pub locality: String,
    #[schema(example = "São Paulo")]
    pub city: String,
    #[schema(example = "SP")]
    pub state: String,
    #[schema(example = "01234-567")]
    pub postal_code: String,
    #[schema(example = "Brasil")]
    pub country: String,
    #[schema(example = "(11) 99999-8888")]
    pub phone_primary: String,
    pub phone_secondary: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

impl ShippingDetails {
    /// Nomes dos campos obrigatórios ausentes (vazios ou só espaços).
    /// O checkout exige o endereço completo antes de tocar no pagamento.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let required: [(&'static str, &str); 9] = [
            ("recipientName", &self.recipient_name),
            ("houseUnit", &self.house_unit),
            ("street", &self.street),
            ("locality", &self.locality),
            ("city", &self.city),
            ("state", &self.state),
            ("postalCode", &self.postal_code),
            ("country", &self.country),
            ("phonePrimary", &self.phone_primary),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl From<Address> for ShippingDetails {
    fn from(a: Address) -> Self {
        Self {
            recipient_name: a.recipient_name,
            house_unit: a.house_unit,
            street: a.street,
            locality: a.locality,
            city: a.city,
            state: a.state,
            postal_code: a.postal_code,
            country: a.country,
            phone_primary: a.phone_primary,
            phone_secondary: a.phone_secondary,
            latitude: a.latitude,
            longitude: a.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ShippingDetails {
        ShippingDetails {
            recipient_name: "Maria da Silva".into(),
            house_unit: "Casa 2".into(),
            street: "Rua das Flores, 123".into(),
            locality: "Jardim Primavera".into(),
            city: "São Paulo".into(),
            state: "SP".into(),
            postal_code: "01234-567".into(),
            country: "Brasil".into(),
            phone_primary: "(11) 99999-8888".into(),
            phone_secondary: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn endereco_completo_passa() {
        assert!(complete().is_complete());
        assert!(complete().missing_fields().is_empty());
    }

    #[test]
    fn lista_os_campos_ausentes_pelo_nome() {
        let mut details = complete();
        details.city = "".into();
        details.phone_primary = "   ".into();
        let missing = details.missing_fields();
        assert_eq!(missing, vec!["city", "phonePrimary"]);
    }

    #[test]
    fn telefone_secundario_e_opcional() {
        let mut details = complete();
        details.phone_secondary = None;
        assert!(details.is_complete());
    }
}
