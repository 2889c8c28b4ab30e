// src/services/address_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AddressRepository,
    models::address::{Address, ShippingDetails},
};

#[derive(Clone)]
pub struct AddressService {
    address_repo: AddressRepository,
}

impl AddressService {
    pub fn new(address_repo: AddressRepository) -> Self {
        Self { address_repo }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Address>, AppError> {
        self.address_repo.list_by_user(user_id).await
    }

    /// Upsert com "último a escrever vence" para o padrão: se o endereço
    /// chega com `is_default`, TODOS os outros perdem a flag na mesma
    /// transação antes da gravação — o invariante de no máximo um padrão
    /// nunca é violado, nem por um instante.
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        address_id: Option<Uuid>,
        details: &ShippingDetails,
        is_default: bool,
    ) -> Result<Address, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if is_default {
            self.address_repo.clear_defaults(&mut *tx, user_id).await?;
        }

        let address = match address_id {
            Some(id) => {
                self.address_repo
                    .update(&mut *tx, user_id, id, details, is_default)
                    .await?
            }
            None => {
                self.address_repo
                    .insert(&mut *tx, user_id, details, is_default)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(address)
    }

    /// Remoção incondicional. Se era o padrão, a lista fica sem padrão
    /// (nenhuma promoção automática — comportamento observado, mantido).
    pub async fn remove(&self, user_id: Uuid, address_id: Uuid) -> Result<(), AppError> {
        self.address_repo.delete(user_id, address_id).await
    }

    pub async fn get(&self, user_id: Uuid, address_id: Uuid) -> Result<Address, AppError> {
        self.address_repo
            .find(user_id, address_id)
            .await?
            .ok_or(AppError::AddressNotFound)
    }
}

// O invariante de no máximo um padrão mora no índice parcial do banco,
// então estes testes batem no Postgres. `cargo test -- --ignored` + DATABASE_URL.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::UserRepository;
    use crate::models::auth::UserRole;
    use sqlx::PgPool;

    async fn pool_de_teste() -> PgPool {
        dotenvy::dotenv().ok();
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL para testes de banco");
        let pool = PgPool::connect(&url).await.expect("conexão com o Postgres de teste");
        sqlx::migrate!().run(&pool).await.expect("migrações");
        pool
    }

    async fn usuario(pool: &PgPool) -> Uuid {
        let users = UserRepository::new(pool.clone());
        let email = format!("{}@teste.local", Uuid::new_v4());
        users
            .create_user(pool, &email, "hash", "Cliente Teste", None, UserRole::Customer)
            .await
            .unwrap()
            .id
    }

    fn detalhes(recipient: &str) -> ShippingDetails {
        ShippingDetails {
            recipient_name: recipient.into(),
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

    #[tokio::test]
    #[ignore = "requer Postgres via DATABASE_URL"]
    async fn novo_padrao_deixa_exatamente_um_padrao() {
        let pool = pool_de_teste().await;
        let user_id = usuario(&pool).await;
        let service = AddressService::new(AddressRepository::new(pool.clone()));

        let casa = service
            .upsert(&pool, user_id, None, &detalhes("Maria (casa)"), true)
            .await
            .unwrap();
        let trabalho = service
            .upsert(&pool, user_id, None, &detalhes("Maria (trabalho)"), true)
            .await
            .unwrap();

        // O último a marcar vence; o anterior perde a flag na mesma transação.
        let list = service.list(user_id).await.unwrap();
        assert_eq!(list.iter().filter(|a| a.is_default).count(), 1);
        assert!(list.iter().find(|a| a.id == trabalho.id).unwrap().is_default);
        assert!(!list.iter().find(|a| a.id == casa.id).unwrap().is_default);
    }

    #[tokio::test]
    #[ignore = "requer Postgres via DATABASE_URL"]
    async fn remover_o_unico_padrao_deixa_zero_padroes() {
        let pool = pool_de_teste().await;
        let user_id = usuario(&pool).await;
        let service = AddressService::new(AddressRepository::new(pool.clone()));

        let padrao = service
            .upsert(&pool, user_id, None, &detalhes("Maria (casa)"), true)
            .await
            .unwrap();
        service
            .upsert(&pool, user_id, None, &detalhes("Maria (trabalho)"), false)
            .await
            .unwrap();

        service.remove(user_id, padrao.id).await.unwrap();

        // Nenhuma promoção automática: a lista fica sem padrão.
        let list = service.list(user_id).await.unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.iter().all(|a| !a.is_default));
    }
}
