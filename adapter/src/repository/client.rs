use crate::database::{model::client::ClientRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    client::{event::CreateClient, Client},
    id::ClientId,
    role::Role,
};
use kernel::repository::client::ClientRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ClientRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ClientRepository for ClientRepositoryImpl {
    async fn create(&self, event: CreateClient) -> AppResult<Client> {
        // 同じメールアドレスで同時に作成された場合は既存の行を返す
        sqlx::query(
            r#"
                INSERT INTO clients (client_id, name, email, phone, role, verified)
                VALUES ($1, $2, $3, $4, $5, FALSE)
                ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(ClientId::new())
        .bind(&event.name)
        .bind(&event.email)
        .bind(&event.phone)
        .bind(event.role.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        self.find_by_email(&event.email).await?.ok_or_else(|| {
            AppError::NoRowsAffectedError("No client record has been created".into())
        })
    }

    async fn find_by_id(&self, client_id: ClientId) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, ClientRow>(
            r#"
                SELECT client_id, name, email, phone, role, verified
                FROM clients
                WHERE client_id = $1
            "#,
        )
        .bind(client_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Client::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Client>> {
        sqlx::query_as::<_, ClientRow>(
            r#"
                SELECT client_id, name, email, phone, role, verified
                FROM clients
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Client::try_from)
        .transpose()
    }

    async fn find_clients(&self, limit: i64, offset: i64) -> AppResult<Vec<Client>> {
        sqlx::query_as::<_, ClientRow>(
            r#"
                SELECT client_id, name, email, phone, role, verified
                FROM clients
                WHERE role = $1
                ORDER BY created_at DESC
                LIMIT $2
                OFFSET $3
            "#,
        )
        .bind(Role::Client.as_ref())
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Client::try_from)
        .collect()
    }
}
