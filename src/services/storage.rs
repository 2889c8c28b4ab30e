// src/services/storage.rs

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::common::error::AppError;

/// Armazenamento de objetos (fotos de produto, certificados, logos).
/// Contrato mínimo do colaborador: guarda bytes e devolve uma URL
/// pública; apaga pela URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn store(&self, bytes: &[u8], extension: &str) -> Result<String, AppError>;
    async fn delete(&self, url: &str) -> Result<(), AppError>;
}

/// Implementação em disco local, servida sob `{base_url}/media/`.
pub struct LocalDiskStorage {
    dir: PathBuf,
    public_base_url: String,
}

impl LocalDiskStorage {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn file_name_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        let name = url.strip_prefix(&format!("{}/media/", self.public_base_url))?;
        // Nomes são UUIDs gerados aqui; qualquer separador de caminho é lixo.
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return None;
        }
        Some(name)
    }
}

#[async_trait]
impl ObjectStorage for LocalDiskStorage {
    async fn store(&self, bytes: &[u8], extension: &str) -> Result<String, AppError> {
        let name = format!("{}.{}", Uuid::new_v4(), extension.trim_start_matches('.'));
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao criar diretório de mídia: {}", e))?;
        tokio::fs::write(self.dir.join(&name), bytes)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao gravar mídia: {}", e))?;
        Ok(format!("{}/media/{}", self.public_base_url, name))
    }

    async fn delete(&self, url: &str) -> Result<(), AppError> {
        let Some(name) = self.file_name_from_url(url) else {
            // URL de outro domínio (ou lixo): não há o que apagar aqui.
            return Ok(());
        };
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(()),
            // Apagar o que já não existe é um no-op.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Falha ao apagar mídia: {}", e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage() -> LocalDiskStorage {
        let dir = std::env::temp_dir().join(format!("quitanda-test-{}", Uuid::new_v4()));
        LocalDiskStorage::new(dir, "http://localhost:3000")
    }

    #[tokio::test]
    async fn guarda_e_apaga_pela_url() {
        let storage = temp_storage();
        let url = storage.store(b"foto do tomate", "jpg").await.unwrap();
        assert!(url.starts_with("http://localhost:3000/media/"));
        assert!(url.ends_with(".jpg"));

        storage.delete(&url).await.unwrap();
        // apagar de novo é no-op
        storage.delete(&url).await.unwrap();
    }

    #[tokio::test]
    async fn ignora_url_de_outro_dominio() {
        let storage = temp_storage();
        storage.delete("https://outro.cdn.com/media/x.png").await.unwrap();
    }

    #[test]
    fn rejeita_nome_com_caminho() {
        let storage = temp_storage();
        assert!(storage
            .file_name_from_url("http://localhost:3000/media/../segredo")
            .is_none());
        assert!(storage
            .file_name_from_url("http://localhost:3000/media/a/b.png")
            .is_none());
    }
}
