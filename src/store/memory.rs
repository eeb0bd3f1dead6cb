use super::{ClientStore, ClientSummary, StoreError};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local store with the same contract as the `PostgreSQL` one.
///
/// Keeps insertion order so listings match the `creado_en` ordering of the table.
#[derive(Debug, Default)]
pub struct MemoryClientStore {
    records: RwLock<Vec<(String, String)>>,
}

impl MemoryClientStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn insert(&self, usuario: &str, password_hash: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if records.iter().any(|(existing, _)| existing == usuario) {
            return Err(StoreError::Conflict);
        }
        records.push((usuario.to_string(), password_hash.to_string()));

        Ok(())
    }

    async fn password_hash(&self, usuario: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|(existing, _)| existing == usuario)
            .map(|(_, hash)| hash.clone()))
    }

    async fn list(&self) -> Result<Vec<ClientSummary>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .map(|(usuario, _)| ClientSummary {
                usuario: usuario.clone(),
            })
            .collect())
    }

    async fn delete(&self, usuario: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|(existing, _)| existing != usuario);

        Ok(records.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_rejects_duplicates_without_overwriting() {
        let store = MemoryClientStore::new();
        store.insert("ana", "hash-1").await.unwrap();

        let err = store.insert("ana", "hash-2").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
        assert_eq!(
            store.password_hash("ana").await.unwrap().as_deref(),
            Some("hash-1")
        );
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryClientStore::new();
        store.insert("zoe", "h").await.unwrap();
        store.insert("ana", "h").await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.usuario)
            .collect();
        assert_eq!(names, vec!["zoe", "ana"]);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_matched() {
        let store = MemoryClientStore::new();
        store.insert("ana", "h").await.unwrap();

        assert!(store.delete("ana").await.unwrap());
        assert!(!store.delete("ana").await.unwrap());
        assert!(store.password_hash("ana").await.unwrap().is_none());
    }
}
