//! Customer Service

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Customer, CustomerCreate, NewCustomer};
use std::sync::Arc;

use crate::store::{CustomerQuery, EntityStore};

/// Customers returned per search
pub const SEARCH_LIMIT: u32 = 100;

/// Customer records: create, look up, search
#[derive(Debug, Clone)]
pub struct CustomerService {
    store: Arc<dyn EntityStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, data: CustomerCreate) -> AppResult<Customer> {
        let name = data
            .name
            .ok_or_else(|| AppError::new(ErrorCode::CustomerNameRequired))?;

        let customer = self
            .store
            .insert_customer(NewCustomer {
                name,
                phone: data.phone.unwrap_or_default(),
                note: data.note.unwrap_or_default(),
            })
            .await?;

        tracing::info!(customer_id = customer.id, name = %customer.name, "Customer created");
        Ok(customer)
    }

    pub async fn get(&self, id: i64) -> AppResult<Customer> {
        self.store.get_customer(id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CustomerNotFound,
                format!("Customer {id} not found"),
            )
        })
    }

    /// Newest first; `q` matches name or phone
    pub async fn search(&self, q: Option<&str>) -> AppResult<Vec<Customer>> {
        let query = CustomerQuery {
            search: q.map(str::trim).filter(|q| !q.is_empty()).map(String::from),
            limit: Some(SEARCH_LIMIT),
        };
        Ok(self.store.scan_customers(&query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(MemoryStore::new()))
    }

    fn payload(name: Option<&str>, phone: Option<&str>) -> CustomerCreate {
        CustomerCreate {
            name: name.map(String::from),
            phone: phone.map(String::from),
            note: None,
        }
    }

    #[tokio::test]
    async fn test_create_customer() {
        let service = service();
        let budi = service
            .create(payload(Some("Budi"), Some("08123")))
            .await
            .unwrap();
        assert_eq!(budi.name, "Budi");
        assert_eq!(budi.phone, "08123");
        assert_eq!(budi.note, "");
        assert_eq!(service.get(budi.id).await.unwrap(), budi);
    }

    #[tokio::test]
    async fn test_name_required() {
        let err = service().create(payload(None, Some("08123"))).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomerNameRequired);
        assert_eq!(err.message, "name required");
    }

    #[tokio::test]
    async fn test_blank_name_rejected_from_json() {
        let data: CustomerCreate =
            serde_json::from_value(serde_json::json!({"name": "   "})).unwrap();
        let err = service().create(data).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomerNameRequired);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let err = service().get(5).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomerNotFound);
        assert_eq!(err.http_status(), http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search() {
        let service = service();
        service.create(payload(Some("Budi"), Some("08123"))).await.unwrap();
        service.create(payload(Some("Sari"), None)).await.unwrap();

        assert_eq!(service.search(None).await.unwrap().len(), 2);
        assert_eq!(service.search(Some("  ")).await.unwrap().len(), 2);

        let found = service.search(Some("BUD")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Budi");

        let found = service.search(Some("0812")).await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_search_capped() {
        let service = service();
        for i in 0..=SEARCH_LIMIT {
            let name = format!("Customer {i}");
            service.create(payload(Some(&name), None)).await.unwrap();
        }

        let all = service.search(None).await.unwrap();
        assert_eq!(all.len(), SEARCH_LIMIT as usize);
        assert_eq!(all[0].name, format!("Customer {SEARCH_LIMIT}"));
        assert_eq!(service.search(Some("customer")).await.unwrap().len(), SEARCH_LIMIT as usize);
    }
}
