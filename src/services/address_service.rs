//! Address service - the per-user address book.
//!
//! Each user has at most one default address. Mutations that touch more than
//! one row (add, set default, delete with promotion) run in one transaction.

use async_trait::async_trait;
use std::sync::Arc;

use super::DistrictService;
use crate::domain::{Address, AddressDraft, AddressSummary, AddressView, DistrictNames, NewAddress};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[async_trait]
pub trait AddressService: Send + Sync {
    /// Add an address; the first one a user adds becomes the default
    async fn add(&self, uid: i32, username: String, input: NewAddress) -> AppResult<AddressView>;

    /// Default first, then most recently modified
    async fn list(&self, uid: i32) -> AppResult<Vec<AddressSummary>>;

    async fn get(&self, aid: i32, uid: i32) -> AppResult<AddressView>;

    async fn set_default(&self, aid: i32, uid: i32, username: String) -> AppResult<()>;

    /// Delete an address, promoting the most recently modified remaining
    /// one when the default goes away
    async fn delete(&self, aid: i32, uid: i32, username: String) -> AppResult<()>;
}

pub struct AddressBook<U: UnitOfWork> {
    uow: Arc<U>,
    districts: Arc<dyn DistrictService>,
    max_count: u64,
}

impl<U: UnitOfWork> AddressBook<U> {
    pub fn new(uow: Arc<U>, districts: Arc<dyn DistrictService>, max_count: u64) -> Self {
        Self {
            uow,
            districts,
            max_count,
        }
    }

    /// Load an address and make sure `uid` owns it.
    async fn owned(&self, aid: i32, uid: i32) -> AppResult<Address> {
        let address = self
            .uow
            .addresses()
            .find_by_aid(aid)
            .await?
            .ok_or(AppError::AddressNotFound)?;

        if address.uid != uid {
            tracing::warn!(aid, uid, owner = address.uid, "Address access denied");
            return Err(AppError::AccessDenied);
        }
        Ok(address)
    }
}

async fn district_name(districts: &dyn DistrictService, code: &str) -> AppResult<String> {
    districts
        .name_by_code(code)
        .await?
        .ok_or_else(|| AppError::DistrictNotFound(code.to_string()))
}

async fn resolve_names(districts: &dyn DistrictService, input: &NewAddress) -> AppResult<DistrictNames> {
    Ok(DistrictNames {
        province: district_name(districts, &input.province_code).await?,
        city: district_name(districts, &input.city_code).await?,
        area: district_name(districts, &input.area_code).await?,
    })
}

#[async_trait]
impl<U: UnitOfWork> AddressService for AddressBook<U> {
    async fn add(&self, uid: i32, username: String, input: NewAddress) -> AppResult<AddressView> {
        let max_count = self.max_count;
        let districts = self.districts.clone();

        let address = with_transaction!(self.uow, |repos| {
            let count = repos.addresses().count_by_uid(uid).await?;
            if count >= max_count {
                return Err(AppError::AddressCountLimit(max_count));
            }

            let names = resolve_names(districts.as_ref(), &input).await?;
            let draft = AddressDraft::new(uid, &username, input, names, count == 0);
            repos.addresses().insert(draft).await
        })?;

        tracing::info!(uid, aid = address.aid, is_default = address.is_default, "Address added");
        Ok(AddressView::from(address))
    }

    async fn list(&self, uid: i32) -> AppResult<Vec<AddressSummary>> {
        let addresses = self.uow.addresses().list_by_uid(uid).await?;
        Ok(addresses.into_iter().map(AddressSummary::from).collect())
    }

    async fn get(&self, aid: i32, uid: i32) -> AppResult<AddressView> {
        self.owned(aid, uid).await.map(AddressView::from)
    }

    async fn set_default(&self, aid: i32, uid: i32, username: String) -> AppResult<()> {
        self.owned(aid, uid).await?;

        with_transaction!(self.uow, |repos| {
            let cleared = repos.addresses().clear_default(uid).await?;
            if cleared < 1 {
                return Err(AppError::update("could not clear the default address"));
            }

            let marked = repos.addresses().mark_default(aid, username).await?;
            if marked != 1 {
                return Err(AppError::update("could not set the default address"));
            }
            Ok(())
        })?;

        tracing::info!(uid, aid, "Default address changed");
        Ok(())
    }

    async fn delete(&self, aid: i32, uid: i32, username: String) -> AppResult<()> {
        let address = self.owned(aid, uid).await?;
        let was_default = address.is_default;

        let promoted = with_transaction!(self.uow, |repos| {
            let deleted = repos.addresses().delete_by_aid(aid).await?;
            if deleted != 1 {
                return Err(AppError::delete("address was not deleted"));
            }

            if !was_default {
                return Ok(None);
            }

            let Some(next) = repos.addresses().find_last_modified(uid).await? else {
                return Ok(None);
            };

            let cleared = repos.addresses().clear_default(uid).await?;
            if cleared < 1 {
                return Err(AppError::update("could not clear the default address"));
            }
            let marked = repos.addresses().mark_default(next.aid, username).await?;
            if marked != 1 {
                return Err(AppError::update("could not promote a new default address"));
            }
            Ok(Some(next.aid))
        })?;

        tracing::info!(uid, aid, promoted = ?promoted, "Address deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockAddressRepository;
    use crate::infra::unit_of_work::testing::MockPersistence;
    use crate::services::MockDistrictService;
    use chrono::{Duration, Utc};
    use mockall::predicate::eq;
    use mockall::Sequence;
    use tokio_test::assert_ok;

    fn address(aid: i32, uid: i32, is_default: bool, minutes_ago: i64) -> Address {
        let when = Utc::now() - Duration::minutes(minutes_ago);
        Address {
            aid,
            uid,
            name: "Tom".to_string(),
            province_code: "130000".to_string(),
            province_name: "Hebei".to_string(),
            city_code: "130100".to_string(),
            city_name: "Shijiazhuang".to_string(),
            area_code: "130102".to_string(),
            area_name: "Changan".to_string(),
            zip: Some("050000".to_string()),
            address: "1 Main Street".to_string(),
            phone: "13800000000".to_string(),
            tel: None,
            tag: Some("Home".to_string()),
            is_default,
            created_user: "tom".to_string(),
            created_time: when,
            modified_user: "tom".to_string(),
            modified_time: when,
        }
    }

    fn new_address() -> NewAddress {
        NewAddress {
            name: "Tom".to_string(),
            province_code: "130000".to_string(),
            city_code: "130100".to_string(),
            area_code: "130102".to_string(),
            zip: None,
            address: "1 Main Street".to_string(),
            phone: "13800000000".to_string(),
            tel: None,
            tag: None,
        }
    }

    fn known_districts() -> MockDistrictService {
        let mut districts = MockDistrictService::new();
        districts.expect_name_by_code().returning(|code| {
            Ok(match code {
                "130000" => Some("Hebei".to_string()),
                "130100" => Some("Shijiazhuang".to_string()),
                "130102" => Some("Changan".to_string()),
                _ => None,
            })
        });
        districts
    }

    fn book(repo: MockAddressRepository, districts: MockDistrictService) -> AddressBook<MockPersistence> {
        let uow = Arc::new(MockPersistence::default().with_addresses(repo));
        AddressBook::new(uow, Arc::new(districts), 3)
    }

    fn inserted(draft: AddressDraft) -> Address {
        let now = Utc::now();
        Address {
            aid: 100,
            uid: draft.uid,
            name: draft.name,
            province_code: draft.province_code,
            province_name: draft.province_name,
            city_code: draft.city_code,
            city_name: draft.city_name,
            area_code: draft.area_code,
            area_name: draft.area_name,
            zip: draft.zip,
            address: draft.address,
            phone: draft.phone,
            tel: draft.tel,
            tag: draft.tag,
            is_default: draft.is_default,
            created_user: draft.username.clone(),
            created_time: now,
            modified_user: draft.username,
            modified_time: now,
        }
    }

    #[tokio::test]
    async fn test_first_address_becomes_default() {
        let mut repo = MockAddressRepository::new();
        repo.expect_count_by_uid().with(eq(7)).returning(|_| Ok(0));
        repo.expect_insert().times(1).returning(|draft| {
            assert!(draft.is_default);
            assert_eq!(draft.province_name, "Hebei");
            assert_eq!(draft.city_name, "Shijiazhuang");
            assert_eq!(draft.area_name, "Changan");
            assert_eq!(draft.username, "tom");
            Ok(inserted(draft))
        });

        let view = book(repo, known_districts())
            .add(7, "tom".to_string(), new_address())
            .await
            .unwrap();

        assert!(view.is_default);
        assert_eq!(view.uid, 7);
    }

    #[tokio::test]
    async fn test_later_address_is_not_default() {
        let mut repo = MockAddressRepository::new();
        repo.expect_count_by_uid().returning(|_| Ok(2));
        repo.expect_insert().times(1).returning(|draft| {
            assert!(!draft.is_default);
            Ok(inserted(draft))
        });

        let view = book(repo, known_districts())
            .add(7, "tom".to_string(), new_address())
            .await
            .unwrap();

        assert!(!view.is_default);
    }

    #[tokio::test]
    async fn test_add_refuses_beyond_max_count() {
        let mut repo = MockAddressRepository::new();
        repo.expect_count_by_uid().returning(|_| Ok(3));
        repo.expect_insert().never();

        let result = book(repo, MockDistrictService::new())
            .add(7, "tom".to_string(), new_address())
            .await;

        assert!(matches!(result, Err(AppError::AddressCountLimit(3))));
    }

    #[tokio::test]
    async fn test_add_with_unknown_district_code() {
        let mut repo = MockAddressRepository::new();
        repo.expect_count_by_uid().returning(|_| Ok(0));
        repo.expect_insert().never();
        let mut input = new_address();
        input.area_code = "999999".to_string();

        let result = book(repo, known_districts())
            .add(7, "tom".to_string(), input)
            .await;

        assert!(matches!(result, Err(AppError::DistrictNotFound(code)) if code == "999999"));
    }

    #[tokio::test]
    async fn test_get_foreign_address_is_denied() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_aid()
            .returning(|aid| Ok(Some(address(aid, 8, false, 0))));

        let result = book(repo, MockDistrictService::new()).get(5, 7).await;

        assert!(matches!(result, Err(AppError::AccessDenied)));
    }

    #[tokio::test]
    async fn test_get_missing_address() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_aid().returning(|_| Ok(None));

        let result = book(repo, MockDistrictService::new()).get(5, 7).await;

        assert!(matches!(result, Err(AppError::AddressNotFound)));
    }

    #[tokio::test]
    async fn test_set_default_on_foreign_address_is_denied() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_aid()
            .returning(|aid| Ok(Some(address(aid, 8, false, 0))));
        repo.expect_clear_default().never();
        repo.expect_mark_default().never();

        let result = book(repo, MockDistrictService::new())
            .set_default(5, 7, "tom".to_string())
            .await;

        assert!(matches!(result, Err(AppError::AccessDenied)));
    }

    #[tokio::test]
    async fn test_set_default_clears_then_marks() {
        let mut seq = Sequence::new();
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_aid()
            .returning(|aid| Ok(Some(address(aid, 7, false, 0))));
        repo.expect_clear_default()
            .with(eq(7))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(2));
        repo.expect_mark_default()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|aid, user| {
                assert_eq!(aid, 5);
                assert_eq!(user, "tom");
                Ok(1)
            });

        let result = book(repo, MockDistrictService::new())
            .set_default(5, 7, "tom".to_string())
            .await;

        assert_ok!(result);
    }

    #[tokio::test]
    async fn test_set_default_mark_mismatch_is_update_error() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_aid()
            .returning(|aid| Ok(Some(address(aid, 7, false, 0))));
        repo.expect_clear_default().returning(|_| Ok(1));
        repo.expect_mark_default().returning(|_, _| Ok(0));

        let result = book(repo, MockDistrictService::new())
            .set_default(5, 7, "tom".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Update(_))));
    }

    #[tokio::test]
    async fn test_deleting_default_promotes_most_recent() {
        let mut seq = Sequence::new();
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_aid()
            .returning(|aid| Ok(Some(address(aid, 7, true, 60))));
        repo.expect_delete_by_aid()
            .with(eq(5))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(1));
        repo.expect_find_last_modified()
            .with(eq(7))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|uid| Ok(Some(address(12, uid, false, 1))));
        repo.expect_clear_default()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(1));
        repo.expect_mark_default()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|aid, _| {
                assert_eq!(aid, 12);
                Ok(1)
            });

        let result = book(repo, MockDistrictService::new())
            .delete(5, 7, "tom".to_string())
            .await;

        assert_ok!(result);
    }

    #[tokio::test]
    async fn test_deleting_non_default_promotes_nothing() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_aid()
            .returning(|aid| Ok(Some(address(aid, 7, false, 60))));
        repo.expect_delete_by_aid().times(1).returning(|_| Ok(1));
        repo.expect_find_last_modified().never();
        repo.expect_clear_default().never();
        repo.expect_mark_default().never();

        let result = book(repo, MockDistrictService::new())
            .delete(5, 7, "tom".to_string())
            .await;

        assert_ok!(result);
    }

    #[tokio::test]
    async fn test_deleting_last_address_promotes_nothing() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_aid()
            .returning(|aid| Ok(Some(address(aid, 7, true, 60))));
        repo.expect_delete_by_aid().times(1).returning(|_| Ok(1));
        repo.expect_find_last_modified().times(1).returning(|_| Ok(None));
        repo.expect_clear_default().never();
        repo.expect_mark_default().never();

        let result = book(repo, MockDistrictService::new())
            .delete(5, 7, "tom".to_string())
            .await;

        assert_ok!(result);
    }

    #[tokio::test]
    async fn test_delete_row_mismatch_is_delete_error() {
        let mut repo = MockAddressRepository::new();
        repo.expect_find_by_aid()
            .returning(|aid| Ok(Some(address(aid, 7, false, 0))));
        repo.expect_delete_by_aid().returning(|_| Ok(0));

        let result = book(repo, MockDistrictService::new())
            .delete(5, 7, "tom".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Delete(_))));
    }

    #[tokio::test]
    async fn test_list_maps_to_summaries() {
        let mut repo = MockAddressRepository::new();
        repo.expect_list_by_uid()
            .with(eq(7))
            .returning(|uid| Ok(vec![address(1, uid, true, 5), address(2, uid, false, 1)]));

        let list = book(repo, MockDistrictService::new()).list(7).await.unwrap();

        assert_eq!(list.iter().map(|a| a.aid).collect::<Vec<_>>(), vec![1, 2]);
    }
}
