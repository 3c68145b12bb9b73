mod common;

use club_sync::ServiceError;
use club_sync::db::Store;
use common::{Call, harness, new_customer};
use shared::error::{AppError, ErrorCode};
use shared::models::CustomerUpdate;

fn code(err: ServiceError) -> ErrorCode {
    AppError::from(err).code
}

#[tokio::test]
async fn create_provisions_user_and_credential() {
    let h = harness();
    let customer = h
        .service
        .create_customer(new_customer("Ada Lovelace", "B-100"))
        .await
        .unwrap();

    assert_eq!(customer.brivo_id, Some(100));
    assert_eq!(customer.brivo_credential_id, Some(900));

    let calls = h.access.calls();
    assert_eq!(calls.len(), 3);
    match &calls[0] {
        Call::CreateUser(user) => {
            assert_eq!(user.first_name, "Ada");
            assert_eq!(user.last_name, "Lovelace");
            assert_eq!(user.external_id, customer.id.to_string());
            assert_eq!(user.emails.len(), 1);
        }
        other => panic!("expected CreateUser, got {other:?}"),
    }
    assert_eq!(calls[1], Call::CreateCredential("B-100".to_string()));
    assert_eq!(
        calls[2],
        Call::AssignCredential {
            user: 100,
            credential: 900
        }
    );

    let stored = h.store.get_customer(customer.id).await.unwrap().unwrap();
    assert_eq!(stored, customer);
}

#[tokio::test]
async fn name_without_space_fails_before_any_remote_call() {
    let h = harness();
    let err = h
        .service
        .create_customer(new_customer("Cher", "B-1"))
        .await
        .unwrap_err();

    assert_eq!(code(err), ErrorCode::CustomerNameInvalid);
    assert!(h.access.calls().is_empty());
    assert!(h.store.get_customer(1).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_assignment_rolls_back_user_and_row() {
    let h = harness();
    h.access
        .fail_when(|call| matches!(call, Call::AssignCredential { .. }));

    let err = h
        .service
        .create_customer(new_customer("Ada Lovelace", "B-100"))
        .await
        .unwrap_err();
    assert_eq!(code(err), ErrorCode::CredentialAssignFailed);

    let calls = h.access.calls();
    assert!(calls.contains(&Call::DeleteCredential(900)));
    assert_eq!(calls.last(), Some(&Call::DeleteUser(100)));
    assert!(h.store.get_customer(1).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_user_creation_discards_the_row() {
    let h = harness();
    h.access
        .fail_when(|call| matches!(call, Call::CreateUser(_)));

    let err = h
        .service
        .create_customer(new_customer("Ada Lovelace", "B-100"))
        .await
        .unwrap_err();
    assert_eq!(code(err), ErrorCode::CustomerProvisionFailed);
    assert_eq!(h.access.calls().len(), 1);
    assert!(h.store.get_customer(1).await.unwrap().is_none());
}

#[tokio::test]
async fn empty_barcode_is_rejected() {
    let h = harness();
    let err = h
        .service
        .create_customer(new_customer("Ada Lovelace", "  "))
        .await
        .unwrap_err();
    assert_eq!(code(err), ErrorCode::ValidationFailed);
    assert!(h.access.calls().is_empty());
}

#[tokio::test]
async fn barcode_update_replaces_credential_once() {
    let h = harness();
    let customer = h.linked_customer("Ada Lovelace", 41).await;

    let updated = h
        .service
        .update_customer(
            customer.id,
            CustomerUpdate {
                barcode: Some("B-NEW".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let calls = h.access.calls();
    assert!(matches!(calls[0], Call::UpdateUser(41, _)));
    assert_eq!(
        &calls[1..],
        &[
            Call::DeleteCredential(1041),
            Call::CreateCredential("B-NEW".to_string()),
            Call::AssignCredential {
                user: 41,
                credential: 900
            },
        ]
    );
    assert_eq!(updated.barcode, "B-NEW");
    assert_eq!(updated.brivo_credential_id, Some(900));
}

#[tokio::test]
async fn barcode_update_on_archived_customer_skips_user_update() {
    let h = harness();
    let customer = h.linked_customer("Ada Lovelace", 41).await;
    h.service.archive_customer(customer.id).await.unwrap();
    h.access.clear_calls();

    let updated = h
        .service
        .update_customer(
            customer.id,
            CustomerUpdate {
                barcode: Some("B-NEW".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(
        h.access.calls(),
        vec![
            Call::DeleteCredential(1041),
            Call::CreateCredential("B-NEW".to_string()),
            Call::AssignCredential {
                user: 41,
                credential: 900
            },
        ]
    );
    assert!(!updated.active);
    assert_eq!(updated.brivo_credential_id, Some(900));
}

#[tokio::test]
async fn unchanged_barcode_in_patch_still_replaces() {
    let h = harness();
    let customer = h.linked_customer("Ada Lovelace", 41).await;

    h.service
        .update_customer(
            customer.id,
            CustomerUpdate {
                barcode: Some(customer.barcode.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let deletes = h
        .access
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::DeleteCredential(_)))
        .count();
    assert_eq!(deletes, 1);
}

#[tokio::test]
async fn credential_delete_failure_is_not_fatal() {
    let h = harness();
    let customer = h.linked_customer("Ada Lovelace", 41).await;
    h.access
        .fail_when(|call| matches!(call, Call::DeleteCredential(_)));

    let updated = h
        .service
        .update_customer(
            customer.id,
            CustomerUpdate {
                barcode: Some("B-NEW".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.brivo_credential_id, Some(900));
}

#[tokio::test]
async fn failed_remote_update_restores_previous_record() {
    let h = harness();
    let customer = h.linked_customer("Ada Lovelace", 41).await;
    h.access
        .fail_when(|call| matches!(call, Call::UpdateUser(..)));

    let err = h
        .service
        .update_customer(
            customer.id,
            CustomerUpdate {
                name: Some("Ada King".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(code(err), ErrorCode::CustomerSyncFailed);

    let stored = h.store.get_customer(customer.id).await.unwrap().unwrap();
    assert_eq!(stored, customer);
}

#[tokio::test]
async fn failed_reissue_keeps_old_credential_cleared() {
    let h = harness();
    let customer = h.linked_customer("Ada Lovelace", 41).await;
    h.access
        .fail_when(|call| matches!(call, Call::CreateCredential(_)));

    h.service
        .update_customer(
            customer.id,
            CustomerUpdate {
                barcode: Some("B-NEW".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    let stored = h.store.get_customer(customer.id).await.unwrap().unwrap();
    assert_eq!(stored.barcode, customer.barcode);
    assert_eq!(stored.brivo_credential_id, None);
    assert_eq!(stored.brivo_id, Some(41));
}

#[tokio::test]
async fn update_of_unlinked_active_customer_provisions_once() {
    let h = harness();
    let customer = h
        .store
        .insert_customer(&new_customer("Ada Lovelace", "B-1"))
        .await
        .unwrap();

    let updated = h
        .service
        .update_customer(
            customer.id,
            CustomerUpdate {
                barcode: Some("B-2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(updated.is_linked());
    let calls = h.access.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(calls[0], Call::CreateUser(_)));
    assert_eq!(calls[1], Call::CreateCredential("B-2".to_string()));
}

#[tokio::test]
async fn skip_flag_writes_locally_only() {
    let h = harness();
    let customer = h.linked_customer("Ada Lovelace", 41).await;

    let updated = h
        .service
        .update_customer(
            customer.id,
            CustomerUpdate {
                name: Some("Ada King".to_string()),
                skip_remote_sync: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Ada King");
    assert!(h.access.calls().is_empty());
}

#[tokio::test]
async fn update_of_missing_customer_is_not_found() {
    let h = harness();
    let err = h
        .service
        .update_customer(404, CustomerUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(code(err), ErrorCode::CustomerNotFound);
}

#[tokio::test]
async fn archive_suspends_exactly_once() {
    let h = harness();
    let customer = h.linked_customer("Ada Lovelace", 41).await;

    let outcome = h.service.archive_customer(customer.id).await.unwrap();

    assert!(!outcome.customer.active);
    assert_eq!(
        h.access.calls(),
        vec![Call::SetSuspended {
            user: 41,
            suspended: true
        }]
    );
    assert!(outcome.suspension.unwrap().is_success());
}

#[tokio::test]
async fn archive_of_unlinked_customer_makes_no_call() {
    let h = harness();
    let customer = h
        .store
        .insert_customer(&new_customer("Ada Lovelace", "B-1"))
        .await
        .unwrap();

    let outcome = h.service.archive_customer(customer.id).await.unwrap();

    assert!(outcome.suspension.is_none());
    assert!(h.access.calls().is_empty());
    let stored = h.store.get_customer(customer.id).await.unwrap().unwrap();
    assert!(!stored.active);
}

#[tokio::test]
async fn archive_survives_suspend_failure() {
    let h = harness();
    let customer = h.linked_customer("Ada Lovelace", 41).await;
    h.access
        .fail_when(|call| matches!(call, Call::SetSuspended { .. }));

    let outcome = h.service.archive_customer(customer.id).await.unwrap();

    assert!(!outcome.suspension.unwrap().is_success());
    let stored = h.store.get_customer(customer.id).await.unwrap().unwrap();
    assert!(!stored.active);
}
