//! Integration tests for document reads and writes.

mod common;

use common::{BANK, PAYABLES, PURCHASES, SALES, admin, date, normal, post, setup, shortcut};
use massikone_core::ledger::{DocumentEntry, DocumentInput, EntryLines};
use massikone_db::BookContext;
use massikone_shared::AppError;
use massikone_shared::types::{AccountId, DocumentId, UserId};
use rstest::rstest;

fn itemized(lines: &[(i32, bool, i64)]) -> EntryLines {
    EntryLines::Itemized(
        (0..)
            .zip(lines)
            .map(|(row_number, &(account, is_debit, cents))| DocumentEntry {
                row_number,
                account_id: AccountId(account),
                is_debit,
                unit_count: 1,
                unit_cost_cents: cents,
                description: format!("row {row_number}"),
            })
            .collect(),
    )
}

#[tokio::test]
async fn test_post_assigns_sequential_ids() {
    let db = setup().await;
    let admin = admin(&db).await;

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let first = book
        .post_document(shortcut(BANK, PURCHASES, "10,00", date(2024, 1, 1)))
        .await
        .unwrap();
    let second = book
        .post_document(shortcut(BANK, PURCHASES, "20,00", date(2024, 1, 2)))
        .await
        .unwrap();
    assert_eq!(first, DocumentId(1));
    assert_eq!(second, DocumentId(2));

    let documents = book.get_documents().await.unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[1].cents, 2_000);
    assert_eq!(documents[1].amount, "20,00");
    book.close().await.unwrap();
}

#[tokio::test]
async fn test_get_document_derives_shortcut_fields() {
    let db = setup().await;
    let admin = admin(&db).await;
    let id = post(&db, &admin, shortcut(BANK, PURCHASES, "12,50", date(2024, 3, 1))).await;

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let document = book.get_document(&id.to_string()).await.unwrap();
    assert_eq!(document.summary.cents, 1_250);
    assert_eq!(document.summary.amount, "12,50");
    assert_eq!(document.summary.paid_date, date(2024, 3, 1));
    assert_eq!(document.credit_account_id, Some(AccountId(BANK)));
    assert_eq!(document.debit_account_id, Some(AccountId(PURCHASES)));
    assert_eq!(document.entries.len(), 2);
    assert_eq!(document.entries[0].description, "Credit");
    assert_eq!(document.entries[1].description, "Debit");
    assert_eq!(document.prev_document_id, None);
    assert_eq!(document.next_document_id, None);
    book.close().await.unwrap();
}

#[tokio::test]
async fn test_put_replaces_entries_and_images() {
    let db = setup().await;
    let admin = admin(&db).await;
    let id = post(
        &db,
        &admin,
        DocumentInput {
            description: "Office supplies".into(),
            lines: itemized(&[(BANK, false, 3_000), (PURCHASES, true, 2_000), (PURCHASES, true, 1_000)]),
            image_ids: vec!["a.jpg".into(), "b.jpg".into()],
            ..DocumentInput::default()
        },
    )
    .await;

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let before = book.get_document(&id.to_string()).await.unwrap();
    assert_eq!(before.entries.len(), 3);
    assert_eq!(before.image_ids, vec!["a.jpg", "b.jpg"]);
    assert_eq!(before.summary.cents, 3_000);

    let mut input = shortcut(PAYABLES, PURCHASES, "5,00", date(2024, 2, 2));
    input.image_ids = vec!["c.jpg".into()];
    book.put_document(&id.to_string(), input).await.unwrap();

    let after = book.get_document(&id.to_string()).await.unwrap();
    assert_eq!(after.entries.len(), 2);
    assert_eq!(after.image_ids, vec!["c.jpg"]);
    assert_eq!(after.summary.cents, 500);
    assert_eq!(after.credit_account_id, Some(AccountId(PAYABLES)));
    assert_eq!(after.summary.paid_date, date(2024, 2, 2));
    book.close().await.unwrap();
}

#[tokio::test]
async fn test_admin_sets_and_clears_payer() {
    let db = setup().await;
    let admin = admin(&db).await;
    let user = normal(&db, "Bob").await;

    let mut input = shortcut(BANK, PURCHASES, "1", None);
    input.paid_user_id = Some(user.user_id);
    let id = post(&db, &admin, input).await;

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let document = book.get_document(&id.to_string()).await.unwrap();
    let payer = document.summary.paid_user.unwrap();
    assert_eq!(payer.user_id, user.user_id);
    assert_eq!(payer.full_name, "Bob");

    book.put_document(&id.to_string(), shortcut(BANK, PURCHASES, "1", None))
        .await
        .unwrap();
    let document = book.get_document(&id.to_string()).await.unwrap();
    assert_eq!(document.summary.paid_user, None);
    book.close().await.unwrap();
}

#[tokio::test]
async fn test_non_admin_post_becomes_payer_and_skips_entries() {
    let db = setup().await;
    let _admin = admin(&db).await;
    let user = normal(&db, "Bob").await;

    let id = post(&db, &user, shortcut(BANK, PURCHASES, "9,99", date(2024, 4, 4))).await;

    let mut book = BookContext::begin(&db, user.clone()).await.unwrap();
    let document = book.get_document(&id.to_string()).await.unwrap();
    assert_eq!(document.summary.paid_user_id(), Some(user.user_id));
    assert!(document.entries.is_empty());
    assert_eq!(document.summary.amount, "");
    assert_eq!(document.summary.paid_date, date(2024, 4, 4));
    book.close().await.unwrap();
}

#[tokio::test]
async fn test_non_admin_sees_only_own_documents() {
    let db = setup().await;
    let admin = admin(&db).await;
    let alice = normal(&db, "Alice").await;
    let bob = normal(&db, "Bob").await;

    post(&db, &admin, shortcut(BANK, PURCHASES, "1", None)).await;
    let alice_doc = post(&db, &alice, DocumentInput::default()).await;
    post(&db, &bob, DocumentInput::default()).await;

    let mut book = BookContext::begin(&db, alice).await.unwrap();
    let documents = book.get_documents().await.unwrap();
    let ids: Vec<DocumentId> = documents.iter().map(|d| d.document_id).collect();
    assert_eq!(ids, vec![alice_doc]);
    book.close().await.unwrap();

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    assert_eq!(book.get_documents().await.unwrap().len(), 3);
    book.close().await.unwrap();
}

#[tokio::test]
async fn test_other_users_document_is_forbidden() {
    let db = setup().await;
    let _admin = admin(&db).await;
    let alice = normal(&db, "Alice").await;
    let bob = normal(&db, "Bob").await;
    let id = post(&db, &alice, DocumentInput::default()).await;

    let mut book = BookContext::begin(&db, bob).await.unwrap();
    let result = book.get_document(&id.to_string()).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(matches!(book.close().await, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_put_other_users_document_is_forbidden() {
    let db = setup().await;
    let admin = admin(&db).await;
    let alice = normal(&db, "Alice").await;
    let bob = normal(&db, "Bob").await;
    let id = post(
        &db,
        &alice,
        DocumentInput {
            paid_date: date(2024, 5, 1),
            description: "Train ticket".into(),
            image_ids: vec!["ticket.jpg".into()],
            ..DocumentInput::default()
        },
    )
    .await;

    let mut book = BookContext::begin(&db, bob).await.unwrap();
    let input = DocumentInput {
        description: "Overwritten".into(),
        ..DocumentInput::default()
    };
    let result = book.put_document(&id.to_string(), input).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert!(matches!(book.close().await, Err(AppError::Forbidden(_))));

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let document = book.get_document(&id.to_string()).await.unwrap();
    assert_eq!(document.summary.description, "Train ticket");
    assert_eq!(document.summary.paid_date, date(2024, 5, 1));
    assert_eq!(document.image_ids, vec!["ticket.jpg"]);
    assert_eq!(document.summary.paid_user_id(), Some(alice.user_id));
    book.close().await.unwrap();
}

#[tokio::test]
async fn test_non_admin_put_keeps_entries_and_payer() {
    let db = setup().await;
    let admin = admin(&db).await;
    let alice = normal(&db, "Alice").await;
    let mut input = shortcut(BANK, PURCHASES, "40,00", date(2024, 6, 1));
    input.paid_user_id = Some(alice.user_id);
    let id = post(&db, &admin, input).await;

    let mut book = BookContext::begin(&db, alice.clone()).await.unwrap();
    let mut input = shortcut(PAYABLES, SALES, "1,00", date(2024, 6, 2));
    input.description = "Taxi".into();
    input.image_ids = vec!["taxi.jpg".into()];
    book.put_document(&id.to_string(), input).await.unwrap();

    let document = book.get_document(&id.to_string()).await.unwrap();
    assert_eq!(document.summary.description, "Taxi");
    assert_eq!(document.summary.paid_date, date(2024, 6, 2));
    assert_eq!(document.image_ids, vec!["taxi.jpg"]);
    assert_eq!(document.summary.paid_user_id(), Some(alice.user_id));
    assert_eq!(document.entries.len(), 2);
    assert_eq!(document.summary.cents, 4_000);
    assert_eq!(document.credit_account_id, Some(AccountId(BANK)));
    assert_eq!(document.debit_account_id, Some(AccountId(PURCHASES)));
    book.close().await.unwrap();
}

#[tokio::test]
async fn test_document_without_payer_is_admin_only() {
    let db = setup().await;
    let admin = admin(&db).await;
    let bob = normal(&db, "Bob").await;
    let id = post(&db, &admin, DocumentInput::default()).await;

    let mut book = BookContext::begin(&db, bob).await.unwrap();
    let result = book.get_document(&id.to_string()).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn test_prev_and_next_follow_scope() {
    let db = setup().await;
    let admin = admin(&db).await;
    let alice = normal(&db, "Alice").await;

    post(&db, &admin, DocumentInput::default()).await;
    post(&db, &alice, DocumentInput::default()).await;
    post(&db, &admin, DocumentInput::default()).await;
    post(&db, &alice, DocumentInput::default()).await;

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let document = book.get_document("2").await.unwrap();
    assert_eq!(document.prev_document_id, Some(DocumentId(1)));
    assert_eq!(document.next_document_id, Some(DocumentId(3)));
    book.close().await.unwrap();

    let mut book = BookContext::begin(&db, alice).await.unwrap();
    let second = book.get_document("2").await.unwrap();
    assert_eq!(second.prev_document_id, None);
    assert_eq!(second.next_document_id, Some(DocumentId(4)));
    let fourth = book.get_document("4").await.unwrap();
    assert_eq!(fourth.prev_document_id, Some(DocumentId(2)));
    assert_eq!(fourth.next_document_id, None);
    book.close().await.unwrap();
}

#[rstest]
#[case::not_a_number("abc")]
#[case::zero("0")]
#[case::negative("-3")]
#[case::trailing_text("12a")]
#[tokio::test]
async fn test_malformed_id_is_validation_error(#[case] raw: &str) {
    let db = setup().await;
    let admin = admin(&db).await;

    let mut book = BookContext::begin(&db, admin.clone()).await.unwrap();
    let result = book.get_document(raw).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    drop(book);

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let result = book.put_document(raw, DocumentInput::default()).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(matches!(book.close().await, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_missing_document_is_not_found() {
    let db = setup().await;
    let admin = admin(&db).await;

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let result = book.get_document("99").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    let result = book.put_document("99", DocumentInput::default()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_invalid_amount_is_validation_error() {
    let db = setup().await;
    let admin = admin(&db).await;

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let result = book
        .post_document(shortcut(BANK, PURCHASES, "12.50", None))
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[rstest]
#[case::unparsable(shortcut(BANK, PURCHASES, "12.50", None))]
#[case::overflowing(DocumentInput {
    lines: itemized(&[
        (PURCHASES, true, 5_000_000_000_000_000_000),
        (PURCHASES, true, 5_000_000_000_000_000_000),
        (BANK, false, 1),
    ]),
    ..DocumentInput::default()
})]
#[tokio::test]
async fn test_rejected_post_writes_nothing(#[case] input: DocumentInput) {
    let db = setup().await;
    let admin = admin(&db).await;

    let mut book = BookContext::begin(&db, admin.clone()).await.unwrap();
    let result = book.post_document(input).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert!(matches!(book.close().await, Err(AppError::Validation(_))));

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    assert!(book.get_documents().await.unwrap().is_empty());
    assert!(book.get_journal().await.unwrap().documents.is_empty());
    let id = book
        .post_document(shortcut(BANK, PURCHASES, "1,00", None))
        .await
        .unwrap();
    assert_eq!(id, DocumentId(1));
    book.close().await.unwrap();
}

#[tokio::test]
async fn test_non_admin_payer_is_contract_violation() {
    let db = setup().await;
    let _admin = admin(&db).await;
    let bob = normal(&db, "Bob").await;
    let id = post(&db, &bob, DocumentInput::default()).await;

    let mut book = BookContext::begin(&db, bob.clone()).await.unwrap();
    let input = DocumentInput {
        paid_user_id: Some(UserId(1)),
        ..DocumentInput::default()
    };
    let err = book.put_document(&id.to_string(), input).await.unwrap_err();
    assert!(matches!(err, AppError::ContractViolation(_)));
    assert!(err.is_fatal());
    drop(book);

    let mut book = BookContext::begin(&db, bob).await.unwrap();
    let input = DocumentInput {
        lines: itemized(&[(PURCHASES, true, 100)]),
        ..DocumentInput::default()
    };
    let err = book.put_document(&id.to_string(), input).await.unwrap_err();
    assert!(matches!(err, AppError::ContractViolation(_)));
}

#[tokio::test]
async fn test_row_number_mismatch_is_contract_violation() {
    let db = setup().await;
    let admin = admin(&db).await;

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let input = DocumentInput {
        lines: EntryLines::Itemized(vec![DocumentEntry {
            row_number: 1,
            account_id: AccountId(SALES),
            is_debit: false,
            unit_count: 1,
            unit_cost_cents: 100,
            description: String::new(),
        }]),
        ..DocumentInput::default()
    };
    let err = book.post_document(input).await.unwrap_err();
    assert!(matches!(err, AppError::ContractViolation(_)));
}

#[tokio::test]
async fn test_compare_list_and_entry_stream_are_admin_only() {
    let db = setup().await;
    let admin = admin(&db).await;
    let bob = normal(&db, "Bob").await;
    post(&db, &admin, shortcut(BANK, PURCHASES, "3,00", date(2024, 1, 9))).await;
    post(&db, &admin, shortcut(BANK, SALES, "4,00", date(2024, 1, 10))).await;

    let mut book = BookContext::begin(&db, admin).await.unwrap();
    let compare = book.get_documents_for_compare().await.unwrap();
    assert_eq!(compare.len(), 2);
    assert_eq!(compare[0].cents, 300);
    assert_eq!(compare[1].paid_date, date(2024, 1, 10));

    let entries = book.get_all_document_entries().await.unwrap();
    assert_eq!(entries.len(), 4);
    let rows: Vec<i32> = entries.iter().map(|e| e.row_number).collect();
    assert_eq!(rows, vec![0, 1, 0, 1]);
    book.close().await.unwrap();

    let mut book = BookContext::begin(&db, bob).await.unwrap();
    assert!(matches!(
        book.get_documents_for_compare().await,
        Err(AppError::Forbidden(_))
    ));
}
