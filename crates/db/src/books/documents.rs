//! Document reads and writes.

use std::collections::{BTreeMap, HashMap};

use massikone_core::auth::Caller;
use massikone_core::ledger::{
    Document, DocumentComparison, DocumentEntry, DocumentInput, DocumentSummary, EntryTotals,
    LedgerError, UserRef, parse_document_id, shortcut_accounts,
};
use massikone_core::reports::JournalDocument;
use massikone_shared::AppResult;
use massikone_shared::types::{DocumentId, UserId};
use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use super::{BookContext, storage};
use crate::entities::{documents, users};
use crate::repositories::{DocumentRepository, HeaderUpdate};

fn summary_from(
    header: documents::Model,
    payer: Option<users::Model>,
    totals: EntryTotals,
) -> DocumentSummary {
    let paid_user = header.paid_user_id.map(|user_id| UserRef {
        user_id: UserId(user_id),
        full_name: payer.map(|u| u.full_name).unwrap_or_default(),
    });
    DocumentSummary::new(
        DocumentId(header.document_id),
        header.paid_date,
        header.description,
        paid_user,
        totals,
    )
}

/// Lists documents within `scope` with their derived amounts.
async fn summaries<C: ConnectionTrait>(
    db: &C,
    scope: Option<UserId>,
) -> AppResult<Vec<DocumentSummary>> {
    let repo = DocumentRepository::new(db);
    let headers = repo.list_headers(scope).await.map_err(storage)?;
    let mut totals: HashMap<DocumentId, EntryTotals> = HashMap::new();
    for (document_id, entry) in repo.entries_in_scope(scope).await.map_err(storage)? {
        totals.entry(document_id).or_default().add(&entry)?;
    }
    Ok(headers
        .into_iter()
        .map(|(header, payer)| {
            let totals = totals
                .get(&DocumentId(header.document_id))
                .copied()
                .unwrap_or_default();
            summary_from(header, payer, totals)
        })
        .collect())
}

/// Every document with its entries, in ID order.
pub(super) async fn journal_documents<C: ConnectionTrait>(
    db: &C,
) -> AppResult<Vec<JournalDocument>> {
    let repo = DocumentRepository::new(db);
    let headers = repo.list_headers(None).await.map_err(storage)?;
    let mut entries: BTreeMap<DocumentId, Vec<DocumentEntry>> = BTreeMap::new();
    for (document_id, entry) in repo.entries_in_scope(None).await.map_err(storage)? {
        entries.entry(document_id).or_default().push(entry);
    }
    let mut documents = Vec::with_capacity(headers.len());
    for (header, payer) in headers {
        let entries = entries
            .remove(&DocumentId(header.document_id))
            .unwrap_or_default();
        let totals = EntryTotals::from_entries(&entries)?;
        documents.push(JournalDocument {
            summary: summary_from(header, payer, totals),
            entries,
        });
    }
    Ok(documents)
}

/// The flat entry stream of the whole book.
pub(super) async fn all_entries<C: ConnectionTrait>(db: &C) -> AppResult<Vec<DocumentEntry>> {
    let rows = DocumentRepository::new(db)
        .entries_in_scope(None)
        .await
        .map_err(storage)?;
    Ok(rows.into_iter().map(|(_, entry)| entry).collect())
}

async fn document<C: ConnectionTrait>(
    db: &C,
    caller: &Caller,
    raw_id: &str,
) -> AppResult<Document> {
    let document_id = parse_document_id(raw_id)?;
    let repo = DocumentRepository::new(db);
    let (header, payer) = repo
        .find_header(document_id)
        .await
        .map_err(storage)?
        .ok_or(LedgerError::DocumentNotFound(document_id))?;
    caller.require_admin_or_user(header.paid_user_id.map(UserId))?;

    let entries = repo.entries_of(document_id).await.map_err(storage)?;
    let (credit_account_id, debit_account_id) = shortcut_accounts(&entries);
    let image_ids = repo.images_of(document_id).await.map_err(storage)?;
    let scope = caller.document_scope();
    let prev_document_id = repo
        .prev_document_id(document_id, scope)
        .await
        .map_err(storage)?;
    let next_document_id = repo
        .next_document_id(document_id, scope)
        .await
        .map_err(storage)?;

    let totals = EntryTotals::from_entries(&entries)?;
    Ok(Document {
        summary: summary_from(header, payer, totals),
        credit_account_id,
        debit_account_id,
        image_ids,
        entries,
        prev_document_id,
        next_document_id,
    })
}

/// A document write with its input checked and its entries resolved.
struct DocumentWrite {
    header: HeaderUpdate,
    /// Replacement entries; only admins write entries.
    entries: Option<Vec<DocumentEntry>>,
    image_ids: Vec<String>,
}

impl DocumentWrite {
    /// Resolves admin entries from `input` without touching storage.
    fn prepare(caller: &Caller, input: DocumentInput) -> AppResult<Self> {
        let DocumentInput {
            paid_date,
            description,
            paid_user_id,
            lines,
            image_ids,
        } = input;
        let admin = caller.is_admin();
        let entries = if admin { Some(lines.resolve()?) } else { None };
        Ok(Self {
            header: HeaderUpdate {
                description,
                paid_date,
                paid_user_id: admin.then_some(paid_user_id),
            },
            entries,
            image_ids,
        })
    }
}

/// Checks that `document_id` exists and the caller may write it.
async fn authorize_write<C: ConnectionTrait>(
    repo: &DocumentRepository<'_, C>,
    caller: &Caller,
    document_id: DocumentId,
) -> AppResult<()> {
    let (header, _) = repo
        .find_header(document_id)
        .await
        .map_err(storage)?
        .ok_or(LedgerError::DocumentNotFound(document_id))?;
    caller.require_admin_or_user(header.paid_user_id.map(UserId))?;
    Ok(())
}

/// Replaces the entries, images and header of a document.
async fn apply_write<C: ConnectionTrait>(
    repo: &DocumentRepository<'_, C>,
    document_id: DocumentId,
    write: DocumentWrite,
) -> AppResult<()> {
    if let Some(entries) = &write.entries {
        repo.replace_entries(document_id, entries)
            .await
            .map_err(storage)?;
    }
    repo.replace_images(document_id, &write.image_ids)
        .await
        .map_err(storage)?;
    repo.update_header(document_id, write.header)
        .await
        .map_err(storage)?;
    Ok(())
}

async fn post<C: ConnectionTrait>(
    db: &C,
    caller: &Caller,
    input: DocumentInput,
) -> AppResult<DocumentId> {
    input.check_caller(caller)?;
    let write = DocumentWrite::prepare(caller, input)?;
    let repo = DocumentRepository::new(db);
    let document_id = repo.new_document_id().await.map_err(storage)?;
    let payer = (!caller.is_admin()).then_some(caller.user_id);
    repo.insert_header(document_id, payer, chrono::Utc::now().date_naive())
        .await
        .map_err(storage)?;
    apply_write(&repo, document_id, write).await?;
    info!(document_id = %document_id, user_id = %caller.user_id, "Created document #{document_id}");
    Ok(document_id)
}

async fn put<C: ConnectionTrait>(
    db: &C,
    caller: &Caller,
    raw_id: &str,
    input: DocumentInput,
) -> AppResult<()> {
    let document_id = parse_document_id(raw_id)?;
    input.check_caller(caller)?;
    let repo = DocumentRepository::new(db);
    authorize_write(&repo, caller, document_id).await?;
    let write = DocumentWrite::prepare(caller, input)?;
    apply_write(&repo, document_id, write).await?;
    debug!(document_id = %document_id, user_id = %caller.user_id, "Updated document");
    Ok(())
}

async fn documents_for_compare<C: ConnectionTrait>(
    db: &C,
    caller: &Caller,
) -> AppResult<Vec<DocumentComparison>> {
    caller.require_admin()?;
    let summaries = summaries(db, None).await?;
    Ok(summaries.into_iter().map(DocumentComparison::from).collect())
}

async fn document_entries<C: ConnectionTrait>(
    db: &C,
    caller: &Caller,
) -> AppResult<Vec<DocumentEntry>> {
    caller.require_admin()?;
    all_entries(db).await
}

impl BookContext {
    /// Lists the documents visible to the caller: all for admins, the
    /// caller's own otherwise.
    pub async fn get_documents(&mut self) -> AppResult<Vec<DocumentSummary>> {
        self.ensure_usable()?;
        let result = summaries(&self.txn, self.caller.document_scope()).await;
        self.absorb(result)
    }

    /// Reads one document with entries, images and navigation neighbours.
    ///
    /// Fails with Validation for malformed IDs, NotFound for missing
    /// documents and Forbidden for other users' documents.
    pub async fn get_document(&mut self, document_id: &str) -> AppResult<Document> {
        self.ensure_usable()?;
        let result = document(&self.txn, &self.caller, document_id).await;
        self.absorb(result)
    }

    /// Creates a document with the next free ID and writes `input` into it.
    ///
    /// Non-admin callers become the payer.
    pub async fn post_document(&mut self, input: DocumentInput) -> AppResult<DocumentId> {
        self.ensure_usable()?;
        let result = post(&self.txn, &self.caller, input).await;
        self.absorb(result)
    }

    /// Replaces the entries, images and header of a document.
    ///
    /// Entries and the payer are only written for admins.
    pub async fn put_document(&mut self, document_id: &str, input: DocumentInput) -> AppResult<()> {
        self.ensure_usable()?;
        let result = put(&self.txn, &self.caller, document_id, input).await;
        self.absorb(result)
    }

    /// Admin only: every document's date, amount and description for
    /// comparison against a bank statement.
    pub async fn get_documents_for_compare(&mut self) -> AppResult<Vec<DocumentComparison>> {
        self.ensure_usable()?;
        let result = documents_for_compare(&self.txn, &self.caller).await;
        self.absorb(result)
    }

    /// Admin only: every entry of the book ordered by document and row.
    pub async fn get_all_document_entries(&mut self) -> AppResult<Vec<DocumentEntry>> {
        self.ensure_usable()?;
        let result = document_entries(&self.txn, &self.caller).await;
        self.absorb(result)
    }
}
