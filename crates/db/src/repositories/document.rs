//! Document repository: headers, entries and images.

use chrono::NaiveDate;
use massikone_core::ledger::DocumentEntry;
use massikone_shared::types::{AccountId, DocumentId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set, Unchanged,
};

use crate::entities::{document_entries, document_images, documents, users};

/// Converts a stored entry row into the domain entry.
#[must_use]
pub fn entry_from_model(model: document_entries::Model) -> DocumentEntry {
    DocumentEntry {
        row_number: model.row_number,
        account_id: AccountId(model.account_id),
        is_debit: model.debit,
        unit_count: model.unit_count,
        unit_cost_cents: model.unit_cost_cents,
        description: model.description,
    }
}

/// Header fields written by a document update.
#[derive(Debug, Clone)]
pub struct HeaderUpdate {
    /// New description.
    pub description: String,
    /// New payment date.
    pub paid_date: Option<NaiveDate>,
    /// New payer; `None` leaves the payer untouched.
    pub paid_user_id: Option<Option<UserId>>,
}

/// Restricts a document query to one payer when `scope` is set.
fn scoped(query: Select<documents::Entity>, scope: Option<UserId>) -> Select<documents::Entity> {
    match scope {
        Some(user_id) => query.filter(documents::Column::PaidUserId.eq(user_id.0)),
        None => query,
    }
}

/// Document repository over any connection or transaction.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DocumentRepository<'a, C> {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// The ID for a new document: one past the highest, or 1 for an empty book.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn new_document_id(&self) -> Result<DocumentId, DbErr> {
        let last = documents::Entity::find()
            .order_by_desc(documents::Column::DocumentId)
            .one(self.db)
            .await?;
        Ok(DocumentId(last.map_or(1, |d| d.document_id + 1)))
    }

    /// Inserts an empty document header.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert_header(
        &self,
        document_id: DocumentId,
        paid_user_id: Option<UserId>,
        created_date: NaiveDate,
    ) -> Result<documents::Model, DbErr> {
        documents::ActiveModel {
            document_id: Set(document_id.0),
            paid_user_id: Set(paid_user_id.map(UserId::into_inner)),
            paid_date: Set(None),
            description: Set(String::new()),
            created_date: Set(Some(created_date)),
        }
        .insert(self.db)
        .await
    }

    /// Finds a document header with its payer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_header(
        &self,
        document_id: DocumentId,
    ) -> Result<Option<(documents::Model, Option<users::Model>)>, DbErr> {
        documents::Entity::find_by_id(document_id.0)
            .find_also_related(users::Entity)
            .one(self.db)
            .await
    }

    /// Lists document headers with their payers, ordered by ID then description.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_headers(
        &self,
        scope: Option<UserId>,
    ) -> Result<Vec<(documents::Model, Option<users::Model>)>, DbErr> {
        scoped(documents::Entity::find(), scope)
            .order_by_asc(documents::Column::DocumentId)
            .order_by_asc(documents::Column::Description)
            .find_also_related(users::Entity)
            .all(self.db)
            .await
    }

    /// Nearest lower document ID within `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn prev_document_id(
        &self,
        document_id: DocumentId,
        scope: Option<UserId>,
    ) -> Result<Option<DocumentId>, DbErr> {
        let id: Option<i64> = scoped(documents::Entity::find(), scope)
            .filter(documents::Column::DocumentId.lt(document_id.0))
            .order_by_desc(documents::Column::DocumentId)
            .select_only()
            .column(documents::Column::DocumentId)
            .into_tuple()
            .one(self.db)
            .await?;
        Ok(id.map(DocumentId))
    }

    /// Nearest higher document ID within `scope`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn next_document_id(
        &self,
        document_id: DocumentId,
        scope: Option<UserId>,
    ) -> Result<Option<DocumentId>, DbErr> {
        let id: Option<i64> = scoped(documents::Entity::find(), scope)
            .filter(documents::Column::DocumentId.gt(document_id.0))
            .order_by_asc(documents::Column::DocumentId)
            .select_only()
            .column(documents::Column::DocumentId)
            .into_tuple()
            .one(self.db)
            .await?;
        Ok(id.map(DocumentId))
    }

    /// Entries of one document in row order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn entries_of(&self, document_id: DocumentId) -> Result<Vec<DocumentEntry>, DbErr> {
        let rows = document_entries::Entity::find()
            .filter(document_entries::Column::DocumentId.eq(document_id.0))
            .order_by_asc(document_entries::Column::RowNumber)
            .all(self.db)
            .await?;
        Ok(rows.into_iter().map(entry_from_model).collect())
    }

    /// Entries of every document within `scope`, ordered by document then row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn entries_in_scope(
        &self,
        scope: Option<UserId>,
    ) -> Result<Vec<(DocumentId, DocumentEntry)>, DbErr> {
        let mut query = document_entries::Entity::find();
        if let Some(user_id) = scope {
            query = query
                .inner_join(documents::Entity)
                .filter(documents::Column::PaidUserId.eq(user_id.0));
        }
        let rows = query
            .order_by_asc(document_entries::Column::DocumentId)
            .order_by_asc(document_entries::Column::RowNumber)
            .all(self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| (DocumentId(row.document_id), entry_from_model(row)))
            .collect())
    }

    /// Replaces the entry set of a document, numbering rows by position.
    ///
    /// # Errors
    ///
    /// Returns an error if a delete or insert fails.
    pub async fn replace_entries(
        &self,
        document_id: DocumentId,
        entries: &[DocumentEntry],
    ) -> Result<(), DbErr> {
        document_entries::Entity::delete_many()
            .filter(document_entries::Column::DocumentId.eq(document_id.0))
            .exec(self.db)
            .await?;
        for (row_number, entry) in (0i32..).zip(entries) {
            document_entries::ActiveModel {
                document_id: Set(document_id.0),
                row_number: Set(row_number),
                account_id: Set(entry.account_id.0),
                debit: Set(entry.is_debit),
                unit_count: Set(entry.unit_count),
                unit_cost_cents: Set(entry.unit_cost_cents),
                description: Set(entry.description.clone()),
            }
            .insert(self.db)
            .await?;
        }
        Ok(())
    }

    /// Image references of one document in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn images_of(&self, document_id: DocumentId) -> Result<Vec<String>, DbErr> {
        document_images::Entity::find()
            .filter(document_images::Column::DocumentId.eq(document_id.0))
            .order_by_asc(document_images::Column::ImageNum)
            .select_only()
            .column(document_images::Column::ImageId)
            .into_tuple()
            .all(self.db)
            .await
    }

    /// Replaces the image list of a document. Image numbers start at 1.
    ///
    /// # Errors
    ///
    /// Returns an error if a delete or insert fails.
    pub async fn replace_images(
        &self,
        document_id: DocumentId,
        image_ids: &[String],
    ) -> Result<(), DbErr> {
        document_images::Entity::delete_many()
            .filter(document_images::Column::DocumentId.eq(document_id.0))
            .exec(self.db)
            .await?;
        for (image_num, image_id) in (1i32..).zip(image_ids) {
            document_images::ActiveModel {
                document_id: Set(document_id.0),
                image_num: Set(image_num),
                image_id: Set(image_id.clone()),
            }
            .insert(self.db)
            .await?;
        }
        Ok(())
    }

    /// Updates the header fields of a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_header(
        &self,
        document_id: DocumentId,
        update: HeaderUpdate,
    ) -> Result<documents::Model, DbErr> {
        let mut header = documents::ActiveModel {
            document_id: Unchanged(document_id.0),
            description: Set(update.description),
            paid_date: Set(update.paid_date),
            ..Default::default()
        };
        if let Some(paid_user_id) = update.paid_user_id {
            header.paid_user_id = Set(paid_user_id.map(UserId::into_inner));
        }
        header.update(self.db).await
    }
}
