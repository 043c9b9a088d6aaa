//! Settings repository: organization name/value rows.

use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set};

use crate::entities::settings;

/// Settings repository over any connection or transaction.
#[derive(Debug, Clone, Copy)]
pub struct SettingsRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SettingsRepository<'a, C> {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// All stored settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<settings::Model>, DbErr> {
        settings::Entity::find().all(self.db).await
    }

    /// Stores a setting, inserting the row on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn put(&self, name: &str, value: &str) -> Result<settings::Model, DbErr> {
        let existing = settings::Entity::find_by_id(name.to_string())
            .one(self.db)
            .await?;
        match existing {
            Some(row) => {
                let mut row: settings::ActiveModel = row.into();
                row.value = Set(value.to_string());
                row.update(self.db).await
            }
            None => {
                settings::ActiveModel {
                    name: Set(name.to_string()),
                    value: Set(value.to_string()),
                }
                .insert(self.db)
                .await
            }
        }
    }
}
