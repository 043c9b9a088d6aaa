//! Organization settings.

use massikone_core::auth::Caller;
use massikone_shared::AppResult;
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

use super::{BookContext, storage};
use crate::repositories::SettingsRepository;

const ORG_FULL_NAME: &str = "org_full_name";
const ORG_SHORT_NAME: &str = "org_short_name";

/// Organization settings. Unknown stored names are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Full legal name of the organization.
    pub org_full_name: String,
    /// Short name used in headings.
    pub org_short_name: String,
}

async fn load<C: ConnectionTrait>(db: &C) -> AppResult<Settings> {
    let rows = SettingsRepository::new(db).list().await.map_err(storage)?;
    let mut settings = Settings::default();
    for row in rows {
        match row.name.as_str() {
            ORG_FULL_NAME => settings.org_full_name = row.value,
            ORG_SHORT_NAME => settings.org_short_name = row.value,
            _ => {}
        }
    }
    Ok(settings)
}

async fn store<C: ConnectionTrait>(db: &C, caller: &Caller, settings: &Settings) -> AppResult<()> {
    caller.require_admin()?;
    let repo = SettingsRepository::new(db);
    repo.put(ORG_FULL_NAME, &settings.org_full_name)
        .await
        .map_err(storage)?;
    repo.put(ORG_SHORT_NAME, &settings.org_short_name)
        .await
        .map_err(storage)?;
    Ok(())
}

impl BookContext {
    /// The organization settings.
    pub async fn get_settings(&mut self) -> AppResult<Settings> {
        self.ensure_usable()?;
        let result = load(&self.txn).await;
        self.absorb(result)
    }

    /// Admin only: stores the organization settings.
    pub async fn put_settings(&mut self, settings: &Settings) -> AppResult<()> {
        self.ensure_usable()?;
        let result = store(&self.txn, &self.caller, settings).await;
        self.absorb(result)
    }
}
