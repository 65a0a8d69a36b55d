use crate::db::{ilike_contains, page, postgres_service::PostgresService};
use crate::types::contact::{ContactQuery, RContactCreate, RContactUpdate};
use crate::types::error::AppError;
use crate::utils::token;
use chrono::Utc;
use entity::contact::{ActiveModel as ContactActive, Column, Entity as Contact, Model as ContactModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

// Every contact query is filtered on the owner; nothing here can see another
// user's rows.
impl PostgresService {
    pub async fn list_contacts(&self, owner: Uuid, query: ContactQuery) -> Result<Vec<ContactModel>, AppError> {
        let (offset, limit) = page(query.skip, query.limit);
        let mut finder = Contact::find().filter(Column::UserId.eq(owner));

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            finder = finder.filter(ilike_contains(Column::Name, search));
        }

        Ok(finder
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn create_contact(&self, owner: Uuid, payload: RContactCreate) -> Result<ContactModel, AppError> {
        let now = Utc::now();
        Ok(ContactActive {
            id: Set(token::new_id()),
            user_id: Set(owner),
            name: Set(payload.name),
            province: Set(payload.province),
            city: Set(payload.city),
            address: Set(payload.address),
            postal_code: Set(payload.postal_code),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn get_contact(&self, id: Uuid, requester: Uuid) -> Result<ContactModel, AppError> {
        Contact::find_by_id(id)
            .filter(Column::UserId.eq(requester))
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn update_contact(&self, id: Uuid, patch: RContactUpdate, requester: Uuid) -> Result<ContactModel, AppError> {
        let mut am: ContactActive = self.get_contact(id, requester).await?.into();
        if let Some(v) = patch.name { am.name = Set(v); }
        if let Some(v) = patch.province { am.province = Set(Some(v)); }
        if let Some(v) = patch.city { am.city = Set(Some(v)); }
        if let Some(v) = patch.address { am.address = Set(Some(v)); }
        if let Some(v) = patch.postal_code { am.postal_code = Set(Some(v)); }
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn delete_contact(&self, id: Uuid, requester: Uuid) -> Result<(), AppError> {
        let contact = self.get_contact(id, requester).await?;
        contact.delete(&self.database_connection).await?;
        Ok(())
    }
}
