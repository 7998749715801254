use sea_orm::{entity::prelude::*, sea_query::StringLen, DatabaseConnection, NotSet, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    #[sea_orm(string_value = "MALE")]
    Male,
    #[sea_orm(string_value = "FEMALE")]
    Female,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub gender: Gender,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    Ok(())
}

/// Insert a new student; the id comes from the `bigserial` column.
pub async fn create(db: &DatabaseConnection, name: &str, email: &str, gender: Gender) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        gender: Set(gender),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite every column of an existing row.
pub async fn update(db: &DatabaseConnection, id: i64, name: &str, email: &str, gender: Gender) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        gender: Set(gender),
    };
    Ok(am.update(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn exists(db: &DatabaseConnection, id: i64) -> Result<bool, errors::ModelError> {
    let n = Entity::find_by_id(id).count(db).await?;
    Ok(n > 0)
}

pub async fn email_exists(db: &DatabaseConnection, email: &str) -> Result<bool, errors::ModelError> {
    let n = Entity::find().filter(Column::Email.eq(email)).count(db).await?;
    Ok(n > 0)
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

pub async fn delete_all(db: &DatabaseConnection) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many().exec(db).await?;
    Ok(res.rows_affected)
}
