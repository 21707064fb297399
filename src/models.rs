use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::table::{Column, FieldValue, Record};

/// Accept ids delivered either as JSON strings or numbers
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

/// Accept numeric fields delivered either as JSON numbers or numeric strings
fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumber {
        Int(i32),
        Text(String),
    }

    match RawNumber::deserialize(deserializer)? {
        RawNumber::Int(n) => Ok(n),
        RawNumber::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Year {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct University {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub acronym: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    #[serde(other)]
    Other,
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
            UserRole::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Status label shown in the users table
    pub fn status_label(&self) -> &str {
        if self.is_active {
            "Actif"
        } else {
            "Inactif"
        }
    }

    pub fn last_login_label(&self) -> String {
        self.last_login
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "Jamais".to_string())
    }
}

/// Research document returned by the document search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub discipline: Option<String>,
    #[serde(default)]
    pub university: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Record for Year {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "id" => Some(FieldValue::text(&self.id)),
            "year" => Some(self.year.into()),
            _ => None,
        }
    }
}

impl Record for University {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "acronym" => Some((&self.acronym).into()),
            "country" => Some((&self.country).into()),
            _ => None,
        }
    }
}

impl Record for Country {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "code" => Some((&self.code).into()),
            _ => None,
        }
    }
}

impl Record for Discipline {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "id" => Some(FieldValue::text(&self.id)),
            "name" => Some(FieldValue::text(&self.name)),
            "description" => Some((&self.description).into()),
            _ => None,
        }
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "id" => Some(FieldValue::text(&self.id)),
            "username" => Some(FieldValue::text(&self.username)),
            "email" => Some(FieldValue::text(&self.email)),
            "role" => Some(FieldValue::text(self.role.as_str())),
            "is_active" => Some(FieldValue::text(self.status_label())),
            // ISO form so text order is chronological
            "last_login" => Some(
                self.last_login
                    .map(|t| FieldValue::owned(t.format("%Y-%m-%d %H:%M").to_string()))
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }
}

impl Record for Document {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Option<FieldValue<'_>> {
        match key {
            "id" => Some(FieldValue::text(&self.id)),
            "title" => Some(FieldValue::text(&self.title)),
            "author" => Some((&self.author).into()),
            "discipline" => Some((&self.discipline).into()),
            "university" => Some((&self.university).into()),
            "year" => Some(self.year.map(FieldValue::from).unwrap_or(FieldValue::Null)),
            "uploaded_at" => Some(
                self.uploaded_at
                    .map(|t| FieldValue::owned(t.format("%Y-%m-%d").to_string()))
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }
}

/// Column sets for each record type, in display order
pub mod columns {
    use super::Column;

    pub fn years() -> Vec<Column> {
        vec![Column::new("year", "Année").sortable()]
    }

    pub fn universities() -> Vec<Column> {
        vec![
            Column::new("name", "Nom").sortable(),
            Column::new("acronym", "Sigle").sortable(),
            Column::new("country", "Pays").sortable(),
        ]
    }

    pub fn countries() -> Vec<Column> {
        vec![
            Column::new("name", "Nom").sortable(),
            Column::new("code", "Code").sortable(),
        ]
    }

    pub fn disciplines() -> Vec<Column> {
        vec![
            Column::new("name", "Nom").sortable(),
            Column::new("description", "Description"),
        ]
    }

    pub fn users() -> Vec<Column> {
        vec![
            Column::new("username", "Nom d'utilisateur").sortable(),
            Column::new("email", "Email").sortable(),
            Column::new("role", "Rôle").sortable(),
            Column::new("is_active", "Statut").sortable(),
            Column::new("last_login", "Dernière connexion").sortable(),
        ]
    }

    pub fn documents() -> Vec<Column> {
        vec![
            Column::new("title", "Titre").sortable(),
            Column::new("author", "Auteur").sortable(),
            Column::new("discipline", "Discipline").sortable(),
            Column::new("university", "Université").sortable(),
            Column::new("year", "Année").sortable(),
        ]
    }
}
