//! Admin resources exposed by the REST API

use std::fmt;
use std::str::FromStr;

use crate::models::{columns, Country, Discipline, University, User, Year};
use crate::table::{Column, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminResource {
    Years,
    Universities,
    Countries,
    Disciplines,
    Users,
}

impl AdminResource {
    pub const ALL: [AdminResource; 5] = [
        AdminResource::Years,
        AdminResource::Universities,
        AdminResource::Countries,
        AdminResource::Disciplines,
        AdminResource::Users,
    ];

    /// Collection path below the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            AdminResource::Years => "admin/years",
            AdminResource::Universities => "admin/universities",
            AdminResource::Countries => "admin/countries",
            AdminResource::Disciplines => "admin/disciplines",
            AdminResource::Users => "admin/users",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminResource::Years => "years",
            AdminResource::Universities => "universities",
            AdminResource::Countries => "countries",
            AdminResource::Disciplines => "disciplines",
            AdminResource::Users => "users",
        }
    }

    /// Screen title
    pub fn label(&self) -> &'static str {
        match self {
            AdminResource::Years => "Années",
            AdminResource::Universities => "Universités",
            AdminResource::Countries => "Pays",
            AdminResource::Disciplines => "Disciplines",
            AdminResource::Users => "Utilisateurs",
        }
    }
}

impl fmt::Display for AdminResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminResource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "years" | "year" | "annees" => Ok(AdminResource::Years),
            "universities" | "university" | "universites" => Ok(AdminResource::Universities),
            "countries" | "country" | "pays" => Ok(AdminResource::Countries),
            "disciplines" | "discipline" => Ok(AdminResource::Disciplines),
            "users" | "user" | "utilisateurs" => Ok(AdminResource::Users),
            other => Err(anyhow::anyhow!(
                "Unknown resource: {}. Supported resources: years, universities, countries, disciplines, users",
                other
            )),
        }
    }
}

/// Records fetched for one admin resource
#[derive(Debug, Clone, PartialEq)]
pub enum ResourcePayload {
    Years(Vec<Year>),
    Universities(Vec<University>),
    Countries(Vec<Country>),
    Disciplines(Vec<Discipline>),
    Users(Vec<User>),
}

impl ResourcePayload {
    pub fn resource(&self) -> AdminResource {
        match self {
            ResourcePayload::Years(_) => AdminResource::Years,
            ResourcePayload::Universities(_) => AdminResource::Universities,
            ResourcePayload::Countries(_) => AdminResource::Countries,
            ResourcePayload::Disciplines(_) => AdminResource::Disciplines,
            ResourcePayload::Users(_) => AdminResource::Users,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResourcePayload::Years(v) => v.len(),
            ResourcePayload::Universities(v) => v.len(),
            ResourcePayload::Countries(v) => v.len(),
            ResourcePayload::Disciplines(v) => v.len(),
            ResourcePayload::Users(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Record type served by one admin endpoint
pub trait AdminRecord: Record + Sized {
    const RESOURCE: AdminResource;

    /// Default column set for the resource table
    fn columns() -> Vec<Column>;

    /// Unwrap the payload, `None` when it belongs to another resource
    fn from_payload(payload: ResourcePayload) -> Option<Vec<Self>>;
}

macro_rules! admin_record {
    ($ty:ty, $variant:ident, $columns:path) => {
        impl AdminRecord for $ty {
            const RESOURCE: AdminResource = AdminResource::$variant;

            fn columns() -> Vec<Column> {
                $columns()
            }

            fn from_payload(payload: ResourcePayload) -> Option<Vec<Self>> {
                match payload {
                    ResourcePayload::$variant(records) => Some(records),
                    _ => None,
                }
            }
        }
    };
}

admin_record!(Year, Years, columns::years);
admin_record!(University, Universities, columns::universities);
admin_record!(Country, Countries, columns::countries);
admin_record!(Discipline, Disciplines, columns::disciplines);
admin_record!(User, Users, columns::users);
