use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Named permission bundle assignable to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Named capability string attached to roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub id: Uuid,
    pub name: String,
}

/// A permission granted to a particular role.
#[derive(Debug, Clone)]
pub struct RoleGrant {
    pub role_id: Uuid,
    pub permission: Permission,
}

/// Role together with every permission it grants.
#[derive(Debug, Clone)]
pub struct RoleWithPermissions {
    pub role: Role,
    pub permissions: Vec<Permission>,
}

/// Reference to a permission as supplied by the admin panel: either a bare
/// name (created on demand) or an object carrying an existing id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PermissionRef {
    Name(String),
    Existing { id: Uuid },
}

/// Permission references split into names to upsert and ids to link directly.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PermissionSelection {
    pub names: Vec<String>,
    pub ids: Vec<Uuid>,
}

impl PermissionSelection {
    /// Names are trimmed, blanks dropped, and both lists deduplicated in input order.
    pub fn from_refs(refs: Vec<PermissionRef>) -> Self {
        let mut seen_names = BTreeSet::new();
        let mut seen_ids = BTreeSet::new();
        let mut selection = Self::default();
        for r in refs {
            match r {
                PermissionRef::Name(name) => {
                    let name = name.trim().to_owned();
                    if !name.is_empty() && seen_names.insert(name.clone()) {
                        selection.names.push(name);
                    }
                }
                PermissionRef::Existing { id } => {
                    if seen_ids.insert(id) {
                        selection.ids.push(id);
                    }
                }
            }
        }
        selection
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.ids.is_empty()
    }
}

/// One row of `user_roles`.
#[derive(Debug, Clone)]
pub struct UserRoleAssignment {
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub assigned_at: DateTime<Utc>,
}

/// Local side-record holding the `is_active` flag for a user.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub is_active: bool,
}

/// Free-form metadata the identity provider stores on a user.
///
/// The provider exposes it as `user_metadata` or `raw_user_meta_data` depending on
/// the endpoint; both are collapsed into this type at the HTTP boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// User as known to the hosted identity provider.
#[derive(Debug, Clone)]
pub struct IdentityUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub metadata: Option<UserMetadata>,
}

impl IdentityUser {
    /// Placeholder for a user only known through local role rows.
    pub fn bare(id: Uuid) -> Self {
        Self {
            id,
            email: None,
            metadata: None,
        }
    }
}

/// User row shown in the admin panel: identity merged with local roles and profile.
#[derive(Debug, Clone)]
pub struct ManagedUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub roles: Vec<Role>,
    /// Name of the first assigned role, falling back to the metadata hint.
    pub role: Option<String>,
    pub user_metadata: Option<UserMetadata>,
    pub is_active: bool,
}

/// How a role is picked when assigning it to a user.
#[derive(Debug, Clone)]
pub enum RoleSelector {
    Name(String),
    Id(Uuid),
}
