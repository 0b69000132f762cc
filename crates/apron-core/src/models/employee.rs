use serde::{Deserialize, Serialize};

use crate::identity::Role;
use crate::ids::EmployeeId;

/// A staff member who reports and resolves incidents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    /// Credential hash produced by the auth collaborator. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn to_ref(&self) -> EmployeeRef {
        EmployeeRef {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Compact employee reference embedded in incident views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Fields for a new employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub password_hash: String,
}

/// Partial update of an employee. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.position.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.role.is_none()
            && self.password_hash.is_none()
    }

    /// Apply the patch onto an in-memory copy.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(ref v) = self.first_name {
            employee.first_name = v.clone();
        }
        if let Some(ref v) = self.last_name {
            employee.last_name = v.clone();
        }
        if let Some(ref v) = self.position {
            employee.position = Some(v.clone());
        }
        if let Some(ref v) = self.email {
            employee.email = v.clone();
        }
        if let Some(ref v) = self.phone {
            employee.phone = Some(v.clone());
        }
        if let Some(v) = self.role {
            employee.role = v;
        }
        if let Some(ref v) = self.password_hash {
            employee.password_hash = v.clone();
        }
    }
}
