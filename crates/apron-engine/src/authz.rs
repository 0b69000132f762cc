//! Authorization predicate evaluated before every service operation body.

use apron_core::errors::{IncidentError, IncidentResult};
use apron_core::ids::EmployeeId;
use apron_core::{Caller, Role};

/// What an operation requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any authenticated employee.
    Authenticated,
    /// A caller holding `role`.
    Role(Role),
    /// The employee themself, or an administrator.
    SelfOrAdmin(EmployeeId),
    /// The incident's current assignee. Administrators get no override.
    Assignee(Option<EmployeeId>),
    /// The incident's current assignee, or an administrator.
    AssigneeOrAdmin(Option<EmployeeId>),
}

impl Capability {
    pub const ADMIN: Capability = Capability::Role(Role::Admin);
}

/// Fails with `Forbidden` unless `caller` holds `capability`.
pub fn authorize(caller: &Caller, capability: Capability) -> IncidentResult<()> {
    let allowed = match capability {
        Capability::Authenticated => true,
        Capability::Role(role) => caller.role == role,
        Capability::SelfOrAdmin(id) => caller.is_admin() || caller.employee_id == id,
        Capability::Assignee(assignee) => assignee == Some(caller.employee_id),
        Capability::AssigneeOrAdmin(assignee) => {
            caller.is_admin() || assignee == Some(caller.employee_id)
        }
    };
    if allowed {
        return Ok(());
    }

    tracing::warn!(
        employee_id = %caller.employee_id,
        role = %caller.role,
        ?capability,
        "access denied"
    );
    Err(IncidentError::forbidden(match capability {
        Capability::Role(role) => format!("requires role '{role}'"),
        Capability::Assignee(_) => "only the assigned employee may do this".to_string(),
        _ => "access denied".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_core::errors::ErrorKind;

    const ADMIN: Caller = Caller {
        employee_id: EmployeeId(1),
        role: Role::Admin,
    };
    const USER: Caller = Caller {
        employee_id: EmployeeId(2),
        role: Role::User,
    };

    #[test]
    fn role_gate() {
        assert!(authorize(&ADMIN, Capability::ADMIN).is_ok());
        let err = authorize(&USER, Capability::ADMIN).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn self_or_admin() {
        assert!(authorize(&USER, Capability::SelfOrAdmin(EmployeeId(2))).is_ok());
        assert!(authorize(&USER, Capability::SelfOrAdmin(EmployeeId(3))).is_err());
        assert!(authorize(&ADMIN, Capability::SelfOrAdmin(EmployeeId(3))).is_ok());
    }

    #[test]
    fn assignee_has_no_admin_override() {
        assert!(authorize(&USER, Capability::Assignee(Some(EmployeeId(2)))).is_ok());
        assert!(authorize(&ADMIN, Capability::Assignee(Some(EmployeeId(2)))).is_err());
        assert!(authorize(&USER, Capability::Assignee(None)).is_err());
        assert!(authorize(&ADMIN, Capability::AssigneeOrAdmin(None)).is_ok());
    }
}
