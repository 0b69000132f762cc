//! Queries for the employees table.

use apron_core::errors::StorageError;
use apron_core::ids::EmployeeId;
use apron_core::models::{Employee, NewEmployee};
use apron_core::Role;
use rusqlite::{params, Connection, OptionalExtension, Row};

const EMPLOYEE_COLUMNS: &str =
    "id, first_name, last_name, position, email, phone, role, password_hash";

fn map_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        position: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        role: row.get(6)?,
        password_hash: row.get(7)?,
    })
}

/// Insert an employee. Returns the new row id.
pub fn insert_employee(conn: &Connection, employee: &NewEmployee) -> Result<EmployeeId, StorageError> {
    conn.execute(
        "INSERT INTO employees (first_name, last_name, position, email, phone, role, password_hash)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            employee.first_name,
            employee.last_name,
            employee.position,
            employee.email,
            employee.phone,
            employee.role,
            employee.password_hash,
        ],
    )
    .map_err(StorageError::from_sqlite)?;
    Ok(EmployeeId(conn.last_insert_rowid()))
}

pub fn get_employee(conn: &Connection, id: EmployeeId) -> Result<Option<Employee>, StorageError> {
    conn.query_row(
        &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
        params![id],
        map_employee,
    )
    .optional()
    .map_err(StorageError::from_sqlite)
}

/// Exact, case-insensitive email lookup.
pub fn get_employee_by_email(conn: &Connection, email: &str) -> Result<Option<Employee>, StorageError> {
    conn.query_row(
        &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE LOWER(email) = LOWER(?1)"),
        params![email.trim()],
        map_employee,
    )
    .optional()
    .map_err(StorageError::from_sqlite)
}

/// True if another employee already uses `email`.
pub fn email_taken(
    conn: &Connection,
    email: &str,
    except: Option<EmployeeId>,
) -> Result<bool, StorageError> {
    Ok(get_employee_by_email(conn, email)?
        .map(|existing| Some(existing.id) != except)
        .unwrap_or(false))
}

/// All employees in natural listing order (id ascending).
pub fn list_employees(conn: &Connection) -> Result<Vec<Employee>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id ASC"))
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt.query_map([], map_employee).map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}

/// Employees with `role`, id ascending, optionally leaving one out.
pub fn list_employees_by_role(
    conn: &Connection,
    role: Role,
    excluding: Option<EmployeeId>,
) -> Result<Vec<Employee>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees
             WHERE role = ?1 AND (?2 IS NULL OR id != ?2)
             ORDER BY id ASC"
        ))
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt
        .query_map(params![role, excluding], map_employee)
        .map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}

/// Overwrite every mutable column of an existing employee.
pub fn update_employee(conn: &Connection, employee: &Employee) -> Result<usize, StorageError> {
    conn.execute(
        "UPDATE employees SET
            first_name = ?1, last_name = ?2, position = ?3, email = ?4,
            phone = ?5, role = ?6, password_hash = ?7
         WHERE id = ?8",
        params![
            employee.first_name,
            employee.last_name,
            employee.position,
            employee.email,
            employee.phone,
            employee.role,
            employee.password_hash,
            employee.id,
        ],
    )
    .map_err(StorageError::from_sqlite)
}

/// Delete an employee row. Returns the number of rows removed.
pub fn delete_employee(conn: &Connection, id: EmployeeId) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM employees WHERE id = ?1", params![id])
        .map_err(StorageError::from_sqlite)
}
