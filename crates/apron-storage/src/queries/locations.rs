//! Queries for the locations table.

use apron_core::errors::StorageError;
use apron_core::ids::LocationId;
use apron_core::models::{Location, NewLocation};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn map_location(row: &Row<'_>) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get(0)?,
        name: row.get(1)?,
        location_type: row.get(2)?,
    })
}

pub fn insert_location(conn: &Connection, location: &NewLocation) -> Result<LocationId, StorageError> {
    conn.execute(
        "INSERT INTO locations (location_name, location_type) VALUES (?1, ?2)",
        params![location.name, location.location_type],
    )
    .map_err(StorageError::from_sqlite)?;
    Ok(LocationId(conn.last_insert_rowid()))
}

pub fn get_location(conn: &Connection, id: LocationId) -> Result<Option<Location>, StorageError> {
    conn.query_row(
        "SELECT id, location_name, location_type FROM locations WHERE id = ?1",
        params![id],
        map_location,
    )
    .optional()
    .map_err(StorageError::from_sqlite)
}

pub fn list_locations(conn: &Connection) -> Result<Vec<Location>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, location_name, location_type FROM locations ORDER BY id ASC")
        .map_err(StorageError::from_sqlite)?;
    let rows = stmt.query_map([], map_location).map_err(StorageError::from_sqlite)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(StorageError::from_sqlite)
}

pub fn count_locations(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM locations", [], |row| row.get(0))
        .map_err(StorageError::from_sqlite)
}
