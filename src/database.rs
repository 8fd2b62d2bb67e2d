use crate::{
    geo::BoundingBox,
    quake::{EventType, QuakeSource, Region, SeismicEvent},
    QuakeRiskResult,
};
use chrono::{DateTime, NaiveDateTime};
use log::info;
use rusqlite::{types::ValueRef, Connection, OpenFlags, ToSql};
use std::{path::Path, str::FromStr};

/// Represents a connection to the database where the earthquake records are stored.
pub struct QuakeDatabase {
    conn: Connection,
}

impl QuakeDatabase {
    /// Initialize a database.
    ///
    /// Initialize a database to make sure it exists and is set up properly.
    pub fn initialize<P: AsRef<Path>>(path: P) -> QuakeRiskResult<()> {
        let path = path.as_ref();

        let _conn = Self::open_database_to_write(path)?;
        Ok(())
    }

    /// Open a connection to the database.
    ///
    /// A path of ":memory:" opens a private, in memory database.
    pub fn connect<P: AsRef<Path>>(path: P) -> QuakeRiskResult<Self> {
        let path = path.as_ref();

        let conn = Self::open_database_to_write(path)?;
        Ok(QuakeDatabase { conn })
    }

    fn open_database_to_write(path: &Path) -> QuakeRiskResult<Connection> {
        let conn = rusqlite::Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        // A 5-second busy time out is WAY too much. If we hit this something has gone terribly wrong.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        const QUERY: &str = include_str!("database/create_quake_db.sql");
        conn.execute_batch(QUERY)?;

        Ok(conn)
    }

    /// Prepare to add regions and earthquakes to the database.
    pub fn prepare_to_add_quakes(&self) -> QuakeRiskResult<QuakeDatabaseAddQuake> {
        const ADD_REGION_QUERY: &str = include_str!("database/add_region.sql");
        const ADD_QUAKE_QUERY: &str = include_str!("database/add_quake.sql");

        let add_region_stmt = self.conn.prepare(ADD_REGION_QUERY)?;
        let add_quake_stmt = self.conn.prepare(ADD_QUAKE_QUERY)?;

        Ok(QuakeDatabaseAddQuake {
            add_region_stmt,
            add_quake_stmt,
            conn: &self.conn,
        })
    }

    /// Get every earthquake in the database, most recent first.
    pub fn all_quakes(&self) -> QuakeRiskResult<Vec<SeismicEvent>> {
        const QUERY: &str = include_str!("database/query_all_quakes.sql");
        let mut stmt = self.conn.prepare(QUERY)?;

        let quakes = stmt
            .query_and_then([], query_row_to_quake)?
            .collect::<QuakeRiskResult<Vec<_>>>()?;

        Ok(quakes)
    }
}

impl QuakeSource for QuakeDatabase {
    fn quakes_since(
        &self,
        cutoff: NaiveDateTime,
        area: BoundingBox,
    ) -> QuakeRiskResult<Vec<SeismicEvent>> {
        const QUERY: &str = include_str!("database/query_quakes_since.sql");
        let mut stmt = self.conn.prepare(QUERY)?;

        let quakes = stmt
            .query_and_then(
                [
                    &cutoff.and_utc().timestamp() as &dyn ToSql,
                    &area.ll.lat,
                    &area.ur.lat,
                    &area.ll.lon,
                    &area.ur.lon,
                ],
                query_row_to_quake,
            )?
            .collect::<QuakeRiskResult<Vec<_>>>()?;

        info!(target: "database", "Retrieved {} earthquakes since {}.", quakes.len(), cutoff);

        Ok(quakes)
    }

    fn regions(&self) -> QuakeRiskResult<Vec<Region>> {
        const QUERY: &str = "SELECT region_id, name, code, description FROM regions ORDER BY region_id";
        let mut stmt = self.conn.prepare(QUERY)?;

        let regions = stmt
            .query_and_then([], |row| -> QuakeRiskResult<Region> {
                Ok(Region {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    code: row.get(2)?,
                    description: row.get(3)?,
                })
            })?
            .collect::<QuakeRiskResult<Vec<_>>>()?;

        Ok(regions)
    }
}

pub struct QuakeDatabaseAddQuake<'a> {
    add_region_stmt: rusqlite::Statement<'a>,
    add_quake_stmt: rusqlite::Statement<'a>,
    conn: &'a Connection,
}

impl<'a> QuakeDatabaseAddQuake<'a> {
    /// Add a region if it isn't already there.
    ///
    /// # Returns
    /// The row id of the region with this name.
    pub fn add_region(
        &mut self,
        name: &str,
        code: Option<&str>,
        description: Option<&str>,
    ) -> QuakeRiskResult<i64> {
        self.add_region_stmt
            .execute([&name as &dyn ToSql, &code, &description])?;

        let id: i64 = self.conn.query_row(
            "SELECT region_id FROM regions WHERE name = ?",
            [name],
            |row| row.get(0),
        )?;

        Ok(id)
    }

    /// Add a single earthquake. The row id of `quake` is ignored, the database assigns one.
    ///
    /// # Returns
    /// `false` if an earthquake with the same event id was already present.
    pub fn add_quake(&mut self, quake: &SeismicEvent) -> QuakeRiskResult<bool> {
        let event_type: &'static str = quake.event_type.into();

        let num_added = self.add_quake_stmt.execute([
            &quake.event_id as &dyn ToSql,
            &quake.magnitude,
            &quake.lat,
            &quake.lon,
            &quake.depth,
            &event_type,
            &quake.description,
            &quake.triggered_at.and_utc().timestamp(),
            &quake.recorded_at.and_utc().timestamp(),
            &quake.region_id,
        ])?;

        Ok(num_added > 0)
    }

    /// Add a list of earthquakes in a single transaction. If any of them fails none are added.
    ///
    /// # Returns
    /// The number of earthquakes that were not already present.
    pub fn add_quakes(&mut self, quakes: &[SeismicEvent]) -> QuakeRiskResult<usize> {
        // Rolls back on drop if any insert fails.
        let conn = self.conn;
        let tx = conn.unchecked_transaction()?;

        let mut num_added = 0;
        for quake in quakes {
            if self.add_quake(quake)? {
                num_added += 1;
            }
        }

        tx.commit()?;

        Ok(num_added)
    }
}

fn timestamp_to_naive(timestamp: i64) -> QuakeRiskResult<NaiveDateTime> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| format!("invalid timestamp: {}", timestamp).into())
}

fn query_row_to_quake(row: &rusqlite::Row) -> QuakeRiskResult<SeismicEvent> {
    let id: i64 = row.get(0)?;
    let event_id: String = row.get(1)?;
    let magnitude: f64 = row.get(2)?;
    let lat: f64 = row.get(3)?;
    let lon: f64 = row.get(4)?;
    let depth: f64 = row.get(5)?;

    let event_type = match row.get_ref(6)? {
        ValueRef::Text(txt) => EventType::from_str(std::str::from_utf8(txt)?)?,
        _ => return Err("event_type not text".into()),
    };

    let description: Option<String> = row.get(7)?;
    let triggered_at = timestamp_to_naive(row.get(8)?)?;
    let recorded_at = timestamp_to_naive(row.get(9)?)?;
    let region_id: i64 = row.get(10)?;

    Ok(SeismicEvent {
        id,
        event_id,
        magnitude,
        lat,
        lon,
        depth,
        event_type,
        description,
        triggered_at,
        recorded_at,
        region_id,
    })
}
