use rusqlite::{params, OptionalExtension};

use arctic_core::error::Result;
use arctic_core::telemetry::{Metric, MetricKind};

use super::{persistence, CurrentRow, Database, HistoryPoint};

impl Database {
    /// Write or overwrite the single current row for `metric.kind`.
    pub fn upsert_current(&self, metric: &Metric, at: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO dashboard_data (data_type, value, min_value, max_value, change_24h, trend, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(data_type) DO UPDATE SET
               value = excluded.value,
               min_value = excluded.min_value,
               max_value = excluded.max_value,
               change_24h = excluded.change_24h,
               trend = excluded.trend,
               updated_at = excluded.updated_at",
            params![
                metric.kind.as_str(),
                metric.value,
                metric.min,
                metric.max,
                metric.change_24h,
                metric.trend.as_str(),
                at,
            ],
        )
        .map_err(persistence)?;
        Ok(())
    }

    /// Append one immutable history row. Every call adds a row.
    pub fn append_history(&self, kind: MetricKind, value: f64, at: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO dashboard_history (data_type, value, timestamp) VALUES (?1, ?2, ?3)",
            params![kind.as_str(), value, at],
        )
        .map_err(persistence)?;
        Ok(())
    }

    /// Keep only the newest `keep` history rows for `kind`. Returns rows removed.
    pub fn prune_history(&self, kind: MetricKind, keep: u32) -> Result<usize> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM dashboard_history
             WHERE data_type = ?1
               AND id NOT IN (
                 SELECT id FROM dashboard_history WHERE data_type = ?1 ORDER BY id DESC LIMIT ?2
               )",
            params![kind.as_str(), keep],
        )
        .map_err(persistence)
    }

    /// Up to `limit` most recent points for `data_type`, oldest first.
    ///
    /// Unknown names simply have no rows.
    pub fn history(&self, data_type: &str, limit: u32) -> Result<Vec<HistoryPoint>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT data_type, value, timestamp FROM dashboard_history
                 WHERE data_type = ?1
                 ORDER BY timestamp DESC, id DESC
                 LIMIT ?2",
            )
            .map_err(persistence)?;
        let mut points = stmt
            .query_map(params![data_type, limit], |row| {
                Ok(HistoryPoint {
                    data_type: row.get(0)?,
                    value: row.get(1)?,
                    timestamp: row.get(2)?,
                })
            })
            .map_err(persistence)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(persistence)?;
        points.reverse();
        Ok(points)
    }

    pub fn history_len(&self, kind: MetricKind) -> Result<u64> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT COUNT(*) FROM dashboard_history WHERE data_type = ?1",
            [kind.as_str()],
            |row| row.get(0),
        )
        .map_err(persistence)
    }

    pub fn current_row(&self, kind: MetricKind) -> Result<Option<CurrentRow>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT data_type, value, min_value, max_value, change_24h, trend, updated_at
             FROM dashboard_data WHERE data_type = ?1",
            [kind.as_str()],
            |row| {
                Ok(CurrentRow {
                    data_type: row.get(0)?,
                    value: row.get(1)?,
                    min_value: row.get(2)?,
                    max_value: row.get(3)?,
                    change_24h: row.get(4)?,
                    trend: row.get(5)?,
                    updated_at: row.get(6)?,
                })
            },
        )
        .optional()
        .map_err(persistence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arctic_core::telemetry::MetricStore;

    #[test]
    fn upsert_is_idempotent_by_key() {
        let db = Database::open_in_memory().unwrap();
        let mut store = MetricStore::new();
        let first = store.snapshot().get(MetricKind::Pollution);
        db.upsert_current(&first, "2026-01-01T00:00:00.000Z").unwrap();

        let next = store
            .tick_with(|_, _| 1.0)
            .get(MetricKind::Pollution);
        db.upsert_current(&next, "2026-01-01T00:00:01.000Z").unwrap();
        db.upsert_current(&next, "2026-01-01T00:00:01.000Z").unwrap();

        let row = db.current_row(MetricKind::Pollution).unwrap().unwrap();
        assert_eq!(row.value, 24.1);
        assert_eq!(row.trend, "up");
        assert_eq!(row.updated_at, "2026-01-01T00:00:01.000Z");

        let conn = db.conn().unwrap();
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM dashboard_data", [], |r| r.get(0))
            .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn history_without_current_row_violates_fk() {
        let db = Database::open_in_memory().unwrap();
        let err = db
            .append_history(MetricKind::SeaLevel, 2.3, "2026-01-01T00:00:00.000Z")
            .expect_err("fk must reject");
        assert_eq!(err.client_code().as_str(), "PERSISTENCE");
    }
}
