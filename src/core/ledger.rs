use crate::db::ledger::{exclusivity_violations, history};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::assignment::{AssignmentKind, RealtimeAssignment};
use std::fs;
use std::path::Path;

/// Read access to the realtime ledgers for audit and history replay.
pub struct LedgerLogic;

impl LedgerLogic {
    /// Rows of the requested kinds (both when `kind` is `None`), oldest first
    /// within each kind.
    pub fn history(
        pool: &DbPool,
        kind: Option<AssignmentKind>,
        hour_slot: Option<u32>,
    ) -> AppResult<Vec<RealtimeAssignment>> {
        let kinds: Vec<AssignmentKind> = match kind {
            Some(k) => vec![k],
            None => AssignmentKind::ALL.to_vec(),
        };

        let mut out = Vec::new();
        for k in kinds {
            out.extend(history(&pool.conn, k, hour_slot)?);
        }
        Ok(out)
    }

    /// `(kind, entity, hour_slot, active_rows)` for every slot with more than
    /// one live owner.
    pub fn violations(pool: &DbPool) -> AppResult<Vec<(AssignmentKind, String, u32, i64)>> {
        let mut out = Vec::new();
        for kind in AssignmentKind::ALL {
            for (entity, hour, n) in exclusivity_violations(&pool.conn, kind)? {
                out.push((kind, entity, hour, n));
            }
        }
        Ok(out)
    }

    pub fn export_csv(rows: &[RealtimeAssignment], path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut wtr = csv::Writer::from_path(path)?;
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
