use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger::LedgerLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::assignment::AssignmentKind;
use crate::ui::messages::{info, success};
use crate::utils::colors::{RESET, color_for_ledger_row};
use crate::utils::table::Table;
use crate::utils::time::check_hour;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Ledger {
        kind,
        hour,
        active,
        csv,
    } = cmd
    else {
        return Ok(());
    };

    let kind = match kind {
        Some(k) => Some(AssignmentKind::from_code(k).ok_or_else(|| AppError::InvalidKind(k.clone()))?),
        None => None,
    };
    let hour = hour.map(check_hour).transpose()?;

    let pool = DbPool::new(&cfg.database, cfg.busy_timeout_ms)?;
    let mut rows = LedgerLogic::history(&pool, kind, hour)?;
    if *active {
        rows.retain(|r| r.is_active);
    }

    if let Some(file) = csv {
        LedgerLogic::export_csv(&rows, Path::new(file))?;
        success(format!("Exported {} ledger rows to {}", rows.len(), file));
        return Ok(());
    }

    if rows.is_empty() {
        info("Ledger is empty.");
        return Ok(());
    }

    let mut table = Table::new(["ID", "KIND", "ITEM", "EMPLOYEE", "SLOT", "STATE", "FROM", "CREATED"]);
    for r in rows {
        let state = match (r.is_active, r.is_temporary) {
            (true, true) => "active (temporary)",
            (true, false) => "active",
            (false, _) => "inactive",
        };
        table.add_row(vec![
            r.id.to_string(),
            r.kind.as_str().to_string(),
            r.entity_id,
            r.employee_id,
            format!("{:02}", r.hour_slot),
            format!("{}{}{}", color_for_ledger_row(r.is_active, r.is_temporary), state, RESET),
            r.reassigned_from.unwrap_or_else(|| "-".into()),
            r.created_at,
        ]);
    }
    print!("{}", table.render());
    Ok(())
}
