//! 병합 테이블 CSV 내보내기.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use cindex_core::MergedRow;

use crate::error::Result;

/// 병합 테이블을 CSV 파일로 저장합니다.
///
/// 미정의 변화율/metric(자산별 첫 행)은 빈 셀로 기록됩니다.
/// 저장된 행 수를 반환합니다.
pub fn write_merged_csv<P: AsRef<Path>>(rows: &[MergedRow], path: P) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "date,asset_id,price,market_cap,weight,index_value,open,high,low,close,volume,price_pct_change,metric"
    )?;

    for row in rows {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{},{},{},{}",
            row.date,
            row.asset_id,
            row.price,
            row.market_cap,
            row.weight,
            row.index_value,
            row.open,
            row.high,
            row.low,
            row.close,
            row.volume,
            row.price_pct_change.map(|v| v.to_string()).unwrap_or_default(),
            row.metric.map(|v| v.to_string()).unwrap_or_default(),
        )?;
    }

    writer.flush()?;

    info!(rows = rows.len(), path = %path.display(), "Saved merged table");

    Ok(rows.len())
}
