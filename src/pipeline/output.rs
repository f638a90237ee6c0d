//! NDJSON result emission.
//!
//! One JSON object per line on the given writer, flushed per record so
//! downstream consumers see results as they are produced. Stdout carries
//! only these lines; diagnostics go to the log on stderr.

use std::io::Write;

use crate::error::Result;
use crate::model::AuditRecord;

/// Serializes audit records as newline-delimited JSON.
pub struct NdjsonEmitter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Emit a single record as one JSON line.
    pub fn emit(&mut self, record: &AuditRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        writeln!(self.writer, "{line}").map_err(crate::error::AuditError::from)?;
        self.writer.flush().map_err(crate::error::AuditError::from)?;
        Ok(())
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SizeScore;

    fn record(name: &str) -> AuditRecord {
        AuditRecord {
            name: name.to_string(),
            category: "MODEL".to_string(),
            net_score: 0.4,
            net_score_latency: 2,
            ramp_up_time: 0.25,
            ramp_up_time_latency: 0,
            bus_factor: 0.0,
            bus_factor_latency: 0,
            performance_claims: 0.1,
            performance_claims_latency: 0,
            license: 0.3,
            license_latency: 0,
            size_score: SizeScore::new(1.0, 1.0, 1.0, 1.0),
            size_score_latency: 0,
            dataset_and_code_score: 0.1,
            dataset_and_code_score_latency: 0,
            dataset_quality: 0.3,
            dataset_quality_latency: 0,
            code_quality: 0.4,
            code_quality_latency: 0,
        }
    }

    #[test]
    fn test_one_line_per_record() {
        let mut emitter = NdjsonEmitter::new(Vec::new());
        emitter.emit(&record("a")).unwrap();
        emitter.emit(&record("b")).unwrap();

        let out = String::from_utf8(emitter.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["name"], "a");
        assert_eq!(first["category"], "MODEL");
        assert!(first["size_score"].is_object());
        assert!(first["net_score_latency"].is_u64());
    }
}
