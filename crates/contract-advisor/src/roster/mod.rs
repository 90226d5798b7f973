//! Loader for already-scored roster exports.

mod normalizer;
mod parser;

pub use normalizer::{clean_display_name, normalize_name};

use crate::advisory::domain::{PlayerId, PlayerSnapshot};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use parser::{RosterRecord, CAREER_WAR_COLUMN, DECLINE_3_COLUMN, DECLINE_5_COLUMN, NAME_COLUMN};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingValue {
        line: u64,
        column: &'static str,
    },
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingValue { line, column } => {
                write!(f, "line {}: missing value for '{}'", line, column)
            }
            RosterImportError::InvalidValue {
                line,
                column,
                value,
            } => write!(
                f,
                "line {}: '{}' is not a valid number for '{}'",
                line, value, column
            ),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingValue { .. } | RosterImportError::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Players read from an export, in file order, plus the ids that appeared more than once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterImport {
    pub players: Vec<PlayerSnapshot>,
    pub duplicates: Vec<PlayerId>,
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<RosterImport, RosterImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let import = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            players = import.players.len(),
            duplicates = import.duplicates.len(),
            "roster export loaded"
        );
        Ok(import)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<RosterImport, RosterImportError> {
        let mut import = RosterImport::default();
        let mut seen: HashSet<PlayerId> = HashSet::new();

        for record in parser::parse_records(reader)? {
            let player = snapshot_from_record(record)?;
            if seen.contains(&player.id) {
                warn!(player = %player.id, "duplicate roster row ignored");
                import.duplicates.push(player.id);
                continue;
            }

            seen.insert(player.id.clone());
            import.players.push(player);
        }

        Ok(import)
    }
}

fn snapshot_from_record(record: RosterRecord) -> Result<PlayerSnapshot, RosterImportError> {
    let line = record.line;
    let name = record
        .name
        .map(|raw| clean_display_name(&raw))
        .filter(|name| !name.is_empty())
        .ok_or(RosterImportError::MissingValue {
            line,
            column: NAME_COLUMN,
        })?;

    let career_war = parse_number(line, CAREER_WAR_COLUMN, record.career_war)?;
    let decline_3yr = parse_number(line, DECLINE_3_COLUMN, record.decline_3yr)?;
    let decline_5yr = parse_number(line, DECLINE_5_COLUMN, record.decline_5yr)?;

    let mut player = PlayerSnapshot::new(name, career_war, decline_3yr, decline_5yr);
    if let Some(id) = record.player_id {
        player = player.with_id(id);
    }
    if let Some(position) = record.position {
        player = player.with_position(position.to_ascii_uppercase());
    }

    Ok(player)
}

fn parse_number(
    line: u64,
    column: &'static str,
    raw: Option<String>,
) -> Result<f64, RosterImportError> {
    let raw = raw.ok_or(RosterImportError::MissingValue { line, column })?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RosterImportError::InvalidValue {
            line,
            column,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Name,player_id,Pos,avg_WAR_career,pred_decline_3,pred_decline_5\n";

    #[test]
    fn normalize_name_strips_invisible_characters_and_case() {
        assert_eq!(normalize_name("\u{feff}Jacob\u{200b}  SMITH "), "jacob smith");
        assert_eq!(normalize_name("Ronald  Acuña Jr."), "ronald acuña jr.");
    }

    #[test]
    fn display_name_keeps_case_and_matches_the_normalized_form() {
        let raw = "\u{200b} Ronald\u{feff}   Acuña  Jr. ";
        let display = clean_display_name(raw);
        assert_eq!(display, "Ronald Acuña Jr.");
        assert_eq!(normalize_name(raw), display.to_lowercase());
    }

    #[test]
    fn importer_reads_scored_rows_in_file_order() {
        let csv = format!(
            "{HEADER}Jacob Smith,js-1,ss,4.2,0.35,0.61\n\u{feff}Max  Johnson,,CF,1.1,0.72,0.80\n"
        );
        let import = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(import.players.len(), 2);
        assert!(import.duplicates.is_empty());

        let first = &import.players[0];
        assert_eq!(first.id, PlayerId("js-1".to_string()));
        assert_eq!(first.position.as_deref(), Some("SS"));
        assert_eq!(first.career_war, 4.2);

        let second = &import.players[1];
        assert_eq!(second.name, "Max Johnson");
        assert_eq!(second.id, PlayerId("max-johnson".to_string()));
        assert_eq!(second.decline_5yr, 0.80);
    }

    #[test]
    fn importer_accepts_short_header_aliases_and_extra_columns() {
        let csv = "name,team,careerWAR,p3,p5\nAlex Adams,SEA,2.5,0.1,0.2\n";
        let import = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(import.players.len(), 1);
        assert_eq!(import.players[0].position, None);
        assert_eq!(import.players[0].decline_3yr, 0.1);
    }

    #[test]
    fn importer_keeps_first_row_for_duplicate_ids() {
        let csv = format!("{HEADER}Jacob Smith,,SS,4.2,0.35,0.61\njacob smith,,2B,0.5,0.9,0.9\n");
        let import = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(import.players.len(), 1);
        assert_eq!(import.players[0].career_war, 4.2);
        assert_eq!(import.duplicates, vec![PlayerId("jacob-smith".to_string())]);
    }

    #[test]
    fn importer_reports_missing_numeric_cells_with_line() {
        let csv = format!("{HEADER}Jacob Smith,,SS,4.2,0.35,0.61\nMax Johnson,,CF,1.1,,0.80\n");
        let error = RosterImporter::from_reader(Cursor::new(csv)).expect_err("missing value");

        match error {
            RosterImportError::MissingValue { line, column } => {
                assert_eq!(line, 3);
                assert_eq!(column, "pred_decline_3");
            }
            other => panic!("expected missing value, got {other:?}"),
        }
    }

    #[test]
    fn importer_rejects_unparseable_numbers() {
        let csv = format!("{HEADER}Jacob Smith,,SS,four,0.35,0.61\n");
        let error = RosterImporter::from_reader(Cursor::new(csv)).expect_err("invalid value");

        match error {
            RosterImportError::InvalidValue {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "avg_WAR_career");
                assert_eq!(value, "four");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn importer_rejects_rows_without_a_name() {
        let csv = format!("{HEADER} ,,SS,4.2,0.35,0.61\n");
        let error = RosterImporter::from_reader(Cursor::new(csv)).expect_err("missing name");
        assert!(matches!(
            error,
            RosterImportError::MissingValue { column: "Name", .. }
        ));
    }

    #[test]
    fn importer_does_not_validate_probability_ranges() {
        let csv = format!("{HEADER}Jacob Smith,,SS,4.2,1.4,0.61\n");
        let import = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(import.players[0].decline_3yr, 1.4);
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = RosterImporter::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            RosterImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
