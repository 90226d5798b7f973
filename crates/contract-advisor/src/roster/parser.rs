use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) const NAME_COLUMN: &str = "Name";
pub(crate) const CAREER_WAR_COLUMN: &str = "avg_WAR_career";
pub(crate) const DECLINE_3_COLUMN: &str = "pred_decline_3";
pub(crate) const DECLINE_5_COLUMN: &str = "pred_decline_5";

/// One CSV row with its source line, before numeric parsing.
#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) line: u64,
    pub(crate) name: Option<String>,
    pub(crate) player_id: Option<String>,
    pub(crate) position: Option<String>,
    pub(crate) career_war: Option<String>,
    pub(crate) decline_3yr: Option<String>,
    pub(crate) decline_5yr: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let row: RosterRow = record.deserialize(Some(&headers))?;

        records.push(RosterRecord {
            line,
            name: row.name,
            player_id: row.player_id,
            position: row.position,
            career_war: row.career_war,
            decline_3yr: row.decline_3yr,
            decline_5yr: row.decline_5yr,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(
        rename = "Name",
        alias = "name",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    name: Option<String>,
    #[serde(
        rename = "player_id",
        alias = "id",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    player_id: Option<String>,
    #[serde(
        rename = "Pos",
        alias = "position",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    position: Option<String>,
    #[serde(
        rename = "avg_WAR_career",
        alias = "careerWAR",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    career_war: Option<String>,
    #[serde(
        rename = "pred_decline_3",
        alias = "p3",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    decline_3yr: Option<String>,
    #[serde(
        rename = "pred_decline_5",
        alias = "p5",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    decline_5yr: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
