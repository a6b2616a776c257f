use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the POST sent to the lessons endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    pub codice_sede: String,
    pub anno_accademico: String,
    pub codice_facolta: String,
    pub codice_corso_di_laurea: String,
    pub anno_di_corso: String,
}

impl Default for RequestDescriptor {
    fn default() -> Self {
        Self {
            codice_sede: "RM".to_string(),
            anno_accademico: "2024".to_string(),
            codice_facolta: "75012".to_string(),
            codice_corso_di_laurea: "0H0C".to_string(),
            anno_di_corso: "1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleResponse {
    pub corso_di_laurea: Value,
    pub lezioni_calendario: BTreeMap<String, Vec<RawLesson>>,
}

// Values stay opaque so the API's nulls and numbers pass through untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLesson {
    pub descrizione_insegnamento: Value,
    pub descrizione_aula: Value,
    pub ora_inizio: Value,
    pub ora_fine: Value,
    pub note: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub name: Value,
    pub aula: Value,
    pub start: Value,
    pub end: Value,
    pub note: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReshapedSchedule {
    pub main_course_data: Value,
    pub last_executed: String,
    pub lessons_list: BTreeMap<String, Vec<Lesson>>,
}
