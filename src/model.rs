//! Typed model of the upstream results payload
//!
//! The upstream returns a deeply nested, rigid JSON tree: an array of result
//! groups, each holding sessions, each holding results, each wrapping an
//! exam-in-session around the exam itself. Modeling it as typed structs keeps
//! schema mismatches at the parse boundary instead of surfacing as
//! missing-field surprises inside the formatter. Wire names are the
//! upstream's Polish identifiers; absent fields default and unknown fields
//! are ignored, matching the tolerance of the service's own clients, while a
//! type mismatch still fails the whole parse.

use crate::error::Result;
use serde::Deserialize;

/// Identifier/name pair used throughout the upstream schema
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct IdName {
    /// Upstream identifier
    #[serde(rename = "ID")]
    pub id: i64,
    /// Display name
    #[serde(rename = "Nazwa")]
    pub name: String,
}

/// Identifier/name pair with an additional short code
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodedName {
    /// Upstream identifier
    #[serde(rename = "ID")]
    pub id: i64,
    /// Display name
    #[serde(rename = "Nazwa")]
    pub name: String,
    /// Short code
    #[serde(rename = "Kod")]
    pub code: String,
}

/// Top-level entry of the results payload
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResultGroup {
    /// Upstream identifier of the group
    #[serde(rename = "ID")]
    pub id: i64,
    /// Group display name
    #[serde(rename = "Nazwa")]
    pub name: String,
    /// Exam sessions in this group
    #[serde(rename = "Sesje")]
    pub sessions: Vec<ExamSession>,
}

/// One exam session, the unit results are grouped under for display
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExamSession {
    /// Session identifier; half of a record's identity
    #[serde(rename = "ID")]
    pub id: i64,
    /// Session display name
    #[serde(rename = "Nazwa")]
    pub name: String,
    /// Identifier of the session in the source register
    #[serde(rename = "ObcaSesjaID")]
    pub foreign_session_id: i64,
    /// School year label, e.g. "2024/2025"
    #[serde(rename = "RokSzkolny")]
    pub school_year: String,
    /// Session type descriptor
    #[serde(rename = "TypSesji")]
    pub session_type: IdName,
    /// Epoch seconds the session opened
    #[serde(rename = "DataOtwarciaSesji")]
    pub opened_at: i64,
    /// Epoch seconds the session closed
    #[serde(rename = "DataZamknieciaSesji")]
    pub closed_at: i64,
    /// Epoch seconds the results were published
    #[serde(rename = "DataPublikacjiWynikow")]
    pub results_published_at: i64,
    /// Result records in this session
    #[serde(rename = "Wyniki")]
    pub results: Vec<ExamResult>,
    /// Issuing institution name, shown in the session header
    #[serde(rename = "PlacowkaNazwa")]
    pub institution_name: String,
}

/// Account descriptor attached to each result
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Account {
    /// Account identifier
    #[serde(rename = "ID")]
    pub id: i64,
    /// Account login
    #[serde(rename = "Login")]
    pub login: String,
    /// Whether the login exists in the register
    #[serde(rename = "CzyIstniejeLogin")]
    pub login_exists: bool,
}

/// One exam result record
///
/// Immutable once fetched; identified by the (session id, result id) pair.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExamResult {
    /// Result identifier; half of a record's identity
    #[serde(rename = "ID")]
    pub id: i64,
    /// School register (RSPO) number
    #[serde(rename = "Rspo")]
    pub rspo: i64,
    /// Regional examination board identifier
    #[serde(rename = "OkeID")]
    pub oke_id: i64,
    /// Account the result belongs to
    #[serde(rename = "Uzytkownik")]
    pub account: Account,
    /// The exam occurrence this result grades
    #[serde(rename = "EgzaminWSesji")]
    pub exam_in_session: ExamInSession,
    /// Answer sheet code
    #[serde(rename = "KodArkusza")]
    pub sheet_code: String,
    /// Where the result document was issued
    #[serde(rename = "MiejsceWydania")]
    pub issue_place: String,
    /// Epoch seconds the result document was issued
    #[serde(rename = "DataWydania")]
    pub issued_at: i64,
    /// Number of the issued result document
    #[serde(rename = "NumerWydanegoDokumentu")]
    pub document_number: String,
    /// Percentile rank
    #[serde(rename = "Centyle")]
    pub percentile: i64,
    /// Percentage score
    #[serde(rename = "Procent")]
    pub percent: i64,
    /// Maximum attainable points
    #[serde(rename = "MaxPunkty")]
    pub max_points: f64,
    /// Points earned
    #[serde(rename = "UzyskanePunkty")]
    pub earned_points: f64,
    /// Result state descriptor
    #[serde(rename = "StanWyniku")]
    pub result_state: IdName,
    /// Exam-taking state descriptor
    #[serde(rename = "StanZdawaniaEgzaminu")]
    pub taking_state: IdName,
    /// Whether the exam was mandatory
    #[serde(rename = "CzyObowiazkowy")]
    pub mandatory: bool,
}

/// The exam as scheduled within a session
///
/// The wire format nests a full copy of the enclosing session here; the
/// formatter never reads it, so it is dropped at the parse boundary.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExamInSession {
    /// Occurrence identifier
    #[serde(rename = "ID")]
    pub id: i64,
    /// Identifier of the underlying exam
    #[serde(rename = "EgzaminID")]
    pub exam_id: i64,
    /// The exam itself
    #[serde(rename = "Egzamin")]
    pub exam: Exam,
    /// Identifier of the enclosing session
    #[serde(rename = "SesjaID")]
    pub session_id: i64,
    /// Epoch seconds the exam was held
    #[serde(rename = "Termin")]
    pub held_at: i64,
}

/// The exam definition
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Exam {
    /// Exam identifier
    #[serde(rename = "ID")]
    pub id: i64,
    /// Exam display name
    #[serde(rename = "Nazwa")]
    pub name: String,
    /// Exam code
    #[serde(rename = "Kod")]
    pub code: String,
    /// KREM register code
    #[serde(rename = "KodKrem")]
    pub krem_code: String,
    /// Taking mode (written, oral, ...)
    #[serde(rename = "FormaZdawania")]
    pub mode: CodedName,
    /// Taking level (basic, extended, ...)
    #[serde(rename = "PoziomZdawania")]
    pub level: IdName,
    /// Exam language
    #[serde(rename = "JezykZdawania")]
    pub language: CodedName,
    /// Whether the account was exempted from this exam
    #[serde(rename = "CzyZwolnienieZEgzaminu")]
    pub exempted: bool,
    /// Whether the exam was withdrawn
    #[serde(rename = "CzyWycofany")]
    pub withdrawn: bool,
}

/// Parse the raw results payload into the typed tree
///
/// # Errors
/// Returns [`crate::Error::Parse`] when the payload is not valid JSON or a
/// field has the wrong type. Absent fields and unknown fields are tolerated.
pub fn parse_results(payload: &str) -> Result<Vec<ResultGroup>> {
    Ok(serde_json::from_str(payload)?)
}
