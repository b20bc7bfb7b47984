//! Shared fixtures for unit tests
//!
//! Builders for the upstream payload, both as wire JSON (parse, client and
//! poller tests) and as typed values (formatter tests). The numbers mirror a
//! plausible May-session mathematics result.

use crate::model::{
    Account, CodedName, ExamInSession, ExamResult, ExamSession, IdName, ResultGroup,
};

/// Wire JSON for one group holding one session with one result
pub(crate) fn sample_payload(session_id: i64, result_id: i64) -> String {
    format!(
        r#"[{{
            "ID": 1,
            "Nazwa": "Wyniki egzaminów",
            "Sesje": [{{
                "ID": {session_id},
                "Nazwa": "Sesja główna 2025",
                "ObcaSesjaID": 901,
                "RokSzkolny": "2024/2025",
                "TypSesji": {{"ID": 1, "Nazwa": "główna"}},
                "DataOtwarciaSesji": 1746432000,
                "DataZamknieciaSesji": 1751327999,
                "DataPublikacjiWynikow": 1751630400,
                "PlacowkaNazwa": "Okręgowa Komisja Egzaminacyjna w Krakowie",
                "Wyniki": [{{
                    "ID": {result_id},
                    "Rspo": 123456,
                    "OkeID": 6,
                    "Uzytkownik": {{"ID": 42, "Login": "uczen", "CzyIstniejeLogin": true}},
                    "EgzaminWSesji": {{
                        "ID": 77,
                        "EgzaminID": 5,
                        "SesjaID": {session_id},
                        "Termin": 1746432000,
                        "Egzamin": {{
                            "ID": 5,
                            "Nazwa": "Matematyka",
                            "Kod": "MMA",
                            "KodKrem": "MMA-P",
                            "FormaZdawania": {{"ID": 1, "Nazwa": "pisemna", "Kod": "P"}},
                            "PoziomZdawania": {{"ID": 1, "Nazwa": "podstawowy"}},
                            "JezykZdawania": {{"ID": 1, "Nazwa": "polski", "Kod": "PL"}},
                            "CzyZwolnienieZEgzaminu": false,
                            "CzyWycofany": false
                        }}
                    }},
                    "KodArkusza": "MMA-P1_100",
                    "MiejsceWydania": "Kraków",
                    "DataWydania": 1751630400,
                    "NumerWydanegoDokumentu": "MAT/2025/0042",
                    "Centyle": 87,
                    "Procent": 76,
                    "MaxPunkty": 50.0,
                    "UzyskanePunkty": 38.0,
                    "StanWyniku": {{"ID": 2, "Nazwa": "opublikowany"}},
                    "StanZdawaniaEgzaminu": {{"ID": 1, "Nazwa": "przystąpił"}},
                    "CzyObowiazkowy": true
                }}]
            }}]
        }}]"#
    )
}

/// Typed result record matching [`sample_payload`]
pub(crate) fn sample_result(session_id: i64, result_id: i64) -> ExamResult {
    ExamResult {
        id: result_id,
        rspo: 123456,
        oke_id: 6,
        account: Account {
            id: 42,
            login: "uczen".into(),
            login_exists: true,
        },
        exam_in_session: ExamInSession {
            id: 77,
            exam_id: 5,
            session_id,
            held_at: 1_746_432_000,
            exam: crate::model::Exam {
                id: 5,
                name: "Matematyka".into(),
                code: "MMA".into(),
                krem_code: "MMA-P".into(),
                mode: CodedName {
                    id: 1,
                    name: "pisemna".into(),
                    code: "P".into(),
                },
                level: IdName {
                    id: 1,
                    name: "podstawowy".into(),
                },
                language: CodedName {
                    id: 1,
                    name: "polski".into(),
                    code: "PL".into(),
                },
                exempted: false,
                withdrawn: false,
            },
        },
        sheet_code: "MMA-P1_100".into(),
        issue_place: "Kraków".into(),
        issued_at: 1_751_630_400,
        document_number: "MAT/2025/0042".into(),
        percentile: 87,
        percent: 76,
        max_points: 50.0,
        earned_points: 38.0,
        result_state: IdName {
            id: 2,
            name: "opublikowany".into(),
        },
        taking_state: IdName {
            id: 1,
            name: "przystąpił".into(),
        },
        mandatory: true,
    }
}

/// Typed group holding one session with the given results
pub(crate) fn sample_group(session_id: i64, results: Vec<ExamResult>) -> ResultGroup {
    ResultGroup {
        id: 1,
        name: "Wyniki egzaminów".into(),
        sessions: vec![ExamSession {
            id: session_id,
            name: "Sesja główna 2025".into(),
            foreign_session_id: 901,
            school_year: "2024/2025".into(),
            session_type: IdName {
                id: 1,
                name: "główna".into(),
            },
            opened_at: 1_746_432_000,
            closed_at: 1_751_327_999,
            results_published_at: 1_751_630_400,
            results,
            institution_name: "Okręgowa Komisja Egzaminacyjna w Krakowie".into(),
        }],
    }
}
