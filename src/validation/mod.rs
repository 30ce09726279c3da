//! Pure form validation.
//!
//! Field primitives return `ValidationResult`; the form composites
//! aggregate them into a per-field error map keyed by the wire field
//! name. Nothing here touches storage or the clock except the due-date
//! rule, which compares against the local calendar day. Messages are the
//! user-facing strings the UI shows verbatim.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::models::{ListDraft, TaskDraft};

pub const MIN_NAME_LENGTH: usize = 2;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_TASK_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_LIST_NAME_LENGTH: usize = 50;
pub const MAX_LIST_DESCRIPTION_LENGTH: usize = 200;

/// Trivial passwords rejected regardless of length.
const DENIED_PASSWORDS: [&str; 6] = [
    "123456", "password", "senha123", "qwerty", "abc123", "111111",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormReport {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl FormReport {
    fn new() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    fn push(&mut self, field: &str, result: ValidationResult) {
        if !result.is_valid {
            self.is_valid = false;
            self.errors
                .entry(field.to_string())
                .or_insert(result.message);
        }
    }
}

pub fn required(value: &str, field: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::fail(format!("{field} é obrigatório"))
    } else {
        ValidationResult::ok()
    }
}

/// Shape check for emails: nonempty local and domain parts, no whitespace
/// or second `@`, and a dotted domain.
pub fn email(value: &str) -> ValidationResult {
    let well_formed = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !local.chars().any(char::is_whitespace)
                && !domain.contains('@')
                && !domain.chars().any(char::is_whitespace)
                && domain
                    .split_once('.')
                    .map(|(head, tail)| !head.is_empty() && !tail.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    };
    if well_formed {
        ValidationResult::ok()
    } else {
        ValidationResult::fail("Email deve ter um formato válido")
    }
}

pub fn min_length(value: &str, min: usize, field: &str) -> ValidationResult {
    if value.chars().count() >= min {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(format!("{field} deve ter pelo menos {min} caracteres"))
    }
}

pub fn max_length(value: &str, max: usize, field: &str) -> ValidationResult {
    if value.chars().count() <= max {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(format!("{field} deve ter no máximo {max} caracteres"))
    }
}

pub fn password(value: &str) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::fail("Senha é obrigatória");
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return ValidationResult::fail(format!(
            "Senha deve ter pelo menos {MIN_PASSWORD_LENGTH} caracteres"
        ));
    }
    if DENIED_PASSWORDS.contains(&value.to_lowercase().as_str()) {
        return ValidationResult::fail("Senha muito comum, escolha outra");
    }
    ValidationResult::ok()
}

pub fn password_confirmation(password: &str, confirmation: &str) -> ValidationResult {
    if password == confirmation {
        ValidationResult::ok()
    } else {
        ValidationResult::fail("Senhas não coincidem")
    }
}

pub fn due_date(date: NaiveDate, today: NaiveDate) -> ValidationResult {
    if date < today {
        ValidationResult::fail("Data de vencimento não pode ser anterior a hoje")
    } else {
        ValidationResult::ok()
    }
}

pub fn login_form(email_value: &str, password_value: &str) -> FormReport {
    let mut report = FormReport::new();

    let email_required = required(email_value, "Email");
    if email_required.is_valid {
        report.push("email", email(email_value));
    } else {
        report.push("email", email_required);
    }

    report.push("password", required(password_value, "Senha"));
    report
}

pub fn register_form(
    name: &str,
    email_value: &str,
    password_value: &str,
    confirmation: Option<&str>,
) -> FormReport {
    let mut report = FormReport::new();

    let name_required = required(name, "Nome");
    if name_required.is_valid {
        report.push("name", min_length(name, MIN_NAME_LENGTH, "Nome"));
    } else {
        report.push("name", name_required);
    }

    let email_required = required(email_value, "Email");
    if email_required.is_valid {
        report.push("email", email(email_value));
    } else {
        report.push("email", email_required);
    }

    report.push("password", password(password_value));

    if let Some(confirmation) = confirmation {
        report.push(
            "confirmPassword",
            password_confirmation(password_value, confirmation),
        );
    }

    report
}

pub fn task_form(draft: &TaskDraft) -> FormReport {
    let mut report = FormReport::new();

    let title_required = required(&draft.title, "Título");
    if title_required.is_valid {
        report.push(
            "title",
            max_length(&draft.title, MAX_TITLE_LENGTH, "Título"),
        );
    } else {
        report.push("title", title_required);
    }

    if !draft.description.is_empty() {
        report.push(
            "description",
            max_length(&draft.description, MAX_TASK_DESCRIPTION_LENGTH, "Descrição"),
        );
    }

    if let Some(date) = draft.due_date {
        report.push("dueDate", due_date(date, Local::now().date_naive()));
    }

    report
}

pub fn list_form(draft: &ListDraft) -> FormReport {
    let mut report = FormReport::new();

    let name_required = required(&draft.name, "Nome da lista");
    if name_required.is_valid {
        report.push(
            "name",
            max_length(&draft.name, MAX_LIST_NAME_LENGTH, "Nome da lista"),
        );
    } else {
        report.push("name", name_required);
    }

    if !draft.description.is_empty() {
        report.push(
            "description",
            max_length(&draft.description, MAX_LIST_DESCRIPTION_LENGTH, "Descrição"),
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_values() {
        assert!(!required("", "Campo").is_valid);
        assert!(!required("   ", "Campo").is_valid);
        assert_eq!(required("", "Nome").message, "Nome é obrigatório");
        assert!(required("x", "Campo").is_valid);
    }

    #[test]
    fn email_accepts_common_shapes_and_rejects_broken_ones() {
        assert!(email("ana@x.com").is_valid);
        assert!(email("ana.silva@sub.example.org").is_valid);

        for bad in ["", "ana", "ana@", "@x.com", "ana@x", "ana@.com", "ana@x.", "a na@x.com", "ana@@x.com"] {
            assert!(!email(bad).is_valid, "should reject {bad:?}");
        }
    }

    #[test]
    fn length_checks_count_characters_not_bytes() {
        assert!(min_length("çã", 2, "Nome").is_valid);
        assert!(!min_length("ç", 2, "Nome").is_valid);
        assert!(max_length("título", 6, "Título").is_valid);
        assert!(!max_length("título!", 6, "Título").is_valid);
        // Empty optional fields pass the max check.
        assert!(max_length("", 10, "Descrição").is_valid);
    }

    #[test]
    fn password_enforces_length_and_deny_list() {
        assert_eq!(password("").message, "Senha é obrigatória");
        assert!(!password("abc").is_valid);
        assert!(!password("123456").is_valid);
        assert!(!password("QWERTY").is_valid);
        assert!(password("abcdef").is_valid);
    }

    #[test]
    fn password_confirmation_must_match() {
        assert!(password_confirmation("abcdef", "abcdef").is_valid);
        assert!(!password_confirmation("abcdef", "abcdeg").is_valid);
    }

    #[test]
    fn due_date_rejects_the_past_but_allows_today() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        assert!(due_date(today, today).is_valid);
        assert!(due_date(today.succ_opt().unwrap(), today).is_valid);
        assert!(!due_date(today.pred_opt().unwrap(), today).is_valid);
    }

    #[test]
    fn login_form_collects_field_errors() {
        let report = login_form("", "");
        assert!(!report.is_valid);
        assert_eq!(report.errors["email"], "Email é obrigatório");
        assert_eq!(report.errors["password"], "Senha é obrigatória");

        let report = login_form("ana@", "abcdef");
        assert!(!report.is_valid);
        assert_eq!(report.errors["email"], "Email deve ter um formato válido");

        assert!(login_form("ana@x.com", "abcdef").is_valid);
    }

    #[test]
    fn register_form_checks_every_field() {
        let report = register_form("A", "ana@x.com", "abc", Some("xyz"));
        assert!(!report.is_valid);
        assert_eq!(report.errors["name"], "Nome deve ter pelo menos 2 caracteres");
        assert_eq!(
            report.errors["password"],
            "Senha deve ter pelo menos 6 caracteres"
        );
        assert_eq!(report.errors["confirmPassword"], "Senhas não coincidem");

        let report = register_form("Ana", "ana@x.com", "abcdef", Some("abcdef"));
        assert!(report.is_valid);
        assert!(report.errors.is_empty());

        // Confirmation is only checked when the form carries the field.
        assert!(register_form("Ana", "ana@x.com", "abcdef", None).is_valid);
    }

    #[test]
    fn task_form_enforces_title_and_limits() {
        let report = task_form(&TaskDraft::default());
        assert!(!report.is_valid);
        assert_eq!(report.errors["title"], "Título é obrigatório");

        let report = task_form(&TaskDraft {
            title: "t".repeat(MAX_TITLE_LENGTH + 1),
            ..TaskDraft::default()
        });
        assert_eq!(
            report.errors["title"],
            "Título deve ter no máximo 100 caracteres"
        );

        let report = task_form(&TaskDraft {
            title: "ok".into(),
            description: "d".repeat(MAX_TASK_DESCRIPTION_LENGTH + 1),
            ..TaskDraft::default()
        });
        assert_eq!(
            report.errors["description"],
            "Descrição deve ter no máximo 500 caracteres"
        );

        let report = task_form(&TaskDraft {
            title: "ok".into(),
            due_date: NaiveDate::from_ymd_opt(2000, 1, 1),
            ..TaskDraft::default()
        });
        assert_eq!(
            report.errors["dueDate"],
            "Data de vencimento não pode ser anterior a hoje"
        );

        let report = task_form(&TaskDraft {
            title: "ok".into(),
            due_date: NaiveDate::from_ymd_opt(2099, 12, 31),
            ..TaskDraft::default()
        });
        assert!(report.is_valid);
    }

    #[test]
    fn list_form_enforces_name_and_limits() {
        let report = list_form(&ListDraft::default());
        assert_eq!(report.errors["name"], "Nome da lista é obrigatório");

        let report = list_form(&ListDraft {
            name: "n".repeat(MAX_LIST_NAME_LENGTH + 1),
            description: "d".repeat(MAX_LIST_DESCRIPTION_LENGTH + 1),
        });
        assert!(!report.is_valid);
        assert_eq!(
            report.errors["name"],
            "Nome da lista deve ter no máximo 50 caracteres"
        );
        assert_eq!(
            report.errors["description"],
            "Descrição deve ter no máximo 200 caracteres"
        );

        assert!(list_form(&ListDraft {
            name: "Mercado".into(),
            description: String::new(),
        })
        .is_valid);
    }
}
