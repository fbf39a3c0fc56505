use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date};

use crate::{error::ApiError, transactions::repo::TransactionKind};

/// Request body for adding a transaction. Fields are loose on purpose so
/// that absent values reach `validate` instead of failing JSON extraction;
/// the original service reported all input faults through its own error
/// path.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A validated transaction, ready to persist.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub date: Date,
}

impl CreateTransactionRequest {
    pub fn validate(self) -> Result<NewTransaction, ApiError> {
        let description = self
            .description
            .filter(|d| !d.is_empty())
            .ok_or_else(|| ApiError::Validation("description is required".into()))?;

        let amount = self
            .amount
            .ok_or_else(|| ApiError::Validation("amount is required".into()))?;
        if amount.is_sign_negative() {
            return Err(ApiError::Validation("amount must not be negative".into()));
        }

        let kind = match self.kind.as_deref() {
            Some("income") => TransactionKind::Income,
            Some("expense") => TransactionKind::Expense,
            _ => {
                return Err(ApiError::Validation(
                    "type must be income or expense".into(),
                ))
            }
        };

        let date_str = self
            .date
            .ok_or_else(|| ApiError::Validation("date is required".into()))?;
        let format = format_description!("[year]-[month]-[day]");
        let date = Date::parse(&date_str, &format)
            .map_err(|_| ApiError::Validation("date must be YYYY-MM-DD".into()))?;

        Ok(NewTransaction {
            description,
            amount,
            kind,
            date,
        })
    }
}

/// Response body for a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> CreateTransactionRequest {
        serde_json::from_str(json).expect("request json")
    }

    #[test]
    fn valid_input_passes() {
        let new = request(r#"{"description":"salary","amount":1000,"type":"income","date":"2024-01-01"}"#)
            .validate()
            .expect("valid input");
        assert_eq!(new.description, "salary");
        assert_eq!(new.amount, Decimal::new(1000, 0));
        assert_eq!(new.kind, TransactionKind::Income);
    }

    #[test]
    fn string_amounts_are_accepted() {
        let new = request(r#"{"description":"rent","amount":"850.50","type":"expense","date":"2024-02-01"}"#)
            .validate()
            .expect("valid input");
        assert_eq!(new.amount, Decimal::new(85050, 2));
    }

    #[test]
    fn empty_description_is_rejected() {
        let err = request(r#"{"description":"","amount":10,"type":"income","date":"2024-01-01"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn missing_fields_are_rejected() {
        for json in [
            r#"{"amount":10,"type":"income","date":"2024-01-01"}"#,
            r#"{"description":"x","type":"income","date":"2024-01-01"}"#,
            r#"{"description":"x","amount":10,"date":"2024-01-01"}"#,
            r#"{"description":"x","amount":10,"type":"income"}"#,
        ] {
            assert!(request(json).validate().is_err(), "accepted: {json}");
        }
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = request(r#"{"description":"x","amount":-5,"type":"expense","date":"2024-01-01"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = request(r#"{"description":"x","amount":5,"type":"transfer","date":"2024-01-01"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn unparsable_date_is_rejected() {
        let err = request(r#"{"description":"x","amount":5,"type":"income","date":"January 1st"}"#)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
